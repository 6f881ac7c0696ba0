pub mod app;
pub mod command;
pub mod config;
pub mod logging;
pub mod session;
pub mod view;

pub use app::run;
pub use command::{Command, CommandError};
pub use config::{AppConfig, ConfigError};
pub use session::{Action, Session};
