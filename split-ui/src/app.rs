//! The interactive event loop.
//!
//! Commands are read line by line and handled immediately. A sales-tax
//! lookup runs on its own task and reports back over a channel, so the
//! prompt stays usable while it is outstanding. Several lookups may be in
//! flight at once; each result is applied as it arrives, with no
//! cancellation of older requests.

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use split_core::{LookupError, TaxLookupService};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::{debug, info};

use crate::{
    command::{Command, HELP},
    session::{Action, Session},
    view::BillView,
};

type LookupOutcome = Result<Decimal, LookupError>;

/// Runs the session until `quit` or end of input, then returns it.
///
/// At end of input the loop keeps waiting for lookups still in flight so
/// their outcome is not lost.
pub async fn run<R, W>(
    mut session: Session,
    lookup: Arc<dyn TaxLookupService>,
    input: R,
    mut output: W,
) -> Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<LookupOutcome>();
    let mut lines = input.lines();
    let mut input_open = true;

    render(&mut session, &mut output).await?;

    loop {
        if !input_open && session.pending_lookups() == 0 {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("failed to read command")? else {
                    debug!("input closed");
                    input_open = false;
                    continue;
                };

                let action = match Command::parse(&line) {
                    Ok(command) => session.handle(command),
                    Err(e) => {
                        session.notify(e.to_string());
                        Action::Render
                    }
                };

                match action {
                    Action::Render => {}
                    Action::Help => {
                        output.write_all(HELP.as_bytes()).await?;
                        output.write_all(b"\n").await?;
                    }
                    Action::Lookup(city) => spawn_lookup(Arc::clone(&lookup), city, tx.clone()),
                    Action::Quit => break,
                }
            }
            Some(outcome) = rx.recv() => {
                session.apply_lookup(outcome);
            }
        }

        render(&mut session, &mut output).await?;
    }

    info!("session ended");
    output.flush().await?;
    Ok(session)
}

fn spawn_lookup(
    lookup: Arc<dyn TaxLookupService>,
    city: String,
    tx: mpsc::UnboundedSender<LookupOutcome>,
) {
    tokio::spawn(async move {
        let outcome = lookup.sales_tax_rate(&city).await;
        // The receiver is gone only when the session already ended.
        let _ = tx.send(outcome);
    });
}

async fn render<W>(
    session: &mut Session,
    output: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let text = BillView::new(session).to_string();
    // Alerts are one-shot: shown in this frame, gone from the next.
    session.take_alert();
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"> ").await?;
    output.flush().await.context("failed to write to terminal")
}
