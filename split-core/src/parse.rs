//! Parsing of user-typed numbers.
//!
//! Input arrives as raw text from the presentation layer. Empty text is a
//! meaningful "nothing entered"; anything else must be a decimal number or it
//! is rejected with [`ParseDecimalError`].

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseDecimalError {
    /// The text as the user typed it.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// currency sign or trailing percent sign, and removes commas (thousands
/// separator).
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses a string into an optional [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`), a leading `$`
/// and a trailing `%`. Returns `Ok(None)` for empty or whitespace-only input
/// and an error (logged as a warning) when non-empty input is not a number.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_accepts_plain_decimal() {
        assert_eq!(parse_optional_decimal("12.50").unwrap(), Some(dec!(12.50)));
    }

    #[test]
    fn parse_accepts_comma_thousands_separator() {
        assert_eq!(
            parse_optional_decimal("1,234.56").unwrap(),
            Some(dec!(1234.56))
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(
            parse_optional_decimal("  123.45  ").unwrap(),
            Some(dec!(123.45))
        );
    }

    #[test]
    fn parse_strips_currency_and_percent_signs() {
        assert_eq!(parse_optional_decimal("$9.99").unwrap(), Some(dec!(9.99)));
        assert_eq!(parse_optional_decimal("8.5%").unwrap(), Some(dec!(8.5)));
    }

    #[test]
    fn parse_empty_is_none() {
        assert_eq!(parse_optional_decimal("").unwrap(), None);
        assert_eq!(parse_optional_decimal("   ").unwrap(), None);
    }

    #[test]
    fn parse_invalid_returns_error_with_input() {
        let err = parse_optional_decimal("abc").unwrap_err();

        assert_eq!(err.input(), "abc");
    }

    #[test]
    fn parse_rejects_nan_text() {
        assert!(parse_optional_decimal("NaN").is_err());
    }
}
