//! Parser error types.

use std::time::Duration;

/// Error aborting a parse.
///
/// Grammar mismatches are not errors: a rule that does not match simply
/// backtracks. The only fatal condition is running out of time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Parsing took longer than the configured budget.
    #[error("parsing exceeded time budget of {}ms", .limit.as_millis())]
    Timeout {
        /// The configured budget.
        limit: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = ParseError::Timeout {
            limit: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "parsing exceeded time budget of 1500ms");
    }
}
