//! Error types for the reminder bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use thiserror::Error;

/// Result type alias using the reminder bot's error type.
pub type Result<T> = std::result::Result<T, ReminderError>;

/// Which reminder field a parse failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTarget {
    Name,
    Description,
    Date,
    Time,
}

/// Domain error for reminder operations.
///
/// None of these are fatal: every variant maps to a message the user sees,
/// and the dispatcher keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// Blank text, or malformed date/time input
    #[error("could not parse {target:?} from '{input}'")]
    Parse { target: ParseTarget, input: String },

    /// Reminder no longer exists (stale button, deleted or already fired)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The timer facility refused the requested instant
    #[error("Scheduling error: {0}")]
    Scheduling(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReminderError {
    pub fn invalid_date(input: &str) -> Self {
        ReminderError::Parse {
            target: ParseTarget::Date,
            input: input.to_string(),
        }
    }

    pub fn invalid_time(input: &str) -> Self {
        ReminderError::Parse {
            target: ParseTarget::Time,
            input: input.to_string(),
        }
    }

    /// Empty or whitespace-only text where a name or description was expected
    pub fn blank(target: ParseTarget) -> Self {
        ReminderError::Parse {
            target,
            input: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_constructors() {
        assert_eq!(
            ReminderError::invalid_date("Jan 1"),
            ReminderError::Parse {
                target: ParseTarget::Date,
                input: "Jan 1".to_string()
            }
        );
        assert!(matches!(
            ReminderError::invalid_time("9am"),
            ReminderError::Parse {
                target: ParseTarget::Time,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_constructor() {
        assert_eq!(
            ReminderError::blank(ParseTarget::Name),
            ReminderError::Parse {
                target: ParseTarget::Name,
                input: String::new()
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = ReminderError::Scheduling("instant is in the past".to_string());
        assert_eq!(err.to_string(), "Scheduling error: instant is in the past");
    }
}
