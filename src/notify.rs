//! User-facing notifications.

use crate::error::{Error, ErrorKind};
use std::fmt;

/// Severity of a notification; the UI maps this to toast styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    /// Dialog title for errors; toasts have none.
    pub title: Option<String>,
    pub message: String,
}

impl Notification {
    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: None,
            message: message.into(),
        }
    }

    /// Informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title: None,
            message: message.into(),
        }
    }

    /// Error dialog.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: Some(title.into()),
            message: message.into(),
        }
    }

    /// Notification for a failed operation. Cancellation is silent.
    #[must_use]
    pub fn for_error(err: &Error) -> Option<Self> {
        let notification = match err.kind() {
            ErrorKind::Cancelled => return None,
            ErrorKind::NotFound => Self::info(match err {
                Error::NotFound { needle } => format!("No match for \"{needle}\""),
                _ => "No match".to_string(),
            }),
            ErrorKind::PersistenceFailed => {
                let title = match err {
                    Error::PersistenceFailed { op, .. } if op.starts_with("open") => {
                        "Error opening file"
                    }
                    _ => "Error saving file",
                };
                Self::error(
                    title,
                    format!("{err}. Check permissions and try again."),
                )
            }
            ErrorKind::Unavailable => Self::error("Not available", err.to_string()),
            ErrorKind::InvalidName => Self::error("Invalid file name", err.to_string()),
            ErrorKind::InvalidConfig => Self::error("Configuration error", err.to_string()),
        };
        Some(notification)
    }

    /// Check if this reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{title}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_silent() {
        assert_eq!(Notification::for_error(&Error::Cancelled), None);
    }

    #[test]
    fn test_persistence_failure_is_error_dialog() {
        let n = Notification::for_error(&Error::persistence("save", "permission denied")).unwrap();
        assert!(n.is_error());
        assert_eq!(n.title.as_deref(), Some("Error saving file"));
        assert!(n.message.contains("permission denied"));

        let n = Notification::for_error(&Error::persistence("open", "gone")).unwrap();
        assert_eq!(n.title.as_deref(), Some("Error opening file"));
    }

    #[test]
    fn test_not_found_is_distinguishable() {
        let n = Notification::for_error(&Error::NotFound {
            needle: "zebra".into(),
        })
        .unwrap();
        assert_eq!(n.level, Level::Info);
        assert_eq!(n.to_string(), "No match for \"zebra\"");
    }
}
