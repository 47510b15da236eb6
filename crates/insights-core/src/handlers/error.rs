//! Command Error Envelope
//!
//! What a rejected action hands back to the UI.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Security,
    Upstream,
    NotFound,
}

/// Serializable failure of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl CommandError {
    /// Upstream failure with a user-facing message; the cause is logged only
    pub fn upstream(message: &str, cause: &DomainError) -> Self {
        log::error!("{}: {}", message, cause);
        Self {
            kind: ErrorKind::Upstream,
            message: message.to_string(),
            field: None,
        }
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => {
                log::warn!("rejected {}: {}", field, message);
                Self {
                    kind: ErrorKind::Validation,
                    message,
                    field: Some(field.to_string()),
                }
            }
            DomainError::Security(reason) => {
                log::error!("security check failed: {}", reason);
                Self {
                    kind: ErrorKind::Security,
                    message: "Security check failed".to_string(),
                    field: None,
                }
            }
            DomainError::NotFound(what) => Self {
                kind: ErrorKind::NotFound,
                message: format!("Not found: {}", what),
                field: None,
            },
            upstream @ DomainError::Upstream(_) => {
                CommandError::upstream("Request failed. Please try again.", &upstream)
            }
        }
    }
}

/// Map an error, replacing upstream messages with an action-specific one
pub(crate) fn or_upstream(message: &'static str) -> impl Fn(DomainError) -> CommandError {
    move |err| match err {
        DomainError::Upstream(_) => CommandError::upstream(message, &err),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_keeps_field() {
        let err: CommandError = DomainError::validation("min_stock", "Minimum stock must be a positive number.").into();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("min_stock"));
        assert_eq!(err.message, "Minimum stock must be a positive number.");
    }

    #[test]
    fn test_upstream_hides_cause() {
        let map = or_upstream("Failed to load categories. Please try again.");
        let err = map(DomainError::Upstream("disk I/O error".to_string()));
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serialized_shape() {
        let err: CommandError = DomainError::Security("bad token".to_string()).into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "security");
        assert!(json.get("field").is_none());
    }
}
