use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::Capability;

/// Gateway-wide error model shared by the adapter and the dispatcher.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Caller-supplied arguments were missing or had the wrong type.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// The remote API answered with a non-success status or was unreachable.
    #[error("{message}")]
    Upstream {
        message: String,
        status: Option<u16>,
        details: Option<JsonValue>,
    },

    /// The capability is unavailable to standard applications; no call is made.
    #[error("{}: {}", .0.failure_context(), .0.reason())]
    PermissionRequired(Capability),

    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn upstream(message: impl Into<String>) -> Self {
        GatewayError::Upstream {
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// Prefix an upstream message with the step that produced it, keeping status and details.
    pub fn context(self, step: &str) -> Self {
        match self {
            GatewayError::Upstream {
                message,
                status,
                details,
            } => GatewayError::Upstream {
                message: format!("{step}: {message}"),
                status,
                details,
            },
            other => other,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// True for errors that must surface as protocol faults rather than tool content.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidArgument(_)
                | GatewayError::UnknownTool(_)
                | GatewayError::UnknownResource(_)
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Upstream {
            message: e.to_string(),
            status: e.status().map(|s| s.as_u16()),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_upstream_message() {
        let e = GatewayError::upstream("boom");
        assert_eq!(e.to_string(), "boom");
    }

    #[test]
    fn context_prefixes_upstream_and_keeps_status() {
        let e = GatewayError::Upstream {
            message: "Invalid access token".into(),
            status: Some(401),
            details: None,
        }
        .context("Failed to get profile");
        assert_eq!(e.to_string(), "Failed to get profile: Invalid access token");
        assert_eq!(e.status(), Some(401));
    }

    #[test]
    fn context_leaves_other_variants_alone() {
        let e = GatewayError::InvalidArgument("text must be a string".into()).context("x");
        assert_eq!(e.to_string(), "text must be a string");
    }

    #[test]
    fn permission_required_names_capability() {
        let e = GatewayError::PermissionRequired(Capability::Messaging);
        let s = e.to_string();
        assert!(s.starts_with("Failed to send message: "));
        assert!(s.contains("requires elevated LinkedIn API permissions"));
        assert!(!e.is_caller_error());
    }

    #[test]
    fn routing_misses_are_caller_errors() {
        assert!(GatewayError::UnknownTool("x".into()).is_caller_error());
        assert!(GatewayError::UnknownResource("x".into()).is_caller_error());
        assert!(!GatewayError::upstream("x").is_caller_error());
    }
}
