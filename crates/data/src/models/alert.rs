//! Alert model.
//!
//! Alerts are raised elsewhere; this service only reads them into the
//! assistant data snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// A severity-tagged notification tied to an agent.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AlertRecord {
    /// Auto-generated alert ID.
    pub id: i32,
    /// Agent the alert concerns.
    pub agent_id: i32,
    /// Severity: "info", "warning", or "critical".
    pub severity: String,
    /// Human-readable message.
    pub message: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AlertRecord {
    /// Returns the parsed severity.
    #[must_use]
    pub fn parsed_severity(&self) -> Option<AlertSeverity> {
        AlertSeverity::parse(&self.severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_severity_roundtrip() {
        for severity in [
            AlertSeverity::Info,
            AlertSeverity::Warning,
            AlertSeverity::Critical,
        ] {
            assert_eq!(AlertSeverity::parse(severity.as_str()), Some(severity));
        }
        assert_eq!(AlertSeverity::parse("panic"), None);
    }
}
