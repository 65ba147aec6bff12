//! Agent catalog model.
//!
//! Agents are the deployments studies are recorded against. Each carries
//! the average/default variables the projection path feeds to the metrics
//! engine, plus adoption-tracking fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Deployment status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    /// Agent is deployed and in use.
    Active,
    /// Agent has been retired or paused.
    Inactive,
}

impl AgentStatus {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// An AI-agent deployment tracked by the analytics store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AgentRecord {
    /// Auto-generated agent ID.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Business category (e.g. "Customer Support").
    pub category: String,
    /// Deployment status: "active" or "inactive".
    pub status: String,
    /// Average task minutes without the agent.
    pub avg_time_without_agent_mins: f64,
    /// Average task minutes with the agent.
    pub avg_time_with_agent_mins: f64,
    /// Average annual task occurrences.
    pub avg_usage_count: i64,
    /// Default adoption discount percent (0-100).
    pub default_usage_discount_pct: f64,
    /// Average hourly wage / cost per employee hour.
    pub avg_hourly_wage: f64,
    /// Number of employees the agent could reach.
    pub target_user_base: i64,
    /// Employees actively using the agent today.
    pub current_active_users: i64,
    /// How the adoption numbers were gathered.
    pub methodology: Option<String>,
    /// When the adoption numbers were last refreshed.
    pub adoption_updated_at: Option<NaiveDate>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AgentRecord {
    /// Returns true if the agent is currently deployed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Returns the parsed deployment status.
    #[must_use]
    pub fn parsed_status(&self) -> Option<AgentStatus> {
        AgentStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_agent() -> AgentRecord {
        AgentRecord {
            id: 1,
            name: "Ticket Triage".to_string(),
            category: "Customer Support".to_string(),
            status: AgentStatus::Active.as_str().to_string(),
            avg_time_without_agent_mins: 20.0,
            avg_time_with_agent_mins: 10.0,
            avg_usage_count: 20000,
            default_usage_discount_pct: 50.0,
            avg_hourly_wage: 50.0,
            target_user_base: 120,
            current_active_users: 45,
            methodology: Some("shadowing sample".to_string()),
            adoption_updated_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_agent_status_as_str() {
        assert_eq!(AgentStatus::Active.as_str(), "active");
        assert_eq!(AgentStatus::Inactive.as_str(), "inactive");
    }

    #[test]
    fn test_agent_status_parse() {
        assert_eq!(AgentStatus::parse("active"), Some(AgentStatus::Active));
        assert_eq!(AgentStatus::parse("INACTIVE"), Some(AgentStatus::Inactive));
        assert_eq!(AgentStatus::parse("retired"), None);
    }

    #[test]
    fn test_agent_is_active() {
        let mut agent = sample_agent();
        assert!(agent.is_active());
        assert_eq!(agent.parsed_status(), Some(AgentStatus::Active));

        agent.status = "inactive".to_string();
        assert!(!agent.is_active());
    }

    #[test]
    fn test_agent_serialization_roundtrip() {
        let agent = sample_agent();
        let json = serde_json::to_string(&agent).expect("serialization failed");
        let back: AgentRecord = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(back.name, agent.name);
        assert_eq!(back.avg_usage_count, agent.avg_usage_count);
        assert_eq!(back.methodology, agent.methodology);
    }
}
