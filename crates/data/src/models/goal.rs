//! Savings goal model.
//!
//! Goals are maintained elsewhere; this service only reads them into the
//! assistant data snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    /// Tracking toward the target.
    OnTrack,
    /// Slipping but recoverable.
    AtRisk,
    /// Off target.
    Behind,
}

impl GoalStatus {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::AtRisk => "at_risk",
            Self::Behind => "behind",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "on_track" => Some(Self::OnTrack),
            "at_risk" => Some(Self::AtRisk),
            "behind" => Some(Self::Behind),
            _ => None,
        }
    }
}

/// Whether a goal is measured against projected or actual figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalDataSource {
    /// Measured against per-agent projections.
    Projected,
    /// Measured against recorded studies.
    Actual,
}

impl GoalDataSource {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projected => "projected",
            Self::Actual => "actual",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "projected" => Some(Self::Projected),
            "actual" => Some(Self::Actual),
            _ => None,
        }
    }
}

/// A savings target for one agent or the whole organization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GoalRecord {
    /// Auto-generated goal ID.
    pub id: i32,
    /// Target agent; None for an org-wide goal.
    pub agent_id: Option<i32>,
    /// Display name.
    pub name: String,
    /// Which metric the target applies to.
    pub target_metric: String,
    /// Target value for the metric.
    pub target_value: f64,
    /// Progress status: "on_track", "at_risk", or "behind".
    pub status: String,
    /// Data source: "projected" or "actual".
    pub data_source: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl GoalRecord {
    /// Returns the parsed progress status.
    #[must_use]
    pub fn parsed_status(&self) -> Option<GoalStatus> {
        GoalStatus::parse(&self.status)
    }

    /// Returns the parsed data source.
    #[must_use]
    pub fn parsed_data_source(&self) -> Option<GoalDataSource> {
        GoalDataSource::parse(&self.data_source)
    }

    /// Returns true for organization-wide goals.
    #[must_use]
    pub fn is_org_wide(&self) -> bool {
        self.agent_id.is_none()
    }
}
