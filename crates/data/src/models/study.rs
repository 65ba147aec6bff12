//! Time-and-motion study models.
//!
//! A study records measured task times before and after an agent, plus
//! the derived savings figures computed at write time. Derived columns
//! are nullable in storage so rows written by older tooling still load;
//! every write through this service fills them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A persisted time-and-motion study.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudyRecord {
    /// Auto-generated study ID.
    pub id: i32,
    /// Agent the study measured.
    pub agent_id: i32,
    /// What task was measured.
    pub task_description: String,
    /// Calendar date the measurement was taken.
    pub study_date: NaiveDate,
    /// Task minutes without AI assistance.
    pub time_without_ai_mins: f64,
    /// Task minutes with AI assistance.
    pub time_with_ai_mins: f64,
    /// Annual task occurrences.
    pub usage_count: i64,
    /// Adoption discount percent (0-100).
    pub usage_discount_pct: f64,
    /// Hourly cost of the people doing the task.
    pub cost_per_hour: f64,
    /// Free-form observations.
    pub notes: Option<String>,
    /// Derived: minutes saved per occurrence.
    pub time_saved_mins: Option<f64>,
    /// Derived: usage after the adoption discount.
    pub net_usage: Option<f64>,
    /// Derived: annual hours saved.
    pub net_time_saved_hours: Option<f64>,
    /// Derived: annual dollar savings.
    pub potential_savings: Option<f64>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A study joined with its agent's current display fields.
///
/// This is the atomic unit exchanged with the UI and the assistant
/// context builder: all raw inputs plus all four derived fields, with
/// the agent name/category denormalized at read time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudyWithAgent {
    pub id: i32,
    pub agent_id: i32,
    pub agent_name: String,
    pub agent_category: String,
    pub task_description: String,
    pub study_date: NaiveDate,
    pub time_without_ai_mins: f64,
    pub time_with_ai_mins: f64,
    pub usage_count: i64,
    pub usage_discount_pct: f64,
    pub cost_per_hour: f64,
    pub notes: Option<String>,
    pub time_saved_mins: Option<f64>,
    pub net_usage: Option<f64>,
    pub net_time_saved_hours: Option<f64>,
    pub potential_savings: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Write shape for a study: raw inputs plus freshly computed derived
/// fields. Both create and full-record update persist exactly this set,
/// so no write path can leave derived fields stale.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRow {
    pub agent_id: i32,
    pub task_description: String,
    pub study_date: NaiveDate,
    pub time_without_ai_mins: f64,
    pub time_with_ai_mins: f64,
    pub usage_count: i64,
    pub usage_discount_pct: f64,
    pub cost_per_hour: f64,
    pub notes: Option<String>,
    pub time_saved_mins: f64,
    pub net_usage: f64,
    pub net_time_saved_hours: f64,
    pub potential_savings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_study() -> StudyWithAgent {
        StudyWithAgent {
            id: 7,
            agent_id: 1,
            agent_name: "Ticket Triage".to_string(),
            agent_category: "Customer Support".to_string(),
            task_description: "Categorize inbound tickets".to_string(),
            study_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            time_without_ai_mins: 20.0,
            time_with_ai_mins: 10.0,
            usage_count: 20000,
            usage_discount_pct: 50.0,
            cost_per_hour: 50.0,
            notes: None,
            time_saved_mins: Some(10.0),
            net_usage: Some(10000.0),
            net_time_saved_hours: Some(1666.6666666666667),
            potential_savings: Some(83333.33333333334),
            created_at: Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_study_serialization_roundtrip() {
        let study = sample_study();
        let json = serde_json::to_string(&study).expect("serialization failed");
        let back: StudyWithAgent = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(back.id, study.id);
        assert_eq!(back.agent_name, study.agent_name);
        assert_eq!(back.usage_count, study.usage_count);
        assert_eq!(back.time_saved_mins, study.time_saved_mins);
        assert_eq!(back.potential_savings, study.potential_savings);
    }

    #[test]
    fn test_study_json_exposes_raw_and_derived_fields() {
        let json = serde_json::to_value(sample_study()).unwrap();

        // Raw inputs and derived outputs travel together.
        assert_eq!(json["time_without_ai_mins"], 20.0);
        assert_eq!(json["time_with_ai_mins"], 10.0);
        assert_eq!(json["usage_count"], 20000);
        assert_eq!(json["time_saved_mins"], 10.0);
        assert_eq!(json["net_usage"], 10000.0);
        assert_eq!(json["agent_name"], "Ticket Triage");
    }

    #[test]
    fn test_study_tolerates_null_derived_fields() {
        let mut study = sample_study();
        study.time_saved_mins = None;
        study.net_usage = None;
        study.net_time_saved_hours = None;
        study.potential_savings = None;

        let json = serde_json::to_string(&study).unwrap();
        let back: StudyWithAgent = serde_json::from_str(&json).unwrap();
        assert!(back.time_saved_mins.is_none());
        assert!(back.potential_savings.is_none());
    }
}
