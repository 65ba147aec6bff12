//! Data models for the analytics store.

pub mod agent;
pub mod alert;
pub mod goal;
pub mod study;

pub use agent::{AgentRecord, AgentStatus};
pub use alert::{AlertRecord, AlertSeverity};
pub use goal::{GoalDataSource, GoalRecord, GoalStatus};
pub use study::{StudyRecord, StudyRow, StudyWithAgent};
