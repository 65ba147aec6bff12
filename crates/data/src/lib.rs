//! Data storage and export for the agent ROI analytics service.
//!
//! This crate provides:
//! - Database client for `PostgreSQL`
//! - Data models for agents, studies, goals, and alerts
//! - Repositories for typed database access (study reads join the
//!   owning agent's display fields)
//! - CSV export of the study table
//!
//! Table definitions live in `schema.sql` at the crate root.

pub mod csv_export;
pub mod database;
pub mod models;
pub mod repositories;

pub use csv_export::CsvExport;
pub use database::DatabaseClient;

// Re-export models
pub use models::{
    AgentRecord, AgentStatus, AlertRecord, AlertSeverity, GoalDataSource, GoalRecord, GoalStatus,
    StudyRecord, StudyRow, StudyWithAgent,
};

// Re-export repositories
pub use repositories::{
    AgentRepository, AlertRepository, GoalRepository, Repositories, StudyRepository, StudyTotals,
};
