//! In-memory store backing service tests and headless experiments.
//!
//! Behaves like the Postgres repositories: generated ids, newest-first
//! listing, read-time agent join, NULL-tolerant totals.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;

use agent_roi_data::{
    AgentRecord, AlertRecord, GoalRecord, StudyRecord, StudyRow, StudyTotals, StudyWithAgent,
};

use crate::store::{AgentStore, ReferenceStore, StudyStore};

/// A process-local implementation of all three store seams.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    agents: Vec<AgentRecord>,
    studies: Vec<StudyRecord>,
    goals: Vec<GoalRecord>,
    alerts: Vec<AlertRecord>,
    last_study_id: i32,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an agent.
    pub fn add_agent(&self, agent: AgentRecord) {
        self.inner.lock().unwrap().agents.push(agent);
    }

    /// Seeds a goal.
    pub fn add_goal(&self, goal: GoalRecord) {
        self.inner.lock().unwrap().goals.push(goal);
    }

    /// Seeds an alert.
    pub fn add_alert(&self, alert: AlertRecord) {
        self.inner.lock().unwrap().alerts.push(alert);
    }

    fn join(record: &StudyRecord, agents: &[AgentRecord]) -> Result<StudyWithAgent> {
        let agent = agents
            .iter()
            .find(|a| a.id == record.agent_id)
            .ok_or_else(|| anyhow!("agent {} missing for study {}", record.agent_id, record.id))?;

        Ok(StudyWithAgent {
            id: record.id,
            agent_id: record.agent_id,
            agent_name: agent.name.clone(),
            agent_category: agent.category.clone(),
            task_description: record.task_description.clone(),
            study_date: record.study_date,
            time_without_ai_mins: record.time_without_ai_mins,
            time_with_ai_mins: record.time_with_ai_mins,
            usage_count: record.usage_count,
            usage_discount_pct: record.usage_discount_pct,
            cost_per_hour: record.cost_per_hour,
            notes: record.notes.clone(),
            time_saved_mins: record.time_saved_mins,
            net_usage: record.net_usage,
            net_time_saved_hours: record.net_time_saved_hours,
            potential_savings: record.potential_savings,
            created_at: record.created_at,
        })
    }

    fn record_from_row(id: i32, row: StudyRow) -> StudyRecord {
        StudyRecord {
            id,
            agent_id: row.agent_id,
            task_description: row.task_description,
            study_date: row.study_date,
            time_without_ai_mins: row.time_without_ai_mins,
            time_with_ai_mins: row.time_with_ai_mins,
            usage_count: row.usage_count,
            usage_discount_pct: row.usage_discount_pct,
            cost_per_hour: row.cost_per_hour,
            notes: row.notes,
            time_saved_mins: Some(row.time_saved_mins),
            net_usage: Some(row.net_usage),
            net_time_saved_hours: Some(row.net_time_saved_hours),
            potential_savings: Some(row.potential_savings),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl StudyStore for MemoryStore {
    async fn insert(&self, row: StudyRow) -> Result<StudyWithAgent> {
        let mut inner = self.inner.lock().unwrap();
        inner.last_study_id += 1;
        let record = Self::record_from_row(inner.last_study_id, row);
        let joined = Self::join(&record, &inner.agents)?;
        inner.studies.push(record);
        Ok(joined)
    }

    async fn get(&self, id: i32) -> Result<Option<StudyWithAgent>> {
        let inner = self.inner.lock().unwrap();
        inner
            .studies
            .iter()
            .find(|s| s.id == id)
            .map(|s| Self::join(s, &inner.agents))
            .transpose()
    }

    async fn list(&self, agent_id: Option<i32>) -> Result<Vec<StudyWithAgent>> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<&StudyRecord> = inner
            .studies
            .iter()
            .filter(|s| agent_id.map_or(true, |aid| s.agent_id == aid))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        records
            .into_iter()
            .map(|s| Self::join(s, &inner.agents))
            .collect()
    }

    async fn update(&self, id: i32, row: StudyRow) -> Result<Option<StudyWithAgent>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(index) = inner.studies.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let created_at = inner.studies[index].created_at;
        let mut record = Self::record_from_row(id, row);
        record.created_at = created_at;
        let joined = Self::join(&record, &inner.agents)?;
        inner.studies[index] = record;
        Ok(Some(joined))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.studies.len();
        inner.studies.retain(|s| s.id != id);
        Ok(inner.studies.len() < before)
    }

    async fn totals(&self) -> Result<StudyTotals> {
        let inner = self.inner.lock().unwrap();
        let mut totals = StudyTotals::zero();
        for study in &inner.studies {
            totals.total_time_saved_hours += study.net_time_saved_hours.unwrap_or(0.0);
            totals.total_savings += study.potential_savings.unwrap_or(0.0);
            totals.total_studies += 1;
        }
        Ok(totals)
    }
}

#[async_trait]
impl AgentStore for MemoryStore {
    async fn get(&self, id: i32) -> Result<Option<AgentRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.agents.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<AgentRecord>> {
        let inner = self.inner.lock().unwrap();
        let mut agents = inner.agents.clone();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(agents)
    }
}

#[async_trait]
impl ReferenceStore for MemoryStore {
    async fn list_goals(&self) -> Result<Vec<GoalRecord>> {
        Ok(self.inner.lock().unwrap().goals.clone())
    }

    async fn list_alerts(&self) -> Result<Vec<AlertRecord>> {
        Ok(self.inner.lock().unwrap().alerts.clone())
    }
}
