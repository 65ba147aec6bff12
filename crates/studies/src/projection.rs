//! Forward-looking per-agent projections.
//!
//! Applies the metrics engine to an agent's average/default variables
//! instead of a measured study. This is the engine's second call site;
//! it must stay a call into `compute_metrics`, never a reimplementation.

use serde::{Deserialize, Serialize};

use agent_roi_core::{compute_metrics, RoiMetrics};
use agent_roi_data::AgentRecord;

/// Projected ROI for one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProjection {
    pub agent_id: i32,
    pub agent_name: String,
    pub category: String,
    pub status: String,
    pub metrics: RoiMetrics,
}

/// Organization-level rollup of the active-agent projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Number of agents contributing to the rollup.
    pub agent_count: i64,
    /// Sum of projected annual hours saved.
    pub total_projected_hours: f64,
    /// Sum of projected annual dollar savings.
    pub total_projected_savings: f64,
}

/// Runs the shared formula over an agent's projection variables.
#[must_use]
pub fn project_agent(agent: &AgentRecord) -> RoiMetrics {
    compute_metrics(
        agent.avg_time_without_agent_mins,
        agent.avg_time_with_agent_mins,
        agent.avg_usage_count as f64,
        agent.default_usage_discount_pct,
        agent.avg_hourly_wage,
    )
}

/// Projects every active agent. Inactive agents carry no
/// forward-looking estimate and are skipped.
#[must_use]
pub fn project_active(agents: &[AgentRecord]) -> Vec<AgentProjection> {
    agents
        .iter()
        .filter(|agent| agent.is_active())
        .map(|agent| AgentProjection {
            agent_id: agent.id,
            agent_name: agent.name.clone(),
            category: agent.category.clone(),
            status: agent.status.clone(),
            metrics: project_agent(agent),
        })
        .collect()
}

/// Rolls projections up to organization totals.
#[must_use]
pub fn summarize(projections: &[AgentProjection]) -> ProjectionSummary {
    let mut summary = ProjectionSummary {
        agent_count: 0,
        total_projected_hours: 0.0,
        total_projected_savings: 0.0,
    };

    for projection in projections {
        summary.agent_count += 1;
        summary.total_projected_hours += projection.metrics.net_time_saved_hours;
        summary.total_projected_savings += projection.metrics.potential_savings;
    }

    summary
}
