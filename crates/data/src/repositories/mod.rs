//! Database repositories for the analytics store.
//!
//! Each repository provides typed access to one collection. Study reads
//! perform the agent name/category join at query time.

pub mod agent_repo;
pub mod reference_repo;
pub mod study_repo;

pub use agent_repo::AgentRepository;
pub use reference_repo::{AlertRepository, GoalRepository};
pub use study_repo::{StudyRepository, StudyTotals};

use sqlx::PgPool;

/// All repositories wired from a single database pool.
pub struct Repositories {
    pub studies: StudyRepository,
    pub agents: AgentRepository,
    pub goals: GoalRepository,
    pub alerts: AlertRepository,
}

impl Repositories {
    /// Creates a new set of repositories from a database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            studies: StudyRepository::new(pool.clone()),
            agents: AgentRepository::new(pool.clone()),
            goals: GoalRepository::new(pool.clone()),
            alerts: AlertRepository::new(pool),
        }
    }
}
