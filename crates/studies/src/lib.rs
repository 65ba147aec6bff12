//! Study record service, projection aggregation, and the assistant data
//! snapshot for the agent ROI analytics system.
//!
//! Both write paths (create, update) and the projection path route
//! through the one metrics engine in `agent-roi-core`, so measured and
//! projected figures can never drift apart.

pub mod context;
pub mod error;
pub mod memory;
pub mod projection;
pub mod service;
pub mod store;

pub use context::{build_snapshot, DataSnapshot};
pub use error::ServiceError;
pub use memory::MemoryStore;
pub use projection::{
    project_active, project_agent, summarize, AgentProjection, ProjectionSummary,
};
pub use service::{NewStudy, StudyService, UpdateStudy};
pub use store::{AgentStore, ReferenceStore, StudyStore};
