pub mod drop_target;
pub mod importer;
pub mod plan;
pub mod reconciliation;
pub mod sessions;

pub use drop_target::DropTarget;
pub use plan::{FloorPlan, FloorPlanError};
pub use reconciliation::Reconciliation;
pub use sessions::FloorPlanSessions;
