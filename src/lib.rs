//! Aircraft maintenance due tracking
//!
//! Projects when each maintenance task next falls due (by date, flight hours
//! and cycles) and classifies how much margin remains against the aircraft's
//! current component times.

pub mod domain;
pub use domain::{
    Aircraft, ComponentTimeSnapshot, Config, DueProjection, DueStatus, MaintenanceTask,
    RemainingMargin, compute_remaining_margin, project_due_dates,
};

/// Filesystem storage for aircraft and task records.
pub mod storage;
pub use storage::Store;
