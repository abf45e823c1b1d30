//! Domain models for maintenance tracking.
//!
//! This module contains the task and aircraft records, the due-point
//! projector, the remaining-margin calculator and the reports built on top
//! of them. Nothing in here performs I/O except [`Config`] loading.

/// Aircraft and component time snapshots.
pub mod aircraft;
pub use aircraft::{Aircraft, ComponentTimeSnapshot, find_snapshot};

/// Calendar arithmetic.
pub mod calendar;

mod config;
pub use config::{Config, ConfigError};

pub mod diagnostics;
pub use diagnostics::{TaskIssue, diagnose_task};

pub mod margin;
pub use margin::{
    AlertThresholds, DueStatus, GoverningUnit, Margin, RemainingMargin, compute_remaining_margin,
    compute_remaining_margin_with, round_tenths,
};

pub mod projection;
pub use projection::{DueProjection, project_due_dates};

pub mod report;
pub use report::{AircraftReport, Evaluation, FleetReport, ReportOptions, StatusCounts, evaluate_task};

/// Maintenance task records.
pub mod task;
pub use task::{DEFAULT_COMPONENT, FormValue, IntervalType, MaintenanceTask, TrackType};
