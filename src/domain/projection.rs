//! Due-point projection.
//!
//! Turns a task's last-completion record and due rules into absolute due
//! points: a date, an hours threshold and a cycles threshold, each present
//! only when its dimension is enabled and well formed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    calendar,
    task::{FormValue, IntervalType, MaintenanceTask, TrackType},
};

/// Absolute due points for one task.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueProjection {
    /// Calendar due date.
    pub due_at_date: Option<NaiveDate>,
    /// Component hours at which the task falls due.
    pub due_at_hours: Option<f64>,
    /// Component cycles at which the task falls due.
    pub due_at_cycles: Option<i64>,
}

impl DueProjection {
    /// Whether no dimension produced a due point.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.due_at_date.is_none() && self.due_at_hours.is_none() && self.due_at_cycles.is_none()
    }

    /// The due date formatted as `yyyy-MM-dd`.
    #[must_use]
    pub fn due_at_date_iso(&self) -> Option<String> {
        self.due_at_date.map(calendar::format_iso_date)
    }
}

/// Project the due points of `task`.
///
/// `today` is the baseline for calendar intervals when the task has no valid
/// `lastCompletedDate`. Every dimension is computed independently; a
/// dimension that is disabled or malformed is simply absent.
#[must_use]
pub fn project_due_dates(task: &MaintenanceTask, today: NaiveDate) -> DueProjection {
    if matches!(task.track_type, TrackType::Unrecognized(_)) {
        tracing::trace!(task = %task.id, track_type = %task.track_type, "unrecognized track type");
        return DueProjection::default();
    }

    DueProjection {
        due_at_date: task
            .is_days_due_enabled
            .then(|| project_date(task, today))
            .flatten(),
        due_at_hours: task
            .is_hours_due_enabled
            .then(|| {
                project_quantity(
                    &task.track_type,
                    task.hours_due.as_ref(),
                    task.last_completed_hours.as_ref(),
                )
            })
            .flatten(),
        due_at_cycles: task
            .is_cycles_due_enabled
            .then(|| {
                project_quantity(
                    &task.track_type,
                    task.cycles_due.as_ref(),
                    task.last_completed_cycles.as_ref(),
                )
            })
            .flatten()
            .and_then(whole_cycles),
    }
}

fn project_date(task: &MaintenanceTask, today: NaiveDate) -> Option<NaiveDate> {
    let value = task.days_due_value.as_ref()?;

    match task.track_type {
        TrackType::OneTime => value.as_text().and_then(calendar::parse_iso_date),
        TrackType::Interval => {
            let magnitude = interval_magnitude(value)?;
            let baseline = task
                .last_completed_date
                .as_deref()
                .and_then(calendar::parse_iso_date)
                .unwrap_or(today);

            match task.days_interval_type {
                IntervalType::Days => calendar::add_days(baseline, magnitude),
                IntervalType::MonthsSpecificDay => calendar::add_months(baseline, magnitude),
                IntervalType::MonthsEndOfMonth => {
                    calendar::add_months_end_of_month(baseline, magnitude)
                }
                IntervalType::YearsSpecificDay => calendar::add_years(baseline, magnitude),
                IntervalType::Unrecognized(_) => None,
            }
        }
        TrackType::Unrecognized(_) => None,
    }
}

/// A calendar interval as a positive whole number, truncating fractions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn interval_magnitude(value: &FormValue) -> Option<u32> {
    let magnitude = value.as_number()?.trunc();
    (magnitude >= 1.0 && magnitude <= f64::from(u32::MAX)).then_some(magnitude as u32)
}

fn project_quantity(
    track_type: &TrackType,
    due: Option<&FormValue>,
    last_completed: Option<&FormValue>,
) -> Option<f64> {
    let due = due?.as_number()?;
    match track_type {
        TrackType::Interval => {
            let baseline = last_completed.and_then(FormValue::as_number).unwrap_or(0.0);
            Some(baseline + due)
        }
        TrackType::OneTime => Some(due),
        TrackType::Unrecognized(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn whole_cycles(cycles: f64) -> Option<i64> {
    #[allow(clippy::cast_precision_loss)]
    let in_range = cycles.abs() < i64::MAX as f64;
    in_range.then(|| cycles.round() as i64)
}
