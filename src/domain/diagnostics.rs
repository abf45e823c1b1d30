//! Configuration-data checks for task records.
//!
//! The projector quietly drops anything it cannot use. These checks say
//! *why* a task projects less than its flags promise, for the `validate`
//! command and for logging.

use std::fmt;

use serde::Serialize;

use super::{
    aircraft::Aircraft,
    calendar,
    task::{FormValue, IntervalType, MaintenanceTask, TrackType},
};

/// A problem with a task record's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
pub enum TaskIssue {
    /// `trackType` is neither "Interval" nor "One Time".
    UnrecognizedTrackType {
        /// The stored value.
        value: String,
    },
    /// `daysIntervalType` is not a known projection rule.
    UnrecognizedIntervalType {
        /// The stored value.
        value: String,
    },
    /// A dimension is enabled but its value is absent.
    MissingDueValue {
        /// The field name.
        field: &'static str,
    },
    /// A dimension is enabled but its value cannot be used.
    InvalidDueValue {
        /// The field name.
        field: &'static str,
        /// The stored value.
        value: String,
    },
    /// `lastCompletedDate` is set but is not a date; today is used instead.
    InvalidLastCompletedDate {
        /// The stored value.
        value: String,
    },
    /// `aircraftId` matches no aircraft in the registry.
    UnknownAircraft {
        /// The stored aircraft id.
        aircraft_id: String,
    },
    /// The task's component has no time snapshot on its aircraft.
    UnknownComponent {
        /// The component name.
        component: String,
    },
    /// The task's component snapshot holds a reading that cannot be used.
    InvalidComponentTime {
        /// The component name.
        component: String,
        /// The snapshot field.
        field: &'static str,
        /// The stored value.
        value: String,
    },
    /// The task is active but no due dimension is enabled.
    NoDueRules,
}

impl fmt::Display for TaskIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedTrackType { value } => {
                write!(f, "unrecognized trackType {value:?}")
            }
            Self::UnrecognizedIntervalType { value } => {
                write!(f, "unrecognized daysIntervalType {value:?}")
            }
            Self::MissingDueValue { field } => write!(f, "{field} is enabled but empty"),
            Self::InvalidDueValue { field, value } => {
                write!(f, "{field} has unusable value {value:?}")
            }
            Self::InvalidLastCompletedDate { value } => {
                write!(f, "lastCompletedDate {value:?} is not a date")
            }
            Self::UnknownAircraft { aircraft_id } => {
                write!(f, "aircraftId {aircraft_id:?} matches no aircraft")
            }
            Self::UnknownComponent { component } => {
                write!(f, "component {component:?} has no time snapshot")
            }
            Self::InvalidComponentTime {
                component,
                field,
                value,
            } => write!(f, "component {component:?} has unusable {field} {value}"),
            Self::NoDueRules => f.write_str("no due dimension is enabled"),
        }
    }
}

/// Check one task against its aircraft.
///
/// `aircraft` is `None` when the task's `aircraftId` matches nothing.
/// `default_component` is used for tasks that name no component.
#[must_use]
pub fn diagnose_task(
    task: &MaintenanceTask,
    aircraft: Option<&Aircraft>,
    default_component: &str,
) -> Vec<TaskIssue> {
    let mut issues = Vec::new();

    match aircraft {
        None => issues.push(TaskIssue::UnknownAircraft {
            aircraft_id: task.aircraft_id.clone(),
        }),
        Some(aircraft) => {
            let component = task.component_or(default_component);
            let needs_snapshot = task.is_hours_due_enabled || task.is_cycles_due_enabled;
            match aircraft.component(component) {
                None if needs_snapshot => issues.push(TaskIssue::UnknownComponent {
                    component: component.to_string(),
                }),
                Some(snapshot) => {
                    if task.is_hours_due_enabled && !snapshot.has_usable_time() {
                        issues.push(TaskIssue::InvalidComponentTime {
                            component: component.to_string(),
                            field: "currentTime",
                            value: snapshot.current_time.to_string(),
                        });
                    }
                    if task.is_cycles_due_enabled && !snapshot.has_usable_cycles() {
                        issues.push(TaskIssue::InvalidComponentTime {
                            component: component.to_string(),
                            field: "currentCycles",
                            value: snapshot.current_cycles.to_string(),
                        });
                    }
                }
                None => {}
            }
        }
    }

    if let TrackType::Unrecognized(value) = &task.track_type {
        issues.push(TaskIssue::UnrecognizedTrackType {
            value: value.clone(),
        });
    }

    if task.is_active && !task.has_due_rules() {
        issues.push(TaskIssue::NoDueRules);
    }

    if task.is_days_due_enabled {
        check_days(task, &mut issues);
    }
    if task.is_hours_due_enabled {
        check_number("hoursDue", task.hours_due.as_ref(), &mut issues);
    }
    if task.is_cycles_due_enabled {
        check_number("cyclesDue", task.cycles_due.as_ref(), &mut issues);
    }

    issues
}

fn check_days(task: &MaintenanceTask, issues: &mut Vec<TaskIssue>) {
    let Some(value) = &task.days_due_value else {
        issues.push(TaskIssue::MissingDueValue {
            field: "daysDueValue",
        });
        return;
    };

    match &task.track_type {
        TrackType::OneTime => {
            if value.as_text().and_then(calendar::parse_iso_date).is_none() {
                issues.push(invalid("daysDueValue", value));
            }
        }
        TrackType::Interval => {
            if !value.as_number().is_some_and(|n| n >= 1.0) {
                issues.push(invalid("daysDueValue", value));
            }
            if let IntervalType::Unrecognized(raw) = &task.days_interval_type {
                issues.push(TaskIssue::UnrecognizedIntervalType { value: raw.clone() });
            }
            if let Some(last) = &task.last_completed_date {
                if calendar::parse_iso_date(last).is_none() {
                    issues.push(TaskIssue::InvalidLastCompletedDate {
                        value: last.clone(),
                    });
                }
            }
        }
        TrackType::Unrecognized(_) => {}
    }
}

fn check_number(field: &'static str, value: Option<&FormValue>, issues: &mut Vec<TaskIssue>) {
    match value {
        None => issues.push(TaskIssue::MissingDueValue { field }),
        Some(value) if value.as_number().is_none() => issues.push(invalid(field, value)),
        Some(_) => {}
    }
}

fn invalid(field: &'static str, value: &FormValue) -> TaskIssue {
    TaskIssue::InvalidDueValue {
        field,
        value: value.to_string(),
    }
}
