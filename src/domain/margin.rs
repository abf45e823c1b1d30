//! Remaining-margin calculation and status classification.
//!
//! A task may carry up to three due points, but a maintenance table shows
//! one headline figure per task. The governing dimension is chosen by fixed
//! precedence: calendar date, then hours, then cycles.

use std::{cmp::Ordering, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    aircraft::{ComponentTimeSnapshot, find_snapshot},
    calendar,
    projection::DueProjection,
    task::MaintenanceTask,
};

/// The dimension that produced a headline margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoverningUnit {
    /// Calendar days.
    #[serde(rename = "days")]
    Days,
    /// Flight hours.
    #[serde(rename = "hrs")]
    Hours,
    /// Cycles.
    #[serde(rename = "cycles")]
    Cycles,
    /// Nothing to measure.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl GoverningUnit {
    /// The unit's display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hrs",
            Self::Cycles => "cycles",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for GoverningUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How much is left before a task falls due, in its governing unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    /// Whole calendar days until the due date.
    Days(i64),
    /// Hours until the hours threshold, to one decimal place.
    Hours(f64),
    /// Cycles until the cycles threshold.
    Cycles(i64),
    /// No enabled, well-formed dimension: nothing to track.
    NoDueConstraint,
    /// An hours or cycles margin was needed but the component has no
    /// snapshot.
    MissingComponentTime {
        /// The dimension that could not be evaluated.
        unit: GoverningUnit,
    },
}

impl Margin {
    /// The governing unit.
    #[must_use]
    pub const fn unit(&self) -> GoverningUnit {
        match self {
            Self::Days(_) => GoverningUnit::Days,
            Self::Hours(_) => GoverningUnit::Hours,
            Self::Cycles(_) => GoverningUnit::Cycles,
            Self::NoDueConstraint => GoverningUnit::NotApplicable,
            Self::MissingComponentTime { unit } => *unit,
        }
    }

    /// The signed remaining figure; `None` when there is no figure.
    ///
    /// Negative means overdue.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Days(days) => Some(*days as f64),
            Self::Hours(hours) => Some(*hours),
            Self::Cycles(cycles) => Some(*cycles as f64),
            Self::NoDueConstraint | Self::MissingComponentTime { .. } => None,
        }
    }

    /// Whether the remaining figure is negative.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.value().is_some_and(|value| value < 0.0)
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days} days"),
            Self::Hours(hours) => write!(f, "{hours:.1} hrs"),
            Self::Cycles(cycles) => write!(f, "{cycles} cycles"),
            Self::NoDueConstraint => f.write_str("N/A"),
            Self::MissingComponentTime { .. } => f.write_str("Missing comp. time"),
        }
    }
}

/// Classification of a task's headline margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DueStatus {
    /// Past due.
    #[serde(rename = "Overdue")]
    Overdue,
    /// The governing component has no hours/cycles snapshot.
    #[serde(rename = "Missing Comp. Time")]
    MissingComponentTime,
    /// Inside the alert threshold for its unit.
    #[serde(rename = "Due Soon")]
    DueSoon,
    /// Comfortably within limits.
    #[serde(rename = "OK")]
    Ok,
    /// Nothing could be projected; the task's due rules need attention.
    #[serde(rename = "Check Due Info")]
    CheckDueInfo,
}

impl DueStatus {
    /// All statuses in urgency order.
    ///
    /// Tasks with nothing to track come last.
    pub const ALL: [Self; 5] = [
        Self::Overdue,
        Self::MissingComponentTime,
        Self::DueSoon,
        Self::Ok,
        Self::CheckDueInfo,
    ];

    /// The status label shown in tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::MissingComponentTime => "Missing Comp. Time",
            Self::DueSoon => "Due Soon",
            Self::CheckDueInfo => "Check Due Info",
            Self::Ok => "OK",
        }
    }

    /// Whether someone should look at the task.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(
            self,
            Self::Overdue | Self::MissingComponentTime | Self::DueSoon
        )
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Remaining margins below which a task is "Due Soon".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Calendar days.
    pub days: i64,
    /// Flight hours.
    pub hours: f64,
    /// Cycles.
    pub cycles: i64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            days: 30,
            hours: 25.0,
            cycles: 50,
        }
    }
}

impl AlertThresholds {
    /// Whether a non-negative margin is inside the alert window.
    #[must_use]
    pub fn is_due_soon(&self, margin: &Margin) -> bool {
        match *margin {
            Margin::Days(days) => days < self.days,
            Margin::Hours(hours) => hours < self.hours,
            Margin::Cycles(cycles) => cycles < self.cycles,
            Margin::NoDueConstraint | Margin::MissingComponentTime { .. } => false,
        }
    }

    /// Classify a margin.
    #[must_use]
    pub fn classify(&self, margin: &Margin) -> DueStatus {
        if matches!(margin, Margin::MissingComponentTime { .. }) {
            DueStatus::MissingComponentTime
        } else if margin.is_overdue() {
            DueStatus::Overdue
        } else if self.is_due_soon(margin) {
            DueStatus::DueSoon
        } else if margin.unit() == GoverningUnit::NotApplicable {
            DueStatus::CheckDueInfo
        } else {
            DueStatus::Ok
        }
    }
}

/// The headline remaining figure for a task and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "MarginRecord")]
pub struct RemainingMargin {
    /// The governing margin.
    pub margin: Margin,
    /// Its classification.
    pub status: DueStatus,
}

impl RemainingMargin {
    /// Human readable figure, e.g. `"-31 days"` or `"20.0 hrs"`.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.margin.to_string()
    }

    /// Signed remaining figure; `None` if there is none.
    #[must_use]
    pub const fn numeric_value(&self) -> Option<f64> {
        self.margin.value()
    }

    /// The governing unit.
    #[must_use]
    pub const fn governing_unit(&self) -> GoverningUnit {
        self.margin.unit()
    }

    /// Whether the remaining figure is negative.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.margin.is_overdue()
    }

    /// Order by urgency: status first, then smaller margins first.
    ///
    /// Margins without a figure sort after every numeric margin.
    #[must_use]
    pub fn urgency_cmp(&self, other: &Self) -> Ordering {
        self.status.cmp(&other.status).then_with(|| {
            match (self.numeric_value(), other.numeric_value()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    }
}

/// Serialized shape of [`RemainingMargin`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarginRecord {
    display_text: String,
    numeric_value: Option<f64>,
    governing_unit: GoverningUnit,
    is_overdue: bool,
    status_label: DueStatus,
}

impl From<RemainingMargin> for MarginRecord {
    fn from(margin: RemainingMargin) -> Self {
        Self {
            display_text: margin.display_text(),
            numeric_value: margin.numeric_value(),
            governing_unit: margin.governing_unit(),
            is_overdue: margin.is_overdue(),
            status_label: margin.status,
        }
    }
}

/// Compute the headline margin for `task` using the default thresholds.
///
/// See [`compute_remaining_margin_with`].
#[must_use]
pub fn compute_remaining_margin(
    task: &MaintenanceTask,
    projection: &DueProjection,
    snapshots: &[ComponentTimeSnapshot],
    today: NaiveDate,
) -> RemainingMargin {
    compute_remaining_margin_with(
        task.component(),
        projection,
        snapshots,
        today,
        &AlertThresholds::default(),
    )
}

/// Compute the headline margin for a projection.
///
/// Precedence, first match wins:
///
/// 1. a due date: whole days from `today`
/// 2. no snapshot for `component`: missing component time
/// 3. an hours threshold: hours left, to one decimal
/// 4. a cycles threshold: cycles left
/// 5. otherwise no due constraint
///
/// The date wins even when an hours or cycles threshold is closer.
#[must_use]
pub fn compute_remaining_margin_with(
    component: &str,
    projection: &DueProjection,
    snapshots: &[ComponentTimeSnapshot],
    today: NaiveDate,
    thresholds: &AlertThresholds,
) -> RemainingMargin {
    let margin = governing_margin(component, projection, snapshots, today);
    RemainingMargin {
        margin,
        status: thresholds.classify(&margin),
    }
}

fn governing_margin(
    component: &str,
    projection: &DueProjection,
    snapshots: &[ComponentTimeSnapshot],
    today: NaiveDate,
) -> Margin {
    if let Some(due) = projection.due_at_date {
        return Margin::Days(calendar::days_between(today, due));
    }

    let Some(snapshot) = find_snapshot(snapshots, component) else {
        let unit = if projection.due_at_hours.is_some() {
            GoverningUnit::Hours
        } else if projection.due_at_cycles.is_some() {
            GoverningUnit::Cycles
        } else {
            GoverningUnit::NotApplicable
        };
        tracing::debug!(component, %unit, "no component time snapshot");
        return Margin::MissingComponentTime { unit };
    };

    if let Some(due) = projection.due_at_hours {
        let remaining = round_tenths(due - snapshot.current_time);
        if !snapshot.has_usable_time() || !remaining.is_finite() {
            tracing::warn!(component, hours = snapshot.current_time, "unusable component hours");
            return Margin::MissingComponentTime {
                unit: GoverningUnit::Hours,
            };
        }
        Margin::Hours(remaining)
    } else if let Some(due) = projection.due_at_cycles {
        if !snapshot.has_usable_cycles() {
            tracing::warn!(component, cycles = snapshot.current_cycles, "unusable component cycles");
            return Margin::MissingComponentTime {
                unit: GoverningUnit::Cycles,
            };
        }
        Margin::Cycles(due.saturating_sub(snapshot.current_cycles))
    } else {
        Margin::NoDueConstraint
    }
}

/// Round an hours figure to one decimal, the precision margins are reported in.
///
/// Never returns negative zero.
#[must_use]
pub fn round_tenths(hours: f64) -> f64 {
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        calendar::parse_iso_date,
        projection::project_due_dates,
        task::{FormValue, TrackType},
    };

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn airframe(hours: f64, cycles: i64) -> Vec<ComponentTimeSnapshot> {
        vec![ComponentTimeSnapshot::new("Airframe", hours, cycles)]
    }

    fn hours_task(last: f64, due: f64) -> MaintenanceTask {
        let mut task = MaintenanceTask::new("t", "ac", TrackType::Interval);
        task.is_hours_due_enabled = true;
        task.hours_due = Some(FormValue::Number(due));
        task.last_completed_hours = Some(FormValue::Number(last));
        task
    }

    fn evaluate(
        task: &MaintenanceTask,
        snapshots: &[ComponentTimeSnapshot],
        today: NaiveDate,
    ) -> (DueProjection, RemainingMargin) {
        let projection = project_due_dates(task, today);
        let margin = compute_remaining_margin(task, &projection, snapshots, today);
        (projection, margin)
    }

    #[test]
    fn hours_round_trip_is_due_soon() {
        let task = hours_task(100.0, 50.0);
        let (projection, margin) = evaluate(&task, &airframe(140.0, 0), date("2025-01-01"));

        assert_eq!(projection.due_at_hours, Some(150.0));
        assert_eq!(margin.margin, Margin::Hours(10.0));
        assert!(!margin.is_overdue());
        assert_eq!(margin.status, DueStatus::DueSoon);
        assert_eq!(margin.display_text(), "10.0 hrs");
    }

    #[test]
    fn hours_from_zero_are_due_soon() {
        let task = hours_task(0.0, 100.0);
        let (projection, margin) = evaluate(&task, &airframe(80.0, 0), date("2025-01-01"));

        assert_eq!(projection.due_at_hours, Some(100.0));
        assert_eq!(margin.numeric_value(), Some(20.0));
        assert_eq!(margin.governing_unit(), GoverningUnit::Hours);
        assert_eq!(margin.status, DueStatus::DueSoon);
    }

    #[test]
    fn hours_are_rounded_to_one_decimal() {
        let task = hours_task(1_000.0, 100.0);
        let (_, margin) = evaluate(&task, &airframe(1_033.36, 0), date("2025-01-01"));
        assert_eq!(margin.margin, Margin::Hours(66.6));
        assert_eq!(margin.status, DueStatus::Ok);
    }

    #[test]
    fn one_time_date_in_the_past_is_overdue() {
        let mut task = MaintenanceTask::new("t", "ac", TrackType::OneTime);
        task.is_days_due_enabled = true;
        task.days_due_value = Some(FormValue::from("2025-01-01"));

        let (projection, margin) = evaluate(&task, &[], date("2025-02-01"));

        assert_eq!(projection.due_at_date_iso().as_deref(), Some("2025-01-01"));
        assert_eq!(margin.margin, Margin::Days(-31));
        assert!(margin.is_overdue());
        assert_eq!(margin.status, DueStatus::Overdue);
        assert_eq!(margin.display_text(), "-31 days");
    }

    #[test]
    fn overdue_is_exactly_negative_margin() {
        let cases = [
            (Margin::Days(-1), true),
            (Margin::Days(0), false),
            (Margin::Days(1), false),
            (Margin::Hours(-0.1), true),
            (Margin::Hours(0.0), false),
            (Margin::Hours(0.1), false),
            (Margin::Cycles(-1), true),
            (Margin::Cycles(0), false),
            (Margin::Cycles(1), false),
            (Margin::NoDueConstraint, false),
            (
                Margin::MissingComponentTime {
                    unit: GoverningUnit::Hours,
                },
                false,
            ),
        ];

        for (margin, overdue) in cases {
            assert_eq!(margin.is_overdue(), overdue, "{margin:?}");
            assert_eq!(
                margin.is_overdue(),
                margin.value().is_some_and(|v| v < 0.0),
                "{margin:?}"
            );
        }
    }

    #[test]
    fn missing_component_is_never_ok() {
        let mut task = hours_task(0.0, 10_000.0);
        task.associated_component = Some("Engine 3".to_string());
        let snapshots = vec![
            ComponentTimeSnapshot::new("Airframe", 10.0, 5),
            ComponentTimeSnapshot::new("Engine 1", 10.0, 5),
            ComponentTimeSnapshot::new("Engine 2", 10.0, 5),
        ];

        let (_, margin) = evaluate(&task, &snapshots, date("2025-01-01"));
        assert_eq!(
            margin.margin,
            Margin::MissingComponentTime {
                unit: GoverningUnit::Hours
            }
        );
        assert_eq!(margin.status, DueStatus::MissingComponentTime);
        assert_eq!(margin.numeric_value(), None);
        assert!(!margin.is_overdue());
    }

    #[test]
    fn unusable_component_hours_are_never_ok() {
        let snapshots: Vec<ComponentTimeSnapshot> =
            serde_yaml::from_str("- componentName: Airframe\n  currentTime: .nan\n  currentCycles: 5\n")
                .unwrap();
        let task = hours_task(0.0, 100.0);

        let (_, margin) = evaluate(&task, &snapshots, date("2025-01-01"));
        assert_eq!(
            margin.margin,
            Margin::MissingComponentTime {
                unit: GoverningUnit::Hours
            }
        );
        assert_eq!(margin.status, DueStatus::MissingComponentTime);
        assert_eq!(margin.display_text(), "Missing comp. time");

        let (_, margin) = evaluate(&task, &airframe(-5.0, 5), date("2025-01-01"));
        assert_eq!(margin.status, DueStatus::MissingComponentTime);

        let (_, margin) = evaluate(&task, &airframe(f64::INFINITY, 5), date("2025-01-01"));
        assert_eq!(margin.status, DueStatus::MissingComponentTime);
    }

    #[test]
    fn negative_component_cycles_are_never_ok() {
        let mut task = MaintenanceTask::new("t", "ac", TrackType::OneTime);
        task.is_cycles_due_enabled = true;
        task.cycles_due = Some(FormValue::Number(500.0));

        let (_, margin) = evaluate(&task, &airframe(10.0, -1), date("2025-01-01"));
        assert_eq!(
            margin.margin,
            Margin::MissingComponentTime {
                unit: GoverningUnit::Cycles
            }
        );
    }

    #[test]
    fn margins_rounding_to_zero_are_not_negative() {
        assert_eq!(round_tenths(-0.04).to_string(), "0");
        assert_eq!(round_tenths(10.04), 10.0);

        let (_, margin) = evaluate(&hours_task(0.0, 100.0), &airframe(100.04, 0), date("2025-01-01"));
        assert_eq!(margin.display_text(), "0.0 hrs");
        assert!(!margin.is_overdue());
        assert_eq!(margin.status, DueStatus::DueSoon);
    }

    #[test]
    fn missing_component_reports_the_enabled_unit() {
        let mut task = MaintenanceTask::new("t", "ac", TrackType::Interval);
        task.associated_component = Some("Engine 3".to_string());
        task.is_cycles_due_enabled = true;
        task.cycles_due = Some(FormValue::Number(500.0));

        let (_, margin) = evaluate(&task, &airframe(0.0, 0), date("2025-01-01"));
        assert_eq!(margin.governing_unit(), GoverningUnit::Cycles);

        let bare = MaintenanceTask::new("t", "ac", TrackType::Interval);
        let (_, margin) = evaluate(&bare, &[], date("2025-01-01"));
        assert_eq!(margin.governing_unit(), GoverningUnit::NotApplicable);
        assert_eq!(margin.status, DueStatus::MissingComponentTime);
    }

    #[test]
    fn date_takes_precedence_over_overdue_hours() {
        let today = date("2025-01-01");
        let mut task = hours_task(0.0, 100.0);
        task.track_type = TrackType::OneTime;
        task.is_days_due_enabled = true;
        task.days_due_value = Some(FormValue::from("2025-04-11"));

        let (projection, margin) = evaluate(&task, &airframe(500.0, 0), today);

        assert_eq!(projection.due_at_hours, Some(100.0));
        assert_eq!(margin.margin, Margin::Days(100));
        assert_eq!(margin.governing_unit(), GoverningUnit::Days);
        assert_eq!(margin.status, DueStatus::Ok);
    }

    #[test]
    fn date_is_evaluated_without_a_snapshot() {
        let mut task = MaintenanceTask::new("t", "ac", TrackType::OneTime);
        task.associated_component = Some("Engine 3".to_string());
        task.is_days_due_enabled = true;
        task.days_due_value = Some(FormValue::from("2025-01-20"));

        let (_, margin) = evaluate(&task, &[], date("2025-01-01"));
        assert_eq!(margin.margin, Margin::Days(19));
        assert_eq!(margin.status, DueStatus::DueSoon);
    }

    #[test]
    fn hours_take_precedence_over_cycles() {
        let mut task = hours_task(0.0, 1_000.0);
        task.is_cycles_due_enabled = true;
        task.cycles_due = Some(FormValue::Number(10.0));

        let (_, margin) = evaluate(&task, &airframe(100.0, 20), date("2025-01-01"));
        assert_eq!(margin.margin, Margin::Hours(900.0));
        assert_eq!(margin.status, DueStatus::Ok);
    }

    #[test]
    fn cycles_margin_and_thresholds() {
        let mut task = MaintenanceTask::new("t", "ac", TrackType::Interval);
        task.is_cycles_due_enabled = true;
        task.cycles_due = Some(FormValue::Number(500.0));
        task.last_completed_cycles = Some(FormValue::Number(1_000.0));

        let today = date("2025-01-01");
        let (_, margin) = evaluate(&task, &airframe(0.0, 1_451), today);
        assert_eq!(margin.margin, Margin::Cycles(49));
        assert_eq!(margin.status, DueStatus::DueSoon);

        let (_, margin) = evaluate(&task, &airframe(0.0, 1_450), today);
        assert_eq!(margin.margin, Margin::Cycles(50));
        assert_eq!(margin.status, DueStatus::Ok);

        let (_, margin) = evaluate(&task, &airframe(0.0, 1_501), today);
        assert_eq!(margin.margin, Margin::Cycles(-1));
        assert_eq!(margin.status, DueStatus::Overdue);
        assert_eq!(margin.display_text(), "-1 cycles");
    }

    #[test]
    fn day_threshold_boundary() {
        let thresholds = AlertThresholds::default();
        assert_eq!(thresholds.classify(&Margin::Days(29)), DueStatus::DueSoon);
        assert_eq!(thresholds.classify(&Margin::Days(30)), DueStatus::Ok);
        assert_eq!(thresholds.classify(&Margin::Days(0)), DueStatus::DueSoon);
        assert_eq!(thresholds.classify(&Margin::Hours(24.9)), DueStatus::DueSoon);
        assert_eq!(thresholds.classify(&Margin::Hours(25.0)), DueStatus::Ok);
    }

    #[test]
    fn custom_thresholds_apply() {
        let thresholds = AlertThresholds {
            days: 60,
            hours: 10.0,
            cycles: 5,
        };
        assert_eq!(thresholds.classify(&Margin::Days(45)), DueStatus::DueSoon);
        assert_eq!(thresholds.classify(&Margin::Hours(20.0)), DueStatus::Ok);
        assert_eq!(thresholds.classify(&Margin::Cycles(5)), DueStatus::Ok);
    }

    #[test]
    fn nothing_to_track_needs_checking() {
        let task = MaintenanceTask::new("t", "ac", TrackType::Unrecognized("?".into()));
        let (_, margin) = evaluate(&task, &airframe(0.0, 0), date("2025-01-01"));

        assert_eq!(margin.margin, Margin::NoDueConstraint);
        assert_eq!(margin.governing_unit(), GoverningUnit::NotApplicable);
        assert!(!margin.is_overdue());
        assert_eq!(margin.status, DueStatus::CheckDueInfo);
        assert_eq!(margin.display_text(), "N/A");
    }

    #[test]
    fn urgency_orders_no_constraint_last() {
        let thresholds = AlertThresholds::default();
        let margin = |margin: Margin| RemainingMargin {
            margin,
            status: thresholds.classify(&margin),
        };

        let mut margins = vec![
            margin(Margin::NoDueConstraint),
            margin(Margin::Days(400)),
            margin(Margin::Hours(-3.0)),
            margin(Margin::Days(-40)),
            margin(Margin::Cycles(10)),
            margin(Margin::MissingComponentTime {
                unit: GoverningUnit::Hours,
            }),
            margin(Margin::Days(12)),
        ];
        margins.sort_by(RemainingMargin::urgency_cmp);

        let order: Vec<_> = margins.iter().map(|m| m.margin).collect();
        assert_eq!(
            order,
            vec![
                Margin::Days(-40),
                Margin::Hours(-3.0),
                Margin::MissingComponentTime {
                    unit: GoverningUnit::Hours
                },
                Margin::Cycles(10),
                Margin::Days(12),
                Margin::Days(400),
                Margin::NoDueConstraint,
            ]
        );
    }

    #[test]
    fn serializes_display_record() {
        let margin = RemainingMargin {
            margin: Margin::Days(-31),
            status: DueStatus::Overdue,
        };
        let json = serde_json::to_value(margin).unwrap();
        assert_eq!(json["displayText"], "-31 days");
        assert_eq!(json["numericValue"], -31.0);
        assert_eq!(json["governingUnit"], "days");
        assert_eq!(json["isOverdue"], true);
        assert_eq!(json["statusLabel"], "Overdue");

        let json = serde_json::to_value(RemainingMargin {
            margin: Margin::NoDueConstraint,
            status: DueStatus::CheckDueInfo,
        })
        .unwrap();
        assert!(json["numericValue"].is_null());
        assert_eq!(json["governingUnit"], "N/A");
        assert_eq!(json["statusLabel"], "Check Due Info");
    }
}
