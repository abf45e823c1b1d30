//! Per-aircraft and fleet-wide due reports.
//!
//! A report runs the projector and the margin calculator over every task of
//! an aircraft and orders the results by urgency, which is what a
//! maintenance table and the dashboard counters display.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

use super::{
    Config,
    aircraft::{Aircraft, ComponentTimeSnapshot},
    margin::{DueStatus, RemainingMargin, compute_remaining_margin_with},
    projection::{DueProjection, project_due_dates},
    task::MaintenanceTask,
};

/// The computed due state of one task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation<'a> {
    /// The evaluated task.
    pub task: &'a MaintenanceTask,
    /// All due points, for secondary display.
    pub projection: DueProjection,
    /// The governing margin and its status.
    pub margin: RemainingMargin,
}

/// Evaluate one task against its aircraft's component snapshots.
#[must_use]
pub fn evaluate_task<'a>(
    task: &'a MaintenanceTask,
    snapshots: &[ComponentTimeSnapshot],
    today: NaiveDate,
    config: &Config,
) -> Evaluation<'a> {
    let projection = project_due_dates(task, today);
    let margin = compute_remaining_margin_with(
        task.component_or(config.default_component()),
        &projection,
        snapshots,
        today,
        &config.thresholds,
    );
    Evaluation {
        task,
        projection,
        margin,
    }
}

/// Which tasks a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include tasks marked inactive.
    pub include_inactive: bool,
}

/// Number of tasks in each status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<DueStatus, usize>);

impl StatusCounts {
    /// Count one task.
    pub fn record(&mut self, status: DueStatus) {
        *self.0.entry(status).or_insert(0) += 1;
    }

    /// Tasks with the given status.
    #[must_use]
    pub fn get(&self, status: DueStatus) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    /// Tasks counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Whether any counted task is overdue, due soon or missing data.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        self.0
            .iter()
            .any(|(status, &count)| status.needs_attention() && count > 0)
    }

    /// Add another set of counts to this one.
    pub fn merge(&mut self, other: &Self) {
        for (&status, &count) in &other.0 {
            *self.0.entry(status).or_insert(0) += count;
        }
    }
}

impl FromIterator<DueStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = DueStatus>>(iter: I) -> Self {
        let mut counts = Self::default();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}

/// Every evaluated task of one aircraft, most urgent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftReport<'a> {
    /// The aircraft.
    pub aircraft: &'a Aircraft,
    /// Evaluated tasks in urgency order.
    pub rows: Vec<Evaluation<'a>>,
    /// Tasks per status.
    pub counts: StatusCounts,
}

impl<'a> AircraftReport<'a> {
    /// Evaluate the tasks belonging to `aircraft`.
    ///
    /// Tasks for other aircraft are ignored, as are inactive tasks unless
    /// `options` asks for them.
    #[must_use]
    pub fn build<I>(
        aircraft: &'a Aircraft,
        tasks: I,
        today: NaiveDate,
        config: &Config,
        options: ReportOptions,
    ) -> Self
    where
        I: IntoIterator<Item = &'a MaintenanceTask>,
    {
        let mut rows: Vec<_> = tasks
            .into_iter()
            .filter(|task| task.aircraft_id == aircraft.id)
            .filter(|task| options.include_inactive || task.is_active)
            .map(|task| evaluate_task(task, &aircraft.components, today, config))
            .collect();

        rows.sort_by(|a, b| {
            a.margin
                .urgency_cmp(&b.margin)
                .then_with(|| a.task.id.cmp(&b.task.id))
        });

        let counts = rows.iter().map(|row| row.margin.status).collect();

        Self {
            aircraft,
            rows,
            counts,
        }
    }
}

/// Due reports for a whole fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport<'a> {
    /// One report per aircraft, ordered by tail number.
    pub aircraft: Vec<AircraftReport<'a>>,
    /// Tasks whose `aircraftId` matches no aircraft. Not evaluated.
    pub orphans: Vec<&'a MaintenanceTask>,
}

impl<'a> FleetReport<'a> {
    /// Evaluate every aircraft's tasks.
    ///
    /// Aircraft are evaluated in parallel; the result does not depend on
    /// scheduling.
    #[must_use]
    pub fn build(
        aircraft: &'a [Aircraft],
        tasks: &'a [MaintenanceTask],
        today: NaiveDate,
        config: &Config,
        options: ReportOptions,
    ) -> Self {
        let mut by_aircraft: HashMap<&str, Vec<&'a MaintenanceTask>> = HashMap::new();
        for task in tasks {
            by_aircraft
                .entry(task.aircraft_id.as_str())
                .or_default()
                .push(task);
        }

        let mut reports: Vec<_> = aircraft
            .par_iter()
            .map(|aircraft| {
                let tasks = by_aircraft
                    .get(aircraft.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                AircraftReport::build(aircraft, tasks.iter().copied(), today, config, options)
            })
            .collect();
        reports.sort_by(|a, b| {
            a.aircraft
                .tail_number
                .cmp(&b.aircraft.tail_number)
                .then_with(|| a.aircraft.id.cmp(&b.aircraft.id))
        });

        let mut orphans: Vec<_> = tasks
            .iter()
            .filter(|task| !aircraft.iter().any(|a| a.id == task.aircraft_id))
            .collect();
        orphans.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            aircraft: reports,
            orphans,
        }
    }

    /// Tasks per status across the fleet.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for report in &self.aircraft {
            counts.merge(&report.counts);
        }
        counts
    }
}
