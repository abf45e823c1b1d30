use std::{path::PathBuf, process};

use chrono::NaiveDate;
use clap::Parser;
use maintrack::{
    Aircraft, ComponentTimeSnapshot, MaintenanceTask,
    domain::{
        Evaluation, TaskIssue, TrackType, calendar, diagnose_task, evaluate_task, round_tenths,
    },
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display every projected due point of a task")]
pub struct Show {
    /// The id of the task to display
    task_id: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Remaining figures for every projected dimension, not only the governing one.
#[derive(Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Dimensions {
    days: Option<i64>,
    hours: Option<f64>,
    cycles: Option<i64>,
}

impl Dimensions {
    fn new(evaluation: &Evaluation<'_>, snapshot: Option<&ComponentTimeSnapshot>, today: NaiveDate) -> Self {
        let projection = &evaluation.projection;
        Self {
            days: projection
                .due_at_date
                .map(|date| calendar::days_between(today, date)),
            hours: projection
                .due_at_hours
                .zip(snapshot.filter(|s| s.has_usable_time()))
                .map(|(due, snapshot)| round_tenths(due - snapshot.current_time))
                .filter(|hours| hours.is_finite()),
            cycles: projection
                .due_at_cycles
                .zip(snapshot.filter(|s| s.has_usable_cycles()))
                .map(|(due, snapshot)| due.saturating_sub(snapshot.current_cycles)),
        }
    }
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf, today: NaiveDate) -> anyhow::Result<()> {
        let store = super::load_store(root)?;
        let config = store.config();

        let Some(task) = store.find_task(&self.task_id) else {
            eprintln!("Task '{}' not found", self.task_id);
            process::exit(1);
        };

        let aircraft = store.aircraft_of(task);
        let snapshots = aircraft.map_or(&[][..], |a| a.components.as_slice());
        let component = task.component_or(config.default_component());
        let snapshot = aircraft.and_then(|a| a.component(component));

        let evaluation = evaluate_task(task, snapshots, today, config);
        let remaining = Dimensions::new(&evaluation, snapshot, today);
        let issues = diagnose_task(task, aircraft, config.default_component());
        let path = store.task_path(&task.id).map(|path| path.display().to_string());

        match self.output {
            OutputFormat::Pretty => output_pretty(&Details {
                task,
                aircraft,
                component,
                snapshot,
                evaluation: &evaluation,
                remaining: &remaining,
                issues: &issues,
                path: path.as_deref(),
                today,
            }),
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "today": today,
                    "path": path,
                    "component": component,
                    "snapshot": snapshot,
                    "evaluation": evaluation,
                    "remaining": remaining,
                    "issues": issues,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Ok(())
    }
}

struct Details<'a> {
    task: &'a MaintenanceTask,
    aircraft: Option<&'a Aircraft>,
    component: &'a str,
    snapshot: Option<&'a ComponentTimeSnapshot>,
    evaluation: &'a Evaluation<'a>,
    remaining: &'a Dimensions,
    issues: &'a [TaskIssue],
    path: Option<&'a str>,
    today: NaiveDate,
}

fn output_pretty(details: &Details<'_>) {
    let task = details.task;
    let margin = &details.evaluation.margin;
    let projection = &details.evaluation.projection;

    println!("# {}", task.id);
    println!("{}\n", task.item_title);

    println!("{}", "Task".dim());
    match details.aircraft {
        Some(aircraft) => println!("  Aircraft:   {} ({})", aircraft.tail_number, aircraft.id),
        None => println!("  Aircraft:   {} {}", task.aircraft_id, "(unknown)".warning()),
    }
    if !task.item_type.is_empty() {
        println!("  Type:       {}", task.item_type);
    }
    println!("  Component:  {}", details.component);
    println!("  Tracking:   {}", tracking_label(&task.track_type));
    if !task.is_active {
        println!("  Active:     {}", "no".dim());
    }
    if let Some(path) = details.path {
        println!("  Path:       {path}");
    }

    if task.last_completed_date.is_some()
        || task.last_completed_hours.is_some()
        || task.last_completed_cycles.is_some()
    {
        println!("\n{}", "Last completed".dim());
        if let Some(date) = &task.last_completed_date {
            println!("  Date:       {date}");
        }
        if let Some(hours) = &task.last_completed_hours {
            println!("  Hours:      {hours}");
        }
        if let Some(cycles) = &task.last_completed_cycles {
            println!("  Cycles:     {cycles}");
        }
    }

    println!("\n{}", format!("Projected due (as of {})", details.today).dim());
    if projection.is_empty() {
        println!("  {}", "No due point could be projected".dim());
    }
    if let Some(date) = projection.due_at_date {
        println!(
            "  Date:       {date}{}",
            remaining_suffix(details.remaining.days.map(|d| format!("{d} days")))
        );
    }
    if let Some(hours) = projection.due_at_hours {
        println!(
            "  Hours:      {hours:.1}{}",
            remaining_suffix(details.remaining.hours.map(|h| format!("{h:.1} hrs")))
        );
    }
    if let Some(cycles) = projection.due_at_cycles {
        println!(
            "  Cycles:     {cycles}{}",
            remaining_suffix(details.remaining.cycles.map(|c| format!("{c} cycles")))
        );
    }

    if let Some(snapshot) = details.snapshot {
        println!(
            "  Current:    {:.1} hrs, {} cycles",
            snapshot.current_time, snapshot.current_cycles
        );
    }

    println!(
        "\nRemaining: {}  [{}]",
        margin.display_text().status(margin.status),
        margin.status.label().status(margin.status)
    );

    if !details.issues.is_empty() {
        println!("\n{}", "Issues".dim());
        for issue in details.issues {
            println!("  • {}", issue.to_string().warning());
        }
    }
}

fn remaining_suffix(remaining: Option<String>) -> String {
    remaining.map_or_else(String::new, |r| format!("  ({r} remaining)"))
}

fn tracking_label(track_type: &TrackType) -> String {
    match track_type {
        TrackType::Interval => "Interval".to_string(),
        TrackType::OneTime => "One Time".to_string(),
        TrackType::Unrecognized(raw) => format!("{raw:?} (unrecognized)"),
    }
}

#[cfg(test)]
mod tests {
    use maintrack::{
        Config,
        domain::{FormValue, IntervalType},
    };

    use super::*;

    #[test]
    fn remaining_covers_every_projected_dimension() {
        let mut task = MaintenanceTask::new("t", "ac-1", TrackType::Interval);
        task.last_completed_date = Some("2025-01-01".to_string());
        task.last_completed_hours = Some(FormValue::Number(100.0));
        task.is_days_due_enabled = true;
        task.days_due_value = Some(FormValue::Number(90.0));
        task.days_interval_type = IntervalType::Days;
        task.is_hours_due_enabled = true;
        task.hours_due = Some(FormValue::Number(50.0));

        let snapshots = [ComponentTimeSnapshot::new("Airframe", 140.0, 0)];
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let evaluation = evaluate_task(&task, &snapshots, today, &Config::default());

        let remaining = Dimensions::new(&evaluation, snapshots.first(), today);
        assert_eq!(
            remaining,
            Dimensions {
                days: Some(31),
                hours: Some(10.0),
                cycles: None,
            }
        );

        let without_snapshot = Dimensions::new(&evaluation, None, today);
        assert_eq!(without_snapshot.hours, None);
        assert_eq!(without_snapshot.days, Some(31));
    }

    #[test]
    fn remaining_figures_match_the_headline_margin() {
        let mut task = MaintenanceTask::new("t", "ac-1", TrackType::Interval);
        task.last_completed_hours = Some(FormValue::Number(100.0));
        task.is_hours_due_enabled = true;
        task.hours_due = Some(FormValue::Number(50.0));

        let snapshots = [ComponentTimeSnapshot::new("Airframe", 139.96, 0)];
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let evaluation = evaluate_task(&task, &snapshots, today, &Config::default());

        let remaining = Dimensions::new(&evaluation, snapshots.first(), today);
        assert_eq!(remaining.hours, Some(10.0));
        assert_eq!(evaluation.margin.numeric_value(), remaining.hours);
    }

    #[test]
    fn extreme_cycle_readings_do_not_overflow() {
        let mut task = MaintenanceTask::new("t", "ac-1", TrackType::OneTime);
        task.is_cycles_due_enabled = true;
        task.cycles_due = Some(FormValue::Number(9.0e18));
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let negative = [ComponentTimeSnapshot::new("Airframe", 0.0, -1_000_000_000_000_000_000)];
        let evaluation = evaluate_task(&task, &negative, today, &Config::default());
        assert_eq!(Dimensions::new(&evaluation, negative.first(), today).cycles, None);

        let evaluation = Evaluation {
            projection: maintrack::DueProjection {
                due_at_cycles: Some(i64::MIN),
                ..Default::default()
            },
            ..evaluation
        };
        let large = [ComponentTimeSnapshot::new("Airframe", 0.0, i64::MAX)];
        assert_eq!(
            Dimensions::new(&evaluation, large.first(), today).cycles,
            Some(i64::MIN)
        );
    }

    #[test]
    fn labels_track_types() {
        assert_eq!(tracking_label(&TrackType::OneTime), "One Time");
        assert_eq!(
            tracking_label(&TrackType::Unrecognized("Recurring".to_string())),
            "\"Recurring\" (unrecognized)"
        );
    }
}
