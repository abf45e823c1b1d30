use std::{collections::BTreeSet, path::PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use maintrack::{
    DueStatus,
    domain::{AircraftReport, Evaluation, GoverningUnit, ReportOptions},
};
use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Parser)]
#[command(about = "List tasks with their next due point and remaining margin")]
pub struct Due {
    /// Aircraft ids or tail numbers to list (default: the whole fleet)
    aircraft: Vec<String>,

    /// Only show tasks with these statuses (comma separated)
    #[arg(long, value_delimiter = ',')]
    status: Vec<StatusFilter>,

    /// Only show tasks tracked against this component
    #[arg(long)]
    component: Option<String>,

    /// Only show tasks whose title matches this regular expression
    #[arg(long, value_name = "REGEX")]
    matching: Option<Regex>,

    /// Include inactive tasks
    #[arg(long)]
    all: bool,

    /// Show at most this many tasks per aircraft
    #[arg(long)]
    limit: Option<usize>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
enum StatusFilter {
    Overdue,
    Missing,
    DueSoon,
    Ok,
    CheckDueInfo,
}

impl From<StatusFilter> for DueStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Overdue => Self::Overdue,
            StatusFilter::Missing => Self::MissingComponentTime,
            StatusFilter::DueSoon => Self::DueSoon,
            StatusFilter::Ok => Self::Ok,
            StatusFilter::CheckDueInfo => Self::CheckDueInfo,
        }
    }
}

/// One row of the due listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DueRow<'a> {
    tail_number: &'a str,
    component: &'a str,
    #[serde(flatten)]
    evaluation: Evaluation<'a>,
}

impl DueRow<'_> {
    /// The due point of the governing dimension.
    fn next_due(&self) -> String {
        let projection = &self.evaluation.projection;
        let next = match self.evaluation.margin.governing_unit() {
            GoverningUnit::Days => projection.due_at_date.map(|date| date.to_string()),
            GoverningUnit::Hours => projection.due_at_hours.map(|hours| format!("{hours:.1} hrs")),
            GoverningUnit::Cycles => projection
                .due_at_cycles
                .map(|cycles| format!("{cycles} cycles")),
            GoverningUnit::NotApplicable => None,
        };
        next.unwrap_or_else(|| "-".to_string())
    }
}

impl Due {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf, today: NaiveDate) -> anyhow::Result<()> {
        let store = super::load_store(root)?;

        let mut selected = BTreeSet::new();
        for key in &self.aircraft {
            let Some(aircraft) = store.find_aircraft(key) else {
                anyhow::bail!("Aircraft '{key}' not found");
            };
            selected.insert(aircraft.id.as_str());
        }

        let options = ReportOptions {
            include_inactive: self.all,
        };
        let report = store.report(today, options);
        let default_component = store.config().default_component();

        let rows: Vec<_> = report
            .aircraft
            .iter()
            .filter(|entry| selected.is_empty() || selected.contains(entry.aircraft.id.as_str()))
            .flat_map(|entry| self.select(entry, default_component))
            .collect();

        tracing::debug!("{} matching tasks", rows.len());

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Csv => print!("{}", to_csv(&rows, !self.quiet)),
            OutputFormat::Table => {
                if self.quiet {
                    for row in &rows {
                        println!(
                            "{}\t{}\t{}\t{}",
                            row.tail_number,
                            row.evaluation.task.id,
                            row.evaluation.margin.status,
                            row.evaluation.margin.display_text()
                        );
                    }
                } else if rows.is_empty() {
                    println!("No matching tasks.");
                } else if is_narrow() {
                    output_stacked(&rows);
                } else {
                    output_table(&rows);
                }
            }
        }

        Ok(())
    }

    fn select<'a>(&self, entry: &AircraftReport<'a>, default_component: &'a str) -> Vec<DueRow<'a>> {
        let statuses: BTreeSet<DueStatus> = self.status.iter().copied().map(Into::into).collect();

        entry
            .rows
            .iter()
            .filter(|row| statuses.is_empty() || statuses.contains(&row.margin.status))
            .map(|row| DueRow {
                tail_number: &entry.aircraft.tail_number,
                component: row.task.component_or(default_component),
                evaluation: *row,
            })
            .filter(|row| {
                self.component
                    .as_deref()
                    .is_none_or(|component| row.component == component.trim())
            })
            .filter(|row| {
                self.matching
                    .as_ref()
                    .is_none_or(|regex| regex.is_match(&row.evaluation.task.item_title))
            })
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

fn output_table(rows: &[DueRow<'_>]) {
    println!(
        "{:<8} {:<20} {:<32} {:<12} {:<14} {:>16}  Status",
        "Aircraft", "Task", "Title", "Component", "Next due", "Remaining"
    );
    println!("{}", "─".repeat(118).dim());

    for row in rows {
        let status = row.evaluation.margin.status;
        println!(
            "{:<8} {:<20} {:<32} {:<12} {:<14} {}  {}",
            row.tail_number,
            truncate(&row.evaluation.task.id, 20),
            truncate(&row.evaluation.task.item_title, 32),
            truncate(row.component, 12),
            row.next_due(),
            format!("{:>16}", row.evaluation.margin.display_text()).status(status),
            status.label().status(status),
        );
    }
}

fn output_stacked(rows: &[DueRow<'_>]) {
    for row in rows {
        let status = row.evaluation.margin.status;
        println!(
            "{} {} [{}]",
            row.tail_number,
            row.evaluation.task.id,
            status.label().status(status)
        );
        println!("  {}", row.evaluation.task.item_title);
        println!(
            "  {} {}",
            row.evaluation.margin.display_text(),
            format!("(due {})", row.next_due()).dim()
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

fn to_csv(rows: &[DueRow<'_>], header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(
            "tail_number,task_id,item_title,component,status,remaining,governing_unit,due_at_date,due_at_hours,due_at_cycles\n",
        );
    }
    for row in rows {
        let projection = &row.evaluation.projection;
        let margin = &row.evaluation.margin;
        let fields = [
            row.tail_number.to_string(),
            row.evaluation.task.id.clone(),
            row.evaluation.task.item_title.clone(),
            row.component.to_string(),
            margin.status.label().to_string(),
            margin.numeric_value().map(|v| v.to_string()).unwrap_or_default(),
            margin.governing_unit().label().to_string(),
            projection.due_at_date_iso().unwrap_or_default(),
            projection.due_at_hours.map(|h| h.to_string()).unwrap_or_default(),
            projection.due_at_cycles.map(|c| c.to_string()).unwrap_or_default(),
        ];
        let escaped: Vec<_> = fields.iter().map(|field| csv_field(field)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
