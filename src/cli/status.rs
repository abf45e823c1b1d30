use std::{path::PathBuf, process};

use chrono::NaiveDate;
use clap::Parser;
use maintrack::{
    DueStatus,
    domain::{FleetReport, ReportOptions, StatusCounts},
};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Parser, Default)]
#[command(about = "Show due status counts per aircraft")]
pub struct Status {
    /// Output format (table, json)
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
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf, today: NaiveDate) -> anyhow::Result<()> {
        let store = super::load_store(root)?;

        if store.aircraft().is_empty() {
            println!("No aircraft found yet. Add aircraft records under 'aircraft/'.");
            return Ok(());
        }

        let report = store.report(today, ReportOptions::default());
        let totals = report.counts();

        match self.output {
            OutputFormat::Json => Self::output_json(&report, &totals, today)?,
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(&totals);
                } else {
                    Self::output_table(&report, &totals, today);
                    if !store.rejected().is_empty() {
                        println!();
                        println!(
                            "{}",
                            format!(
                                "⚠️  {} record file(s) could not be read. Run 'mtrack validate' for details.",
                                store.rejected().len()
                            )
                            .warning()
                        );
                    }
                }
            }
        }

        let exit_code = exit_code(&totals);
        if exit_code != 0 {
            process::exit(exit_code);
        }

        Ok(())
    }

    fn output_json(
        report: &FleetReport<'_>,
        totals: &StatusCounts,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let aircraft: Vec<_> = report
            .aircraft
            .iter()
            .map(|entry| {
                json!({
                    "id": entry.aircraft.id,
                    "tailNumber": entry.aircraft.tail_number,
                    "counts": entry.counts,
                    "total": entry.counts.total(),
                })
            })
            .collect();

        let output = json!({
            "today": today,
            "aircraft": aircraft,
            "counts": totals,
            "total": totals.total(),
            "unassignedTasks": report.orphans.len(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(totals: &StatusCounts) {
        let fields: Vec<_> = DueStatus::ALL
            .iter()
            .map(|&status| format!("{}={}", quiet_key(status), totals.get(status)))
            .collect();
        println!("{} total={}", fields.join(" "), totals.total());
    }

    fn output_table(report: &FleetReport<'_>, totals: &StatusCounts, today: NaiveDate) {
        println!("Fleet status as of {today}");
        println!("{}", "──────────────────────────".dim());

        if is_narrow() {
            for entry in &report.aircraft {
                println!("{}", entry.aircraft.tail_number);
                for status in DueStatus::ALL {
                    let count = entry.counts.get(status);
                    if count > 0 {
                        println!("  {}: {}", status.label(), count.to_string().status(status));
                    }
                }
            }
        } else {
            print!("{:<10}", "Aircraft");
            for status in DueStatus::ALL {
                print!(" {:>18}", status.label());
            }
            println!(" {:>6}", "Total");

            for entry in &report.aircraft {
                print!("{:<10}", entry.aircraft.tail_number);
                for status in DueStatus::ALL {
                    print!(" {}", count_cell(entry.counts.get(status), status));
                }
                println!(" {:>6}", entry.counts.total());
            }

            print!("{:<10}", "Fleet");
            for status in DueStatus::ALL {
                print!(" {}", count_cell(totals.get(status), status));
            }
            println!(" {:>6}", totals.total());
        }

        println!();

        let overdue = totals.get(DueStatus::Overdue);
        if totals.needs_attention() {
            if overdue > 0 {
                println!("Overdue: {} ⚠️", overdue.to_string().error());
            }
            println!("{}", "Run 'mtrack due' to see the tasks needing attention.".dim());
        } else {
            println!("Overdue: {} ✅", "0".success());
        }

        if !report.orphans.is_empty() {
            println!(
                "{}",
                format!(
                    "{} task(s) reference unknown aircraft and were not evaluated.",
                    report.orphans.len()
                )
                .warning()
            );
        }
    }
}

fn count_cell(count: usize, status: DueStatus) -> String {
    let cell = format!("{count:>18}");
    if count == 0 {
        cell.dim()
    } else {
        cell.status(status)
    }
}

const fn quiet_key(status: DueStatus) -> &'static str {
    match status {
        DueStatus::Overdue => "overdue",
        DueStatus::MissingComponentTime => "missing",
        DueStatus::DueSoon => "due_soon",
        DueStatus::Ok => "ok",
        DueStatus::CheckDueInfo => "check",
    }
}

/// 3 when anything is overdue, 2 when anything else needs attention.
fn exit_code(totals: &StatusCounts) -> i32 {
    if totals.get(DueStatus::Overdue) > 0 {
        3
    } else if totals.needs_attention() {
        2
    } else {
        0
    }
}
