use std::{collections::HashMap, path::PathBuf, process};

use clap::Parser;
use maintrack::{
    Store,
    domain::{TaskIssue, diagnose_task},
};
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check records for data problems")]
pub struct Validate {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationResult {
    rejected_files: Vec<RejectedFile>,
    aircraft_issues: Vec<AircraftIssue>,
    task_issues: Vec<TaskIssues>,
}

#[derive(Debug, Serialize)]
struct RejectedFile {
    path: PathBuf,
    reason: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
enum AircraftIssue {
    DuplicateTailNumber { tail_number: String, ids: Vec<String> },
    DuplicateComponent { aircraft_id: String, component: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskIssues {
    task_id: String,
    path: Option<PathBuf>,
    issues: Vec<TaskIssue>,
}

impl ValidationResult {
    fn collect(store: &Store) -> Self {
        let rejected_files = store
            .rejected()
            .iter()
            .map(|rejected| RejectedFile {
                path: rejected.path.clone(),
                reason: rejected.reason.clone(),
            })
            .collect();

        let default_component = store.config().default_component();
        let task_issues = store
            .tasks()
            .iter()
            .filter_map(|task| {
                let aircraft = store.aircraft_of(task);
                let issues = diagnose_task(task, aircraft, default_component);
                (!issues.is_empty()).then(|| TaskIssues {
                    task_id: task.id.clone(),
                    path: store.task_path(&task.id).map(PathBuf::from),
                    issues,
                })
            })
            .collect();

        Self {
            rejected_files,
            aircraft_issues: aircraft_issues(store),
            task_issues,
        }
    }

    fn total_issues(&self) -> usize {
        self.rejected_files.len()
            + self.aircraft_issues.len()
            + self.task_issues.iter().map(|t| t.issues.len()).sum::<usize>()
    }
}

fn aircraft_issues(store: &Store) -> Vec<AircraftIssue> {
    let mut issues = Vec::new();

    let mut by_tail: HashMap<String, Vec<String>> = HashMap::new();
    for aircraft in store.aircraft() {
        by_tail
            .entry(aircraft.tail_number.trim().to_ascii_uppercase())
            .or_default()
            .push(aircraft.id.clone());
    }
    let mut duplicates: Vec<_> = by_tail.into_iter().filter(|(_, ids)| ids.len() > 1).collect();
    duplicates.sort();
    issues.extend(
        duplicates
            .into_iter()
            .map(|(tail_number, ids)| AircraftIssue::DuplicateTailNumber { tail_number, ids }),
    );

    for aircraft in store.aircraft() {
        for (i, component) in aircraft.components.iter().enumerate() {
            let repeated = aircraft.components[..i]
                .iter()
                .any(|earlier| earlier.matches(&component.component_name));
            if repeated {
                issues.push(AircraftIssue::DuplicateComponent {
                    aircraft_id: aircraft.id.clone(),
                    component: component.component_name.trim().to_string(),
                });
            }
        }
    }

    issues
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let store = super::load_store(root)?;
        let result = ValidationResult::collect(&store);
        let total = result.total_issues();

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Table => {
                if !self.quiet {
                    Self::output_table(&result, total);
                }
            }
        }

        if total > 0 {
            process::exit(1);
        }
        Ok(())
    }

    fn output_table(result: &ValidationResult, total: usize) {
        if total == 0 {
            println!("{}", "✅ No issues found".success());
            return;
        }

        if !result.rejected_files.is_empty() {
            println!("Unreadable files ({}):", result.rejected_files.len());
            for file in &result.rejected_files {
                println!("  • {}", file.reason.warning());
            }
            println!();
        }

        if !result.aircraft_issues.is_empty() {
            println!("Aircraft ({}):", result.aircraft_issues.len());
            for issue in &result.aircraft_issues {
                let message = match issue {
                    AircraftIssue::DuplicateTailNumber { tail_number, ids } => {
                        format!("tail number {tail_number} is used by {}", ids.join(", "))
                    }
                    AircraftIssue::DuplicateComponent {
                        aircraft_id,
                        component,
                    } => format!("{aircraft_id}: component {component:?} is listed twice"),
                };
                println!("  • {}", message.warning());
            }
            println!();
        }

        if !result.task_issues.is_empty() {
            println!("Tasks ({}):", result.task_issues.len());
            for task in &result.task_issues {
                match &task.path {
                    Some(path) => println!("  {} {}", task.task_id, path.display().to_string().dim()),
                    None => println!("  {}", task.task_id),
                }
                for issue in &task.issues {
                    println!("    • {}", issue.to_string().warning());
                }
            }
            println!();
        }

        println!(
            "{}",
            format!("⚠️  {total} issue(s) found").warning()
        );
    }
}
