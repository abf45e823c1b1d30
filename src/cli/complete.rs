use std::{path::PathBuf, process};

use chrono::NaiveDate;
use clap::Parser;
use maintrack::{
    MaintenanceTask,
    domain::{ComponentTimeSnapshot, evaluate_task},
    storage::Completion,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Record a completed sign-off on a task")]
pub struct Complete {
    /// The id of the completed task
    task_id: String,

    /// Date the work was done (default: today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,

    /// Component hours at completion (default: the component's current hours)
    #[arg(long)]
    hours: Option<f64>,

    /// Component cycles at completion (default: the component's current cycles)
    #[arg(long)]
    cycles: Option<i64>,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Complete {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf, today: NaiveDate) -> anyhow::Result<()> {
        let mut store = super::load_store(root)?;

        let Some(task) = store.find_task(&self.task_id) else {
            anyhow::bail!("Task '{}' not found", self.task_id);
        };

        let component = task.component_or(store.config().default_component());
        let snapshot = store
            .aircraft_of(task)
            .and_then(|a| a.component(component));
        let completion = self.completion(snapshot, today)?;

        if !self.yes {
            preview(task, component, &completion);
            let proceed = dialoguer::Confirm::new()
                .with_prompt("Record this completion?")
                .default(false)
                .interact()?;
            if !proceed {
                println!("Cancelled");
                process::exit(130);
            }
        }

        let task = store.record_completion(&self.task_id, completion)?.clone();

        println!(
            "{}",
            format!("✅ Recorded completion of {} on {}", task.id, completion.date).success()
        );

        let snapshots = store
            .aircraft_of(&task)
            .map_or(&[][..], |a| a.components.as_slice());
        let evaluation = evaluate_task(&task, snapshots, today, store.config());
        let margin = evaluation.margin;
        println!(
            "Remaining: {}  [{}]",
            margin.display_text().status(margin.status),
            margin.status.label().status(margin.status)
        );

        Ok(())
    }

    /// Fill in unspecified values from the component's snapshot and today.
    fn completion(
        &self,
        snapshot: Option<&ComponentTimeSnapshot>,
        today: NaiveDate,
    ) -> anyhow::Result<Completion> {
        let date = self.date.unwrap_or(today);
        if date > today {
            anyhow::bail!("Completion date {date} is after today ({today})");
        }

        Ok(Completion {
            date,
            hours: self.hours.or_else(|| snapshot.map(|s| s.current_time)),
            cycles: self.cycles.or_else(|| snapshot.map(|s| s.current_cycles)),
        })
    }
}

fn preview(task: &MaintenanceTask, component: &str, completion: &Completion) {
    println!("Will record completion of {}:", task.id);
    println!("  Title:      {}", task.item_title);
    println!("  Date:       {}", completion.date);
    match completion.hours {
        Some(hours) => println!("  Hours:      {hours:.1} ({component})"),
        None => println!("  Hours:      {}", "unchanged".dim()),
    }
    match completion.cycles {
        Some(cycles) => println!("  Cycles:     {cycles} ({component})"),
        None => println!("  Cycles:     {}", "unchanged".dim()),
    }
}
