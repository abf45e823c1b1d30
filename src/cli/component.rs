use std::path::PathBuf;

use clap::Parser;
use maintrack::Aircraft;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Parser)]
pub struct Command {
    #[command(subcommand)]
    command: ComponentCommand,
}

#[derive(Debug, Parser)]
enum ComponentCommand {
    /// Set a component's current hours and cycles
    ///
    /// Components not tracked yet are added to the aircraft.
    Set(Set),

    /// List tracked components and their current times
    List(List),
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self.command {
            ComponentCommand::Set(set) => set.run(root),
            ComponentCommand::List(list) => list.run(root),
        }
    }
}

#[derive(Debug, Parser)]
struct Set {
    /// Aircraft id or tail number
    aircraft: String,

    /// Component name, e.g. "Engine 1"
    component: String,

    /// Current accumulated hours
    #[arg(long)]
    hours: f64,

    /// Current accumulated cycles
    #[arg(long)]
    cycles: i64,
}

impl Set {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut store = super::load_store(root)?;
        let added = store.set_component_time(&self.aircraft, &self.component, self.hours, self.cycles)?;

        let verb = if added { "Added" } else { "Updated" };
        println!(
            "{}",
            format!(
                "✅ {verb} {} on {}: {:.1} hrs, {} cycles",
                self.component.trim(),
                self.aircraft,
                self.hours,
                self.cycles
            )
            .success()
        );
        Ok(())
    }
}

#[derive(Debug, Parser)]
struct List {
    /// Aircraft ids or tail numbers (default: the whole fleet)
    aircraft: Vec<String>,
}

impl List {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let store = super::load_store(root)?;

        let aircraft: Vec<&Aircraft> = if self.aircraft.is_empty() {
            store.aircraft().iter().collect()
        } else {
            self.aircraft
                .iter()
                .map(|key| {
                    store
                        .find_aircraft(key)
                        .ok_or_else(|| anyhow::anyhow!("Aircraft '{key}' not found"))
                })
                .collect::<anyhow::Result<_>>()?
        };

        if aircraft.is_empty() {
            println!("No aircraft found yet.");
            return Ok(());
        }

        let narrow = is_narrow();
        for aircraft in aircraft {
            match &aircraft.model {
                Some(model) => println!("{} {}", aircraft.tail_number, format!("({model})").dim()),
                None => println!("{}", aircraft.tail_number),
            }
            if aircraft.components.is_empty() {
                println!("  {}", "no tracked components".dim());
            }
            for component in &aircraft.components {
                if narrow {
                    println!("  {}", component.component_name);
                    println!(
                        "    {:.1} hrs, {} cycles",
                        component.current_time, component.current_cycles
                    );
                } else {
                    println!(
                        "  {:<24} {:>10.1} hrs {:>8} cycles",
                        component.component_name, component.current_time, component.current_cycles
                    );
                }
            }
        }
        Ok(())
    }
}
