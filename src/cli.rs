use std::path::{Path, PathBuf};

mod complete;
mod component;
mod due;
mod show;
mod status;
mod terminal;
mod validate;

use chrono::NaiveDate;
use clap::ArgAction;
use complete::Complete;
use due::Due;
use maintrack::{Store, domain::calendar};
use show::Show;
use status::Status;
use tracing::instrument;
use validate::Validate;

/// Parse a `YYYY-MM-DD` date argument.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    calendar::parse_iso_date(s).ok_or_else(|| format!("'{s}' is not a date (expected YYYY-MM-DD)"))
}

/// Load every record below `root`.
fn load_store(root: PathBuf) -> anyhow::Result<Store> {
    let store = Store::new(root).load_all()?;
    tracing::debug!(
        aircraft = store.aircraft().len(),
        tasks = store.tasks().len(),
        rejected = store.rejected().len(),
        "Loaded store"
    );
    Ok(store)
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the maintenance records directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        tracing::debug!("Evaluating as of {today}");

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root, today)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show due status counts per aircraft (default)
    Status(Status),

    /// Initialize a new maintenance records directory
    Init,

    /// List tasks with their next due point and remaining margin
    Due(Due),

    /// Show every projected due point of a task
    Show(Show),

    /// Record a completed sign-off on a task
    ///
    /// Interval tasks are re-based on the completion, so their next due
    /// points move forward.
    Complete(Complete),

    /// Show or update component hours and cycles
    Component(component::Command),

    /// Check task records for data problems
    Validate(Validate),
}

impl Command {
    fn run(self, root: PathBuf, today: NaiveDate) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root, today)?,
            Self::Init => Init::run(&root)?,
            Self::Due(command) => command.run(root, today)?,
            Self::Show(command) => command.run(root, today)?,
            Self::Complete(command) => command.run(root, today)?,
            Self::Component(command) => command.run(root)?,
            Self::Validate(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        Store::init(root.to_path_buf())
            .map_err(|e| anyhow::anyhow!("Failed to initialize records directory: {e}"))?;

        println!("Initialized maintenance records in {}", root.display());
        println!("  Created: config.toml");
        println!("  Created: aircraft/");
        println!("  Created: tasks/");
        println!();
        println!("Next steps:");
        println!("  Add an aircraft record, e.g. aircraft/N123AB.yaml");
        println!("  mtrack component set N123AB Airframe --hours 0 --cycles 0");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_global_today() {
        let cli = Cli::try_parse_from(["mtrack", "status", "--today", "2025-03-10"]).unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert!(matches!(cli.command, Some(Command::Status(_))));
    }

    #[test]
    fn rejects_malformed_today() {
        assert!(Cli::try_parse_from(["mtrack", "--today", "10/03/2025"]).is_err());
    }

    #[test]
    fn status_is_the_default_command() {
        let cli = Cli::try_parse_from(["mtrack", "-vv", "--root", "fleet"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("fleet"));
        assert!(cli.command.is_none());
    }
}
