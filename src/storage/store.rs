//! A filesystem backed store of aircraft and maintenance tasks
//!
//! The [`Store`] reads aircraft records (with their component time
//! snapshots) and task records from YAML files below a root directory:
//!
//! ```text
//! config.toml       optional configuration
//! aircraft/*.yaml   one aircraft per file
//! tasks/**/*.yaml   one maintenance task per file
//! ```

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::de::DeserializeOwned;

use super::record::{self, RecordError};
use crate::domain::{
    Aircraft, Config, FleetReport, FormValue, MaintenanceTask, ReportOptions, calendar,
};

const CONFIG_FILE: &str = "config.toml";
const AIRCRAFT_DIR: &str = "aircraft";
const TASKS_DIR: &str = "tasks";

/// State of a store whose records are in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    config: Config,
    aircraft: Vec<Aircraft>,
    aircraft_paths: Vec<PathBuf>,
    tasks: Vec<MaintenanceTask>,
    task_paths: Vec<PathBuf>,
    rejected: Vec<Rejected>,
}

/// State of a store that has not been read yet.
#[derive(Debug, PartialEq, Eq)]
pub struct Unloaded;

/// A filesystem backed store of aircraft and maintenance tasks.
#[derive(Debug)]
pub struct Store<S = Loaded> {
    /// The root of the directory records are stored in.
    root: PathBuf,
    state: S,
}

impl<S> Store<S> {
    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A record file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// The file.
    pub path: PathBuf,
    /// Why it was rejected.
    pub reason: String,
}

impl From<RecordError> for Rejected {
    fn from(error: RecordError) -> Self {
        Self {
            path: error.path().to_path_buf(),
            reason: error.to_string(),
        }
    }
}

/// The kind of record a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An aircraft record.
    Aircraft,
    /// A maintenance task record.
    Task,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aircraft => "aircraft",
            Self::Task => "task",
        })
    }
}

/// Errors loading a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreLoadError {
    /// Some record files could not be read, and the store is strict.
    Rejected(Vec<Rejected>),

    /// Two files hold records with the same id.
    Duplicate {
        /// The kind of record.
        kind: RecordKind,
        /// The shared id.
        id: String,
        /// The first file holding it.
        first: PathBuf,
        /// The second file holding it.
        second: PathBuf,
    },
}

impl fmt::Display for StoreLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(rejected) => {
                write!(f, "Unreadable record files: ")?;
                for (i, rejected) in rejected.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", rejected.path.display())?;
                }
                Ok(())
            }
            Self::Duplicate {
                kind,
                id,
                first,
                second,
            } => write!(
                f,
                "Duplicate {kind} id '{id}' in {} and {}",
                first.display(),
                second.display()
            ),
        }
    }
}

/// Errors changing records in a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreWriteError {
    /// No task has the given id.
    #[error("no task with id '{0}'")]
    UnknownTask(String),

    /// No aircraft has the given id or tail number.
    #[error("no aircraft with id or tail number '{0}'")]
    UnknownAircraft(String),

    /// Component hours must be finite and not negative.
    #[error("invalid component hours {0}")]
    InvalidHours(f64),

    /// Component cycles must not be negative.
    #[error("invalid component cycles {0}")]
    InvalidCycles(i64),

    /// The root already holds a store.
    #[error("store already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The configuration file could not be written.
    #[error(transparent)]
    Config(#[from] crate::domain::ConfigError),

    /// A record file could not be written.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A directory could not be created.
    #[error("failed to create {}: {source}", .path.display())]
    CreateDir {
        /// The directory.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// A completed maintenance sign-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    /// Date the work was done.
    pub date: NaiveDate,
    /// Component hours at completion. `None` leaves the recorded value alone.
    pub hours: Option<f64>,
    /// Component cycles at completion. `None` leaves the recorded value alone.
    pub cycles: Option<i64>,
}

impl Store<Unloaded> {
    /// Opens a store at the given path.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
            state: Unloaded,
        }
    }

    /// Create an empty store layout with a default configuration.
    ///
    /// # Errors
    ///
    /// Fails if `root` already contains a configuration file or if any file
    /// or directory cannot be created.
    pub fn init(root: PathBuf) -> Result<Self, StoreWriteError> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            return Err(StoreWriteError::AlreadyInitialized(root));
        }

        for dir in [AIRCRAFT_DIR, TASKS_DIR] {
            let path = root.join(dir);
            std::fs::create_dir_all(&path)
                .map_err(|source| StoreWriteError::CreateDir { path, source })?;
        }
        Config::default().save(&config_path)?;

        tracing::info!("Initialized store in {}", root.display());
        Ok(Self::new(root))
    }

    /// Load all records from disk.
    ///
    /// # Errors
    ///
    /// Record files that cannot be read or parsed are skipped and reported by
    /// [`Store::rejected`], unless the configuration is `strict`, in which
    /// case they fail the load. Two records with the same id always fail the
    /// load.
    pub fn load_all(self) -> Result<Store<Loaded>, StoreLoadError> {
        let config = load_config(&self.root);

        let (aircraft, mut rejected) = load_records::<Aircraft>(&self.root.join(AIRCRAFT_DIR));
        let (tasks, rejected_tasks) = load_records::<MaintenanceTask>(&self.root.join(TASKS_DIR));
        rejected.extend(rejected_tasks);

        if !rejected.is_empty() {
            if config.strict {
                return Err(StoreLoadError::Rejected(rejected));
            }
            for file in &rejected {
                tracing::warn!("Skipping unreadable record {}", file.reason);
            }
        }

        check_unique(RecordKind::Aircraft, &aircraft, |a| &a.id)?;
        check_unique(RecordKind::Task, &tasks, |t| &t.id)?;

        let (aircraft_paths, aircraft) = aircraft.into_iter().unzip();
        let (task_paths, tasks) = tasks.into_iter().unzip();

        Ok(Store {
            root: self.root,
            state: Loaded {
                config,
                aircraft,
                aircraft_paths,
                tasks,
                task_paths,
                rejected,
            },
        })
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Config::default();
    }
    Config::load(&path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        Config::default()
    })
}

fn load_records<T>(dir: &Path) -> (Vec<(PathBuf, T)>, Vec<Rejected>)
where
    T: DeserializeOwned + Send,
{
    let paths = record::collect_yaml_paths(dir);
    tracing::debug!("Loading {} record files from {}", paths.len(), dir.display());

    let (loaded, failed): (Vec<_>, Vec<_>) = paths
        .par_iter()
        .map(|path| record::read::<T>(path).map(|value| (path.clone(), value)))
        .partition(Result::is_ok);

    (
        loaded.into_iter().filter_map(Result::ok).collect(),
        failed
            .into_iter()
            .filter_map(Result::err)
            .map(Rejected::from)
            .collect(),
    )
}

fn check_unique<T>(
    kind: RecordKind,
    records: &[(PathBuf, T)],
    id: impl Fn(&T) -> &String,
) -> Result<(), StoreLoadError> {
    let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(records.len());
    for (path, record) in records {
        if let Some(first) = seen.insert(id(record).as_str(), path.as_path()) {
            return Err(StoreLoadError::Duplicate {
                kind,
                id: id(record).clone(),
                first: first.to_path_buf(),
                second: path.clone(),
            });
        }
    }
    Ok(())
}

impl Store<Loaded> {
    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.state.config
    }

    /// All aircraft, in file order.
    #[must_use]
    pub fn aircraft(&self) -> &[Aircraft] {
        &self.state.aircraft
    }

    /// All tasks, in file order.
    #[must_use]
    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.state.tasks
    }

    /// Record files that were skipped while loading.
    #[must_use]
    pub fn rejected(&self) -> &[Rejected] {
        &self.state.rejected
    }

    /// Find an aircraft by id or (case-insensitive) tail number.
    #[must_use]
    pub fn find_aircraft(&self, key: &str) -> Option<&Aircraft> {
        self.aircraft_index(key).map(|i| &self.state.aircraft[i])
    }

    /// Find a task by id.
    #[must_use]
    pub fn find_task(&self, id: &str) -> Option<&MaintenanceTask> {
        self.task_index(id).map(|i| &self.state.tasks[i])
    }

    /// The aircraft a task belongs to, matched by exact id.
    #[must_use]
    pub fn aircraft_of(&self, task: &MaintenanceTask) -> Option<&Aircraft> {
        self.state
            .aircraft
            .iter()
            .find(|aircraft| aircraft.id == task.aircraft_id)
    }

    /// The tasks belonging to an aircraft.
    pub fn tasks_for<'a>(&'a self, aircraft: &'a Aircraft) -> impl Iterator<Item = &'a MaintenanceTask> {
        self.state
            .tasks
            .iter()
            .filter(move |task| task.aircraft_id == aircraft.id)
    }

    /// The file an aircraft was loaded from.
    #[must_use]
    pub fn aircraft_path(&self, key: &str) -> Option<&Path> {
        self.aircraft_index(key)
            .map(|i| self.state.aircraft_paths[i].as_path())
    }

    /// The file a task was loaded from.
    #[must_use]
    pub fn task_path(&self, id: &str) -> Option<&Path> {
        self.task_index(id).map(|i| self.state.task_paths[i].as_path())
    }

    /// Evaluate every aircraft's tasks as of `today`.
    #[must_use]
    pub fn report(&self, today: NaiveDate, options: ReportOptions) -> FleetReport<'_> {
        FleetReport::build(
            &self.state.aircraft,
            &self.state.tasks,
            today,
            &self.state.config,
            options,
        )
    }

    /// Record a completed sign-off on a task and save it.
    ///
    /// Re-bases interval tasks: the next due points are projected from the
    /// new completion.
    ///
    /// # Errors
    ///
    /// Fails if no task has the id or if the task file cannot be written. The
    /// in-memory task is only changed once the write succeeded.
    pub fn record_completion(
        &mut self,
        task_id: &str,
        completion: Completion,
    ) -> Result<&MaintenanceTask, StoreWriteError> {
        let index = self
            .task_index(task_id)
            .ok_or_else(|| StoreWriteError::UnknownTask(task_id.to_string()))?;

        if let Some(hours) = completion.hours {
            validate_hours(hours)?;
        }
        if let Some(cycles) = completion.cycles {
            validate_cycles(cycles)?;
        }

        let mut task = self.state.tasks[index].clone();
        task.last_completed_date = Some(calendar::format_iso_date(completion.date));
        if let Some(hours) = completion.hours {
            task.last_completed_hours = Some(FormValue::Number(hours));
        }
        if let Some(cycles) = completion.cycles {
            #[allow(clippy::cast_precision_loss)]
            let cycles = cycles as f64;
            task.last_completed_cycles = Some(FormValue::Number(cycles));
        }

        record::write(&self.state.task_paths[index], &task)?;
        tracing::info!(task = %task.id, date = %completion.date, "Recorded completion");

        self.state.tasks[index] = task;
        Ok(&self.state.tasks[index])
    }

    /// Set a component's current hours and cycles and save the aircraft.
    ///
    /// Components not tracked yet are added. Returns `true` if the component
    /// was added.
    ///
    /// # Errors
    ///
    /// Fails if the aircraft is unknown, if the values are out of range, or
    /// if the aircraft file cannot be written.
    pub fn set_component_time(
        &mut self,
        aircraft_key: &str,
        component: &str,
        hours: f64,
        cycles: i64,
    ) -> Result<bool, StoreWriteError> {
        let index = self
            .aircraft_index(aircraft_key)
            .ok_or_else(|| StoreWriteError::UnknownAircraft(aircraft_key.to_string()))?;
        validate_hours(hours)?;
        validate_cycles(cycles)?;

        let mut aircraft = self.state.aircraft[index].clone();
        let added = aircraft.set_component_time(component, hours, cycles);

        record::write(&self.state.aircraft_paths[index], &aircraft)?;
        tracing::info!(
            aircraft = %aircraft.tail_number,
            component = component.trim(),
            hours,
            cycles,
            "Updated component time"
        );

        self.state.aircraft[index] = aircraft;
        Ok(added)
    }

    fn aircraft_index(&self, key: &str) -> Option<usize> {
        let aircraft = &self.state.aircraft;
        aircraft
            .iter()
            .position(|a| a.id == key.trim())
            .or_else(|| aircraft.iter().position(|a| a.is_identified_by(key)))
    }

    fn task_index(&self, id: &str) -> Option<usize> {
        self.state.tasks.iter().position(|task| task.id == id.trim())
    }
}

fn validate_hours(hours: f64) -> Result<(), StoreWriteError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(StoreWriteError::InvalidHours(hours))
    }
}

const fn validate_cycles(cycles: i64) -> Result<(), StoreWriteError> {
    if cycles >= 0 {
        Ok(())
    } else {
        Err(StoreWriteError::InvalidCycles(cycles))
    }
}
