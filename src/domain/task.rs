use std::fmt;

use serde::{Deserialize, Serialize};

/// The component a task is tracked against when none is named.
pub const DEFAULT_COMPONENT: &str = "Airframe";

/// A trackable maintenance requirement for one aircraft.
///
/// Field names follow the task store's camelCase document shape. Numeric
/// fields hold raw form input and may arrive either as numbers or as numeric
/// strings; see [`FormValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    /// Unique task identifier.
    pub id: String,

    /// Identifier of the aircraft this task belongs to.
    pub aircraft_id: String,

    /// Human readable title, e.g. "Annual inspection".
    #[serde(default)]
    pub item_title: String,

    /// Free-form category, e.g. "Inspection" or "AD".
    #[serde(default)]
    pub item_type: String,

    /// Name of the tracked component whose hours and cycles govern this task.
    ///
    /// `None` (or a blank name) means [`DEFAULT_COMPONENT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_component: Option<String>,

    /// Inactive tasks are kept for history but left out of reports.
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Whether the task recurs or falls due once.
    #[serde(default)]
    pub track_type: TrackType,

    /// Date the task was last completed, as an ISO date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<String>,

    /// Component hours at last completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_hours: Option<FormValue>,

    /// Component cycles at last completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_cycles: Option<FormValue>,

    /// Whether the calendar dimension is tracked.
    #[serde(default)]
    pub is_days_due_enabled: bool,

    /// Interval magnitude (interval tasks) or absolute ISO due date (one-time
    /// tasks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_due_value: Option<FormValue>,

    /// How the calendar interval is projected forward.
    #[serde(default)]
    pub days_interval_type: IntervalType,

    /// Whether the flight-hours dimension is tracked.
    #[serde(default)]
    pub is_hours_due_enabled: bool,

    /// Hours interval (interval tasks) or absolute hours threshold (one-time
    /// tasks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_due: Option<FormValue>,

    /// Whether the cycles dimension is tracked.
    #[serde(default)]
    pub is_cycles_due_enabled: bool,

    /// Cycles interval (interval tasks) or absolute cycles threshold
    /// (one-time tasks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles_due: Option<FormValue>,
}

const fn default_active() -> bool {
    true
}

impl MaintenanceTask {
    /// Create an active task with no due rules enabled.
    #[must_use]
    pub fn new(id: impl Into<String>, aircraft_id: impl Into<String>, track_type: TrackType) -> Self {
        Self {
            id: id.into(),
            aircraft_id: aircraft_id.into(),
            item_title: String::new(),
            item_type: String::new(),
            associated_component: None,
            is_active: true,
            track_type,
            last_completed_date: None,
            last_completed_hours: None,
            last_completed_cycles: None,
            is_days_due_enabled: false,
            days_due_value: None,
            days_interval_type: IntervalType::default(),
            is_hours_due_enabled: false,
            hours_due: None,
            is_cycles_due_enabled: false,
            cycles_due: None,
        }
    }

    /// The component this task is tracked against, trimmed.
    ///
    /// Falls back to [`DEFAULT_COMPONENT`] when unset or blank.
    #[must_use]
    pub fn component(&self) -> &str {
        self.component_or(DEFAULT_COMPONENT)
    }

    /// Like [`component`](Self::component), with a caller supplied fallback.
    #[must_use]
    pub fn component_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.associated_component
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
    }

    /// Whether any due dimension is switched on.
    #[must_use]
    pub const fn has_due_rules(&self) -> bool {
        self.is_days_due_enabled || self.is_hours_due_enabled || self.is_cycles_due_enabled
    }
}

/// How a task's due points are derived.
///
/// Stored as text. Values other than `"Interval"` and `"One Time"` are kept
/// verbatim so that rewriting a task never loses what the store held.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackType {
    /// Recurring: due points are re-based from the last completion.
    Interval,

    /// Fixed: due points are absolute values.
    OneTime,

    /// Any other stored value. Tasks in this state project no due points.
    Unrecognized(String),
}

impl Default for TrackType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<String> for TrackType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Interval" => Self::Interval,
            "One Time" => Self::OneTime,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<TrackType> for String {
    fn from(value: TrackType) -> Self {
        match value {
            TrackType::Interval => "Interval".to_string(),
            TrackType::OneTime => "One Time".to_string(),
            TrackType::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval => f.write_str("Interval"),
            Self::OneTime => f.write_str("One Time"),
            Self::Unrecognized(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// Calendar projection rule for interval tasks.
///
/// An absent value means [`IntervalType::Days`]; unknown values are kept
/// verbatim like [`TrackType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntervalType {
    /// Add N calendar days.
    #[default]
    Days,

    /// Add N months, keeping the day of month (clamped to month length).
    MonthsSpecificDay,

    /// Add N months, then move to the last day of that month.
    MonthsEndOfMonth,

    /// Add N years, keeping month and day.
    YearsSpecificDay,

    /// Any other stored value. Suppresses the calendar dimension.
    Unrecognized(String),
}

impl From<String> for IntervalType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "days" => Self::Days,
            "months_specific_day" => Self::MonthsSpecificDay,
            "months_eom" => Self::MonthsEndOfMonth,
            "years_specific_day" => Self::YearsSpecificDay,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<IntervalType> for String {
    fn from(value: IntervalType) -> Self {
        match value {
            IntervalType::Unrecognized(raw) => raw,
            known => known.to_string(),
        }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days => f.write_str("days"),
            Self::MonthsSpecificDay => f.write_str("months_specific_day"),
            Self::MonthsEndOfMonth => f.write_str("months_eom"),
            Self::YearsSpecificDay => f.write_str("years_specific_day"),
            Self::Unrecognized(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// A raw form field that may be stored as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// A numeric value.
    Number(f64),
    /// A textual value: a date, a numeric string, or garbage.
    Text(String),
}

impl FormValue {
    /// Interpret the value as a finite number.
    ///
    /// Text is trimmed and parsed; anything unparseable, infinite or NaN is
    /// `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// The textual form, if this value was stored as text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}
