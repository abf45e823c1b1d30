use serde::{Deserialize, Serialize};

/// Current accumulated utilization of one tracked component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTimeSnapshot {
    /// Component name, e.g. "Airframe" or "Engine 1".
    pub component_name: String,

    /// Accumulated hours.
    #[serde(default)]
    pub current_time: f64,

    /// Accumulated cycles.
    #[serde(default)]
    pub current_cycles: i64,
}

impl ComponentTimeSnapshot {
    /// Create a snapshot.
    #[must_use]
    pub fn new(component_name: impl Into<String>, current_time: f64, current_cycles: i64) -> Self {
        Self {
            component_name: component_name.into(),
            current_time,
            current_cycles,
        }
    }

    /// Whether this snapshot is the one for `name`.
    ///
    /// Both sides are trimmed; the comparison is case-sensitive.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.component_name.trim() == name.trim()
    }

    /// Whether `current_time` is a usable reading: finite and not negative.
    #[must_use]
    pub fn has_usable_time(&self) -> bool {
        self.current_time.is_finite() && self.current_time >= 0.0
    }

    /// Whether `current_cycles` is a usable reading.
    #[must_use]
    pub const fn has_usable_cycles(&self) -> bool {
        self.current_cycles >= 0
    }
}

/// Find the snapshot for the named component.
///
/// Matching is by trimmed, case-sensitive name. The first match wins.
#[must_use]
pub fn find_snapshot<'a>(
    snapshots: &'a [ComponentTimeSnapshot],
    name: &str,
) -> Option<&'a ComponentTimeSnapshot> {
    snapshots.iter().find(|snapshot| snapshot.matches(name))
}

/// An aircraft in the fleet registry, with its tracked components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    /// Unique aircraft identifier, referenced by tasks' `aircraftId`.
    pub id: String,

    /// Registration mark, e.g. "N123AB".
    pub tail_number: String,

    /// Aircraft type or model, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Current hours and cycles of each tracked component.
    #[serde(default)]
    pub components: Vec<ComponentTimeSnapshot>,
}

impl Aircraft {
    /// The snapshot for the named component, if tracked.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&ComponentTimeSnapshot> {
        find_snapshot(&self.components, name)
    }

    /// Set the current hours and cycles of a component.
    ///
    /// Adds the component if it is not tracked yet. Returns `true` if it was
    /// added.
    pub fn set_component_time(&mut self, name: &str, hours: f64, cycles: i64) -> bool {
        if let Some(snapshot) = self
            .components
            .iter_mut()
            .find(|snapshot| snapshot.matches(name))
        {
            snapshot.current_time = hours;
            snapshot.current_cycles = cycles;
            false
        } else {
            self.components
                .push(ComponentTimeSnapshot::new(name.trim(), hours, cycles));
            true
        }
    }

    /// Whether `key` identifies this aircraft.
    ///
    /// Matches the id exactly or the tail number case-insensitively.
    #[must_use]
    pub fn is_identified_by(&self, key: &str) -> bool {
        let key = key.trim();
        self.id == key || self.tail_number.eq_ignore_ascii_case(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aircraft() -> Aircraft {
        Aircraft {
            id: "ac-1".to_string(),
            tail_number: "N123AB".to_string(),
            model: Some("PC-12".to_string()),
            components: vec![
                ComponentTimeSnapshot::new("Airframe", 4_210.3, 3_900),
                ComponentTimeSnapshot::new(" Engine 1 ", 1_502.0, 1_410),
            ],
        }
    }

    #[test]
    fn lookup_trims_both_sides() {
        let aircraft = aircraft();
        assert_eq!(
            aircraft.component("Engine 1").map(|c| c.current_cycles),
            Some(1_410)
        );
        assert_eq!(
            aircraft.component("  Airframe").map(|c| c.current_cycles),
            Some(3_900)
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let aircraft = aircraft();
        assert!(aircraft.component("engine 1").is_none());
        assert!(aircraft.component("AIRFRAME").is_none());
    }

    #[test]
    fn missing_component_is_none() {
        assert!(aircraft().component("Engine 3").is_none());
    }

    #[test]
    fn setting_time_updates_or_adds() {
        let mut aircraft = aircraft();

        assert!(!aircraft.set_component_time("Engine 1", 1_510.5, 1_416));
        let engine = aircraft.component("Engine 1").unwrap();
        assert!((engine.current_time - 1_510.5).abs() < f64::EPSILON);
        assert_eq!(engine.current_cycles, 1_416);

        assert!(aircraft.set_component_time(" APU ", 300.0, 800));
        assert_eq!(aircraft.components.len(), 3);
        assert_eq!(aircraft.components[2].component_name, "APU");
    }

    #[test]
    fn identified_by_id_or_tail() {
        let aircraft = aircraft();
        assert!(aircraft.is_identified_by("ac-1"));
        assert!(aircraft.is_identified_by("n123ab"));
        assert!(!aircraft.is_identified_by("N999ZZ"));
    }
}
