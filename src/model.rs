use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The five lines that take part in rotation, in cascade order.
pub const LINE_IDS: [u8; 5] = [1, 2, 3, 5, 6];

/// Slot value pinned in place — never moved by rotation.
pub const SENTINEL: &str = "WSF";

/// One line of the schedule: an ordered slot → value mapping.
///
/// Slot keys and their order are the line's identity; rotation only moves
/// values between slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line {
    slots: IndexMap<String, String>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(slot.into(), value.into());
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot keys in insertion order.
    pub fn slot_keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// `(slot, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.slots.values().map(String::as_str)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.slots.values_mut()
    }

    /// The line's movable values, in slot order, as a work queue.
    pub fn movable_values(&self) -> VecDeque<String> {
        self.slots
            .values()
            .filter(|v| *v != SENTINEL)
            .cloned()
            .collect()
    }
}

impl<S: Into<String>, V: Into<String>> FromIterator<(S, V)> for Line {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|(s, v)| (s.into(), v.into()))
                .collect(),
        }
    }
}

/// A full schedule: ordered mapping from line id to line.
///
/// On the wire the line ids are decimal strings; serde converts them at the
/// boundary so everything past it works on `u8`. Lines outside [`LINE_IDS`]
/// are carried through rotation and persistence untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    lines: IndexMap<u8, Line>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, id: u8) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn line_mut(&mut self, id: u8) -> Option<&mut Line> {
        self.lines.get_mut(&id)
    }

    pub fn insert_line(&mut self, id: u8, line: Line) {
        self.lines.insert(id, line);
    }

    /// `(id, line)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Line)> {
        self.lines.iter().map(|(id, line)| (*id, line))
    }

    /// Required line ids absent from this schedule, in cascade order.
    pub fn missing_lines(&self) -> Vec<u8> {
        LINE_IDS
            .iter()
            .copied()
            .filter(|id| !self.lines.contains_key(id))
            .collect()
    }
}

impl FromIterator<(u8, Line)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (u8, Line)>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_preserves_slot_order() {
        let line: Line = [("b", "X"), ("a", "Y"), ("c", "Z")].into_iter().collect();
        let keys: Vec<_> = line.slot_keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn movable_values_skip_sentinel() {
        let line: Line = [("a", "X"), ("b", SENTINEL), ("c", "Y")]
            .into_iter()
            .collect();
        let movable: Vec<_> = line.movable_values().into_iter().collect();
        assert_eq!(movable, vec!["X", "Y"]);
    }

    #[test]
    fn movable_values_all_sentinel() {
        let line: Line = [("a", SENTINEL), ("b", SENTINEL)].into_iter().collect();
        assert!(line.movable_values().is_empty());
    }

    #[test]
    fn missing_lines_reports_in_cascade_order() {
        let schedule: Schedule = [(1, Line::new()), (3, Line::new())].into_iter().collect();
        assert_eq!(schedule.missing_lines(), vec![2, 5, 6]);
    }

    #[test]
    fn schedule_json_roundtrip_keeps_string_keys() {
        let schedule: Schedule = [
            (1, [("a", "Andi")].into_iter().collect()),
            (6, [("a", "Budi")].into_iter().collect()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&schedule).unwrap();
        // Line ids serialize as JSON object keys, i.e. strings.
        assert!(json.contains("\"1\""));
        assert!(json.contains("\"6\""));

        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }
}
