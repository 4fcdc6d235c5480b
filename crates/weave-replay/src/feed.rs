//! Per-device JSON-lines event feeds.
//!
//! Each line is one pointer transition in the device's own coordinates:
//!
//! ```text
//! {"pointer": 0, "phase": "start", "x": 12.0, "y": 40.5, "time_ms": 1000}
//! ```
//!
//! Pointer ids are only unique per device, so they are namespaced by the
//! device id on the way in.

use std::fmt;
use std::io::BufRead;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use weave_core::{InputId, Modifiers, Phase, PointerEvent};

use crate::error::{ReplayError, ReplayResult};

/// Device-local pointer id. Devices report either numbers or names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointerRef {
    Number(u64),
    Name(String),
}

impl fmt::Display for PointerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// One line of a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub pointer: PointerRef,
    pub phase: Phase,
    pub x: f64,
    pub y: f64,
    pub time_ms: u64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl FeedRecord {
    /// Event with a namespaced id and the raw position as its point.
    pub fn into_event(self, device: &str) -> PointerEvent {
        PointerEvent::new(
            InputId::namespaced(device, &self.pointer),
            self.phase,
            Point::new(self.x, self.y),
            self.time_ms,
        )
        .with_modifiers(self.modifiers)
    }
}

/// Read every event of one device's feed, in file order. Blank lines are
/// skipped.
pub fn read_feed(device: &str, reader: impl BufRead) -> ReplayResult<Vec<PointerEvent>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ReplayError::Feed {
            device: device.to_string(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FeedRecord = serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
            device: device.to_string(),
            line: index + 1,
            source,
        })?;
        events.push(record.into_event(device));
    }
    log::debug!("Read {} events from the {device} feed", events.len());
    Ok(events)
}

/// Merge feeds into one stream ordered by timestamp. Events with equal
/// timestamps keep feed order, then file order.
pub fn merge(feeds: impl IntoIterator<Item = Vec<PointerEvent>>) -> Vec<PointerEvent> {
    let mut merged: Vec<PointerEvent> = feeds.into_iter().flatten().collect();
    merged.sort_by_key(|e| e.time_ms);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ids(events: &[PointerEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_read_feed_namespaces_pointers() {
        let feed = concat!(
            r#"{"pointer": 0, "phase": "start", "x": 1.0, "y": 2.0, "time_ms": 10}"#,
            "\n\n",
            r#"{"pointer": "pen", "phase": "move", "x": 3.0, "y": 4.0, "time_ms": 20, "#,
            r#""modifiers": {"shift": true}}"#,
            "\n",
        );
        let events = read_feed("table", Cursor::new(feed)).unwrap();

        assert_eq!(ids(&events), ["table:0", "table:pen"]);
        assert_eq!(events[0].phase, Phase::Start);
        assert_eq!(events[0].point, Point::new(1.0, 2.0));
        assert_eq!(events[0].physical, Point::new(1.0, 2.0));
        assert!(events[1].modifiers.shift);
        assert!(!events[1].modifiers.ctrl);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let feed = concat!(
            r#"{"pointer": 0, "phase": "start", "x": 1.0, "y": 2.0, "time_ms": 10}"#,
            "\n",
            r#"{"pointer": 0, "phase": "hover", "x": 1.0, "y": 2.0, "time_ms": 20}"#,
            "\n",
        );
        let err = read_feed("wall", Cursor::new(feed)).unwrap_err();
        match err {
            ReplayError::Parse { device, line, .. } => {
                assert_eq!(device, "wall");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_merge_orders_by_time_and_keeps_ties_stable() {
        let table = vec![
            PointerEvent::start("table:0", Point::ZERO, 10),
            PointerEvent::moved("table:0", Point::ZERO, 30),
            PointerEvent::end("table:0", Point::ZERO, 30),
        ];
        let wall = vec![
            PointerEvent::start("wall:0", Point::ZERO, 5),
            PointerEvent::moved("wall:0", Point::ZERO, 30),
        ];

        let merged = merge([table, wall]);
        let order: Vec<(&str, Phase)> = merged.iter().map(|e| (e.id.as_str(), e.phase)).collect();
        assert_eq!(
            order,
            [
                ("wall:0", Phase::Start),
                ("table:0", Phase::Start),
                ("table:0", Phase::Move),
                ("table:0", Phase::End),
                ("wall:0", Phase::Move),
            ]
        );
    }
}
