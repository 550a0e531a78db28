//! Recording JSON schema definitions.
//!
//! This module defines the structure of recording files we read from
//! disk. Schema is versioned to allow future evolution.

use crate::stacktrace::Frame;
use crate::units::{Quantity, Unit};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level recording structure read from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Schema version for compatibility checking
    pub version: String,

    /// Recording name, usually the originating process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Recorded events, in file order
    pub events: Vec<RecordedEvent>,
}

/// A single recorded event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Event type identifier, e.g. `jdk.ExecutionSample`
    #[serde(default, alias = "type")]
    pub event_type: String,

    /// Start timestamp in nanoseconds since the epoch (dump tools
    /// disagree on the field name)
    #[serde(alias = "startTime", alias = "timestamp")]
    pub start_time: i64,

    /// Named numeric attributes with their units
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, AttributeValue>,

    /// Stack trace, when the event recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<StackTrace>,
}

/// A numeric attribute with its unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    pub value: f64,

    /// Unit symbol, e.g. `B` or `ms`, empty for plain numbers
    #[serde(default)]
    pub unit: String,
}

/// An event's stack trace, frames ordered leaf first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackTrace {
    pub frames: Vec<Frame>,

    /// True when the recorder hit its depth limit
    #[serde(default)]
    pub truncated: bool,
}

impl RecordedEvent {
    /// The event start as an epoch timestamp quantity.
    pub fn start_quantity(&self) -> Quantity {
        Unit::EPOCH_NS.quantity(self.start_time as f64)
    }

    /// A named attribute as a quantity. An unknown unit symbol is
    /// treated as a plain number.
    pub fn attribute_quantity(&self, name: &str) -> Option<Quantity> {
        let attribute = self.attributes.get(name)?;
        let unit = match Unit::parse(&attribute.unit) {
            Some(unit) => unit,
            None => {
                warn!(
                    "Unknown unit '{}' on attribute '{}', treating as a number",
                    attribute.unit, name
                );
                Unit::NUMBER
            }
        };
        Some(unit.quantity(attribute.value))
    }
}

impl Recording {
    /// Earliest and latest event start, when there are events.
    pub fn time_span(&self) -> Option<(Quantity, Quantity)> {
        let first = self.events.first()?;
        let mut min = first.start_time;
        let mut max = first.start_time;
        for event in &self.events {
            min = min.min(event.start_time);
            max = max.max(event.start_time);
        }
        Some((
            Unit::EPOCH_NS.quantity(min as f64),
            Unit::EPOCH_NS.quantity(max as f64),
        ))
    }

    /// Names of numeric attributes present on any event, sorted.
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .events
            .iter()
            .flat_map(|event| event.attributes.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Number of events carrying a stack trace.
    pub fn traced_event_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.stack_trace.is_some())
            .count()
    }
}
