//! Series building from recorded events.
//!
//! An `EventSeries` buckets event values over the x range of each
//! render: the same series zoomed in re-buckets at the finer extent.

use crate::axis::SubdividedRange;
use crate::recording::schema::Recording;
use crate::series::{QuantitySeries, XyQuantities};
use crate::units::{Quantity, Unit, UnitKind};
use log::warn;

/// How the events inside one bucket combine into its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// Number of events in the bucket
    Count,
    /// Sum of an attribute over the bucket
    Sum,
    /// Largest attribute value in the bucket
    Max,
}

/// A chart series fed by recorded events.
pub struct EventSeries {
    name: String,
    aggregate: Aggregate,
    /// (epoch timestamp, value in `unit`) per contributing event
    samples: Vec<(Quantity, f64)>,
    unit: Unit,
}

impl EventSeries {
    /// Series counting events per bucket.
    pub fn count(name: impl Into<String>, recording: &Recording) -> Self {
        let samples = recording
            .events
            .iter()
            .map(|event| (event.start_quantity(), 1.0))
            .collect();
        EventSeries {
            name: name.into(),
            aggregate: Aggregate::Count,
            samples,
            unit: Unit::NUMBER,
        }
    }

    /// Series aggregating a named attribute per bucket. Events without
    /// the attribute contribute nothing; values are converted into the
    /// unit of the first occurrence, and occurrences of another kind
    /// are logged and skipped.
    pub fn attribute(
        name: impl Into<String>,
        recording: &Recording,
        attribute: &str,
        aggregate: Aggregate,
    ) -> Self {
        let name = name.into();
        let mut unit: Option<Unit> = None;
        let mut samples = Vec::new();
        for event in &recording.events {
            let Some(quantity) = event.attribute_quantity(attribute) else {
                continue;
            };
            let series_unit = *unit.get_or_insert_with(|| quantity.unit());
            match quantity.value_in(series_unit) {
                Ok(value) => samples.push((event.start_quantity(), value)),
                Err(err) => {
                    warn!("Dropping '{}' sample from series '{}': {}", attribute, name, err);
                }
            }
        }
        EventSeries {
            name,
            aggregate,
            samples,
            unit: unit.unwrap_or(Unit::NUMBER),
        }
    }

    /// The unit bucket values are expressed in.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl QuantitySeries for EventSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn quantities(&self, x_range: &SubdividedRange) -> XyQuantities {
        if x_range.start().kind() != UnitKind::Timestamp {
            warn!(
                "Series '{}' needs a timestamp axis, got {:?}",
                self.name,
                x_range.start().kind()
            );
            return XyQuantities::from_doubles(Vec::new(), self.unit, x_range.clone());
        }

        // Boundaries bracket the buckets, so one fewer bucket than boundaries.
        let bucket_count = x_range.subdivider_count() - 1;
        let empty = match self.aggregate {
            Aggregate::Count | Aggregate::Sum => 0.0,
            Aggregate::Max => f64::NAN,
        };
        let mut buckets = vec![empty; bucket_count];
        for (start, value) in &self.samples {
            let index = x_range.floor_subdivider_of(start);
            if index < 0 || index as usize >= bucket_count {
                continue;
            }
            let bucket = &mut buckets[index as usize];
            match self.aggregate {
                Aggregate::Count | Aggregate::Sum => *bucket += value,
                Aggregate::Max => {
                    if bucket.is_nan() || *value > *bucket {
                        *bucket = *value;
                    }
                }
            }
        }
        XyQuantities::from_doubles(buckets, self.unit, x_range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::schema::{AttributeValue, RecordedEvent};
    use std::collections::HashMap;

    fn event(start_ns: i64, size: Option<f64>) -> RecordedEvent {
        let mut attributes = HashMap::new();
        if let Some(value) = size {
            attributes.insert(
                "size".to_string(),
                AttributeValue {
                    value,
                    unit: "B".to_string(),
                },
            );
        }
        RecordedEvent {
            event_type: "alloc".to_string(),
            start_time: start_ns,
            attributes,
            stack_trace: None,
        }
    }

    fn recording(events: Vec<RecordedEvent>) -> Recording {
        Recording {
            version: "1.0.0".to_string(),
            name: None,
            events,
        }
    }

    fn second_buckets() -> SubdividedRange {
        // 0..10 s of epoch time over 400 px, 25 px per bucket -> 1 s buckets.
        SubdividedRange::new(
            Unit::EPOCH_S.quantity(0.0),
            Unit::EPOCH_S.quantity(10.0),
            400.0,
            25.0,
        )
        .unwrap()
    }

    #[test]
    fn count_series_counts_events_per_bucket() {
        let recording = recording(vec![
            event(100_000_000, None),
            event(900_000_000, None),
            event(2_500_000_000, None),
        ]);
        let series = EventSeries::count("events", &recording);
        let xy = series.quantities(&second_buckets());
        assert_eq!(xy.y_quantity(0), Some(Unit::NUMBER.quantity(2.0)));
        assert_eq!(xy.y_quantity(1), Some(Unit::NUMBER.quantity(0.0)));
        assert_eq!(xy.y_quantity(2), Some(Unit::NUMBER.quantity(1.0)));
    }

    #[test]
    fn sum_series_adds_attribute_values() {
        let recording = recording(vec![
            event(100_000_000, Some(1024.0)),
            event(200_000_000, Some(512.0)),
            event(5_000_000_000, None),
        ]);
        let series = EventSeries::attribute("allocated", &recording, "size", Aggregate::Sum);
        assert_eq!(series.unit(), Unit::BYTE);
        let xy = series.quantities(&second_buckets());
        assert_eq!(xy.y_quantity(0), Some(Unit::BYTE.quantity(1536.0)));
    }

    #[test]
    fn max_series_leaves_empty_buckets_missing() {
        let recording = recording(vec![
            event(100_000_000, Some(10.0)),
            event(150_000_000, Some(30.0)),
        ]);
        let series = EventSeries::attribute("peak", &recording, "size", Aggregate::Max);
        let xy = series.quantities(&second_buckets());
        assert_eq!(xy.y_quantity(0), Some(Unit::BYTE.quantity(30.0)));
        assert_eq!(xy.y_quantity(1), None);
    }

    #[test]
    fn out_of_range_events_are_ignored() {
        let recording = recording(vec![
            event(-5_000_000_000, None),
            event(50_000_000_000, None),
            event(100_000_000, None),
        ]);
        let series = EventSeries::count("events", &recording);
        let xy = series.quantities(&second_buckets());
        let total: f64 = (0..xy.len())
            .filter_map(|i| xy.y_quantity(i))
            .map(|q| q.base_value())
            .sum();
        assert_eq!(total, 1.0);
    }
}
