//! Recording file loader.
//!
//! Reads recording JSON with schema validation and per-event parsing:
//! a malformed event is logged and skipped, a file that yields nothing
//! usable is an error.

use super::schema::{Recording, RecordedEvent};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::RecordingError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a recording from a JSON file
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `path` - Path to the recording JSON file
///
/// # Returns
/// The parsed recording with all readable events
///
/// # Errors
/// * `RecordingError::Io` - File cannot be opened or read
/// * `RecordingError::Json` - File is not valid JSON
/// * `RecordingError::InvalidFormat` - Missing required structure
/// * `RecordingError::UnsupportedVersion` - Incompatible schema version
/// * `RecordingError::NoEvents` - Recording holds no events
pub fn read_recording(path: impl AsRef<Path>) -> Result<Recording, RecordingError> {
    let path = path.as_ref();
    info!("Loading recording from: {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    let recording = parse_recording(&value)?;
    info!(
        "Loaded {} events ({} with stack traces)",
        recording.events.len(),
        recording.traced_event_count()
    );
    Ok(recording)
}

/// Parse a recording from an already-loaded JSON value
///
/// **Public** - used directly by tests and embedding callers
pub fn parse_recording(value: &serde_json::Value) -> Result<Recording, RecordingError> {
    let Some(root) = value.as_object() else {
        return Err(RecordingError::InvalidFormat(
            "Recording must be a JSON object".to_string(),
        ));
    };

    let Some(version) = root.get("version").and_then(|v| v.as_str()) else {
        return Err(RecordingError::InvalidFormat(
            "Missing version field".to_string(),
        ));
    };
    check_version(version)?;

    let name = root
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let Some(raw_events) = root.get("events").and_then(|v| v.as_array()) else {
        return Err(RecordingError::InvalidFormat(
            "Missing events array".to_string(),
        ));
    };
    if raw_events.is_empty() {
        return Err(RecordingError::NoEvents);
    }

    let events = parse_events(raw_events)?;
    debug!("Parsed {} of {} events", events.len(), raw_events.len());

    Ok(Recording {
        version: version.to_string(),
        name,
        events,
    })
}

/// Parse the events array, skipping events that do not match the schema
///
/// **Private** - internal parsing logic
fn parse_events(raw_events: &[serde_json::Value]) -> Result<Vec<RecordedEvent>, RecordingError> {
    let mut events = Vec::with_capacity(raw_events.len());

    for (index, raw) in raw_events.iter().enumerate() {
        match serde_json::from_value::<RecordedEvent>(raw.clone()) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - one bad event must not lose the file
                warn!("Skipping malformed event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() {
        return Err(RecordingError::InvalidFormat(
            "All events failed to parse".to_string(),
        ));
    }
    Ok(events)
}

/// Check schema compatibility by major version
///
/// **Private** - internal validation
fn check_version(version: &str) -> Result<(), RecordingError> {
    let major = version.split('.').next();
    let supported = SCHEMA_VERSION.split('.').next();
    if major != supported {
        return Err(RecordingError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_recording() -> serde_json::Value {
        json!({
            "version": "1.0.0",
            "name": "demo",
            "events": [
                {
                    "event_type": "sample",
                    "start_time": 1_000_000_000i64,
                    "attributes": {"size": {"value": 42.0, "unit": "B"}}
                },
                {
                    "event_type": "sample",
                    "startTime": 2_000_000_000i64,
                    "stack_trace": {
                        "frames": [{"method": {"type_name": "A", "method_name": "run"}}],
                        "truncated": false
                    }
                }
            ]
        })
    }

    #[test]
    fn parses_a_valid_recording() {
        let recording = parse_recording(&valid_recording()).unwrap();
        assert_eq!(recording.events.len(), 2);
        assert_eq!(recording.name.as_deref(), Some("demo"));
        assert_eq!(recording.traced_event_count(), 1);
        assert_eq!(recording.events[1].start_time, 2_000_000_000);
    }

    #[test]
    fn malformed_events_are_skipped() {
        let value = json!({
            "version": "1.0.0",
            "events": [
                {"event_type": "ok", "start_time": 1i64},
                {"event_type": "broken"},
                "not even an object"
            ]
        });
        let recording = parse_recording(&value).unwrap();
        assert_eq!(recording.events.len(), 1);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let value = json!({"version": "2.0.0", "events": [{"event_type": "e", "start_time": 1i64}]});
        assert!(matches!(
            parse_recording(&value),
            Err(RecordingError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn empty_events_are_an_error() {
        let value = json!({"version": "1.0.0", "events": []});
        assert!(matches!(parse_recording(&value), Err(RecordingError::NoEvents)));
    }

    #[test]
    fn missing_structure_is_an_error() {
        assert!(parse_recording(&json!([1, 2, 3])).is_err());
        assert!(parse_recording(&json!({"version": "1.0.0"})).is_err());
    }

    #[test]
    fn read_recording_round_trips_through_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&file, &valid_recording()).unwrap();
        let recording = read_recording(file.path()).unwrap();
        assert_eq!(recording.events.len(), 2);
    }

    #[test]
    fn attribute_quantities_carry_their_unit() {
        let recording = parse_recording(&valid_recording()).unwrap();
        let size = recording.events[0].attribute_quantity("size").unwrap();
        assert_eq!(size, crate::units::Unit::BYTE.quantity(42.0));
        assert!(recording.events[0].attribute_quantity("missing").is_none());
    }
}
