//! JSON output writer.
//!
//! Writes any serializable value to a JSON file with pretty formatting.

use crate::output::svg::{create_parent_dirs, validate_output_path};
use crate::utils::error::OutputError;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a value to a JSON file with pretty printing
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `value` - Serializable data to write
/// * `output_path` - Path to output JSON file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_json<T: Serialize>(
    value: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    info!(
        "JSON written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Serialize a value to a pretty JSON string
///
/// **Public** - useful for tests and stdout output
pub fn json_to_string<T: Serialize>(value: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value).map_err(OutputError::SerializationFailed)
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordedEvent, Recording};
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn test_recording() -> Recording {
        Recording {
            version: "1.0.0".to_string(),
            name: Some("test".to_string()),
            events: vec![RecordedEvent {
                event_type: "sample".to_string(),
                start_time: 1_000,
                attributes: HashMap::new(),
                stack_trace: None,
            }],
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let recording = test_recording();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_json(&recording, path).unwrap();

        let loaded: Recording =
            serde_json::from_reader(File::open(path).unwrap()).unwrap();
        assert_eq!(loaded.version, recording.version);
        assert_eq!(loaded.events.len(), 1);
    }

    #[test]
    fn test_json_to_string_is_pretty() {
        let text = json_to_string(&test_recording()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"version\""));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/recording.json");

        write_json(&test_recording(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
