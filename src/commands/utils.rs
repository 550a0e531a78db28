use crate::recording::read_recording;
use crate::units::format_quantity;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a recording JSON file
pub fn validate_recording_file(file_path: PathBuf) -> Result<()> {
    println!("Validating recording: {}", file_path.display());

    let recording = read_recording(&file_path)?;

    println!("✓ Valid recording JSON");
    println!("  Version: {}", recording.version);
    if let Some(name) = &recording.name {
        println!("  Name: {}", name);
    }
    println!("  Events: {}", recording.events.len());
    println!("  Stack traces: {}", recording.traced_event_count());
    if let Some((start, end)) = recording.time_span() {
        println!(
            "  Time span: {} .. {}",
            format_quantity(&start),
            format_quantity(&end)
        );
    }
    let attributes = recording.attribute_names();
    if !attributes.is_empty() {
        println!("  Attributes: {}", attributes.join(", "));
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Flightview Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Recording Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Chart rendering and stack trace analysis for flight recordings.");
}
