//! Summary command implementation.
//!
//! The summary command:
//! 1. Loads a recording file
//! 2. Aggregates event counts, the time span and the hottest methods
//! 3. Prints a report, optionally also written as JSON

use crate::output::write_json;
use crate::recording::{fold_traces, read_recording, Recording};
use crate::stacktrace::FrameSeparator;
use crate::units::format_tick_label;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the summary command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SummaryArgs {
    /// Path to the recording JSON file
    pub input: PathBuf,

    /// Number of methods in the hottest-methods list
    pub top: usize,

    /// Also write the report as JSON to this path
    pub output_json: Option<PathBuf>,
}

impl Default for SummaryArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            top: 10,
            output_json: None,
        }
    }
}

/// Report produced by the summary command
///
/// **Public** - serialized to JSON when requested
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub event_count: usize,
    pub traced_event_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_span: Option<TimeSpanReport>,
    pub attributes: Vec<String>,
    pub top_methods: Vec<MethodReport>,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSpanReport {
    pub start: String,
    pub end: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodReport {
    pub method: String,
    pub weight: f64,
    pub percentage: f64,
}

/// Execute the summary command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Summary command arguments
///
/// # Returns
/// Ok if the report was produced
///
/// # Errors
/// * Recording load or parse errors
/// * JSON write errors when an output path was given
pub fn execute_summary(args: SummaryArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load recording
    info!("Step 1/3: Loading recording...");
    let recording = read_recording(&args.input).context("Failed to load recording")?;

    // Step 2: Aggregate
    info!("Step 2/3: Aggregating...");
    let report = build_report(&recording, args.top);

    // Step 3: Report
    info!("Step 3/3: Reporting...");
    print_report(&args.input, &report);

    if let Some(json_path) = &args.output_json {
        write_json(&report, json_path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Summary completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate summary arguments
///
/// **Public** - can be called before execute_summary for early validation
pub fn validate_args(args: &SummaryArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    Ok(())
}

/// Build the report data from a loaded recording.
pub fn build_report(recording: &Recording, top: usize) -> SummaryReport {
    let time_span = recording.time_span().map(|(start, end)| {
        let duration = end
            .checked_sub(&start)
            .unwrap_or_else(|_| start.unit().delta_unit().quantity(0.0));
        TimeSpanReport {
            start: format_tick_label(&start, &duration),
            end: format_tick_label(&end, &duration),
            duration: format!("{}", duration),
        }
    });

    // An inverted count fold puts each method's total self time at the
    // tree roots.
    let tree = fold_traces(recording, FrameSeparator::default(), true, None);
    let total = tree.total_weight();
    let mut methods: Vec<MethodReport> = tree
        .root_children()
        .iter()
        .filter_map(|id| tree.node(*id))
        .map(|node| MethodReport {
            method: node.name.clone(),
            weight: node.cumulative_weight,
            percentage: if total > 0.0 {
                node.cumulative_weight / total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    methods.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.method.cmp(&b.method))
    });
    methods.truncate(top);

    SummaryReport {
        version: recording.version.clone(),
        name: recording.name.clone(),
        event_count: recording.events.len(),
        traced_event_count: recording.traced_event_count(),
        time_span,
        attributes: recording.attribute_names(),
        top_methods: methods,
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn print_report(input: &Path, report: &SummaryReport) {
    println!("Flight Recording Summary");
    println!("  File:      {}", input.display());
    if let Some(name) = &report.name {
        println!("  Name:      {}", name);
    }
    println!("  Version:   {}", report.version);
    println!(
        "  Events:    {} ({} with stack traces)",
        report.event_count, report.traced_event_count
    );
    match &report.time_span {
        Some(span) => println!(
            "  Span:      {} .. {} ({})",
            span.start, span.end, span.duration
        ),
        None => println!("  Span:      (no timed events)"),
    }
    if !report.attributes.is_empty() {
        println!("  Attributes: {}", report.attributes.join(", "));
    }

    if report.top_methods.is_empty() {
        println!("  No stack traces recorded");
        return;
    }
    println!("\nHottest methods:");
    for (index, method) in report.top_methods.iter().enumerate() {
        println!(
            "  {:>2}. {:<50} {:>10} ({:>5.1}%)",
            index + 1,
            method.method,
            method.weight,
            method.percentage
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordedEvent, StackTrace};
    use crate::stacktrace::Frame;
    use std::collections::HashMap;

    fn traced_event(leaf: &str) -> RecordedEvent {
        RecordedEvent {
            event_type: "sample".to_string(),
            start_time: 1_000_000_000,
            attributes: HashMap::new(),
            stack_trace: Some(StackTrace {
                frames: vec![Frame::new("App", leaf), Frame::new("App", "main")],
                truncated: false,
            }),
        }
    }

    fn recording() -> Recording {
        Recording {
            version: "1.0.0".to_string(),
            name: Some("startup".to_string()),
            events: vec![
                traced_event("parse"),
                traced_event("parse"),
                traced_event("compile"),
            ],
        }
    }

    #[test]
    fn test_report_counts_and_top_methods() {
        let report = build_report(&recording(), 10);
        assert_eq!(report.event_count, 3);
        assert_eq!(report.traced_event_count, 3);
        assert_eq!(report.top_methods[0].method, "App.parse");
        assert_eq!(report.top_methods[0].weight, 2.0);
        assert!((report.top_methods[0].percentage - 66.6667).abs() < 0.01);
    }

    #[test]
    fn test_report_truncates_to_top() {
        let report = build_report(&recording(), 1);
        assert_eq!(report.top_methods.len(), 1);
    }

    #[test]
    fn test_validate_args() {
        assert!(validate_args(&SummaryArgs::default()).is_err());
        let args = SummaryArgs {
            input: PathBuf::from("recording.json"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }
}
