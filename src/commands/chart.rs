//! Chart command implementation.
//!
//! The chart command:
//! 1. Loads a recording file
//! 2. Derives the recording's time span
//! 3. Builds one series lane per selected attribute and renders the chart
//! 4. Writes the SVG output

use crate::chart::{SeriesStyle, XyChart, XyDataRenderer};
use crate::draw::SvgSurface;
use crate::output::write_svg;
use crate::recording::{read_recording, Aggregate, EventSeries, Recording};
use crate::render::{uniform_rows, RowRenderer};
use crate::units::{Quantity, Unit};
use crate::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Lane colors, cycled when more attributes than colors are charted.
const LANE_COLORS: [&str; 6] = [
    "#4682B4", // Steel Blue
    "#FF8C00", // Dark Orange
    "#228B22", // Forest Green
    "#8A2BE2", // Blue Violet
    "#DC143C", // Crimson
    "#A9A9A9", // Gray
];

/// Arguments for the chart command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ChartArgs {
    /// Path to the recording JSON file
    pub input: PathBuf,

    /// Output path for the SVG chart
    pub output: PathBuf,

    /// Attributes to chart, one lane each (empty = event count lane)
    pub attributes: Vec<String>,

    /// Bucket aggregation for attribute lanes: "sum" or "max"
    pub aggregate: String,

    /// Lane style: "line", "filled", "step", "bar" or "plot"
    pub style: String,

    /// Chart width in pixels
    pub width: u32,

    /// Chart height in pixels
    pub height: u32,
}

impl Default for ChartArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("chart.svg"),
            attributes: Vec::new(),
            aggregate: "sum".to_string(),
            style: "line".to_string(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

/// Execute the chart command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Chart command arguments
///
/// # Returns
/// Ok if the chart was rendered and written
///
/// # Errors
/// * Recording load or parse errors
/// * An empty time span that cannot be charted
/// * File write errors
pub fn execute_chart(args: ChartArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Charting recording: {}", args.input.display());

    // Step 1: Load recording
    info!("Step 1/4: Loading recording...");
    let recording = read_recording(&args.input).context("Failed to load recording")?;

    // Step 2: Derive the time span
    info!("Step 2/4: Deriving the time span...");
    let (start, end) = chart_span(&recording)?;
    debug!("Time span: {} .. {}", start, end);

    // Step 3: Build lanes and render
    let style = parse_style(&args.style)?;
    let aggregate = parse_aggregate(&args.aggregate)?;
    let lane_count = args.attributes.len().max(1);
    info!("Step 3/4: Rendering {} lane(s)...", lane_count);

    let rows = build_rows(&recording, &args.attributes, aggregate, style);
    let mut chart =
        XyChart::new(start, end, rows).context("Failed to set up the chart range")?;
    let mut surface = SvgSurface::new(args.width, args.height);
    chart
        .render(&mut surface, args.width, args.height)
        .context("Failed to render chart")?;

    // Step 4: Write output
    info!("Step 4/4: Writing SVG...");
    write_svg(&surface.into_svg(), &args.output).context("Failed to write chart SVG")?;

    info!("✓ Chart written to: {}", args.output.display());

    let elapsed = start_time.elapsed();
    info!("Chart completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate chart arguments
///
/// **Public** - can be called before execute_chart for early validation
pub fn validate_args(args: &ChartArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    parse_style(&args.style)?;
    parse_aggregate(&args.aggregate)?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("Chart dimensions must be positive");
    }

    if args.width > 10_000 || args.height > 10_000 {
        anyhow::bail!("Chart dimensions are too large (max 10000 px)");
    }

    if args.attributes.iter().any(|attr| attr.is_empty()) {
        anyhow::bail!("Attribute names cannot be empty");
    }

    Ok(())
}

/// The chartable range of the recording. A single-instant recording is
/// widened by one second so the range still subdivides.
fn chart_span(recording: &Recording) -> Result<(Quantity, Quantity)> {
    let Some((start, end)) = recording.time_span() else {
        anyhow::bail!("Recording has no timed events to chart");
    };
    if start < end {
        return Ok((start, end));
    }
    let end = start
        .checked_add(&Unit::SECOND.quantity(1.0))
        .context("Failed to widen a single-instant time span")?;
    Ok((start, end))
}

/// One chart row per attribute, or a single event-count row.
fn build_rows(
    recording: &Recording,
    attributes: &[String],
    aggregate: Aggregate,
    style: SeriesStyle,
) -> Box<dyn RowRenderer> {
    let known = recording.attribute_names();
    let mut rows: Vec<Box<dyn RowRenderer>> = Vec::new();

    if attributes.is_empty() {
        let mut renderer = XyDataRenderer::new();
        renderer.add_series(
            Box::new(EventSeries::count("events", recording)),
            style,
            LANE_COLORS[0],
        );
        rows.push(Box::new(renderer));
    } else {
        for (index, attribute) in attributes.iter().enumerate() {
            if !known.iter().any(|name| name == attribute) {
                warn!("Attribute '{}' does not occur in the recording", attribute);
            }
            let series = EventSeries::attribute(attribute.clone(), recording, attribute, aggregate);
            let mut renderer = XyDataRenderer::new();
            renderer.add_series(
                Box::new(series),
                style,
                LANE_COLORS[index % LANE_COLORS.len()],
            );
            rows.push(Box::new(renderer));
        }
    }

    uniform_rows(rows)
}

fn parse_style(style: &str) -> Result<SeriesStyle> {
    match style.to_ascii_lowercase().as_str() {
        "line" => Ok(SeriesStyle::Line),
        "filled" => Ok(SeriesStyle::FilledLine),
        "step" => Ok(SeriesStyle::Step),
        "bar" => Ok(SeriesStyle::Bar),
        "plot" => Ok(SeriesStyle::Plot),
        other => anyhow::bail!(
            "Unknown style '{}' (expected line, filled, step, bar or plot)",
            other
        ),
    }
}

fn parse_aggregate(aggregate: &str) -> Result<Aggregate> {
    match aggregate.to_ascii_lowercase().as_str() {
        "sum" => Ok(Aggregate::Sum),
        "max" => Ok(Aggregate::Max),
        other => anyhow::bail!("Unknown aggregate '{}' (expected sum or max)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> ChartArgs {
        ChartArgs {
            input: PathBuf::from("recording.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = ChartArgs::default();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_unknown_style() {
        let args = ChartArgs {
            style: "sparkline".to_string(),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_dimensions() {
        let args = ChartArgs {
            width: 0,
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_parse_style_accepts_all_variants() {
        for (name, style) in [
            ("line", SeriesStyle::Line),
            ("filled", SeriesStyle::FilledLine),
            ("step", SeriesStyle::Step),
            ("bar", SeriesStyle::Bar),
            ("plot", SeriesStyle::Plot),
        ] {
            assert_eq!(parse_style(name).unwrap(), style);
        }
        assert!(parse_style("pie").is_err());
    }

    #[test]
    fn test_parse_aggregate_rejects_count() {
        assert_eq!(parse_aggregate("sum").unwrap(), Aggregate::Sum);
        assert_eq!(parse_aggregate("MAX").unwrap(), Aggregate::Max);
        assert!(parse_aggregate("count").is_err());
    }
}
