//! Flame command implementation.
//!
//! The flame command:
//! 1. Loads a recording file
//! 2. Folds event stack traces into a weighted tree
//! 3. Collapses the tree into folded stacks
//! 4. Writes an SVG flame graph or the folded stacks themselves

use crate::flamegraph::{
    collapse_tree, folded_lines, generate_flamegraph, generate_text_summary, FlamegraphConfig,
};
use crate::output::write_svg;
use crate::recording::{fold_traces, read_recording};
use crate::stacktrace::{FrameCategorization, FrameSeparator};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the flame command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FlameArgs {
    /// Path to the recording JSON file
    pub input: PathBuf,

    /// Output path for the flame graph
    pub output: PathBuf,

    /// Frame identity: "method", "line" or "bci"
    pub by: String,

    /// Distinguish frames by optimization level (JIT vs interpreted)
    pub distinguish_optimization: bool,

    /// Root the graph at the leaf frames
    pub invert: bool,

    /// Weight traces by this numeric attribute instead of by count
    pub attribute: Option<String>,

    /// Write folded stacks text instead of SVG
    pub folded: bool,

    /// Flame graph title
    pub title: Option<String>,

    /// Flame graph width in pixels
    pub width: usize,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of stacks in the text summary
    pub top: usize,
}

impl Default for FlameArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("flamegraph.svg"),
            by: "method".to_string(),
            distinguish_optimization: false,
            invert: false,
            attribute: None,
            folded: false,
            title: None,
            width: 1200,
            print_summary: false,
            top: 10,
        }
    }
}

/// Execute the flame command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Flame command arguments
///
/// # Returns
/// Ok if the flame graph was generated and written
///
/// # Errors
/// * Recording load or parse errors
/// * A recording without any stack traces
/// * Flame graph generation or file write errors
pub fn execute_flame(args: FlameArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Building flame graph from: {}", args.input.display());

    // Step 1: Load recording
    info!("Step 1/4: Loading recording...");
    let recording = read_recording(&args.input).context("Failed to load recording")?;

    // Step 2: Fold stack traces
    info!("Step 2/4: Folding stack traces...");
    let categorization = parse_categorization(&args.by)?;
    let separator = FrameSeparator::new(categorization, args.distinguish_optimization);
    let tree = fold_traces(&recording, separator, args.invert, args.attribute.as_deref());

    debug!(
        "Tree: {} nodes, total weight {}",
        tree.node_count(),
        tree.total_weight()
    );
    if tree.node_count() == 0 {
        anyhow::bail!("Recording contains no stack traces to fold");
    }

    // Step 3: Collapse into folded stacks
    info!("Step 3/4: Collapsing the tree...");
    let stacks = collapse_tree(&tree);
    debug!("Collapsed into {} unique stacks", stacks.len());

    // Step 4: Write output
    if args.folded {
        info!("Step 4/4: Writing folded stacks...");
        std::fs::write(&args.output, folded_lines(&stacks))
            .with_context(|| format!("Failed to write folded stacks to {}", args.output.display()))?;
        info!("✓ Folded stacks written to: {}", args.output.display());
    } else {
        info!("Step 4/4: Generating flame graph SVG...");
        let config = flamegraph_config(&args, recording.name.as_deref());
        let svg = generate_flamegraph(&stacks, Some(&config))
            .context("Failed to generate flame graph")?;
        write_svg(&svg, &args.output).context("Failed to write flame graph SVG")?;
        info!("✓ Flame graph written to: {}", args.output.display());
    }

    if args.print_summary {
        println!("\n{}", generate_text_summary(&stacks, args.top, tree.total_weight()));
    }

    let elapsed = start_time.elapsed();
    info!("Flame graph completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate flame arguments
///
/// **Public** - can be called before execute_flame for early validation
pub fn validate_args(args: &FlameArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    parse_categorization(&args.by)?;

    if let Some(attribute) = &args.attribute {
        if attribute.is_empty() {
            anyhow::bail!("Attribute name cannot be empty");
        }
    }

    if args.width == 0 || args.width > 10_000 {
        anyhow::bail!("Flame graph width must be between 1 and 10000 px");
    }

    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    Ok(())
}

fn flamegraph_config(args: &FlameArgs, recording_name: Option<&str>) -> FlamegraphConfig {
    let mut config = FlamegraphConfig::new().with_width(args.width);
    if let Some(title) = &args.title {
        config = config.with_title(title.clone());
    } else if let Some(name) = recording_name {
        config = config.with_title(format!("{} flame graph", name));
    }
    if let Some(attribute) = &args.attribute {
        config = config.with_count_name(attribute.clone());
    }
    config
}

fn parse_categorization(by: &str) -> Result<FrameCategorization> {
    match by.to_ascii_lowercase().as_str() {
        "method" => Ok(FrameCategorization::Method),
        "line" => Ok(FrameCategorization::Line),
        "bci" => Ok(FrameCategorization::ByteCodeIndex),
        other => anyhow::bail!(
            "Unknown frame categorization '{}' (expected method, line or bci)",
            other
        ),
    }
}
