//! Flightview Studio CLI
//!
//! Renders charts and flame graphs from flight recording files and
//! prints recording summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use flightview_studio::commands::{self, ChartArgs, FlameArgs, SummaryArgs};

/// Flightview Studio - chart and stack trace analysis for flight recordings
#[derive(Parser, Debug)]
#[command(name = "flightview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a recording as an SVG chart
    Chart {
        /// Path to the recording JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the SVG chart
        #[arg(short, long, default_value = "chart.svg")]
        output: PathBuf,

        /// Attribute to chart, one lane each (repeatable; none = event counts)
        #[arg(short, long)]
        attribute: Vec<String>,

        /// Bucket aggregation for attribute lanes: sum or max
        #[arg(long, default_value = "sum")]
        aggregate: String,

        /// Lane style: line, filled, step, bar or plot
        #[arg(long, default_value = "line")]
        style: String,

        /// Chart width in pixels
        #[arg(long, default_value = "1200")]
        width: u32,

        /// Chart height in pixels
        #[arg(long, default_value = "400")]
        height: u32,
    },

    /// Build a flame graph from a recording's stack traces
    Flame {
        /// Path to the recording JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the flame graph
        #[arg(short, long, default_value = "flamegraph.svg")]
        output: PathBuf,

        /// Frame identity: method, line or bci
        #[arg(long, default_value = "method")]
        by: String,

        /// Distinguish frames by optimization level
        #[arg(long)]
        distinguish_optimization: bool,

        /// Root the graph at the leaf frames
        #[arg(long)]
        invert: bool,

        /// Weight traces by this numeric attribute instead of by count
        #[arg(short, long)]
        attribute: Option<String>,

        /// Write folded stacks text instead of SVG
        #[arg(long)]
        folded: bool,

        /// Flame graph title
        #[arg(long)]
        title: Option<String>,

        /// Flame graph width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of stacks in the text summary
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Summarize a recording's events and hottest methods
    Summary {
        /// Path to the recording JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of methods in the hottest-methods list
        #[arg(long, default_value = "10")]
        top: usize,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Validate a recording JSON file
    Validate {
        /// Path to the recording JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Chart {
            input,
            output,
            attribute,
            aggregate,
            style,
            width,
            height,
        } => {
            let args = ChartArgs {
                input,
                output,
                attributes: attribute,
                aggregate,
                style,
                width,
                height,
            };

            commands::chart::validate_args(&args)?;
            commands::execute_chart(args)?;
        }

        Commands::Flame {
            input,
            output,
            by,
            distinguish_optimization,
            invert,
            attribute,
            folded,
            title,
            width,
            summary,
            top,
        } => {
            let args = FlameArgs {
                input,
                output,
                by,
                distinguish_optimization,
                invert,
                attribute,
                folded,
                title,
                width,
                print_summary: summary,
                top,
            };

            commands::flame::validate_args(&args)?;
            commands::execute_flame(args)?;
        }

        Commands::Summary { input, top, json } => {
            let args = SummaryArgs {
                input,
                top,
                output_json: json,
            };

            commands::summary::validate_args(&args)?;
            commands::execute_summary(args)?;
        }

        Commands::Validate { file } => {
            commands::validate_recording_file(file)?;
        }

        Commands::Version => {
            commands::display_version();
        }
    }

    Ok(())
}
