//! Flame graph rendering from folded stacks.
//!
//! The SVG path goes through the inferno library; the text path renders
//! a terminal summary table of the hottest stacks with ANSI heat
//! coloring.

use crate::flamegraph::collapse::FoldedStack;
use crate::utils::error::FlamegraphError;
use log::info;

const ANSI_RESET: &str = "\x1b[0m";

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    pub count_name: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Flight Recording Profile".to_string(),
            width: 1200,
            count_name: "samples".to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_count_name(mut self, count_name: impl Into<String>) -> Self {
        self.count_name = count_name.into();
        self
    }
}

/// Generate an SVG flame graph from folded stacks
///
/// **Public** - main entry point for SVG flame graphs
///
/// # Arguments
/// * `stacks` - collapsed stacks from `collapse_tree`
/// * `config` - title, width and count label; `None` for defaults
///
/// # Returns
/// The SVG document as a string
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - no stacks to render
/// * `FlamegraphError::RenderFailed` - inferno rejected the input
pub fn generate_flamegraph(
    stacks: &[FoldedStack],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph from {} folded stacks", stacks.len());

    // The folded format carries whole counts, so fractional weights are
    // scaled up until the smallest one is at least a single count.
    let scale = integer_scale(stacks);
    let lines: Vec<String> = stacks
        .iter()
        .map(|stack| format!("{} {}", stack.stack, (stack.weight * scale).round() as u64))
        .collect();

    let mut opts = inferno::flamegraph::Options::default();
    opts.title = config.title.clone();
    opts.count_name = config.count_name.clone();
    opts.image_width = Some(config.width);

    let mut svg = Vec::new();
    inferno::flamegraph::from_lines(&mut opts, lines.iter().map(|line| line.as_str()), &mut svg)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    let svg =
        String::from_utf8(svg).map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;
    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Write the folded stacks themselves, one `path weight` line each.
pub fn folded_lines(stacks: &[FoldedStack]) -> String {
    let mut out = String::new();
    for stack in stacks {
        out.push_str(&stack.stack);
        out.push(' ');
        out.push_str(&format_weight(stack.weight));
        out.push('\n');
    }
    out
}

/// Create a text summary table of the hottest stacks
pub fn generate_text_summary(
    stacks: &[FoldedStack],
    max_lines: usize,
    total_weight: f64,
) -> String {
    let mut lines = Vec::new();

    lines.push("  HOTTEST STACKS".to_string());
    lines.push(format!(
        "  ┏{:━<44}┳{:━<14}┳{:━<9}┓",
        "", "", ""
    ));
    lines.push(format!(
        "  ┃ {:<42} ┃ {:^12} ┃ {:^7} ┃",
        "Stack (Hottest First)", "Weight", "%"
    ));
    lines.push(format!(
        "  ┣{:━<44}╋{:━<14}╋{:━<9}┫",
        "", "", ""
    ));

    let total = if total_weight > 0.0 { total_weight } else { 1.0 };

    for stack in stacks.iter().take(max_lines) {
        let percentage = stack.weight / total * 100.0;
        let color = heat_color(percentage);

        // Keep the leaf end; the entry point is the least interesting part.
        let display_stack = if stack.stack.chars().count() > 42 {
            let tail: String = stack
                .stack
                .chars()
                .rev()
                .take(39)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{}", tail)
        } else {
            stack.stack.clone()
        };

        lines.push(format!(
            "  ┃ {}{:<42}{} ┃ {:>12} ┃ {:>6.1}% ┃",
            color,
            display_stack,
            ANSI_RESET,
            format_weight(stack.weight),
            percentage
        ));
    }

    lines.push(format!(
        "  ┗{:━<44}┻{:━<14}┻{:━<9}┛",
        "", "", ""
    ));

    lines.push(String::new());
    for stack in stacks.iter().take(5) {
        let percentage = stack.weight / total * 100.0;
        let bar_width = (percentage / 2.0).round() as usize;
        let bar = "█".repeat(bar_width.min(50));
        let leaf = stack.stack.rsplit(';').next().unwrap_or(&stack.stack);
        let color = heat_color(percentage);

        lines.push(format!(
            "  {}{:<30}{} {} {:>5.1}%",
            color, leaf, ANSI_RESET, bar, percentage
        ));
    }

    if stacks.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "  (Showing top {} of {} unique stacks)",
            max_lines,
            stacks.len()
        ));
    }

    lines.join("\n")
}

fn heat_color(percentage: f64) -> &'static str {
    if percentage >= 20.0 {
        "\x1b[31;1m" // Red (hot)
    } else if percentage >= 5.0 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[90m" // Gray
    }
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        format!("{:.3}", weight)
    }
}

/// Power of ten lifting the smallest weight to a whole count.
fn integer_scale(stacks: &[FoldedStack]) -> f64 {
    if stacks.iter().all(|stack| stack.weight.fract() == 0.0) {
        return 1.0;
    }
    let min = stacks
        .iter()
        .map(|stack| stack.weight)
        .fold(f64::INFINITY, f64::min);
    if !(min > 0.0) {
        return 1.0;
    }
    let digits = (1.0 / min).log10().ceil().max(0.0).min(12.0);
    10f64.powi(digits as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(path: &str, weight: f64) -> FoldedStack {
        FoldedStack {
            stack: path.to_string(),
            weight,
        }
    }

    #[test]
    fn generates_svg_with_title() {
        let stacks = vec![stack("Main.run;Worker.step", 7.0), stack("Main.run", 3.0)];
        let config = FlamegraphConfig::new().with_title("Allocation Profile");
        let svg = generate_flamegraph(&stacks, Some(&config)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Allocation Profile"));
    }

    #[test]
    fn empty_stacks_are_rejected() {
        assert!(matches!(
            generate_flamegraph(&[], None),
            Err(FlamegraphError::EmptyStacks)
        ));
    }

    #[test]
    fn fractional_weights_are_lifted_to_counts() {
        let stacks = vec![stack("a", 0.005), stack("b", 0.02)];
        let scale = integer_scale(&stacks);
        assert_eq!(scale, 1000.0);
        assert_eq!(integer_scale(&[stack("a", 5.0)]), 1.0);
    }

    #[test]
    fn folded_lines_round_trip_the_stacks() {
        let stacks = vec![stack("Main.run;Worker.step", 7.0)];
        assert_eq!(folded_lines(&stacks), "Main.run;Worker.step 7\n");
    }

    #[test]
    fn summary_reports_percentages() {
        let stacks = vec![stack("Main.run;Worker.step", 75.0), stack("Main.run", 25.0)];
        let summary = generate_text_summary(&stacks, 10, 100.0);
        assert!(summary.contains("75.0%"));
        assert!(summary.contains("Worker.step"));
        assert!(!summary.contains("Showing top"));
    }
}
