use flightview_studio::flamegraph::{
    collapse_tree, folded_lines, generate_flamegraph, generate_text_summary, FlamegraphConfig,
};
use flightview_studio::output::write_svg;
use flightview_studio::recording::{fold_traces, parse_recording, Recording};
use flightview_studio::stacktrace::{FrameCategorization, FrameSeparator};
use pretty_assertions::assert_eq;
use serde_json::json;

fn frame(type_name: &str, method_name: &str) -> serde_json::Value {
    json!({"method": {"type_name": type_name, "method_name": method_name}})
}

/// Three samples in `main -> work`, one in `main -> work -> grow`, plus
/// one event without a trace.
fn traced_recording() -> Recording {
    let work_trace = json!({
        "frames": [frame("app.Main", "work"), frame("app.Main", "main")],
        "truncated": false
    });
    let grow_trace = json!({
        "frames": [
            frame("io.Buffer", "grow"),
            frame("app.Main", "work"),
            frame("app.Main", "main")
        ],
        "truncated": false
    });
    parse_recording(&json!({
        "version": "1.0.0",
        "name": "demo",
        "events": [
            {"event_type": "sample", "start_time": 1i64, "stack_trace": work_trace.clone(),
             "attributes": {"allocated": {"value": 1024.0, "unit": "B"}}},
            {"event_type": "sample", "start_time": 2i64, "stack_trace": work_trace.clone()},
            {"event_type": "sample", "start_time": 3i64, "stack_trace": work_trace},
            {"event_type": "sample", "start_time": 4i64, "stack_trace": grow_trace,
             "attributes": {"allocated": {"value": 2048.0, "unit": "B"}}},
            {"event_type": "sample", "start_time": 5i64}
        ]
    }))
    .unwrap()
}

#[test]
fn test_count_fold_collapses_to_leaf_lines() {
    let recording = traced_recording();
    let tree = fold_traces(&recording, FrameSeparator::default(), false, None);
    assert_eq!(tree.total_weight(), 5.0);
    assert_eq!(tree.root_children().len(), 1);

    let stacks = collapse_tree(&tree);
    assert_eq!(
        folded_lines(&stacks),
        "app.Main.main;app.Main.work 3\napp.Main.main;app.Main.work;io.Buffer.grow 1\n"
    );
}

#[test]
fn test_attribute_weights_replace_event_counts() {
    let recording = traced_recording();
    let tree = fold_traces(&recording, FrameSeparator::default(), false, Some("allocated"));
    assert_eq!(tree.total_weight(), 3072.0);

    let stacks = collapse_tree(&tree);
    assert_eq!(stacks[0].stack, "app.Main.main;app.Main.work;io.Buffer.grow");
    assert_eq!(stacks[0].weight, 2048.0);
    assert_eq!(stacks[1].weight, 1024.0);
}

#[test]
fn test_inverted_fold_roots_at_the_hot_leaves() {
    let recording = traced_recording();
    let tree = fold_traces(&recording, FrameSeparator::default(), true, None);

    let mut roots: Vec<(String, f64)> = tree
        .root_children()
        .iter()
        .filter_map(|id| tree.node(*id))
        .map(|node| (node.name.clone(), node.cumulative_weight))
        .collect();
    roots.sort_by(|a, b| b.1.total_cmp(&a.1));
    assert_eq!(roots[0], ("app.Main.work".to_string(), 3.0));
    assert_eq!(roots[1], ("io.Buffer.grow".to_string(), 1.0));
}

#[test]
fn test_line_categorization_splits_call_sites() {
    let recording = parse_recording(&json!({
        "version": "1.0.0",
        "events": [
            {"event_type": "sample", "start_time": 1i64, "stack_trace": {
                "frames": [{"method": {"type_name": "app.Main", "method_name": "hot"}, "line": 10}]
            }},
            {"event_type": "sample", "start_time": 2i64, "stack_trace": {
                "frames": [{"method": {"type_name": "app.Main", "method_name": "hot"}, "line": 20}]
            }}
        ]
    }))
    .unwrap();

    let by_method = fold_traces(&recording, FrameSeparator::default(), false, None);
    assert_eq!(by_method.root_children().len(), 1);

    let by_line = fold_traces(
        &recording,
        FrameSeparator::new(FrameCategorization::Line, false),
        false,
        None,
    );
    assert_eq!(by_line.root_children().len(), 2);
    let names: Vec<&str> = by_line
        .root_children()
        .iter()
        .filter_map(|id| by_line.node(*id))
        .map(|node| node.name.as_str())
        .collect();
    assert!(names.contains(&"app.Main.hot:10"));
    assert!(names.contains(&"app.Main.hot:20"));
}

#[test]
fn test_truncated_traces_fold_under_the_sentinel() {
    let recording = parse_recording(&json!({
        "version": "1.0.0",
        "events": [
            {"event_type": "sample", "start_time": 1i64, "stack_trace": {
                "frames": [frame("app.Main", "deep")], "truncated": true
            }}
        ]
    }))
    .unwrap();

    let tree = fold_traces(&recording, FrameSeparator::default(), false, None);
    assert_eq!(tree.node_count(), 2);
    let root = tree.node(tree.root_children()[0]).unwrap();
    assert_eq!(root.name, "<truncated>");
}

#[test]
fn test_flamegraph_svg_written_to_disk() {
    let recording = traced_recording();
    let tree = fold_traces(&recording, FrameSeparator::default(), false, None);
    let stacks = collapse_tree(&tree);

    let config = FlamegraphConfig::new()
        .with_title("demo flame graph")
        .with_width(800);
    let svg = generate_flamegraph(&stacks, Some(&config)).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("demo flame graph"));
    assert!(svg.contains("app.Main.work"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("flame.svg");
    write_svg(&svg, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, svg);
}

#[test]
fn test_text_summary_ranks_the_hottest_stacks() {
    let recording = traced_recording();
    let tree = fold_traces(&recording, FrameSeparator::default(), false, None);
    let stacks = collapse_tree(&tree);

    let summary = generate_text_summary(&stacks, 10, tree.total_weight());
    assert!(summary.contains("HOTTEST STACKS"));
    assert!(summary.contains("60.0%"));
    assert!(summary.contains("20.0%"));
    assert!(!summary.contains("Showing top"));

    let truncated = generate_text_summary(&stacks, 1, tree.total_weight());
    assert!(truncated.contains("Showing top 1 of 2"));
}
