// File: crates/throughput-viz/tests/render.rs
// Purpose: End-to-end behavior of the throughput chart pipeline on real files.

use std::path::{Path, PathBuf};

use throughput_viz::{build_chart, load_series, render, render_with, Error, RenderConfig, RenderError};

const THREE_ROWS: &str = "time_seconds,messages_per_10_seconds\n0,100\n10,200\n20,300\n";

fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write csv");
    path
}

/// Small figure so tests stay fast; layout is the same as the full-size one.
fn quick_config(input: PathBuf, output: PathBuf) -> RenderConfig {
    RenderConfig { input, output, dpi: 50.0, ..RenderConfig::default() }
}

#[test]
fn average_and_legend_label_for_three_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);

    let series = load_series(&input).expect("load");
    assert_eq!(series.average(), 200.0);

    let chart = build_chart(&series, &RenderConfig::default());
    let labels: Vec<&str> = chart.series.iter().filter_map(|s| s.label.as_deref()).collect();
    assert_eq!(labels, vec!["Average: 200 msg/10s"]);

    let avg_line = &chart.series[1];
    assert_eq!(avg_line.data_xy, vec![(chart.x_axis.min, 200.0), (chart.x_axis.max, 200.0)]);
    assert!(avg_line.stroke.dash.is_some());
    assert!(chart.series[0].marker.is_some());
}

#[test]
fn chart_carries_fixed_title_and_axis_labels() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);
    let chart = build_chart(&load_series(&input).unwrap(), &RenderConfig::default());

    assert_eq!(chart.title.as_deref(), Some("Throughput Over Time - 500,000 Messages Load Test"));
    assert_eq!(chart.x_axis.label, "Time (seconds)");
    assert_eq!(chart.y_axis.label, "Messages per 10 seconds");
    assert!(chart.x_axis.min <= 0.0 && chart.x_axis.max >= 20.0);
    assert!(chart.y_axis.min <= 100.0 && chart.y_axis.max >= 300.0);
}

#[test]
fn average_ignores_row_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_csv(dir.path(), "a.csv", "time_seconds,messages_per_10_seconds\n0,12000\n10,9500\n20,11250\n30,7000\n");
    let b = write_csv(dir.path(), "b.csv", "time_seconds,messages_per_10_seconds\n30,7000\n0,12000\n20,11250\n10,9500\n");
    let avg_a = load_series(&a).unwrap().average();
    let avg_b = load_series(&b).unwrap().average();
    assert_eq!(avg_a, avg_b);
    assert_eq!(avg_a, 9937.5);
}

#[test]
fn renders_full_size_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);
    let output = dir.path().join("throughput-chart.png");

    render(&input, &output).expect("render");

    let img = image::open(&output).expect("decode output");
    assert_eq!((img.width(), img.height()), (3600, 1800));
}

#[test]
fn summary_reports_what_was_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);
    let output = dir.path().join("out/chart.png");

    let summary = render_with(&quick_config(input, output.clone())).expect("render");

    assert_eq!(summary.samples, 3);
    assert_eq!(summary.average, 200.0);
    assert_eq!(summary.output, output);
    assert!(output.is_file());
}

#[test]
fn missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("throughput-chart.png");

    let err = render(dir.path().join("throughput.csv"), &output).unwrap_err();

    assert!(err.is_missing_input());
    assert!(matches!(err, Error::MissingInput { .. }));
    assert!(!output.exists());
}

#[test]
fn missing_input_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("throughput-chart.png");
    std::fs::write(&output, b"previous run").unwrap();

    let err = render(dir.path().join("nope.csv"), &output).unwrap_err();

    assert!(err.is_missing_input());
    assert_eq!(std::fs::read(&output).unwrap(), b"previous run");
}

#[test]
fn missing_columns_is_render_error_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", "timestamp,count\n0,100\n");
    let output = dir.path().join("throughput-chart.png");

    let err = render(&input, &output).unwrap_err();

    assert!(matches!(err, Error::Render(RenderError::MissingColumn("time_seconds"))));
    assert!(err.to_string().contains("time_seconds"));
    assert!(!output.exists());
}

#[test]
fn header_only_input_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", "time_seconds,messages_per_10_seconds\n");
    let output = dir.path().join("throughput-chart.png");

    let err = render(&input, &output).unwrap_err();

    assert!(matches!(err, Error::Render(RenderError::EmptySeries)));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);
    // The destination is an existing directory, so the image cannot be placed there.
    let output = dir.path().join("taken");
    std::fs::create_dir(&output).unwrap();

    let err = render_with(&quick_config(input, output.clone())).unwrap_err();

    assert!(matches!(err, Error::Render(RenderError::Chart(_))));
    assert!(output.is_dir());
}

#[test]
fn single_row_renders_flat_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", "time_seconds,messages_per_10_seconds\n0,4200\n");
    let output = dir.path().join("single.png");

    let series = load_series(&input).unwrap();
    assert_eq!(series.average(), 4200.0);
    let chart = build_chart(&series, &RenderConfig::default());
    assert!(chart.x_axis.max > chart.x_axis.min);
    assert!(chart.y_axis.max > chart.y_axis.min);

    render_with(&quick_config(input, output.clone())).expect("single row renders");
    assert!(output.is_file());
}

#[test]
fn rerender_is_pixel_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    render_with(&quick_config(input.clone(), first.clone())).unwrap();
    render_with(&quick_config(input, second.clone())).unwrap();

    let a = image::open(&first).unwrap().to_rgba8();
    let b = image::open(&second).unwrap().to_rgba8();
    assert_eq!(a.dimensions(), (600, 300));
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn rerender_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "throughput.csv", THREE_ROWS);
    let output = dir.path().join("throughput-chart.png");
    std::fs::write(&output, b"stale").unwrap();

    render_with(&quick_config(input, output.clone())).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
