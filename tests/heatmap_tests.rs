//! End-to-end tests for the annotated heatmap renderer: color-scale
//! resolution, grid padding, and PDF file output.

use sciplot::{ColorMap, HeatmapPlot, PlotError};
use std::path::PathBuf;

fn out_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name)
}

fn sample_matrix() -> Vec<Vec<f64>> {
    vec![vec![0.8, 2.4], vec![2.4, 0.0]]
}

#[test]
fn test_default_heatmap_writes_pdf() {
    let dir = out_dir("default");
    let path = HeatmapPlot::new(sample_matrix())
        .unwrap()
        .save(&dir, "heatmap")
        .unwrap();

    assert_eq!(path, dir.join("heatmap.pdf"));
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_repeated_save_overwrites() {
    let hm = HeatmapPlot::new(sample_matrix()).unwrap();
    let dir = out_dir("overwrite");
    let first = hm.save(&dir, "heatmap").unwrap();
    let second = hm.save(&dir, "heatmap").unwrap();
    assert_eq!(first, second);
    assert!(std::fs::metadata(&second).unwrap().len() > 0);
}

#[test]
fn test_grid_padding_is_proportional_to_line_width() {
    let flat = HeatmapPlot::new(sample_matrix()).unwrap();
    assert_eq!(flat.pad_inches(), 0.0);
    assert_eq!(flat.build_figure().unwrap().pad_inches, 0.0);

    let gridded = HeatmapPlot::new(sample_matrix()).unwrap().with_grid(true);
    let expected = 2.0 / 144.0;
    assert!((gridded.pad_inches() - expected).abs() < 1e-12);
    assert!((gridded.build_figure().unwrap().pad_inches - expected).abs() < 1e-12);
}

#[test]
fn test_color_scale_defaults_to_data_range() {
    let hm = HeatmapPlot::new(sample_matrix()).unwrap();
    assert_eq!(hm.resolved_limits(), (0.0, 2.4));
}

#[test]
fn test_color_scale_respects_explicit_bounds() {
    let hm = HeatmapPlot::new(sample_matrix())
        .unwrap()
        .with_limits(Some(1.0), Some(2.0));
    assert_eq!(hm.resolved_limits(), (1.0, 2.0));
}

#[test]
fn test_full_option_export() {
    let hm = HeatmapPlot::new(vec![
        vec![0.31, 0.58, 0.91],
        vec![0.12, 0.44, 0.72],
        vec![0.05, 0.66, 0.23],
    ])
    .unwrap()
    .with_axis(true)
    .with_spines(true)
    .with_grid(true)
    .with_grid_style(glam::Vec4::new(0.2, 0.2, 0.2, 1.0), 1.5)
    .with_color_bar("accuracy")
    .with_x_labels(["mon", "tue", "wed"])
    .with_y_labels(["alpha", "beta", "gamma"])
    .with_colormap(ColorMap::Viridis)
    .with_precision(2)
    .with_figsize(6.0, 4.5);

    let path = hm.save(out_dir("full"), "heatmap").unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_label_mismatch_fails_without_output() {
    let dir = out_dir("label_mismatch");
    let err = HeatmapPlot::new(sample_matrix())
        .unwrap()
        .with_axis(true)
        .with_x_labels(["only one"])
        .save(&dir, "rejected")
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidArgument(_)));
    assert!(!dir.join("rejected.pdf").exists());
}

#[test]
fn test_single_cell_and_constant_matrix() {
    let path = HeatmapPlot::new(vec![vec![5.0]])
        .unwrap()
        .save(out_dir("single"), "heatmap")
        .unwrap();
    assert!(path.exists());

    let path = HeatmapPlot::new(vec![vec![3.0, 3.0], vec![3.0, 3.0]])
        .unwrap()
        .save(out_dir("constant"), "heatmap")
        .unwrap();
    assert!(path.exists());
}

#[test]
fn test_non_finite_cells_do_not_panic() {
    let path = HeatmapPlot::new(vec![vec![0.0, f64::NAN], vec![f64::INFINITY, 1.0]])
        .unwrap()
        .save(out_dir("non_finite"), "heatmap")
        .unwrap();
    assert!(path.exists());
}
