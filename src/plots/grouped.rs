//! Grouped/series scatter renderer.
//!
//! Partitions a point set by optional integer group and series labels,
//! assigns each partition a color and marker from the styling tables,
//! and dispatches one cluster per partition onto a figure with up to
//! two legend overlays.

use crate::error::{PlotError, Result};
use crate::export::pdf::PdfExporter;
use crate::plots::figure::{Figure, Legend, LegendEntry, LegendLocation, LegendStyle};
use crate::plots::scatter::{MarkerStyle, ScatterPlot};
use crate::styling::{MarkerCycle, Palette};
use glam::Vec4;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A label column as supplied by the caller. Data pipelines often
/// carry label columns as float matrices; only the int64 form is
/// accepted, and float columns are rejected at validation time even
/// when every value is integral.
#[derive(Debug, Clone)]
pub enum LabelArray {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl LabelArray {
    pub fn len(&self) -> usize {
        match self {
            LabelArray::Int64(v) => v.len(),
            LabelArray::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_int64(&self, name: &str) -> Result<&[i64]> {
        match self {
            LabelArray::Int64(v) => Ok(v),
            LabelArray::Float64(_) => Err(PlotError::invalid(format!(
                "{name} must be an int64 array."
            ))),
        }
    }
}

impl From<Vec<i64>> for LabelArray {
    fn from(v: Vec<i64>) -> Self {
        LabelArray::Int64(v)
    }
}

impl From<Vec<f64>> for LabelArray {
    fn from(v: Vec<f64>) -> Self {
        LabelArray::Float64(v)
    }
}

/// One draw partition: the point indices sharing a label combination,
/// paired with the color and marker assigned to them.
#[derive(Debug, Clone)]
pub struct Partition {
    pub group: Option<i64>,
    pub series: Option<i64>,
    pub indices: Vec<usize>,
    pub color: Vec4,
    pub marker: MarkerStyle,
}

/// Builder for a grouped/series scatter figure.
#[derive(Debug, Clone)]
pub struct GroupedScatter {
    x_data: Vec<f64>,
    y_data: Vec<f64>,
    group: Option<LabelArray>,
    series: Option<LabelArray>,
    group_names: Option<Vec<String>>,
    series_names: Option<Vec<String>>,

    palette: Palette,
    markers: MarkerCycle,
    fix_marker: bool,
    marker_size: f64,
    alpha: f64,
    edge_width: f64,

    group_legend: LegendStyle,
    series_legend: LegendStyle,

    figsize: (f64, f64),
    remove_axis: bool,
    axis_font_size: f64,
}

impl GroupedScatter {
    pub fn new(x_data: Vec<f64>, y_data: Vec<f64>) -> Result<Self> {
        if x_data.len() != y_data.len() {
            return Err(PlotError::invalid(format!(
                "Data length mismatch: x_data has {} points, y_data has {} points",
                x_data.len(),
                y_data.len()
            )));
        }
        Ok(Self {
            x_data,
            y_data,
            group: None,
            series: None,
            group_names: None,
            series_names: None,
            palette: Palette::default(),
            markers: MarkerCycle::default(),
            fix_marker: false,
            marker_size: 10.0,
            alpha: 0.8,
            edge_width: 0.5,
            group_legend: LegendStyle::default(),
            series_legend: LegendStyle::default().with_location(LegendLocation::UpperLeft),
            figsize: (6.0, 4.0),
            remove_axis: true,
            axis_font_size: 10.0,
        })
    }

    /// Primary partition labels; drives marker selection and the
    /// group legend.
    pub fn with_group<L: Into<LabelArray>>(mut self, group: L) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Secondary partition labels; drives color selection and the
    /// series legend. Only valid alongside a group.
    pub fn with_series<L: Into<LabelArray>>(mut self, series: L) -> Self {
        self.series = Some(series.into());
        self
    }

    pub fn with_group_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_series_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.series_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_markers(mut self, markers: MarkerCycle) -> Self {
        self.markers = markers;
        self
    }

    /// Use the first marker of the cycle for every partition.
    pub fn with_fix_marker(mut self, fix: bool) -> Self {
        self.fix_marker = fix;
        self
    }

    /// Marker area in points squared.
    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size.max(0.1);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_edge_width(mut self, width: f64) -> Self {
        self.edge_width = width.max(0.0);
        self
    }

    /// Style of the group legend (shown when group names are given).
    pub fn with_legend_style(mut self, style: LegendStyle) -> Self {
        self.group_legend = style;
        self
    }

    /// Style of the series legend (shown when series names are given).
    pub fn with_series_legend_style(mut self, style: LegendStyle) -> Self {
        self.series_legend = style;
        self
    }

    pub fn with_figsize(mut self, width_in: f64, height_in: f64) -> Self {
        self.figsize = (width_in.max(0.1), height_in.max(0.1));
        self
    }

    /// Remove the axis and bounding box (default). Keeping the axis
    /// enables numeric tick labels at the axis font size.
    pub fn with_remove_axis(mut self, remove: bool) -> Self {
        self.remove_axis = remove;
        self
    }

    pub fn with_axis_font_size(mut self, size: f64) -> Self {
        self.axis_font_size = size.max(1.0);
        self
    }

    /// Validate the label arrays and name lists, returning the label
    /// slices. All validation happens here, before any figure exists.
    fn validate(&self) -> Result<(Option<&[i64]>, Option<&[i64]>)> {
        if self.series.is_some() && self.group.is_none() {
            return Err(PlotError::invalid(
                "group must not None when series is not None.",
            ));
        }

        let group = match &self.group {
            Some(array) => Some(array.as_int64("group")?),
            None => None,
        };
        let series = match &self.series {
            Some(array) => Some(array.as_int64("series")?),
            None => None,
        };

        if let Some(group) = group {
            if group.len() != self.x_data.len() {
                return Err(PlotError::invalid(
                    "The length of group does not match data.",
                ));
            }
            if let Some(names) = &self.group_names {
                if names.len() != distinct(group).len() {
                    return Err(PlotError::invalid(
                        "The length of group_names does not match group.",
                    ));
                }
            }
        }
        if let Some(series) = series {
            if series.len() != self.x_data.len() {
                return Err(PlotError::invalid(
                    "The length of series does not match data.",
                ));
            }
            if let Some(names) = &self.series_names {
                if names.len() != distinct(series).len() {
                    return Err(PlotError::invalid(
                        "The length of series_names does not match series.",
                    ));
                }
            }
        }

        Ok((group, series))
    }

    /// Enumerate the draw partitions in deterministic order.
    ///
    /// Distinct label values are visited ascending, not by first
    /// occurrence. With both labels present, every (group, series)
    /// combination yields one partition, including combinations with
    /// no points, so legend handles stay aligned with the declared
    /// label counts.
    pub fn partitions(&self) -> Result<Vec<Partition>> {
        let (group, series) = self.validate()?;

        let marker_for = |label: i64| {
            if self.fix_marker {
                self.markers.first()
            } else {
                self.markers.marker_for(label)
            }
        };

        let partitions = match (group, series) {
            (None, _) => vec![Partition {
                group: None,
                series: None,
                indices: (0..self.x_data.len()).collect(),
                color: self.palette.first(),
                marker: self.markers.first(),
            }],
            (Some(group), None) => distinct(group)
                .into_iter()
                .map(|g| Partition {
                    group: Some(g),
                    series: None,
                    indices: indices_where(group, |v| v == g),
                    color: self.palette.color_for(g),
                    marker: marker_for(g),
                })
                .collect(),
            (Some(group), Some(series)) => {
                let series_values = distinct(series);
                let mut out = Vec::new();
                for g in distinct(group) {
                    for &s in &series_values {
                        let indices = (0..group.len())
                            .filter(|&i| series[i] == s && group[i] == g)
                            .collect();
                        out.push(Partition {
                            group: Some(g),
                            series: Some(s),
                            indices,
                            color: self.palette.color_for(s),
                            marker: marker_for(g),
                        });
                    }
                }
                out
            }
        };

        Ok(partitions)
    }

    /// Build the figure: one cluster per partition plus legends.
    pub fn build_figure(&self) -> Result<Figure> {
        let partitions = self.partitions()?;

        let mut figure = Figure::new()
            .with_size(self.figsize.0, self.figsize.1)
            .with_axis(!self.remove_axis)
            .with_axis_font_size(self.axis_font_size);

        for partition in &partitions {
            let x: Vec<f64> = partition.indices.iter().map(|&i| self.x_data[i]).collect();
            let y: Vec<f64> = partition.indices.iter().map(|&i| self.y_data[i]).collect();
            let cluster = ScatterPlot::new(x, y)?
                .with_style(partition.color, self.marker_size, partition.marker)
                .with_alpha(self.alpha)
                .with_edge_width(self.edge_width);
            figure.add_scatter_plot(cluster);
        }

        if let Some(names) = &self.group_names {
            let handles = first_handles(&partitions, |p| p.group);
            figure.add_legend(Legend {
                entries: self.entries(&handles, names),
                style: self.group_legend.clone(),
            });
        }
        if let Some(names) = &self.series_names {
            let handles = first_handles(&partitions, |p| p.series);
            figure.add_legend(Legend {
                entries: self.entries(&handles, names),
                style: self.series_legend.clone(),
            });
        }

        log::debug!(
            target: "sciplot",
            "grouped scatter: {} points, {} partitions, {} legends",
            self.x_data.len(),
            figure.len(),
            figure.legends().len()
        );
        Ok(figure)
    }

    fn entries(&self, handles: &[&Partition], names: &[String]) -> Vec<LegendEntry> {
        handles
            .iter()
            .zip(names.iter())
            .map(|(partition, name)| LegendEntry {
                label: name.clone(),
                color: partition.color,
                marker: partition.marker,
                marker_size: self.marker_size,
                alpha: self.alpha,
            })
            .collect()
    }

    /// Render and write `<dir>/<stem>.pdf`, creating directories as
    /// needed and overwriting any existing file.
    pub fn save<P: AsRef<Path>>(&self, dir: P, stem: &str) -> Result<PathBuf> {
        let figure = self.build_figure()?;
        PdfExporter::new().save(&figure, dir, stem)
    }
}

/// Distinct label values in ascending order.
fn distinct(labels: &[i64]) -> Vec<i64> {
    labels.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn indices_where(labels: &[i64], pred: impl Fn(i64) -> bool) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| if pred(v) { Some(i) } else { None })
        .collect()
}

/// First partition per distinct key, in ascending key order.
fn first_handles<'a>(
    partitions: &'a [Partition],
    key: impl Fn(&Partition) -> Option<i64>,
) -> Vec<&'a Partition> {
    let mut seen = BTreeSet::new();
    let mut handles = Vec::new();
    for partition in partitions {
        match key(partition) {
            Some(k) => {
                if seen.insert(k) {
                    handles.push(partition);
                }
            }
            None => {
                // Unlabeled figures still expose their single cluster
                // as a legend handle.
                if handles.is_empty() {
                    handles.push(partition);
                }
            }
        }
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped_data(groups: usize, per_group: usize) -> (Vec<f64>, Vec<f64>, Vec<i64>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut group = Vec::new();
        for g in 0..groups {
            for k in 0..per_group {
                x.push(g as f64 + 0.01 * k as f64);
                y.push(g as f64 - 0.01 * k as f64);
                group.push(g as i64);
            }
        }
        (x, y, group)
    }

    #[test]
    fn test_series_without_group_rejected() {
        let err = GroupedScatter::new(vec![], vec![])
            .unwrap()
            .with_series(Vec::<i64>::new())
            .partitions()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "group must not None when series is not None."
        );
    }

    #[test]
    fn test_float_labels_rejected() {
        let err = GroupedScatter::new(vec![0.0], vec![0.0])
            .unwrap()
            .with_group(vec![0.0f64])
            .partitions()
            .unwrap_err();
        assert_eq!(err.to_string(), "group must be an int64 array.");

        let err = GroupedScatter::new(vec![0.0], vec![0.0])
            .unwrap()
            .with_group(vec![0i64])
            .with_series(vec![0.0f64])
            .partitions()
            .unwrap_err();
        assert_eq!(err.to_string(), "series must be an int64 array.");
    }

    #[test]
    fn test_group_names_mismatch_rejected() {
        let err = GroupedScatter::new(vec![], vec![])
            .unwrap()
            .with_group(Vec::<i64>::new())
            .with_group_names(["1"])
            .partitions()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The length of group_names does not match group."
        );
    }

    #[test]
    fn test_series_names_mismatch_rejected() {
        let err = GroupedScatter::new(vec![], vec![])
            .unwrap()
            .with_group(Vec::<i64>::new())
            .with_series(Vec::<i64>::new())
            .with_series_names(["1"])
            .partitions()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The length of series_names does not match series."
        );
    }

    #[test]
    fn test_label_length_mismatch_rejected() {
        let err = GroupedScatter::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .with_group(vec![0i64])
            .partitions()
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidArgument(_)));
    }

    #[test]
    fn test_unlabeled_single_partition() {
        let gs = GroupedScatter::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        let parts = gs.partitions().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].indices, vec![0, 1, 2]);
        assert_eq!(parts[0].color, Palette::default().first());
        assert_eq!(parts[0].marker, MarkerCycle::default().first());
    }

    #[test]
    fn test_group_partitions_cover_all_points() {
        let (x, y, group) = grouped_data(7, 10);
        let gs = GroupedScatter::new(x, y).unwrap().with_group(group);
        let parts = gs.partitions().unwrap();

        assert_eq!(parts.len(), 7);
        let mut all: Vec<usize> = parts.iter().flat_map(|p| p.indices.clone()).collect();
        all.sort_unstable();
        assert_eq!(all, (0..70).collect::<Vec<_>>());
        for (i, p) in parts.iter().enumerate() {
            assert_eq!(p.group, Some(i as i64));
            assert_eq!(p.indices.len(), 10);
        }
    }

    #[test]
    fn test_partition_order_is_ascending_not_first_occurrence() {
        let gs = GroupedScatter::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .unwrap()
            .with_group(vec![5i64, -3, 1]);
        let parts = gs.partitions().unwrap();
        let order: Vec<i64> = parts.iter().map(|p| p.group.unwrap()).collect();
        assert_eq!(order, vec![-3, 1, 5]);
    }

    #[test]
    fn test_cross_product_partitions() {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut group = Vec::new();
        let mut series = Vec::new();
        for s in 0..4i64 {
            for g in 0..7i64 {
                for _ in 0..10 {
                    x.push(g as f64);
                    y.push(s as f64);
                    group.push(g);
                    series.push(s);
                }
            }
        }
        let gs = GroupedScatter::new(x, y)
            .unwrap()
            .with_group(group)
            .with_series(series);
        let parts = gs.partitions().unwrap();

        assert_eq!(parts.len(), 28);
        assert!(parts.iter().all(|p| p.indices.len() == 10));

        // Color keyed by series, marker keyed by group.
        let palette = Palette::default();
        let markers = MarkerCycle::default();
        for p in &parts {
            assert_eq!(p.color, palette.color_for(p.series.unwrap()));
            assert_eq!(p.marker, markers.marker_for(p.group.unwrap()));
        }
    }

    #[test]
    fn test_cross_product_includes_empty_combinations() {
        // Series 1 never occurs together with group 1.
        let gs = GroupedScatter::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .unwrap()
            .with_group(vec![0i64, 0, 1])
            .with_series(vec![0i64, 1, 0]);
        let parts = gs.partitions().unwrap();
        assert_eq!(parts.len(), 4);
        let empty = parts
            .iter()
            .find(|p| p.group == Some(1) && p.series == Some(1))
            .unwrap();
        assert!(empty.indices.is_empty());
    }

    #[test]
    fn test_fix_marker_uses_first_marker_everywhere() {
        let (x, y, group) = grouped_data(5, 2);
        let gs = GroupedScatter::new(x, y)
            .unwrap()
            .with_group(group)
            .with_fix_marker(true);
        let first = MarkerCycle::default().first();
        assert!(gs
            .partitions()
            .unwrap()
            .iter()
            .all(|p| p.marker == first));
    }

    #[test]
    fn test_palette_indexing_wraps_modulo() {
        let gs = GroupedScatter::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .with_group(vec![2i64, 16]);
        let parts = gs.partitions().unwrap();
        assert_eq!(parts[0].color, parts[1].color);
    }

    #[test]
    fn test_two_legends_coexist() {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut group = Vec::new();
        let mut series = Vec::new();
        for s in 0..2i64 {
            for g in 0..3i64 {
                x.push(g as f64);
                y.push(s as f64);
                group.push(g);
                series.push(s);
            }
        }
        let figure = GroupedScatter::new(x, y)
            .unwrap()
            .with_group(group)
            .with_series(series)
            .with_group_names(["g0", "g1", "g2"])
            .with_series_names(["s0", "s1"])
            .build_figure()
            .unwrap();

        assert_eq!(figure.len(), 6);
        assert_eq!(figure.legends().len(), 2);
        assert_eq!(figure.legends()[0].entries.len(), 3);
        assert_eq!(figure.legends()[1].entries.len(), 2);

        // Group legend handles carry the marker of each group; series
        // legend handles carry the color of each series.
        let markers = MarkerCycle::default();
        let palette = Palette::default();
        for (i, entry) in figure.legends()[0].entries.iter().enumerate() {
            assert_eq!(entry.marker, markers.marker_for(i as i64));
        }
        for (i, entry) in figure.legends()[1].entries.iter().enumerate() {
            assert_eq!(entry.color, palette.color_for(i as i64));
        }
    }

    #[test]
    fn test_unlabeled_figure_with_group_names_gets_one_entry() {
        let figure = GroupedScatter::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .with_group_names(["all points"])
            .build_figure()
            .unwrap();
        assert_eq!(figure.legends().len(), 1);
        assert_eq!(figure.legends()[0].entries.len(), 1);
        assert_eq!(figure.legends()[0].entries[0].label, "all points");
    }
}
