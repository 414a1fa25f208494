//! Box and line chart rendering.
//!
//! Layout mirrors the experiment write-ups: per-bucket box plots (or mean
//! polylines in line mode) with one color per condition, time limits on the
//! x axis and coverage percentage on the y axis.

use coverage::{Dataset, TimeBuckets};
use errors::*;
use plotters::prelude::*;
use stats;
use std::path::Path;

/// Fill colors, one per series, cycled when there are more series.
const COLORS: [RGBColor; 6] = [
    RGBColor(255, 192, 203), // pink
    RGBColor(173, 216, 230), // light blue
    RGBColor(216, 191, 216), // thistle
    RGBColor(144, 238, 144), // light green
    RGBColor(175, 238, 238), // pale turquoise
    RGBColor(240, 128, 128), // light coral
];

const MARKER_SHAPES: usize = 6;

const SIZE: (u32, u32) = (640, 480);

fn draw_err<E: ::std::fmt::Display>(err: E) -> Error {
    ErrorKind::Chart(err.to_string()).into()
}

fn series_color(index: usize) -> RGBColor {
    COLORS[index % COLORS.len()]
}

/// Marker drawn on every line-chart point, cycling through six shapes.
fn marker<'a>(
    index: usize,
    at: (f64, f64),
    color: RGBColor,
) -> DynElement<'static, BitMapBackend<'a>, (f64, f64)> {
    let style = color.filled();
    let base = EmptyElement::at(at);
    match index % MARKER_SHAPES {
        0 => (base + Circle::new((0, 0), 4, style)).into_dyn(),
        1 => (base + Rectangle::new([(-4, -4), (4, 4)], style)).into_dyn(),
        2 => (base + Polygon::new(vec![(0, -5), (5, 0), (0, 5), (-5, 0)], style)).into_dyn(),
        3 => (base + TriangleMarker::new((0, 0), 5, style)).into_dyn(),
        4 => {
            let pentagon = vec![(0, -5), (5, -1), (3, 5), (-3, 5), (-5, -1)];
            (base + Polygon::new(pentagon, style)).into_dyn()
        }
        _ => (base + Cross::new((0, 0), 4, style)).into_dyn(),
    }
}

/// Draws one polyline of per-bucket means per dataset and saves it as a PNG.
pub fn line_chart<P: AsRef<Path>>(
    path: P,
    title: &str,
    labels: &[String],
    buckets: &TimeBuckets,
    means: &[Vec<f64>],
) -> Result<()> {
    let x_max = buckets.limits().last().cloned().unwrap_or(0) as f64 * 1.05;
    let y_max = stats::max_point(means) * 1.1;

    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Global Time Limit (s)")
        .y_desc("Coverage (%)")
        .draw()
        .map_err(draw_err)?;

    for (index, series) in means.iter().enumerate() {
        let color = series_color(index);
        let points = buckets
            .limits()
            .iter()
            .zip(series.iter())
            .map(|(&limit, &value)| (limit as f64, value))
            .collect::<Vec<_>>();

        chart
            .draw_series(LineSeries::new(points.iter().cloned(), &color))
            .map_err(draw_err)?
            .label(labels[index].as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], &color)
            });

        chart
            .draw_series(points.iter().map(|&at| marker(index, at, color)))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    debug!("line chart saved to {}", path.as_ref().display());
    Ok(())
}

/// Draws one box-and-whisker per dataset per time bucket, buckets side by
/// side, and saves it as a PNG.
pub fn box_chart<P: AsRef<Path>>(
    path: P,
    title: &str,
    labels: &[String],
    buckets: &TimeBuckets,
    datasets: &[Dataset],
) -> Result<()> {
    let series_count = datasets.len();
    let positions = (buckets.len() * series_count) as i32;
    let y_max = datasets
        .iter()
        .map(|d| stats::max_point(&d.series))
        .fold(0.0, f64::max) * 1.1;

    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..positions).into_segmented(), 0f64..y_max)
        .map_err(draw_err)?;

    let limits = buckets.limits().to_vec();
    chart
        .configure_mesh()
        .x_desc("Global Time Limit (s)")
        .y_desc("Coverage (%)")
        .x_labels(positions as usize + 1)
        .x_label_formatter(&move |value: &SegmentValue<i32>| {
            // Label the segment in the middle of each bucket's group with
            // the bucket's time limit; everything else stays blank.
            let position = match *value {
                SegmentValue::Exact(p) | SegmentValue::CenterOf(p) => p as usize,
                SegmentValue::Last => return String::new(),
            };
            if position % series_count == series_count / 2 {
                limits
                    .get(position / series_count)
                    .map(|limit| limit.to_string())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .draw()
        .map_err(draw_err)?;

    for (index, dataset) in datasets.iter().enumerate() {
        let color = series_color(index);
        let boxes = dataset
            .series
            .iter()
            .enumerate()
            .filter(|&(_, bucket)| !bucket.is_empty())
            .map(|(bucket, values)| {
                let position = (bucket * series_count + index) as i32;
                Boxplot::new_vertical(
                    SegmentValue::CenterOf(position),
                    &Quartiles::new(values),
                ).width(12)
                    .style(color.filled())
            });

        chart
            .draw_series(boxes)
            .map_err(draw_err)?
            .label(labels[index].as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    debug!("box chart saved to {}", path.as_ref().display());
    Ok(())
}
