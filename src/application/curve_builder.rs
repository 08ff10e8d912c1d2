// Pixel-space curve through a value series (Catmull-Rom as cubic Bezier)
use crate::domain::trend::{round_to, ChartPoint, CubicSegment, Curve, SeriesStats};

/// Inset so extreme points are not clipped at the canvas edge
pub const CHART_MARGIN: f64 = 8.0;

/// Build the renderable curve for `values` on a `width` x `height` canvas.
///
/// An empty series yields an empty curve with no stats, which the caller
/// renders as a "no data" state. A single value yields one point and a
/// move-to path.
pub fn build_curve(values: &[f64], width: f64, height: f64) -> Curve {
    if values.is_empty() {
        return Curve::default();
    }

    let points = scale_points(values, width, height);
    let segments = catmull_rom_segments(&points);
    let path_data = render_path(&points, &segments);
    let area_path = format!("{} L {} {} L 0 {} Z", path_data, width, height, height);

    Curve {
        points,
        segments,
        path_data,
        area_path,
        stats: series_stats(values),
    }
}

fn scale_points(values: &[f64], width: f64, height: f64) -> Vec<ChartPoint> {
    let (min, max) = bounds(values);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let n = values.len();
    let x_step = if n > 1 { width / (n - 1) as f64 } else { 0.0 };

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| ChartPoint {
            x: i as f64 * x_step,
            y: height - ((value - min) / range) * (height - CHART_MARGIN),
            value,
        })
        .collect()
}

/// One segment per consecutive pair; end tangents reuse the endpoint.
pub fn catmull_rom_segments(points: &[ChartPoint]) -> Vec<CubicSegment> {
    let xy = |p: &ChartPoint| (p.x, p.y);

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let p1 = xy(&pair[0]);
            let p2 = xy(&pair[1]);
            let p0 = if i == 0 { p1 } else { xy(&points[i - 1]) };
            let p3 = points.get(i + 2).map(xy).unwrap_or(p2);

            CubicSegment {
                from: p1,
                ctrl1: (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0),
                ctrl2: (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0),
                to: p2,
            }
        })
        .collect()
}

fn render_path(points: &[ChartPoint], segments: &[CubicSegment]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let curves: String = segments
        .iter()
        .map(|s| {
            format!(
                " C {} {}, {} {}, {} {}",
                s.ctrl1.0, s.ctrl1.1, s.ctrl2.0, s.ctrl2.1, s.to.0, s.to.1
            )
        })
        .collect();
    format!("M {} {}{}", first.x, first.y, curves)
}

fn series_stats(values: &[f64]) -> Option<SeriesStats> {
    if values.is_empty() {
        return None;
    }

    let (min, max) = bounds(values);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(SeriesStats {
        average: round_to(mean, 2),
        min: round_to(min, 2),
        max: round_to(max, 2),
        y_max_label: round_to(max, 1),
        y_mid_label: round_to((max + min) / 2.0, 1),
        y_min_label: round_to(min, 1),
    })
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}
