//! SVG path geometry for the journal chart.
//!
//! Samples are spread evenly across the drawing width; values map linearly onto
//! the drawing height with larger values drawn higher. Three or more samples are
//! joined with a Catmull-Rom spline expressed as cubic Bezier segments, so the
//! curve passes through every sample.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            left: 20.0,
            right: 500.0,
            top: 30.0,
            bottom: 230.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn project(values: &[f64], min_y: f64, max_y: f64, bounds: Bounds) -> Vec<Point> {
    let width = bounds.right - bounds.left;
    let height = bounds.bottom - bounds.top;
    let steps = values.len().saturating_sub(1).max(1) as f64;
    let range = if max_y - min_y == 0.0 { 1.0 } else { max_y - min_y };

    values
        .iter()
        .enumerate()
        .map(|(index, value)| Point {
            x: bounds.left + width * index as f64 / steps,
            y: bounds.bottom - (value - min_y) / range * height,
        })
        .collect()
}

pub fn build_path(values: &[f64], min_y: f64, max_y: f64, bounds: Bounds) -> String {
    let points = project(values, min_y, max_y, bounds);
    let Some(first) = points.first() else {
        return String::new();
    };

    if points.len() < 3 {
        return points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let command = if index == 0 { 'M' } else { 'L' };
                format!("{command} {} {}", fmt2(point.x), fmt2(point.y))
            })
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut path = format!("M {} {}", fmt2(first.x), fmt2(first.y));
    for i in 0..points.len() - 1 {
        let p0 = if i == 0 { points[i] } else { points[i - 1] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let cp1 = Point {
            x: p1.x + (p2.x - p0.x) / 6.0,
            y: p1.y + (p2.y - p0.y) / 6.0,
        };
        let cp2 = Point {
            x: p2.x - (p3.x - p1.x) / 6.0,
            y: p2.y - (p3.y - p1.y) / 6.0,
        };

        let _ = write!(
            path,
            " C {} {}, {} {}, {} {}",
            fmt2(cp1.x),
            fmt2(cp1.y),
            fmt2(cp2.x),
            fmt2(cp2.y),
            fmt2(p2.x),
            fmt2(p2.y)
        );
    }

    path
}

fn fmt2(value: f64) -> String {
    // -0.0 would otherwise print as "-0.00"
    format!("{:.2}", value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(path: &str) -> Vec<char> {
        path.chars().filter(|c| c.is_ascii_alphabetic()).collect()
    }

    #[test]
    fn empty_input_gives_empty_path() {
        assert_eq!(build_path(&[], 0.0, 10.0, Bounds::default()), "");
    }

    #[test]
    fn single_point_is_one_move() {
        let path = build_path(&[5.0], 0.0, 10.0, Bounds::default());
        assert_eq!(path, "M 20.00 130.00");
        assert_eq!(commands(&path), vec!['M']);
    }

    #[test]
    fn two_points_are_a_straight_line() {
        let path = build_path(&[0.0, 10.0], 0.0, 10.0, Bounds::default());
        assert_eq!(path, "M 20.00 230.00 L 500.00 30.00");
    }

    #[test]
    fn flat_series_sits_on_one_level() {
        let path = build_path(&[3.0, 3.0], 3.0, 3.0, Bounds::default());
        assert_eq!(path, "M 20.00 230.00 L 500.00 230.00");
    }

    #[test]
    fn smooth_curve_starts_and_ends_on_the_samples() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let points = project(&values, 0.0, 4.0, Bounds::default());
        let path = build_path(&values, 0.0, 4.0, Bounds::default());

        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!(path.starts_with(&format!("M {} {} C", fmt2(first.x), fmt2(first.y))));
        assert!(path.ends_with(&format!(", {} {}", fmt2(last.x), fmt2(last.y))));
        assert_eq!(commands(&path), vec!['M', 'C', 'C', 'C']);
    }

    #[test]
    fn boundary_segments_clamp_to_the_endpoints() {
        let path = build_path(&[0.0, 10.0, 0.0], 0.0, 10.0, Bounds::default());
        // first control point uses p0 = p1, so it moves a sixth toward p2
        assert_eq!(
            path,
            "M 20.00 230.00 C 60.00 196.67, 180.00 30.00, 260.00 30.00 \
             C 340.00 30.00, 460.00 196.67, 500.00 230.00"
        );
    }
}
