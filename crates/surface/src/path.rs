//! Path data generation.
//!
//! [`PathBuilder`] writes SVG path data the way `d3-path` does, and
//! [`natural_curve`] fits a natural cubic spline through a point sequence,
//! producing the same commands as `d3.line().curve(d3.curveNatural)`.

use glam::DVec2;
use std::fmt::Write;

/// Accumulates SVG path commands.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let _ = write!(self.data, "M{x},{y}");
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let _ = write!(self.data, "L{x},{y}");
        self
    }

    /// Horizontal line to `x`, keeping the current y
    pub fn horizontal_to(&mut self, x: f64) -> &mut Self {
        let _ = write!(self.data, "H{x}");
        self
    }

    /// Vertical line to `y`, keeping the current x
    pub fn vertical_to(&mut self, y: f64) -> &mut Self {
        let _ = write!(self.data, "V{y}");
        self
    }

    /// Cubic Bézier from the current point, with control points `(x1, y1)`
    /// and `(x2, y2)`, ending at `(x, y)`.
    pub fn bezier_curve_to(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    ) -> &mut Self {
        let _ = write!(self.data, "C{x1},{y1},{x2},{y2},{x},{y}");
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.data.push('Z');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn finish(self) -> String {
        self.data
    }
}

/// Interpolates `points` with a natural cubic spline and returns the path data.
///
/// - no points: `None`
/// - one point: a closed move, `M x,y Z`
/// - two points: a straight segment
/// - three or more: one cubic Bézier per consecutive pair, with control points
///   chosen so the curve has continuous first and second derivatives and zero
///   second derivative at both ends
pub fn natural_curve(points: &[DVec2]) -> Option<String> {
    let first = points.first()?;
    let mut path = PathBuilder::new();
    path.move_to(first.x, first.y);

    match points.len() {
        1 => {
            path.close_path();
        }
        2 => {
            path.line_to(points[1].x, points[1].y);
        }
        _ => {
            let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
            let (ax, bx) = control_points(&xs);
            let (ay, by) = control_points(&ys);

            for i in 0..points.len() - 1 {
                let end = points[i + 1];
                path.bezier_curve_to(ax[i], ay[i], bx[i], by[i], end.x, end.y);
            }
        }
    }

    Some(path.finish())
}

/// Solves the tridiagonal system for the Bézier control points of a natural
/// spline along one coordinate. Needs at least three values.
///
/// Returns `(first, second)` control point coordinates for each of the
/// `values.len() - 1` segments.
fn control_points(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = values.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = values[0] + 2.0 * values[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * values[i] + 2.0 * values[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * values[n - 1] + values[n];

    // forward elimination
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    // back substitution; `a` is reused for the first control points
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }

    // second control points
    b[n - 1] = (values[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * values[i + 1] - a[i + 1];
    }

    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder() {
        let mut path = PathBuilder::new();
        assert!(path.is_empty());
        path.move_to(0.0, 1.5)
            .line_to(2.0, -3.0)
            .bezier_curve_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .close_path();
        assert_eq!(path.finish(), "M0,1.5L2,-3C1,2,3,4,5,6Z");
    }

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(natural_curve(&[]), None);
        assert_eq!(
            natural_curve(&[DVec2::new(1.0, 2.0)]).as_deref(),
            Some("M1,2Z")
        );
    }

    #[test]
    fn test_two_points_draw_a_line() {
        let d = natural_curve(&[DVec2::new(0.0, 0.0), DVec2::new(10.0, 5.0)]);
        assert_eq!(d.as_deref(), Some("M0,0L10,5"));
    }

    #[test]
    fn test_collinear_points_stay_on_the_line() {
        // A natural spline through collinear, evenly spaced points is the line
        // itself, with control points at the segment thirds.
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 3.0),
            DVec2::new(6.0, 6.0),
        ];
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let (a, b) = control_points(&xs);

        let expected_a = [1.0, 4.0];
        let expected_b = [2.0, 5.0];
        for i in 0..2 {
            assert!((a[i] - expected_a[i]).abs() < 1e-12);
            assert!((b[i] - expected_b[i]).abs() < 1e-12);
        }

        let d = natural_curve(&points).unwrap();
        assert!(d.starts_with("M0,0C"));
        assert_eq!(d.matches('C').count(), 2);
        assert!(d.ends_with(",6,6"));
    }
}
