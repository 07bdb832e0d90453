//! Circles and lines.
//!
//! Both draw their shape as soon as they are constructed. Geometry is taken
//! as given: a zero radius or a zero length line is drawn like any other.

use crate::{AsCubicon, Cubicon, CubiconKind, Group, ShapeHandle};
use cubed_core::{Color, Vector2};
use surface::{ElementId, ElementKind};

#[derive(Clone, Debug, PartialEq)]
pub struct CircleOptions {
    /// Center in graph units
    pub position: Vector2,
    /// Radius in graph units
    pub radius: f64,
    /// Stroke color
    pub color: Color,
    /// Interior color, unfilled when `None`
    pub fill_color: Option<Color>,
    pub stroke_width: f64,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            radius: 1.0,
            color: Color::WHITE,
            fill_color: None,
            stroke_width: 2.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Circle {
    cubicon: Cubicon,
    radius: f64,
    color: Color,
    fill_color: Option<Color>,
    stroke_width: f64,
}

impl Circle {
    pub fn new(group: &Group, options: CircleOptions) -> Self {
        let cubicon = Cubicon::with_kind(group, CubiconKind::Circle, options.position);
        let units = group.units();
        let center = units.to_world(options.position);
        let fill = options
            .fill_color
            .map(|color| color.to_css())
            .unwrap_or_else(|| "none".to_string());

        let circle = group.append(group.content_root(), ElementKind::Circle, |e| {
            e.attr("cx", center.x())
                .attr("cy", center.y())
                .attr("r", units.x_to_world(options.radius))
                .style("fill", fill)
                .style("stroke", options.color.to_css())
                .style("stroke-width", options.stroke_width);
        });
        cubicon.set_stroke(ShapeHandle::Circle(circle));

        Self {
            cubicon,
            radius: options.radius,
            color: options.color,
            fill_color: options.fill_color,
            stroke_width: options.stroke_width,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// The `<circle>` element
    pub fn circle_stroke(&self) -> Option<ElementId> {
        self.cubicon.stroke().element()
    }
}

impl AsCubicon for Circle {
    fn cubicon(&self) -> &Cubicon {
        &self.cubicon
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineOptions {
    /// Start in graph units
    pub start_point: Vector2,
    /// End in graph units
    pub end_point: Vector2,
    pub line_width: f64,
    pub color: Color,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            start_point: Vector2::ZERO,
            end_point: Vector2::ZERO,
            line_width: 1.0,
            color: Color::WHITE,
        }
    }
}

/// A straight segment. Its position is the start point.
#[derive(Clone, Debug)]
pub struct Line {
    cubicon: Cubicon,
    start_point: Vector2,
    end_point: Vector2,
    line_width: f64,
    color: Color,
    line: ElementId,
}

impl Line {
    pub fn new(group: &Group, options: LineOptions) -> Self {
        let cubicon = Cubicon::with_kind(group, CubiconKind::Line, options.start_point);
        let units = group.units();
        let start = units.to_world(options.start_point);
        let end = units.to_world(options.end_point);

        let line = group.append(group.content_root(), ElementKind::Line, |e| {
            e.attr("x1", start.x())
                .attr("y1", start.y())
                .attr("x2", end.x())
                .attr("y2", end.y())
                .style("stroke", options.color.to_css())
                .style("stroke-width", options.line_width);
        });
        cubicon.set_stroke(ShapeHandle::Line(line));

        Self {
            cubicon,
            start_point: options.start_point,
            end_point: options.end_point,
            line_width: options.line_width,
            color: options.color,
            line,
        }
    }

    pub fn start_point(&self) -> Vector2 {
        self.start_point
    }

    pub fn end_point(&self) -> Vector2 {
        self.end_point
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The `<line>` element, for further styling
    pub fn line_stroke(&self) -> ElementId {
        self.line
    }
}

impl AsCubicon for Line {
    fn cubicon(&self) -> &Cubicon {
        &self.cubicon
    }
}
