//! Coordinate axes and function graphs.
//!
//! An [`Axes`] owns two linear scales, one per axis. Each maps its range of
//! graph values onto drawing units by a uniform factor (`x_length` and
//! `y_length`), so the value `a` lands on `a * x_length`.
//!
//! The drawn structure is:
//!
//! ```text
//! g.xy-coordinate  translate(position)
//!   g.axes
//!     g            x axis, flipped
//!     g            y axis, labels flipped back
//!   g.graphs       one path per graph
//! ```
//!
//! Graphs, labels, point markers and guide lines are separate cubicons of
//! the same group, so each can be animated on its own.

use crate::{
    AsCubicon, Circle, CircleOptions, Create, Cubicon, CubiconKind, Group, Line, LineOptions,
    MathText, MathTextOptions, ShapeHandle, TypesetError,
};
use cubed_core::{AxesStyle, Style, Vector2};
use glam::DVec2;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use surface::{natural_curve, Axis, Element, ElementId, ElementKind, LinearScale};

/// A real function drawn by [`Axes::graph`].
pub type GraphFn = Rc<dyn Fn(f64) -> f64>;

/// Distance between two samples of a graph, in graph units.
///
/// A fixed heuristic, not derived from the drawn size of the graph.
pub const SAMPLE_STEP: f64 = 0.01;

/// How far beyond the y range a sample may go before it is dropped, in graph
/// units. Keeps asymptotes from sending the curve far off the canvas; it is a
/// coarse heuristic, not exact clipping.
pub const CLIP_MARGIN: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxesOptions {
    pub position: Vector2,
    pub x_range: [f64; 2],
    /// Drawing units per x unit
    pub x_length: f64,
    pub y_range: [f64; 2],
    /// Drawing units per y unit
    pub y_length: f64,
    /// Whether tick labels are shown
    pub has_nums: bool,
}

impl Default for AxesOptions {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            x_range: [0.0, 0.0],
            x_length: 50.0,
            y_range: [0.0, 0.0],
            y_length: 50.0,
            has_nums: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphOptions {
    /// Sampled domain, the x range of the axes when `None`
    pub x_range: Option<[f64; 2]>,
    /// Stroke color, the graph style color when `None`
    pub color: Option<cubed_core::Color>,
    /// Duration used by [`Axes::create`]
    pub create_duration: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointOptions {
    pub x_pos: f64,
    /// Draw dashed guides from the point to both axes
    pub to_coords: bool,
    /// Animate the marker (and guides) right away
    pub draw: bool,
}

/// Integer tick values of `[lo, hi]`, without zero.
pub fn tick_values([lo, hi]: [f64; 2]) -> Vec<f64> {
    if !(lo <= hi) {
        return Vec::new();
    }
    let (start, end) = (lo.ceil() as i64, hi.floor() as i64);
    (start..=end)
        .filter(|&tick| tick != 0)
        .map(|tick| tick as f64)
        .collect()
}

/// Number of samples taken from `[x0, x1]`, one every [`SAMPLE_STEP`].
///
/// Counted by index so rounding neither drops `x1` nor adds a sample past it.
/// Reversed or non-finite ranges have no samples.
pub fn sample_count(x0: f64, x1: f64) -> usize {
    if !(x0 <= x1) || !x0.is_finite() || !x1.is_finite() {
        return 0;
    }
    let steps = ((x1 - x0) / SAMPLE_STEP).floor();
    let mut count = (steps as usize).saturating_add(1);
    if x0 + (steps + 1.0) * SAMPLE_STEP <= x1 + SAMPLE_STEP * 1e-12 {
        count = count.saturating_add(1);
    }
    count
}

/// A two dimensional coordinate system.
pub struct Axes {
    cubicon: Cubicon,
    options: AxesOptions,
    style: AxesStyle,
    x_scale: LinearScale,
    y_scale: LinearScale,
    functions: Vec<GraphFn>,
    coordinate: ElementId,
    axes: ElementId,
    x_axis: ElementId,
    y_axis: ElementId,
    graphs: ElementId,
}

impl Axes {
    pub fn new(group: &Group, options: AxesOptions) -> Self {
        Self::with_style(group, options, AxesStyle::default())
    }

    pub fn with_style(group: &Group, options: AxesOptions, style: AxesStyle) -> Self {
        let cubicon = Cubicon::with_kind(group, CubiconKind::Axes, options.position);
        let (x_scale, y_scale) = scales(&options);

        let coordinate = group.append(group.content_root(), ElementKind::Group, |e| {
            e.class("xy-coordinate").attr(
                "transform",
                format!("translate({}, {})", options.position.x(), options.position.y()),
            );
        });
        let axes = group.append(coordinate, ElementKind::Group, |e| {
            e.class("axes");
        });
        let graphs = group.append(coordinate, ElementKind::Group, |e| {
            e.class("graphs");
        });

        let mut this = Self {
            cubicon,
            options,
            style,
            x_scale,
            y_scale,
            functions: Vec::new(),
            coordinate,
            axes,
            x_axis: axes,
            y_axis: axes,
            graphs,
        };
        this.draw_axes();

        debug!(
            "axes {}: x {:?} y {:?}",
            this.cubicon.id(),
            this.options.x_range,
            this.options.y_range
        );
        this
    }

    pub fn options(&self) -> &AxesOptions {
        &self.options
    }

    pub fn style(&self) -> &AxesStyle {
        &self.style
    }

    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    pub fn has_nums(&self) -> bool {
        self.options.has_nums
    }

    /// Functions graphed so far, in call order
    pub fn functions(&self) -> &[GraphFn] {
        &self.functions
    }

    /// The `g.xy-coordinate` container
    pub fn coordinate(&self) -> ElementId {
        self.coordinate
    }

    /// The `g.graphs` container
    pub fn graphs_container(&self) -> ElementId {
        self.graphs
    }

    pub fn x_axis(&self) -> ElementId {
        self.x_axis
    }

    pub fn y_axis(&self) -> ElementId {
        self.y_axis
    }

    pub fn set_x_range(&mut self, x_range: [f64; 2]) {
        self.options.x_range = x_range;
        self.rebuild();
    }

    pub fn set_y_range(&mut self, y_range: [f64; 2]) {
        self.options.y_range = y_range;
        self.rebuild();
    }

    pub fn set_x_length(&mut self, x_length: f64) {
        self.options.x_length = x_length;
        self.rebuild();
    }

    pub fn set_y_length(&mut self, y_length: f64) {
        self.options.y_length = y_length;
        self.rebuild();
    }

    pub fn set_has_nums(&mut self, has_nums: bool) {
        self.options.has_nums = has_nums;
        self.rebuild();
    }

    /// Texts of the tick labels currently drawn, x axis first.
    pub fn tick_labels(&self) -> Vec<String> {
        self.group().with_surface(|surface| {
            [self.x_axis, self.y_axis]
                .into_iter()
                .flat_map(|axis| surface.select_all(axis, "tick", ElementKind::Text))
                .filter_map(|id| surface.get(id)?.get_text().map(str::to_string))
                .collect()
        })
    }

    /// Samples `func` and draws it as a smooth curve.
    ///
    /// `func` is evaluated every [`SAMPLE_STEP`] from the lower end of the
    /// x range up to and including the upper end. A sample is kept only when
    /// its y lies strictly within [`CLIP_MARGIN`] of the y range; samples
    /// where `func` is not a number are dropped as well.
    pub fn graph(&mut self, func: GraphFn, options: GraphOptions) -> Graph {
        self.functions.push(func.clone());

        let x_range = options.x_range.unwrap_or(self.options.x_range);
        let points = self.sample(func.as_ref(), x_range);

        // the graph gets its own x scale over its own range
        let x_scale = LinearScale::uniform(x_range, self.options.x_length);
        let scaled: Vec<DVec2> = points
            .iter()
            .map(|p| DVec2::new(x_scale.apply(p.x()), self.y_scale.apply(p.y())))
            .collect();

        let graph_style = Style {
            color: options.color.unwrap_or(self.style.graph.color),
            ..self.style.graph.clone()
        };
        let path = self.group().append(self.graphs, ElementKind::Path, |e| {
            e.style("fill", "none")
                .style("stroke", graph_style.color.to_css())
                .style("stroke-width", graph_style.stroke_width);
            if let Some(dash) = &graph_style.dash_pattern {
                e.style("stroke-dasharray", dash);
            }
            if let Some(d) = natural_curve(&scaled) {
                e.attr("d", d);
            }
        });

        let graph = Graph::new(
            self.group(),
            path,
            func,
            x_range,
            options.create_duration,
            points,
        );
        debug!(
            "graph {} on axes {}: {} samples over {:?}",
            graph.cubicon.id(),
            self.cubicon.id(),
            graph.points.len(),
            x_range
        );
        graph
    }

    /// Animates the creation of `graphs`, all in one batch.
    pub fn create<'a>(&self, graphs: impl IntoIterator<Item = &'a Graph>) {
        let animations: Vec<Create> = graphs
            .into_iter()
            .map(|graph| match graph.create_duration {
                Some(duration) => Create::with_duration(graph, duration),
                None => Create::new(graph),
            })
            .collect();
        self.group().play(animations);
    }

    /// Writes `text` next to `graph` at `x_pos`, the upper end of the graph's
    /// range when `None`.
    pub fn add_graph_label(
        &self,
        graph: &Graph,
        text: &str,
        x_pos: Option<f64>,
    ) -> Result<MathText, TypesetError> {
        let x = x_pos.unwrap_or(graph.x_range[1]);
        MathText::new(
            graph.cubicon.group(),
            MathTextOptions {
                position: self.point_at(graph, x),
                text: text.to_string(),
                color: self.style.label.color,
                font_size: self.style.label.font_size,
            },
        )
    }

    /// Marks the point of `graph` at `options.x_pos`.
    ///
    /// With `to_coords`, dashed guides run from the point to the y axis and
    /// to the x axis. With `draw`, the marker is created in one batch and
    /// the guides in the next. Returns the marker.
    pub fn point_on_graph(&self, graph: &Graph, options: PointOptions) -> Circle {
        let group = graph.cubicon.group();
        let position = self.point_at(graph, options.x_pos);

        let guides = options.to_coords.then(|| {
            let horizontal = self.guide(
                group,
                position,
                Vector2::new(0.0, position.y()),
                &self.style.horizontal_guide,
            );
            let vertical = self.guide(
                group,
                position,
                Vector2::new(position.x(), 0.0),
                &self.style.vertical_guide,
            );
            (horizontal, vertical)
        });

        let marker = Circle::new(
            group,
            CircleOptions {
                position,
                radius: self.style.marker_radius,
                color: self.style.marker.color,
                fill_color: Some(self.style.marker_fill),
                stroke_width: self.style.marker.stroke_width,
            },
        );

        if options.draw {
            group.play([Create::new(&marker)]);
            if let Some((horizontal, vertical)) = &guides {
                group.play([Create::new(horizontal), Create::new(vertical)]);
            }
        }

        marker
    }

    fn guide(&self, group: &Group, start: Vector2, end: Vector2, style: &Style) -> Line {
        let line = Line::new(
            group,
            LineOptions {
                start_point: start,
                end_point: end,
                line_width: style.stroke_width,
                color: style.color,
            },
        );
        group.update(line.line_stroke(), |e| {
            e.style("shape-rendering", "crispEdges");
            if let Some(dash) = &style.dash_pattern {
                e.style("stroke-dasharray", dash);
            }
        });
        line
    }

    /// Graph-unit position of `(x, func(x))` under the scales of these axes.
    fn point_at(&self, graph: &Graph, x: f64) -> Vector2 {
        let units = self.group().units();
        Vector2::new(
            units.x_to_graph(self.x_scale.apply(x)),
            units.y_to_graph(self.y_scale.apply(graph.eval(x))),
        )
    }

    fn sample(&self, func: &dyn Fn(f64) -> f64, [x0, x1]: [f64; 2]) -> Vec<Vector2> {
        let [y_min, y_max] = self.options.y_range;
        let lower = self.y_scale.apply(y_min - CLIP_MARGIN);
        let upper = self.y_scale.apply(y_max + CLIP_MARGIN);

        let count = sample_count(x0, x1);

        let points: Vec<Vector2> = (0..count)
            .map(|i| x0 + i as f64 * SAMPLE_STEP)
            .filter_map(|x| {
                let y = func(x);
                let mapped = self.y_scale.apply(y);
                (lower < mapped && mapped < upper).then(|| Vector2::new(x, y))
            })
            .collect();

        if points.len() < count {
            debug!("dropped {} of {} samples", count - points.len(), count);
        }
        points
    }

    fn rebuild(&mut self) {
        let (x_scale, y_scale) = scales(&self.options);
        self.x_scale = x_scale;
        self.y_scale = y_scale;

        let group = self.cubicon.group().clone();
        group.with_surface_mut(|surface| {
            surface.remove(self.x_axis);
            surface.remove(self.y_axis);
        });
        self.draw_axes();
    }

    fn draw_axes(&mut self) {
        let group = self.cubicon.group().clone();
        let style = &self.style;
        let axis_style = |e: &mut Element| {
            e.attr("stroke-width", style.axis.stroke_width)
                .style("font-size", "inherit")
                .style("color", style.axis.color.to_css())
                .style("stroke", "none");
        };

        let x_axis = group.append(self.axes, ElementKind::Group, |e| {
            e.attr("transform", "scale(1, -1)");
            axis_style(e);
        });
        let y_axis = group.append(self.axes, ElementKind::Group, axis_style);

        let x_generator = Axis::bottom(self.x_scale).tick_values(tick_values(self.options.x_range));
        let y_generator = Axis::right(self.y_scale).tick_values(tick_values(self.options.y_range));
        let tick = style.tick_size;
        let has_nums = self.options.has_nums;

        group.with_surface_mut(|surface| {
            x_generator.render(surface, x_axis);
            let labels = surface.select_all(x_axis, "tick", ElementKind::Text);
            surface.update_all(&labels, |e| {
                e.style("font-family", &style.font_family);
            });
            let lines = surface.select_all(x_axis, "tick", ElementKind::Line);
            surface.update_all(&lines, |e| {
                e.attr("y1", -tick).attr("y2", tick);
            });

            y_generator.render(surface, y_axis);
            let labels = surface.select_all(y_axis, "tick", ElementKind::Text);
            surface.update_all(&labels, |e| {
                e.attr("transform", "scale(1, -1)")
                    .style("font-family", &style.font_family);
            });
            let lines = surface.select_all(y_axis, "tick", ElementKind::Line);
            surface.update_all(&lines, |e| {
                e.attr("x1", -tick).attr("x2", tick);
            });

            // labels are always generated, then stripped
            if !has_nums {
                for axis in [x_axis, y_axis] {
                    let labels = surface.select_all(axis, "tick", ElementKind::Text);
                    surface.remove_all(&labels);
                }
            }
        });

        self.x_axis = x_axis;
        self.y_axis = y_axis;
    }

    fn group(&self) -> &Group {
        self.cubicon.group()
    }
}

impl AsCubicon for Axes {
    fn cubicon(&self) -> &Cubicon {
        &self.cubicon
    }
}

impl fmt::Debug for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axes")
            .field("cubicon", &self.cubicon)
            .field("options", &self.options)
            .field("functions", &self.functions.len())
            .finish()
    }
}

fn scales(options: &AxesOptions) -> (LinearScale, LinearScale) {
    (
        LinearScale::uniform(options.x_range, options.x_length),
        LinearScale::uniform(options.y_range, options.y_length),
    )
}

/// A function drawn on an [`Axes`].
///
/// Its stroke is the curve path. Whether it has been created is tracked by
/// the group's timeline ([`Group::is_created`]).
#[derive(Clone)]
pub struct Graph {
    cubicon: Cubicon,
    func: GraphFn,
    x_range: [f64; 2],
    create_duration: Option<f64>,
    points: Vec<Vector2>,
}

impl Graph {
    fn new(
        group: &Group,
        path: ElementId,
        func: GraphFn,
        x_range: [f64; 2],
        create_duration: Option<f64>,
        points: Vec<Vector2>,
    ) -> Self {
        let cubicon = Cubicon::with_kind(group, CubiconKind::Graph, Vector2::ZERO);
        cubicon.set_stroke(ShapeHandle::Path(path));
        Self {
            cubicon,
            func,
            x_range,
            create_duration,
            points,
        }
    }

    pub fn func(&self) -> &GraphFn {
        &self.func
    }

    /// Evaluates the graphed function at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    pub fn x_range(&self) -> [f64; 2] {
        self.x_range
    }

    pub fn create_duration(&self) -> Option<f64> {
        self.create_duration
    }

    /// Retained samples in graph units, before scaling
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// The curve `<path>` element
    pub fn path(&self) -> Option<ElementId> {
        self.cubicon.stroke().element()
    }
}

impl AsCubicon for Graph {
    fn cubicon(&self) -> &Cubicon {
        &self.cubicon
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("cubicon", &self.cubicon)
            .field("x_range", &self.x_range)
            .field("create_duration", &self.create_duration)
            .field("points", &self.points.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_values() {
        assert_eq!(tick_values([-2.0, 2.0]), vec![-2.0, -1.0, 1.0, 2.0]);
        assert_eq!(tick_values([0.0, 3.0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(tick_values([-1.5, 1.5]), vec![-1.0, 1.0]);
        assert!(tick_values([0.0, 0.0]).is_empty());
        assert!(tick_values([3.0, -3.0]).is_empty());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: AxesOptions =
            serde_json::from_str(r#"{ "xRange": [-5, 5], "hasNums": true }"#).unwrap();

        assert_eq!(options.x_range, [-5.0, 5.0]);
        assert_eq!(options.y_range, [0.0, 0.0]);
        assert_eq!(options.x_length, 50.0);
        assert!(options.has_nums);
        assert_eq!(options.position, Vector2::ZERO);
    }
}
