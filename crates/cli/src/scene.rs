//! Scene descriptions read by `cubed render`.
//!
//! A scene is one set of axes and the graphs drawn on it:
//!
//! ```json
//! {
//!   "canvas": { "width": 800, "height": 600 },
//!   "axes": { "xRange": [-5, 5], "yRange": [-3, 3], "hasNums": true },
//!   "graphs": [
//!     { "function": "square", "xRange": [-2, 2], "label": "x^2", "create": true,
//!       "points": [{ "x": 1, "toCoords": true, "draw": true }] }
//!   ]
//! }
//! ```

use cubed_core::{AxesStyle, CanvasConfig, Color};
use cubicon::{
    Axes, AxesOptions, Graph, GraphFn, GraphOptions, Group, PointOptions, TypesetError,
};
use serde::Deserialize;
use std::rc::Rc;

/// Functions a scene can graph by name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinFn {
    Identity,
    Square,
    Cube,
    Sqrt,
    Abs,
    Reciprocal,
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
}

impl BuiltinFn {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            BuiltinFn::Identity => x,
            BuiltinFn::Square => x * x,
            BuiltinFn::Cube => x * x * x,
            BuiltinFn::Sqrt => x.sqrt(),
            BuiltinFn::Abs => x.abs(),
            BuiltinFn::Reciprocal => 1.0 / x,
            BuiltinFn::Exp => x.exp(),
            BuiltinFn::Ln => x.ln(),
            BuiltinFn::Sin => x.sin(),
            BuiltinFn::Cos => x.cos(),
            BuiltinFn::Tan => x.tan(),
        }
    }

    /// The formula in LaTeX, used as the default label
    pub fn latex(self) -> &'static str {
        match self {
            BuiltinFn::Identity => "x",
            BuiltinFn::Square => "x^2",
            BuiltinFn::Cube => "x^3",
            BuiltinFn::Sqrt => "\\sqrt{x}",
            BuiltinFn::Abs => "|x|",
            BuiltinFn::Reciprocal => "\\frac{1}{x}",
            BuiltinFn::Exp => "e^x",
            BuiltinFn::Ln => "\\ln x",
            BuiltinFn::Sin => "\\sin x",
            BuiltinFn::Cos => "\\cos x",
            BuiltinFn::Tan => "\\tan x",
        }
    }

    pub fn graph_fn(self) -> GraphFn {
        Rc::new(move |x| self.eval(x))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointSpec {
    pub x: f64,
    pub to_coords: bool,
    pub draw: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    pub function: BuiltinFn,
    #[serde(default)]
    pub x_range: Option<[f64; 2]>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub create_duration: Option<f64>,
    /// Create the graph along with the others marked `create`
    #[serde(default)]
    pub create: bool,
    /// Label text; `"auto"` uses the function's formula
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub label_x: Option<f64>,
    #[serde(default)]
    pub points: Vec<PointSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub canvas: CanvasConfig,
    pub axes: AxesOptions,
    pub style: AxesStyle,
    pub graphs: Vec<GraphSpec>,
}

/// A built scene.
pub struct Scene {
    pub group: Group,
    pub axes: Axes,
    pub graphs: Vec<Graph>,
}

impl SceneConfig {
    /// The parabola scene rendered by `cubed demo`.
    pub fn demo() -> Self {
        Self {
            canvas: CanvasConfig {
                width: 800.0,
                height: 600.0,
                ..Default::default()
            },
            axes: AxesOptions {
                x_range: [-5.0, 5.0],
                y_range: [-3.0, 3.0],
                has_nums: true,
                ..Default::default()
            },
            style: AxesStyle::default(),
            graphs: vec![GraphSpec {
                function: BuiltinFn::Square,
                x_range: Some([-2.0, 2.0]),
                color: None,
                create_duration: Some(2.0),
                create: true,
                label: Some("auto".to_string()),
                label_x: None,
                points: vec![PointSpec {
                    x: 1.0,
                    to_coords: true,
                    draw: true,
                }],
            }],
        }
    }

    /// Draws the scene onto a new group.
    ///
    /// Graphs are drawn in order; those marked `create` are created in one
    /// batch, before any point is drawn.
    pub fn build(&self) -> Result<Scene, TypesetError> {
        let group = Group::new(self.canvas);
        self.build_with(group)
    }

    pub fn build_with(&self, group: Group) -> Result<Scene, TypesetError> {
        let mut axes = Axes::with_style(&group, self.axes.clone(), self.style.clone());

        let graphs: Vec<Graph> = self
            .graphs
            .iter()
            .map(|spec| {
                axes.graph(
                    spec.function.graph_fn(),
                    GraphOptions {
                        x_range: spec.x_range,
                        color: spec.color,
                        create_duration: spec.create_duration,
                    },
                )
            })
            .collect();
        log::info!("drew {} graph(s)", graphs.len());

        let to_create: Vec<&Graph> = graphs
            .iter()
            .zip(&self.graphs)
            .filter(|(_, spec)| spec.create)
            .map(|(graph, _)| graph)
            .collect();
        if !to_create.is_empty() {
            axes.create(to_create);
        }

        for (graph, spec) in graphs.iter().zip(&self.graphs) {
            if let Some(label) = &spec.label {
                let text = if label == "auto" {
                    spec.function.latex()
                } else {
                    label.as_str()
                };
                axes.add_graph_label(graph, text, spec.label_x)?;
            }
            for point in &spec.points {
                axes.point_on_graph(
                    graph,
                    PointOptions {
                        x_pos: point.x,
                        to_coords: point.to_coords,
                        draw: point.draw,
                    },
                );
            }
        }

        Ok(Scene {
            group,
            axes,
            graphs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_builtin_names() {
        assert_eq!(BuiltinFn::from_str("square").unwrap(), BuiltinFn::Square);
        assert_eq!(BuiltinFn::Reciprocal.to_string(), "reciprocal");
        assert!(BuiltinFn::from_str("gamma").is_err());
        assert_eq!(BuiltinFn::iter().count(), 11);
    }

    #[test]
    fn test_builtin_eval() {
        assert_eq!(BuiltinFn::Square.eval(3.0), 9.0);
        assert_eq!(BuiltinFn::Cube.eval(-2.0), -8.0);
        assert_eq!(BuiltinFn::Abs.eval(-1.5), 1.5);
        assert!(BuiltinFn::Ln.eval(-1.0).is_nan());
        assert_eq!((BuiltinFn::Identity.graph_fn())(4.0), 4.0);
    }

    #[test]
    fn test_parse_scene() {
        let json = r##"{
            "canvas": { "width": 400, "height": 300, "background": "#101010" },
            "axes": { "xRange": [-4, 4], "yRange": [-2, 2], "hasNums": true },
            "graphs": [
                { "function": "sin", "color": "tomato", "create": true },
                { "function": "square", "xRange": [-1, 1], "label": "y = x^2",
                  "points": [{ "x": 0.5, "toCoords": true }] }
            ]
        }"##;

        let scene: SceneConfig = serde_json::from_str(json).unwrap();

        assert_eq!(scene.canvas.width, 400.0);
        assert_eq!(scene.canvas.unit, 50.0);
        assert_eq!(scene.canvas.background, Some(Color::rgb(16, 16, 16)));
        assert_eq!(scene.axes.x_range, [-4.0, 4.0]);
        assert_eq!(scene.graphs.len(), 2);
        assert_eq!(scene.graphs[0].function, BuiltinFn::Sin);
        assert_eq!(scene.graphs[0].color, Some(Color::rgb(255, 99, 71)));
        assert!(scene.graphs[0].create);
        assert_eq!(scene.graphs[1].label.as_deref(), Some("y = x^2"));
        assert_eq!(
            scene.graphs[1].points,
            vec![PointSpec {
                x: 0.5,
                to_coords: true,
                draw: false,
            }]
        );
        assert_eq!(scene.style, AxesStyle::default());
    }

    #[test]
    fn test_build_demo() {
        let scene = SceneConfig::demo().build().unwrap();

        assert_eq!(scene.graphs.len(), 1);
        assert_eq!(scene.axes.functions().len(), 1);
        assert_eq!(scene.graphs[0].points().len(), 399);

        // graph creation, then the marker, then both guides
        let timeline = scene.group.timeline();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.batches()[0].duration, 2.0);
        assert!(scene.group.is_created(&scene.graphs[0]));

        // axes, graph, label, two guides and the marker
        assert_eq!(scene.group.len(), 6);

        let svg = scene.group.to_svg();
        assert!(svg.contains("<foreignObject"));
        assert!(svg.contains("stroke-dasharray: 5"));
        assert!(svg.contains("stroke-dasharray: 7"));
    }
}
