//! Declarative styling and canvas configuration.
//!
//! Every drawable takes its colors, font sizes, stroke widths and dash
//! patterns from these structures instead of hard-coding them. All fields
//! have defaults, so a configuration file only needs to name what it changes:
//!
//! ```json
//! { "width": 800, "height": 600, "unit": 40 }
//! ```

use crate::{Color, UnitTransform};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// World units per graph unit unless configured otherwise.
pub const DEFAULT_UNIT: f64 = 50.0;

/// Size of the drawing surface and the graph unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Width of the view box in world units
    pub width: f64,
    /// Height of the view box in world units
    pub height: f64,
    /// World units per graph unit
    pub unit: f64,
    /// Optional background fill for the whole canvas
    pub background: Option<Color>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            unit: DEFAULT_UNIT,
            background: None,
        }
    }
}

impl CanvasConfig {
    pub fn units(&self) -> UnitTransform {
        UnitTransform::new(self.unit)
    }
}

/// A stroke dash pattern, written as the value of `stroke-dasharray`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashPattern(pub SmallVec<[f64; 4]>);

impl DashPattern {
    /// A pattern of equal dashes and gaps.
    pub fn uniform(length: f64) -> Self {
        Self(SmallVec::from_slice(&[length]))
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, length) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", length)?;
        }
        Ok(())
    }
}

/// Styling options recognized by every drawable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub color: Color,
    /// Font size in points
    pub font_size: f64,
    pub stroke_width: f64,
    pub dash_pattern: Option<DashPattern>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font_size: 13.0,
            stroke_width: 1.0,
            dash_pattern: None,
        }
    }
}

impl Style {
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash_pattern = Some(dash);
        self
    }
}

/// Styling of an axes composite and everything it derives (graphs, labels,
/// point markers and guide lines).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxesStyle {
    /// Axis lines and tick labels
    pub axis: Style,
    /// Font family of tick labels
    pub font_family: String,
    /// Half length of a tick mark, in world units
    pub tick_size: f64,
    /// Default stroke of function graphs
    pub graph: Style,
    /// Graph labels
    pub label: Style,
    /// Outline of point markers
    pub marker: Style,
    pub marker_fill: Color,
    /// Marker radius in graph units
    pub marker_radius: f64,
    /// Guide from a point to the y axis
    pub horizontal_guide: Style,
    /// Guide from a point to the x axis
    pub vertical_guide: Style,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            axis: Style::default(),
            font_family: "KaTeX_Main".to_string(),
            tick_size: 5.0,
            graph: Style::default(),
            label: Style::default(),
            marker: Style::default().with_stroke_width(1.5),
            marker_fill: Color::BLACK,
            marker_radius: 0.06,
            horizontal_guide: Style::default().with_dash(DashPattern::uniform(5.0)),
            vertical_guide: Style::default().with_dash(DashPattern::uniform(7.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = AxesStyle::default();
        assert_eq!(style.label.font_size, 13.0);
        assert_eq!(style.marker.stroke_width, 1.5);
        assert_eq!(style.marker_fill, Color::BLACK);
        assert_eq!(style.horizontal_guide.dash_pattern.unwrap().to_string(), "5");
        assert_eq!(style.vertical_guide.dash_pattern.unwrap().to_string(), "7");
    }

    #[test]
    fn test_partial_canvas_config() {
        let config: CanvasConfig = serde_json::from_str(r#"{ "unit": 40 }"#).unwrap();
        assert_eq!(config.unit, 40.0);
        assert_eq!(config.width, 1280.0);
        assert_eq!(config.units().x_to_world(2.0), 80.0);
    }

    #[test]
    fn test_partial_style_config() {
        let style: AxesStyle = serde_json::from_str(
            r##"{
                "graph": { "color": "#ff0000", "strokeWidth": 2 },
                "verticalGuide": { "dashPattern": [4, 2] }
            }"##,
        )
        .unwrap();

        assert_eq!(style.graph.color, Color::rgb(255, 0, 0));
        assert_eq!(style.graph.stroke_width, 2.0);
        assert_eq!(style.vertical_guide.dash_pattern.unwrap().to_string(), "4,2");
        assert_eq!(style.font_family, "KaTeX_Main");
    }
}
