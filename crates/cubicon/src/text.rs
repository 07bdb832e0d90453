//! Typeset math text.

use crate::{AsCubicon, Cubicon, CubiconKind, Group, ShapeHandle};
use cubed_core::{Color, Vector2};
use log::debug;
use std::fmt;
use surface::{ElementId, ElementKind};

/// Error returned when a math expression cannot be typeset.
#[derive(Debug, Clone, PartialEq)]
pub enum TypesetError {
    InvalidSyntax { text: String, message: String },
}

impl fmt::Display for TypesetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypesetError::InvalidSyntax { text, message } => {
                write!(f, "Invalid math syntax in {:?}: {}", text, message)
            }
        }
    }
}

impl std::error::Error for TypesetError {}

/// Renders a math expression to markup.
pub trait Typesetter {
    fn render(&self, text: &str) -> Result<String, TypesetError>;
}

/// Typesets LaTeX math to inline MathML.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathMlTypesetter;

/// latex2mathml reports most syntax errors inline as an `mtext` node.
const PARSE_ERROR_MARKER: &str = "[PARSE ERROR: ";

impl Typesetter for MathMlTypesetter {
    fn render(&self, text: &str) -> Result<String, TypesetError> {
        let invalid = |message: String| TypesetError::InvalidSyntax {
            text: text.to_string(),
            message,
        };

        let markup = latex2mathml::latex_to_mathml(text, latex2mathml::DisplayStyle::Inline)
            .map_err(|err| invalid(err.to_string()))?;

        match embedded_parse_error(&markup) {
            Some(message) => Err(invalid(message.to_string())),
            None => Ok(markup),
        }
    }
}

fn embedded_parse_error(markup: &str) -> Option<&str> {
    let start = markup.find(PARSE_ERROR_MARKER)? + PARSE_ERROR_MARKER.len();
    let rest = &markup[start..];
    let end = rest.find("]</mtext>").unwrap_or(rest.len());
    Some(&rest[..end])
}

#[derive(Clone, Debug, PartialEq)]
pub struct MathTextOptions {
    /// Position in graph units
    pub position: Vector2,
    pub text: String,
    pub color: Color,
    /// Font size in points
    pub font_size: f64,
}

impl Default for MathTextOptions {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            text: String::new(),
            color: Color::WHITE,
            font_size: 13.0,
        }
    }
}

/// A typeset math expression.
///
/// The markup lives in an XHTML element inside a `foreignObject` as large as
/// the canvas. The `foreignObject` flips y back so the text reads upright.
#[derive(Clone, Debug)]
pub struct MathText {
    cubicon: Cubicon,
    text: String,
    color: Color,
    font_size: f64,
    container: ElementId,
}

impl MathText {
    /// Typesets `options.text` and places it at `options.position`.
    ///
    /// Typesetting happens first: on failure nothing is registered or drawn.
    pub fn new(group: &Group, options: MathTextOptions) -> Result<Self, TypesetError> {
        let markup = group.typesetter().render(&options.text)?;

        let cubicon = Cubicon::with_kind(group, CubiconKind::Text, options.position);
        let config = group.config();
        let units = config.units();

        let container = group.append(group.content_root(), ElementKind::ForeignObject, |e| {
            e.attr("x", units.x_to_world(options.position.x()))
                .attr("y", -units.y_to_world(options.position.y()))
                .attr("width", config.width)
                .attr("height", config.height)
                .attr("transform", "scale(1, -1)");
        });
        let text = group.append(container, ElementKind::Div, |e| {
            e.attr("xmlns", "http://www.w3.org/1999/xhtml")
                .style("font-size", format!("{}pt", options.font_size))
                .style("color", options.color.to_css())
                .inner_markup(markup);
        });
        cubicon.set_stroke(ShapeHandle::Text(text));

        debug!("typeset {:?} as text {}", options.text, cubicon.id());

        Ok(Self {
            cubicon,
            text: options.text,
            color: options.color,
            font_size: options.font_size,
            container,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// The `foreignObject` holding the text
    pub fn container(&self) -> ElementId {
        self.container
    }
}

impl AsCubicon for MathText {
    fn cubicon(&self) -> &Cubicon {
        &self.cubicon
    }
}
