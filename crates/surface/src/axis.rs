//! Axis rendering in the layout of `d3-axis`.
//!
//! An axis draws into a container element:
//!
//! ```text
//! <g fill="none" font-size="10" font-family="sans-serif" text-anchor="middle">
//!   <path class="domain" stroke="currentColor" d="..."/>
//!   <g class="tick" opacity="1" transform="translate(50,0)">
//!     <line stroke="currentColor" y2="6"/>
//!     <text fill="currentColor" y="9" dy="0.71em">1</text>
//!   </g>
//!   ...
//! </g>
//! ```
//!
//! Tick positions come from a [`LinearScale`]; the caller chooses the values.

use crate::{ElementId, ElementKind, LinearScale, PathBuilder, Surface};

/// Side of the axis line the ticks and labels are drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Right,
    Bottom,
}

/// Formats a tick value, using a typographic minus for negatives.
pub fn format_tick(value: f64) -> String {
    if value < 0.0 {
        format!("\u{2212}{}", -value)
    } else {
        format!("{}", value)
    }
}

/// An axis generator.
#[derive(Clone, Debug)]
pub struct Axis {
    orient: Orient,
    scale: LinearScale,
    tick_values: Vec<f64>,
    tick_size_inner: f64,
    tick_size_outer: f64,
    tick_padding: f64,
}

impl Axis {
    pub fn new(orient: Orient, scale: LinearScale) -> Self {
        Self {
            orient,
            scale,
            tick_values: Vec::new(),
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
        }
    }

    pub fn bottom(scale: LinearScale) -> Self {
        Self::new(Orient::Bottom, scale)
    }

    pub fn right(scale: LinearScale) -> Self {
        Self::new(Orient::Right, scale)
    }

    pub fn tick_values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.tick_values = values.into_iter().collect();
        self
    }

    /// Draws the axis into `container` and returns the created tick groups.
    pub fn render(&self, surface: &mut Surface, container: ElementId) -> Vec<ElementId> {
        let horizontal = self.orient == Orient::Bottom;
        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        let [range0, range1] = self.scale.range();
        let outer = self.tick_size_outer;

        let text_anchor = match self.orient {
            Orient::Right => "start",
            Orient::Bottom => "middle",
        };
        surface.update(container, |e| {
            e.attr("fill", "none")
                .attr("font-size", 10)
                .attr("font-family", "sans-serif")
                .attr("text-anchor", text_anchor);
        });

        let mut domain = PathBuilder::new();
        if horizontal {
            domain
                .move_to(range0, outer)
                .vertical_to(0.0)
                .horizontal_to(range1)
                .vertical_to(outer);
        } else {
            domain
                .move_to(outer, range0)
                .horizontal_to(0.0)
                .vertical_to(range1)
                .horizontal_to(outer);
        }
        let path = surface.append(container, ElementKind::Path);
        let domain = domain.finish();
        surface.update(path, |e| {
            e.class("domain")
                .attr("stroke", "currentColor")
                .attr("d", domain);
        });

        let mut ticks = Vec::with_capacity(self.tick_values.len());
        for &value in &self.tick_values {
            let position = self.scale.apply(value);
            let tick = surface.append(container, ElementKind::Group);
            surface.update(tick, |e| {
                let transform = if horizontal {
                    format!("translate({position},0)")
                } else {
                    format!("translate(0,{position})")
                };
                e.class("tick").attr("opacity", 1).attr("transform", transform);
            });

            let line = surface.append(tick, ElementKind::Line);
            surface.update(line, |e| {
                e.attr("stroke", "currentColor")
                    .attr(if horizontal { "y2" } else { "x2" }, self.tick_size_inner);
            });

            let text = surface.append(tick, ElementKind::Text);
            let dy = match self.orient {
                Orient::Bottom => "0.71em",
                Orient::Right => "0.32em",
            };
            surface.update(text, |e| {
                e.attr("fill", "currentColor")
                    .attr(if horizontal { "y" } else { "x" }, spacing)
                    .attr("dy", dy)
                    .text(format_tick(value));
            });

            ticks.push(tick);
        }

        ticks
    }
}
