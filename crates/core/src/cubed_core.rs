//! # Core types shared by every cubed crate
//!
//! This crate holds the small pieces of math and configuration that the
//! drawing surface and the cubicon object model both need: the [`Vector2`]
//! position type, conversion between graph units and world (drawing) units,
//! color parsing, and the declarative style configuration.

pub mod color;
pub mod config;
pub mod transform;
pub mod vector;

pub use color::{Color, ColorParseError};
pub use config::{AxesStyle, CanvasConfig, DashPattern, Style};
pub use transform::UnitTransform;
pub use vector::Vector2;
