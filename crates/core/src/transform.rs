//! Conversion between graph units and world units.
//!
//! Cubicons are positioned in graph units; the surface is drawn in world
//! units (pixels of the SVG user space). The conversion is a uniform scale,
//! with no translation, rotation or skew: the canvas origin sits at the
//! center of the view box and the y axis is flipped once at the group root.

use crate::Vector2;

/// Uniform scale between graph units and world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitTransform {
    /// World units per graph unit
    pub unit: f64,
}

impl UnitTransform {
    pub fn new(unit: f64) -> Self {
        Self { unit }
    }

    /// Graph x coordinate to world x coordinate
    pub fn x_to_world(&self, x: f64) -> f64 {
        x * self.unit
    }

    /// Graph y coordinate to world y coordinate
    pub fn y_to_world(&self, y: f64) -> f64 {
        y * self.unit
    }

    /// World x coordinate to graph x coordinate
    pub fn x_to_graph(&self, x: f64) -> f64 {
        x / self.unit
    }

    /// World y coordinate to graph y coordinate
    pub fn y_to_graph(&self, y: f64) -> f64 {
        y / self.unit
    }

    pub fn to_world(&self, point: Vector2) -> Vector2 {
        Vector2::new(self.x_to_world(point.x()), self.y_to_world(point.y()))
    }

    pub fn to_graph(&self, point: Vector2) -> Vector2 {
        Vector2::new(self.x_to_graph(point.x()), self.y_to_graph(point.y()))
    }
}

impl Default for UnitTransform {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unit() {
        let units = UnitTransform::default();
        assert_eq!(units.x_to_world(2.0), 100.0);
        assert_eq!(units.y_to_world(-1.0), -50.0);
    }

    #[test]
    fn test_round_trip() {
        let units = UnitTransform::new(40.0);
        let point = Vector2::new(1.25, -3.5);

        let world = units.to_world(point);
        assert_eq!(world, Vector2::new(50.0, -140.0));
        assert_eq!(units.to_graph(world), point);
    }

    #[test]
    fn test_scalar_inverse() {
        let units = UnitTransform::new(50.0);
        assert_eq!(units.x_to_graph(units.x_to_world(1.5)), 1.5);
        assert_eq!(units.y_to_graph(125.0), 2.5);
    }
}
