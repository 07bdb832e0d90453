//! Two dimensional vector used for positions and displacements.
//!
//! Positions of cubicons are expressed in graph units (see
//! [`UnitTransform`](crate::UnitTransform) for the conversion to drawing units).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable `(x, y)` pair of real numbers.
///
/// Serialized as a two element array, `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2(pub DVec2);

impl Vector2 {
    pub const ZERO: Self = Self(DVec2::ZERO);

    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn length(&self) -> f64 {
        self.0.length()
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        v.0
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Self::Output {
        Vector2(self.0 + other.0)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Self::Output {
        Vector2(self.0 - other.0)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Self::Output {
        Vector2(-self.0)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, scale: f64) -> Self::Output {
        Vector2(self.0 * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -1.0);

        assert_eq!(a + b, Vector2::new(4.0, 1.0));
        assert_eq!(a - b, Vector2::new(-2.0, 3.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(Vector2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_vector_serializes_as_pair() {
        let v = Vector2::new(1.5, -2.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.5,-2.0]");

        let back: Vector2 = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(back, Vector2::new(3.0, 4.0));
    }
}
