//! # Cubicons
//!
//! A cubicon is anything that can be drawn onto a [`Group`] and animated by
//! it: circles, lines, typeset math, axes and function graphs.
//!
//! ## Key Concepts
//!
//! - **Registration**: every cubicon is registered with exactly one group when
//!   it is constructed, and stays there. The group owns the cubicon's
//!   transform state; a [`Cubicon`] is a handle (`id` + group) into it.
//! - **Transform state**: position, the accumulated move vector, the angle
//!   and accumulated move angle, and the elapsed animation time.
//! - **Stroke**: the main shape a cubicon drew, as a [`ShapeHandle`].
//! - **Playback**: composites request [`Create`] animations through
//!   [`Group::play`]; the group records them on its [`Timeline`].

pub mod animation;
pub mod axes;
pub mod geometry;
pub mod group;
pub mod shape;
pub mod text;

#[cfg(test)]
mod axes_test;

pub use animation::{Animation, Create, PlayBatch, Timeline, DEFAULT_CREATE_DURATION};
pub use axes::{Axes, AxesOptions, Graph, GraphFn, GraphOptions, PointOptions};
pub use geometry::{Circle, CircleOptions, Line, LineOptions};
pub use group::Group;
pub use shape::ShapeHandle;
pub use text::{MathMlTypesetter, MathText, MathTextOptions, TypesetError, Typesetter};

use cubed_core::Vector2;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

slotmap::new_key_type! {
    /// Identifies a cubicon within its [`Group`].
    pub struct CubiconId;
}

impl CubiconId {
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl Display for CubiconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

impl Serialize for CubiconId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_u64())
    }
}

/// What kind of drawable a cubicon is. Used for logging and inspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CubiconKind {
    #[default]
    Plain,
    Circle,
    Line,
    Text,
    Axes,
    Graph,
}

/// Transform and animation state of a registered cubicon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CubiconState {
    pub kind: CubiconKind,
    pub position: Vector2,
    /// Total displacement applied by animations
    pub move_vector: Vector2,
    /// Angle between the cubicon and the x axis
    pub angle: f64,
    pub move_angle: f64,
    /// Time spent in animations, in seconds
    pub elapsed_time: f64,
    pub stroke: ShapeHandle,
}

impl CubiconState {
    pub fn new(kind: CubiconKind, position: Vector2) -> Self {
        Self {
            kind,
            position,
            ..Default::default()
        }
    }
}

/// Handle to a cubicon registered with a [`Group`].
#[derive(Clone)]
pub struct Cubicon {
    id: CubiconId,
    group: Group,
}

impl Cubicon {
    /// Registers a new cubicon with `group`, at `position` (graph units),
    /// with neutral transform state and no stroke.
    pub fn new(group: &Group, position: Vector2) -> Self {
        Self::with_kind(group, CubiconKind::Plain, position)
    }

    pub(crate) fn with_kind(group: &Group, kind: CubiconKind, position: Vector2) -> Self {
        let id = group.add(CubiconState::new(kind, position));
        Self {
            id,
            group: group.clone(),
        }
    }

    pub fn id(&self) -> CubiconId {
        self.id
    }

    /// The group this cubicon is registered with
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// A copy of the current state
    pub fn state(&self) -> CubiconState {
        self.group.cubicon_state(self.id).unwrap_or_default()
    }

    pub fn kind(&self) -> CubiconKind {
        self.state().kind
    }

    pub fn position(&self) -> Vector2 {
        self.state().position
    }

    pub fn move_vector(&self) -> Vector2 {
        self.state().move_vector
    }

    pub fn angle(&self) -> f64 {
        self.state().angle
    }

    pub fn move_angle(&self) -> f64 {
        self.state().move_angle
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state().elapsed_time
    }

    pub fn stroke(&self) -> ShapeHandle {
        self.state().stroke
    }

    /// Moves the cubicon by `delta`, accumulating it into the move vector.
    pub fn translate(&self, delta: Vector2) {
        self.group.update_cubicon(self.id, |state| {
            state.position = state.position + delta;
            state.move_vector = state.move_vector + delta;
        });
    }

    /// Rotates the cubicon by `angle` radians.
    pub fn rotate(&self, angle: f64) {
        self.group.update_cubicon(self.id, |state| {
            state.angle += angle;
            state.move_angle += angle;
        });
    }

    /// Advances the animation clock by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.group.update_cubicon(self.id, |state| {
            state.elapsed_time += dt;
        });
    }

    pub fn set_stroke(&self, stroke: ShapeHandle) {
        self.group.update_cubicon(self.id, |state| {
            state.stroke = stroke;
        });
    }
}

impl fmt::Debug for Cubicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cubicon")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}

/// Implemented by every drawable built on a [`Cubicon`].
pub trait AsCubicon {
    fn cubicon(&self) -> &Cubicon;
}

impl AsCubicon for Cubicon {
    fn cubicon(&self) -> &Cubicon {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubed_core::CanvasConfig;

    #[test]
    fn test_construct_registers_with_group() {
        let group = Group::new(CanvasConfig::default());
        assert!(group.is_empty());

        let cubicon = Cubicon::new(&group, Vector2::new(1.0, -2.0));

        assert_eq!(group.len(), 1);
        assert!(group.contains(cubicon.id()));
        assert_eq!(cubicon.position(), Vector2::new(1.0, -2.0));
        assert_eq!(cubicon.kind(), CubiconKind::Plain);
    }

    #[test]
    fn test_initial_state_is_neutral() {
        let group = Group::new(CanvasConfig::default());
        let cubicon = Cubicon::new(&group, Vector2::ZERO);

        assert_eq!(cubicon.move_vector(), Vector2::ZERO);
        assert_eq!(cubicon.angle(), 0.0);
        assert_eq!(cubicon.move_angle(), 0.0);
        assert_eq!(cubicon.elapsed_time(), 0.0);
        assert_eq!(cubicon.stroke(), ShapeHandle::None);
    }

    #[test]
    fn test_transform_mutators_accumulate() {
        let group = Group::new(CanvasConfig::default());
        let cubicon = Cubicon::new(&group, Vector2::new(1.0, 1.0));

        cubicon.translate(Vector2::new(2.0, 0.0));
        cubicon.translate(Vector2::new(0.0, -3.0));
        assert_eq!(cubicon.position(), Vector2::new(3.0, -2.0));
        assert_eq!(cubicon.move_vector(), Vector2::new(2.0, -3.0));

        cubicon.rotate(0.5);
        cubicon.rotate(0.25);
        assert_eq!(cubicon.angle(), 0.75);
        assert_eq!(cubicon.move_angle(), 0.75);

        cubicon.advance(1.5);
        assert_eq!(cubicon.elapsed_time(), 1.5);
    }

    #[test]
    fn test_handles_share_state() {
        let group = Group::new(CanvasConfig::default());
        let cubicon = Cubicon::new(&group, Vector2::ZERO);
        let other = cubicon.clone();

        other.translate(Vector2::new(1.0, 0.0));

        assert_eq!(cubicon.position(), Vector2::new(1.0, 0.0));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_id_serializes_as_number() {
        let group = Group::new(CanvasConfig::default());
        let cubicon = Cubicon::new(&group, Vector2::ZERO);

        let json = serde_json::to_string(&cubicon.id()).unwrap();
        assert_eq!(json, cubicon.id().as_u64().to_string());
    }
}
