//! Animation requests and the playback timeline.
//!
//! Animations submitted together in one [`Group::play`](crate::Group::play)
//! call form a batch and run concurrently; batches run one after another in
//! submission order. The timeline only records this schedule. Interpolation
//! and frame stepping are left to whoever renders it.

use crate::{AsCubicon, CubiconId};
use serde::Serialize;

/// Duration of a [`Create`] animation when none is given, in seconds.
pub const DEFAULT_CREATE_DURATION: f64 = 1.0;

/// Draws a cubicon's stroke into view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Create {
    target: CubiconId,
    duration: f64,
}

impl Create {
    pub fn new(cubicon: &impl AsCubicon) -> Self {
        Self::with_duration(cubicon, DEFAULT_CREATE_DURATION)
    }

    pub fn with_duration(cubicon: &impl AsCubicon, duration: f64) -> Self {
        Self {
            target: cubicon.cubicon().id(),
            duration,
        }
    }

    pub fn target(&self) -> CubiconId {
        self.target
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// An animation request that can be submitted to a group.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Animation {
    Create(Create),
}

impl Animation {
    pub fn target(&self) -> CubiconId {
        match self {
            Animation::Create(create) => create.target(),
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            Animation::Create(create) => create.duration(),
        }
    }
}

impl From<Create> for Animation {
    fn from(create: Create) -> Self {
        Animation::Create(create)
    }
}

/// Animations submitted by one `play` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayBatch {
    /// Seconds from the start of the timeline
    pub start: f64,
    /// Length of the longest animation in the batch
    pub duration: f64,
    pub animations: Vec<Animation>,
}

impl PlayBatch {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// The ordered list of play batches of a group.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Timeline {
    batches: Vec<PlayBatch>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch starting where the previous one ends.
    pub fn push(&mut self, animations: Vec<Animation>) -> &PlayBatch {
        let start = self.end();
        let duration = animations
            .iter()
            .map(Animation::duration)
            .fold(0.0, f64::max);

        let index = self.batches.len();
        self.batches.push(PlayBatch {
            start,
            duration,
            animations,
        });
        &self.batches[index]
    }

    /// Total length of the timeline
    pub fn end(&self) -> f64 {
        self.batches.last().map(PlayBatch::end).unwrap_or(0.0)
    }

    pub fn batches(&self) -> &[PlayBatch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// All submitted animations, in submission order.
    pub fn animations(&self) -> impl Iterator<Item = &Animation> {
        self.batches.iter().flat_map(|batch| batch.animations.iter())
    }

    /// Whether a create animation has been submitted for `id`.
    pub fn is_created(&self, id: CubiconId) -> bool {
        self.animations()
            .any(|animation| matches!(animation, Animation::Create(c) if c.target() == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cubicon, Group};
    use cubed_core::{CanvasConfig, Vector2};

    #[test]
    fn test_create_defaults() {
        let group = Group::new(CanvasConfig::default());
        let cubicon = Cubicon::new(&group, Vector2::ZERO);

        let create = Create::new(&cubicon);
        assert_eq!(create.target(), cubicon.id());
        assert_eq!(create.duration(), DEFAULT_CREATE_DURATION);
        assert_eq!(Create::with_duration(&cubicon, 2.5).duration(), 2.5);
    }

    #[test]
    fn test_batches_are_sequential() {
        let group = Group::new(CanvasConfig::default());
        let a = Cubicon::new(&group, Vector2::ZERO);
        let b = Cubicon::new(&group, Vector2::ZERO);

        let mut timeline = Timeline::new();
        timeline.push(vec![
            Create::with_duration(&a, 2.0).into(),
            Create::with_duration(&b, 0.5).into(),
        ]);
        let second = timeline.push(vec![Create::new(&a).into()]).clone();

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.batches()[0].start, 0.0);
        assert_eq!(timeline.batches()[0].duration, 2.0);
        assert_eq!(second.start, 2.0);
        assert_eq!(second.duration, 1.0);
        assert_eq!(timeline.end(), 3.0);
    }

    #[test]
    fn test_empty_batch_has_no_duration() {
        let mut timeline = Timeline::new();
        let batch = timeline.push(Vec::new());

        assert_eq!(batch.duration, 0.0);
        assert_eq!(timeline.end(), 0.0);
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_is_created() {
        let group = Group::new(CanvasConfig::default());
        let a = Cubicon::new(&group, Vector2::ZERO);
        let b = Cubicon::new(&group, Vector2::ZERO);

        let mut timeline = Timeline::new();
        timeline.push(vec![Create::new(&a).into()]);

        assert!(timeline.is_created(a.id()));
        assert!(!timeline.is_created(b.id()));
    }

    #[test]
    fn test_timeline_serializes() {
        let group = Group::new(CanvasConfig::default());
        let a = Cubicon::new(&group, Vector2::ZERO);

        let mut timeline = Timeline::new();
        timeline.push(vec![Create::with_duration(&a, 0.5).into()]);

        let value = serde_json::to_value(&timeline).unwrap();
        let animation = &value["batches"][0]["animations"][0];
        assert_eq!(animation["type"], "create");
        assert_eq!(animation["target"], a.id().as_u64());
        assert_eq!(animation["duration"], 0.5);
        assert_eq!(value["batches"][0]["start"], 0.0);
    }
}
