//! The group that owns cubicons, their drawing surface and their timeline.

use crate::animation::{Animation, Timeline};
use crate::text::{MathMlTypesetter, Typesetter};
use crate::{AsCubicon, CubiconId, CubiconState};
use cubed_core::{CanvasConfig, UnitTransform};
use log::{debug, trace};
use slotmap::SlotMap;
use std::cell::RefCell;
use std::rc::Rc;
use surface::{Element, ElementId, ElementKind, Surface};

struct GroupState {
    config: CanvasConfig,
    surface: Surface,
    /// Parent of everything cubicons draw; flips the y axis
    content: ElementId,
    cubicons: SlotMap<CubiconId, CubiconState>,
    timeline: Timeline,
    typesetter: Rc<dyn Typesetter>,
}

/// Owner of a set of cubicons.
///
/// A group is a cheap, clonable handle. Every clone refers to the same
/// surface, registry and timeline, so cubicons keep a clone of the group
/// they were registered with.
///
/// The surface root is an `<svg>` whose view box is centered on the origin.
/// Cubicons draw into a content group transformed with `scale(1, -1)`, so
/// positive y points up.
#[derive(Clone)]
pub struct Group {
    inner: Rc<RefCell<GroupState>>,
}

impl Group {
    /// Creates a group that typesets math with [`MathMlTypesetter`].
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_typesetter(config, Rc::new(MathMlTypesetter))
    }

    pub fn with_typesetter(config: CanvasConfig, typesetter: Rc<dyn Typesetter>) -> Self {
        let mut surface = Surface::new(config.width, config.height);
        let root = surface.root();

        if let Some(background) = config.background {
            let rect = surface.append(root, ElementKind::Rect);
            surface.update(rect, |e| {
                e.attr("x", -config.width / 2.0)
                    .attr("y", -config.height / 2.0)
                    .attr("width", config.width)
                    .attr("height", config.height)
                    .attr("fill", background.to_css());
            });
        }

        let content = surface.append(root, ElementKind::Group);
        surface.update(content, |e| {
            e.class("cubicons").attr("transform", "scale(1, -1)");
        });

        debug!(
            "created group {}x{} at {} units per graph unit",
            config.width, config.height, config.unit
        );

        Self {
            inner: Rc::new(RefCell::new(GroupState {
                config,
                surface,
                content,
                cubicons: SlotMap::with_key(),
                timeline: Timeline::new(),
                typesetter,
            })),
        }
    }

    pub fn config(&self) -> CanvasConfig {
        self.inner.borrow().config
    }

    /// Conversion between graph units and world units for this canvas
    pub fn units(&self) -> UnitTransform {
        self.inner.borrow().config.units()
    }

    pub fn typesetter(&self) -> Rc<dyn Typesetter> {
        self.inner.borrow().typesetter.clone()
    }

    /// Registers a cubicon. Called by cubicon constructors.
    pub fn add(&self, state: CubiconState) -> CubiconId {
        let id = self.inner.borrow_mut().cubicons.insert(state);
        debug!("registered {} cubicon {}", state.kind, id);
        id
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().cubicons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().cubicons.is_empty()
    }

    pub fn contains(&self, id: CubiconId) -> bool {
        self.inner.borrow().cubicons.contains_key(id)
    }

    /// Registered cubicons in registration order
    pub fn cubicon_ids(&self) -> Vec<CubiconId> {
        self.inner.borrow().cubicons.keys().collect()
    }

    pub fn cubicon_state(&self, id: CubiconId) -> Option<CubiconState> {
        self.inner.borrow().cubicons.get(id).copied()
    }

    pub(crate) fn update_cubicon(&self, id: CubiconId, f: impl FnOnce(&mut CubiconState)) {
        if let Some(state) = self.inner.borrow_mut().cubicons.get_mut(id) {
            f(state);
        }
    }

    /// Submits a batch of animations.
    ///
    /// The batch starts when the previous batch ends and lasts as long as its
    /// longest animation. Each target's elapsed time advances by the duration
    /// of its animation.
    pub fn play<A: Into<Animation>>(&self, animations: impl IntoIterator<Item = A>) {
        let animations: Vec<Animation> = animations.into_iter().map(Into::into).collect();
        let mut state = self.inner.borrow_mut();

        for animation in &animations {
            if let Some(target) = state.cubicons.get_mut(animation.target()) {
                target.elapsed_time += animation.duration();
            }
        }

        let batch = state.timeline.push(animations);
        trace!(
            "play batch at {}s: {} animation(s) over {}s",
            batch.start,
            batch.animations.len(),
            batch.duration
        );
    }

    pub fn timeline(&self) -> Timeline {
        self.inner.borrow().timeline.clone()
    }

    /// Whether a create animation has been submitted for `cubicon`.
    pub fn is_created(&self, cubicon: &impl AsCubicon) -> bool {
        self.inner
            .borrow()
            .timeline
            .is_created(cubicon.cubicon().id())
    }

    /// The element cubicons draw into
    pub fn content_root(&self) -> ElementId {
        self.inner.borrow().content
    }

    /// Appends an element under `parent` and configures it with `f`.
    pub fn append(
        &self,
        parent: ElementId,
        kind: ElementKind,
        f: impl FnOnce(&mut Element),
    ) -> ElementId {
        let mut state = self.inner.borrow_mut();
        let id = state.surface.append(parent, kind);
        state.surface.update(id, f);
        id
    }

    pub fn update(&self, id: ElementId, f: impl FnOnce(&mut Element)) {
        self.inner.borrow_mut().surface.update(id, f);
    }

    /// Runs `f` with shared access to the surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&Surface) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    /// Runs `f` with exclusive access to the surface.
    ///
    /// `f` must not call back into this group.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }

    /// Serializes the surface as an SVG document.
    pub fn to_svg(&self) -> String {
        self.inner.borrow().surface.to_svg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Create, Cubicon, CubiconKind};
    use cubed_core::{Color, Vector2};

    #[test]
    fn test_surface_layout() {
        let group = Group::new(CanvasConfig {
            width: 400.0,
            height: 200.0,
            ..Default::default()
        });

        let content = group.content_root();
        group.with_surface(|surface| {
            let root = surface.get(surface.root()).unwrap();
            assert_eq!(root.get_attr("viewBox"), Some("-200 -100 400 200"));
            assert_eq!(surface.children(surface.root()), vec![content]);

            let content = surface.get(content).unwrap();
            assert_eq!(content.get_attr("transform"), Some("scale(1, -1)"));
        });
    }

    #[test]
    fn test_background() {
        let group = Group::new(CanvasConfig {
            width: 100.0,
            height: 50.0,
            background: Some(Color::BLACK),
            ..Default::default()
        });

        let svg = group.to_svg();
        assert!(svg.contains(
            "<rect x=\"-50\" y=\"-25\" width=\"100\" height=\"50\" fill=\"#000000\"/>"
        ));
    }

    #[test]
    fn test_add_and_lookup() {
        let group = Group::new(CanvasConfig::default());
        let id = group.add(CubiconState::new(CubiconKind::Circle, Vector2::new(1.0, 2.0)));

        assert!(group.contains(id));
        assert_eq!(group.cubicon_ids(), vec![id]);
        let state = group.cubicon_state(id).unwrap();
        assert_eq!(state.kind, CubiconKind::Circle);
        assert_eq!(state.position, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn test_play_records_batches_and_advances_targets() {
        let group = Group::new(CanvasConfig::default());
        let a = Cubicon::new(&group, Vector2::ZERO);
        let b = Cubicon::new(&group, Vector2::ZERO);

        group.play([Create::with_duration(&a, 2.0), Create::new(&b)]);
        group.play([Create::with_duration(&b, 0.5)]);

        let timeline = group.timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.batches()[1].start, 2.0);
        assert_eq!(timeline.end(), 2.5);

        assert_eq!(a.elapsed_time(), 2.0);
        assert_eq!(b.elapsed_time(), 1.5);
        assert!(group.is_created(&a));
    }

    #[test]
    fn test_clones_share_state() {
        let group = Group::new(CanvasConfig::default());
        let other = group.clone();

        Cubicon::new(&other, Vector2::ZERO);

        assert_eq!(group.len(), 1);
    }
}
