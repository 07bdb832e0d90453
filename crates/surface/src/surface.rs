//! # Drawing surface
//!
//! An in-memory vector drawing surface: a tree of SVG elements that drawables
//! append to, style and query, and that serializes to an SVG document.
//!
//! ## Key Concepts
//!
//! - **Elements**: tagged nodes with ordered attributes, inline styles, text
//!   or raw inner markup (see [`Element`])
//! - **Scales**: d3-style linear mappings from a data domain to drawing units
//!   (see [`LinearScale`])
//! - **Axes**: tick generation and axis layout in the manner of `d3-axis`
//!   (see [`Axis`])
//! - **Paths**: path data builders and natural cubic spline fitting
//!   (see [`natural_curve`])
//!
//! The surface knows nothing about cubicons or animation. It only stores what
//! was drawn.

pub mod axis;
pub mod element;
pub mod path;
pub mod scale;
mod svg;

pub use axis::{format_tick, Axis, Orient};
pub use element::{Element, ElementKind};
pub use path::{natural_curve, PathBuilder};
pub use scale::LinearScale;

use slotmap::SlotMap;
use std::fmt::{self, Display};

slotmap::new_key_type! {
    /// Identifies an element within a [`Surface`].
    pub struct ElementId;
}

impl ElementId {
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// A tree of drawn elements rooted at an `<svg>` element.
///
/// The root view box is centered on the origin, so world coordinate `(0, 0)`
/// is the middle of the canvas.
pub struct Surface {
    root: ElementId,
    elements: SlotMap<ElementId, Element>,
    width: f64,
    height: f64,
}

impl Surface {
    /// Creates a surface with an empty `<svg>` root of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        let mut elements = SlotMap::with_key();
        let mut root = Element::new(ElementKind::Svg, None);
        root.attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", width)
            .attr("height", height)
            .attr(
                "viewBox",
                format!("{} {} {} {}", -width / 2.0, -height / 2.0, width, height),
            );
        let root = elements.insert(root);

        Self {
            root,
            elements,
            width,
            height,
        }
    }

    /// Returns the ID of the root `<svg>` element
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of elements, including the root
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a new element as the last child of `parent`.
    ///
    /// If `parent` does not exist the element is still created, detached.
    pub fn append(&mut self, parent: ElementId, kind: ElementKind) -> ElementId {
        let id = self.elements.insert(Element::new(kind, Some(parent)));

        if let Some(parent) = self.elements.get_mut(parent) {
            parent.children.push(id);
        }

        log::trace!("appended <{}> {} under {}", kind, id, parent);
        id
    }

    /// Applies `f` to an element, if it exists.
    pub fn update(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) {
        if let Some(element) = self.elements.get_mut(id) {
            f(element);
        }
    }

    /// Applies `f` to each of the given elements.
    pub fn update_all(&mut self, ids: &[ElementId], mut f: impl FnMut(&mut Element)) {
        for &id in ids {
            if let Some(element) = self.elements.get_mut(id) {
                f(element);
            }
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Gets the children of an element
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.elements
            .get(id)
            .map(|element| element.children.clone())
            .unwrap_or_default()
    }

    /// Removes an element and all of its descendants.
    ///
    /// The root cannot be removed. Returns whether anything was removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.root || !self.elements.contains_key(id) {
            return false;
        }

        if let Some(parent_id) = self.elements.get(id).and_then(|e| e.parent) {
            if let Some(parent) = self.elements.get_mut(parent_id) {
                parent.children.retain(|&child| child != id);
            }
        }

        self.remove_subtree(id);
        true
    }

    fn remove_subtree(&mut self, id: ElementId) {
        if let Some(element) = self.elements.remove(id) {
            for child in element.children {
                self.remove_subtree(child);
            }
        }
    }

    /// Removes each of the given elements (and their descendants).
    pub fn remove_all(&mut self, ids: &[ElementId]) {
        for &id in ids {
            self.remove(id);
        }
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).into_iter().rev().collect();

        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(element) = self.elements.get(current) {
                stack.extend(element.children.iter().rev().copied());
            }
        }

        result
    }

    /// Descendants of `scope` of the given kind that sit inside an element
    /// carrying `class`, in document order.
    ///
    /// This is the equivalent of the selector `.class kind`, e.g. `.tick text`.
    pub fn select_all(&self, scope: ElementId, class: &str, kind: ElementKind) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| {
                self.elements.get(id).map(|e| e.kind()) == Some(kind)
                    && self.has_classed_ancestor(id, scope, class)
            })
            .collect()
    }

    /// Descendants of `scope` carrying `class`, in document order.
    pub fn select_class(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.elements.get(id).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    /// Whether an ancestor of `id` strictly below `scope` carries `class`.
    fn has_classed_ancestor(&self, id: ElementId, scope: ElementId, class: &str) -> bool {
        let mut current = self.elements.get(id).and_then(|e| e.parent);
        while let Some(ancestor) = current {
            if ancestor == scope {
                return false;
            }
            let Some(element) = self.elements.get(ancestor) else {
                return false;
            };
            if element.has_class(class) {
                return true;
            }
            current = element.parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_creation() {
        let surface = Surface::new(800.0, 600.0);
        let root = surface.get(surface.root()).unwrap();

        assert_eq!(root.kind(), ElementKind::Svg);
        assert!(root.parent().is_none());
        assert!(root.children().is_empty());
        assert_eq!(root.get_attr("viewBox"), Some("-400 -300 800 600"));
    }

    #[test]
    fn test_append() {
        let mut surface = Surface::new(100.0, 100.0);
        let root = surface.root();

        let group = surface.append(root, ElementKind::Group);
        let circle = surface.append(group, ElementKind::Circle);

        assert_eq!(surface.get(group).unwrap().parent(), Some(root));
        assert_eq!(surface.get(circle).unwrap().parent(), Some(group));
        assert_eq!(surface.children(root), vec![group]);
        assert_eq!(surface.children(group), vec![circle]);
        assert_eq!(surface.len(), 3);
    }

    #[test]
    fn test_remove_subtree() {
        let mut surface = Surface::new(100.0, 100.0);
        let root = surface.root();

        let group = surface.append(root, ElementKind::Group);
        let child = surface.append(group, ElementKind::Path);

        assert!(surface.remove(group));
        assert!(!surface.contains(group));
        assert!(!surface.contains(child));
        assert!(surface.children(root).is_empty());

        // the root stays
        assert!(!surface.remove(root));
        assert!(surface.contains(root));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut surface = Surface::new(100.0, 100.0);
        let root = surface.root();

        let a = surface.append(root, ElementKind::Group);
        let a1 = surface.append(a, ElementKind::Line);
        let a2 = surface.append(a, ElementKind::Text);
        let b = surface.append(root, ElementKind::Group);

        assert_eq!(surface.descendants(root), vec![a, a1, a2, b]);
    }

    #[test]
    fn test_select_all() {
        let mut surface = Surface::new(100.0, 100.0);
        let root = surface.root();

        let axis = surface.append(root, ElementKind::Group);
        let tick = surface.append(axis, ElementKind::Group);
        surface.update(tick, |e| {
            e.class("tick");
        });
        let tick_text = surface.append(tick, ElementKind::Text);
        let tick_line = surface.append(tick, ElementKind::Line);
        let stray_text = surface.append(axis, ElementKind::Text);

        assert_eq!(surface.select_all(axis, "tick", ElementKind::Text), vec![tick_text]);
        assert_eq!(surface.select_all(axis, "tick", ElementKind::Line), vec![tick_line]);
        assert!(!surface.select_all(axis, "tick", ElementKind::Text).contains(&stray_text));

        // the scope itself does not count as a classed ancestor
        assert!(surface.select_all(tick, "tick", ElementKind::Text).is_empty());
        assert_eq!(surface.select_class(root, "tick"), vec![tick]);
    }
}
