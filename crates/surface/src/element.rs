use crate::ElementId;
use std::fmt::Display;

/// The SVG (or embedded XHTML) tag of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::AsRefStr)]
pub enum ElementKind {
    #[strum(serialize = "svg")]
    Svg,
    #[strum(serialize = "g")]
    Group,
    #[strum(serialize = "rect")]
    Rect,
    #[strum(serialize = "path")]
    Path,
    #[strum(serialize = "line")]
    Line,
    #[strum(serialize = "circle")]
    Circle,
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "foreignObject")]
    ForeignObject,
    /// XHTML container used inside a `foreignObject`
    #[strum(serialize = "div")]
    Div,
}

/// A single node of the surface tree.
///
/// Attributes and style properties keep their insertion order so the
/// serialized output is stable. Setting an existing name replaces its value
/// in place.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    kind: ElementKind,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    markup: Option<String>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, parent: Option<ElementId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            kind,
            attributes: Vec::new(),
            styles: Vec::new(),
            text: None,
            markup: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Sets an attribute, replacing any previous value.
    pub fn attr(&mut self, name: &str, value: impl Display) -> &mut Self {
        set_entry(&mut self.attributes, name, value.to_string());
        self
    }

    /// Removes an attribute if present.
    pub fn remove_attr(&mut self, name: &str) -> &mut Self {
        self.attributes.retain(|(n, _)| n != name);
        self
    }

    /// Sets an inline style property, replacing any previous value.
    pub fn style(&mut self, name: &str, value: impl Display) -> &mut Self {
        set_entry(&mut self.styles, name, value.to_string());
        self
    }

    /// Adds a class to the `class` attribute.
    pub fn class(&mut self, class: &str) -> &mut Self {
        if self.has_class(class) {
            return self;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.attr("class", classes)
    }

    /// Sets the text content. Text is escaped on output.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Sets raw inner markup, written verbatim on output.
    pub fn inner_markup(&mut self, markup: impl Into<String>) -> &mut Self {
        self.markup = Some(markup.into());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        get_entry(&self.attributes, name)
    }

    pub fn get_style(&self, name: &str) -> Option<&str> {
        get_entry(&self.styles, name)
    }

    pub fn get_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn get_markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn styles(&self) -> &[(String, String)] {
        &self.styles
    }
}

fn set_entry(entries: &mut Vec<(String, String)>, name: &str, value: String) {
    match entries.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name.to_string(), value)),
    }
}

fn get_entry<'a>(entries: &'a [(String, String)], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_replace_in_place() {
        let mut element = Element::new(ElementKind::Line, None);
        element.attr("x1", 0).attr("y1", 1).attr("x1", 2.5);

        assert_eq!(element.get_attr("x1"), Some("2.5"));
        assert_eq!(element.attributes()[0].0, "x1");
        assert_eq!(element.attributes().len(), 2);

        element.remove_attr("x1");
        assert_eq!(element.get_attr("x1"), None);
    }

    #[test]
    fn test_classes() {
        let mut element = Element::new(ElementKind::Group, None);
        element.class("tick").class("major").class("tick");

        assert_eq!(element.get_attr("class"), Some("tick major"));
        assert!(element.has_class("major"));
        assert!(!element.has_class("tic"));
    }

    #[test]
    fn test_kind_tag_names() {
        assert_eq!(ElementKind::Group.to_string(), "g");
        let tag: &str = ElementKind::ForeignObject.as_ref();
        assert_eq!(tag, "foreignObject");
    }
}
