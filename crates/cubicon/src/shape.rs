use surface::ElementId;

/// The main shape a cubicon drew onto the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ShapeHandle {
    /// Nothing drawn yet
    #[default]
    None,
    Path(ElementId),
    /// Typeset text container
    Text(ElementId),
    Circle(ElementId),
    Line(ElementId),
}

impl ShapeHandle {
    /// The surface element backing this shape, if any.
    pub fn element(&self) -> Option<ElementId> {
        match *self {
            ShapeHandle::None => None,
            ShapeHandle::Path(id)
            | ShapeHandle::Text(id)
            | ShapeHandle::Circle(id)
            | ShapeHandle::Line(id) => Some(id),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ShapeHandle::None)
    }
}
