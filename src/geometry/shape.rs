use egui::{Color32, Pos2, Rect, Vec2};
use std::collections::BTreeSet;
use std::fmt;

/// Grouping label attached to shapes for event binding and lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Shapes that respond to drag-and-drop
    Movable,
    /// The body of a logic gate
    Gate,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Movable => "movable",
            Tag::Gate => "gate",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unique identifier for a shape, assigned in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

impl ShapeId {
    /// Gets the underlying insertion index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Paint attributes handed to the surface; they carry no logic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Fill colour for rectangles, glyph colour for text
    pub fill: Color32,
    /// Outline for rectangles, ignored for text
    pub outline: Option<egui::Stroke>,
    /// Font size for text, ignored for rectangles
    pub font_size: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: Color32::WHITE,
            outline: Some(egui::Stroke::new(1.0, Color32::BLACK)),
            font_size: 12.0,
        }
    }
}

impl ShapeStyle {
    pub fn text(color: Color32, font_size: f32) -> Self {
        Self {
            fill: color,
            outline: None,
            font_size,
        }
    }
}

/// Geometry of an atomic drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle { rect: Rect },
    Text { anchor: Pos2, text: String },
}

#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    style: ShapeStyle,
    z: u64,
    tags: BTreeSet<Tag>,
}

impl Shape {
    pub(crate) fn new(id: ShapeId, kind: ShapeKind, style: ShapeStyle, z: u64, tags: BTreeSet<Tag>) -> Self {
        Self { id, kind, style, z, tags }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Draw-order key; larger keys render above smaller ones
    pub fn z(&self) -> u64 {
        self.z
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Bounding geometry used for hit-testing
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ShapeKind::Rectangle { rect } => *rect,
            ShapeKind::Text { anchor, text } => {
                super::hit_testing::text_bounds(*anchor, text, self.style.font_size)
            }
        }
    }

    /// Reference position: the rectangle's min corner or the text anchor
    pub fn position(&self) -> Pos2 {
        match &self.kind {
            ShapeKind::Rectangle { rect } => rect.min,
            ShapeKind::Text { anchor, .. } => *anchor,
        }
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        match &mut self.kind {
            ShapeKind::Rectangle { rect } => *rect = rect.translate(delta),
            ShapeKind::Text { anchor, .. } => *anchor += delta,
        }
    }

    pub(crate) fn set_z(&mut self, z: u64) {
        self.z = z;
    }
}
