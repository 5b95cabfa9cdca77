use egui::{Pos2, Rect, Vec2};
use log::debug;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::hit_testing;
use super::{Shape, ShapeId, ShapeKind, ShapeStyle, Tag};
use crate::error::{CanvasError, CanvasResult};

/// Registry handle shared between the input path and the renderer.
///
/// Mutations and the hit-test that precedes them run under one write guard.
pub type SharedRegistry = Arc<RwLock<ShapeRegistry>>;

/// Owns every shape on the canvas together with its tags and draw order
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    /// Shapes in insertion order; `ShapeId(i)` lives at index `i`
    shapes: Vec<Shape>,
    /// Next draw-order key to hand out
    next_z: u64,
    /// Auxiliary member -> handle of the object it belongs to
    owners: HashMap<ShapeId, ShapeId>,
    /// Handle -> auxiliary members in creation order
    members: HashMap<ShapeId, Vec<ShapeId>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> CanvasResult<&Shape> {
        self.shapes.get(id.index()).ok_or(CanvasError::UnknownShape(id))
    }

    fn get_mut(&mut self, id: ShapeId) -> CanvasResult<&mut Shape> {
        self.shapes.get_mut(id.index()).ok_or(CanvasError::UnknownShape(id))
    }

    /// All shapes in insertion order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn insert(&mut self, kind: ShapeKind, style: ShapeStyle, tags: &[Tag]) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        let z = self.take_z();
        let tags: BTreeSet<Tag> = tags.iter().copied().collect();
        debug!("Registered shape {} with tags {:?}", id, tags);
        self.shapes.push(Shape::new(id, kind, style, z, tags));
        id
    }

    fn take_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    pub fn add_rectangle(&mut self, rect: Rect, style: ShapeStyle, tags: &[Tag]) -> ShapeId {
        self.insert(ShapeKind::Rectangle { rect }, style, tags)
    }

    pub fn add_text(&mut self, anchor: Pos2, text: &str, style: ShapeStyle, tags: &[Tag]) -> ShapeId {
        self.insert(
            ShapeKind::Text {
                anchor,
                text: text.to_string(),
            },
            style,
            tags,
        )
    }

    /// Returns the shape nearest to `pos`, the topmost one on ties
    pub fn hit_test(&self, pos: Pos2) -> CanvasResult<ShapeId> {
        hit_testing::nearest(pos, &self.shapes)
            .map(Shape::id)
            .ok_or(CanvasError::NoShape)
    }

    /// Shapes whose bounds contain `pos`, topmost first
    pub fn shape_at(&self, pos: Pos2) -> Vec<ShapeId> {
        let mut hits: Vec<&Shape> = self
            .shapes
            .iter()
            .filter(|shape| hit_testing::contains(pos, shape))
            .collect();
        hits.sort_by(|a, b| b.z().cmp(&a.z()));
        hits.into_iter().map(Shape::id).collect()
    }

    /// Offsets a single shape; other shapes are left untouched
    pub fn translate(&mut self, id: ShapeId, delta: Vec2) -> CanvasResult<()> {
        let shape = self.get_mut(id)?;
        if delta != Vec2::ZERO {
            shape.translate(delta);
        }
        Ok(())
    }

    /// Puts the shape above every other shape in draw order
    pub fn raise_to_front(&mut self, id: ShapeId) -> CanvasResult<()> {
        let current = self.get(id)?.z();
        // z keys are unique, so holding the maximum means nothing is above
        if self.shapes.iter().all(|shape| shape.z() <= current) {
            return Ok(());
        }
        let z = self.take_z();
        self.get_mut(id)?.set_z(z);
        Ok(())
    }

    pub fn tags_of(&self, id: ShapeId) -> CanvasResult<&BTreeSet<Tag>> {
        Ok(self.get(id)?.tags())
    }

    pub fn shapes_with_tag(&self, tag: Tag) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|shape| shape.has_tag(tag))
            .map(Shape::id)
            .collect()
    }

    /// Shape ids sorted bottom to top
    pub fn draw_order(&self) -> Vec<ShapeId> {
        let mut ordered: Vec<&Shape> = self.shapes.iter().collect();
        ordered.sort_by_key(|shape| shape.z());
        ordered.into_iter().map(Shape::id).collect()
    }

    /// Links auxiliary shapes to a handle so they move and raise as one object
    pub fn group(&mut self, handle: ShapeId, members: &[ShapeId]) -> CanvasResult<()> {
        self.attach(handle, members)?;
        self.members.entry(handle).or_default().extend_from_slice(members);
        Ok(())
    }

    /// Records `handle` as the owner of `members` without coupling their motion.
    ///
    /// Picking an attached shape resolves to its handle, but only the handle
    /// moves or raises.
    pub fn attach(&mut self, handle: ShapeId, members: &[ShapeId]) -> CanvasResult<()> {
        self.get(handle)?;
        for member in members {
            self.get(*member)?;
        }
        for member in members {
            self.owners.insert(*member, handle);
        }
        Ok(())
    }

    /// Handle of the object `id` belongs to; a lone shape is its own handle
    pub fn handle_of(&self, id: ShapeId) -> ShapeId {
        self.owners.get(&id).copied().unwrap_or(id)
    }

    /// Every shape of the object `id` belongs to, handle first
    pub fn object_members(&self, id: ShapeId) -> Vec<ShapeId> {
        let handle = self.handle_of(id);
        let mut all = vec![handle];
        if let Some(members) = self.members.get(&handle) {
            all.extend_from_slice(members);
        }
        all
    }

    /// Translates every shape of the object `id` belongs to by the same delta
    pub fn translate_object(&mut self, id: ShapeId, delta: Vec2) -> CanvasResult<()> {
        self.get(id)?;
        for member in self.object_members(id) {
            self.translate(member, delta)?;
        }
        Ok(())
    }

    /// Raises the object `id` belongs to above everything else.
    ///
    /// The handle ends up above all shapes outside the object, auxiliary
    /// members are stacked right above the handle in creation order.
    pub fn raise_object(&mut self, id: ShapeId) -> CanvasResult<()> {
        self.get(id)?;
        for member in self.object_members(id) {
            self.raise_to_front(member)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(Pos2::new(x0, y0), Pos2::new(x1, y1))
    }

    #[test]
    fn test_hit_test_empty_registry() {
        let registry = ShapeRegistry::new();
        assert_eq!(registry.hit_test(Pos2::new(10.0, 10.0)), Err(CanvasError::NoShape));
    }

    #[test]
    fn test_hit_test_picks_nearest() {
        let mut registry = ShapeRegistry::new();
        let left = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let right = registry.add_rectangle(rect(100.0, 0.0, 110.0, 10.0), ShapeStyle::default(), &[]);

        assert_eq!(registry.hit_test(Pos2::new(20.0, 5.0)), Ok(left));
        assert_eq!(registry.hit_test(Pos2::new(80.0, 5.0)), Ok(right));
    }

    #[test]
    fn test_hit_test_is_deterministic() {
        let mut registry = ShapeRegistry::new();
        registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        registry.add_rectangle(rect(20.0, 0.0, 30.0, 10.0), ShapeStyle::default(), &[]);

        let point = Pos2::new(15.0, 5.0);
        let first = registry.hit_test(point).unwrap();
        for _ in 0..10 {
            assert_eq!(registry.hit_test(point).unwrap(), first);
        }
    }

    #[test]
    fn test_hit_test_overlap_picks_topmost() {
        let mut registry = ShapeRegistry::new();
        let lower = registry.add_rectangle(rect(0.0, 0.0, 50.0, 50.0), ShapeStyle::default(), &[]);
        let upper = registry.add_rectangle(rect(20.0, 20.0, 70.0, 70.0), ShapeStyle::default(), &[]);
        let point = Pos2::new(30.0, 30.0);

        assert_eq!(registry.hit_test(point), Ok(upper));

        registry.raise_to_front(lower).unwrap();
        assert_eq!(registry.hit_test(point), Ok(lower));
        assert_eq!(registry.shape_at(point).first(), Some(&lower));
    }

    #[test]
    fn test_translate_moves_only_target() {
        let mut registry = ShapeRegistry::new();
        let a = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let b = registry.add_rectangle(rect(20.0, 0.0, 30.0, 10.0), ShapeStyle::default(), &[]);

        registry.translate(a, Vec2::new(5.0, 7.0)).unwrap();

        assert_eq!(registry.get(a).unwrap().bounds(), rect(5.0, 7.0, 15.0, 17.0));
        assert_eq!(registry.get(b).unwrap().bounds(), rect(20.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn test_translate_zero_is_idempotent() {
        let mut registry = ShapeRegistry::new();
        let a = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        for _ in 0..3 {
            registry.translate(a, Vec2::ZERO).unwrap();
        }
        assert_eq!(registry.get(a).unwrap().bounds(), rect(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_translate_unknown_shape() {
        let mut registry = ShapeRegistry::new();
        assert_eq!(
            registry.translate(ShapeId(3), Vec2::new(1.0, 1.0)),
            Err(CanvasError::UnknownShape(ShapeId(3)))
        );
    }

    #[test]
    fn test_raise_to_front() {
        let mut registry = ShapeRegistry::new();
        let a = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let b = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let c = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);

        registry.raise_to_front(a).unwrap();

        assert_eq!(registry.draw_order(), vec![b, c, a]);
        assert_eq!(registry.shape_at(Pos2::new(5.0, 5.0)), vec![a, c, b]);
    }

    #[test]
    fn test_raise_topmost_keeps_key() {
        let mut registry = ShapeRegistry::new();
        registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let top = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let before = registry.get(top).unwrap().z();

        registry.raise_to_front(top).unwrap();

        assert_eq!(registry.get(top).unwrap().z(), before);
    }

    #[test]
    fn test_tags() {
        let mut registry = ShapeRegistry::new();
        let body = registry.add_rectangle(
            rect(0.0, 0.0, 10.0, 10.0),
            ShapeStyle::default(),
            &[Tag::Movable, Tag::Gate],
        );
        let plain = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let other = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[Tag::Movable]);

        let tags: Vec<Tag> = registry.tags_of(body).unwrap().iter().copied().collect();
        assert_eq!(tags, vec![Tag::Movable, Tag::Gate]);
        assert!(registry.tags_of(plain).unwrap().is_empty());
        assert_eq!(registry.shapes_with_tag(Tag::Movable), vec![body, other]);
        assert_eq!(registry.shapes_with_tag(Tag::Gate), vec![body]);
    }

    #[test]
    fn test_group_moves_together() {
        let mut registry = ShapeRegistry::new();
        let handle = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let label = registry.add_text(Pos2::new(5.0, 5.0), "X", ShapeStyle::default(), &[]);
        let loose = registry.add_rectangle(rect(50.0, 0.0, 60.0, 10.0), ShapeStyle::default(), &[]);
        registry.group(handle, &[label]).unwrap();

        registry.translate_object(label, Vec2::new(10.0, 0.0)).unwrap();

        assert_eq!(registry.get(handle).unwrap().position(), Pos2::new(10.0, 0.0));
        assert_eq!(registry.get(label).unwrap().position(), Pos2::new(15.0, 5.0));
        assert_eq!(registry.get(loose).unwrap().position(), Pos2::new(50.0, 0.0));
        assert_eq!(registry.handle_of(label), handle);
        assert_eq!(registry.handle_of(loose), loose);
    }

    #[test]
    fn test_attach_links_owner_without_coupling() {
        let mut registry = ShapeRegistry::new();
        let handle = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let label = registry.add_text(Pos2::new(5.0, 5.0), "X", ShapeStyle::default(), &[]);
        registry.attach(handle, &[label]).unwrap();

        assert_eq!(registry.handle_of(label), handle);
        assert_eq!(registry.object_members(handle), vec![handle]);

        registry.translate_object(handle, Vec2::new(10.0, 0.0)).unwrap();
        assert_eq!(registry.get(label).unwrap().position(), Pos2::new(5.0, 5.0));
        assert_eq!(
            registry.attach(handle, &[ShapeId(9)]),
            Err(CanvasError::UnknownShape(ShapeId(9)))
        );
    }

    #[test]
    fn test_raise_object_keeps_members_above_handle() {
        let mut registry = ShapeRegistry::new();
        let handle = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        let label = registry.add_text(Pos2::new(5.0, 5.0), "X", ShapeStyle::default(), &[]);
        let other = registry.add_rectangle(rect(0.0, 0.0, 10.0, 10.0), ShapeStyle::default(), &[]);
        registry.group(handle, &[label]).unwrap();

        registry.raise_object(handle).unwrap();

        assert_eq!(registry.draw_order(), vec![other, handle, label]);
    }
}
