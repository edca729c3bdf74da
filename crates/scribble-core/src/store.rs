//! Committed shapes and the redo buffer.

use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// What appending a new shape does to the redo buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedoPolicy {
    /// Undone shapes stay redoable after new commits.
    #[default]
    Keep,
    /// A new commit drops the redo buffer, like most editors.
    DiscardOnAppend,
}

/// Undo/redo stack discipline over two ordered sequences.
///
/// Every shape lives in exactly one of `committed` or `undone`.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    committed: Vec<Shape>,
    undone: Vec<Shape>,
    redo_policy: RedoPolicy,
}

impl ShapeStore {
    /// Create an empty store that keeps redo history on append.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given redo policy.
    pub fn with_redo_policy(redo_policy: RedoPolicy) -> Self {
        Self {
            redo_policy,
            ..Self::default()
        }
    }

    pub fn redo_policy(&self) -> RedoPolicy {
        self.redo_policy
    }

    pub fn set_redo_policy(&mut self, redo_policy: RedoPolicy) {
        self.redo_policy = redo_policy;
    }

    /// Push a shape onto the drawing history.
    pub fn append(&mut self, shape: Shape) {
        if self.redo_policy == RedoPolicy::DiscardOnAppend && !self.undone.is_empty() {
            log::debug!("Discarding {} redoable shape(s)", self.undone.len());
            self.undone.clear();
        }
        self.committed.push(shape);
    }

    /// Append several loaded shapes in order.
    ///
    /// Unlike [`append`](Self::append), this never touches the redo buffer.
    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.committed.extend(shapes);
    }

    /// Move the most recent shape to the redo buffer.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(shape) => {
                self.undone.push(shape);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone shape back.
    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(shape) => {
                self.committed.push(shape);
                true
            }
            None => false,
        }
    }

    /// Empty both sequences.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
    }

    pub fn committed(&self) -> &[Shape] {
        &self.committed
    }

    pub fn undone(&self) -> &[Shape] {
        &self.undone
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Most recently committed shape.
    pub fn last(&self) -> Option<&Shape> {
        self.committed.last()
    }

    /// Find a shape by ID in either sequence.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.committed
            .iter()
            .chain(self.undone.iter())
            .find(|s| s.id() == id)
    }

    /// Find a shape by ID in either sequence, mutably.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.committed
            .iter_mut()
            .chain(self.undone.iter_mut())
            .find(|s| s.id() == id)
    }

    /// Number of committed shapes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Check if nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use kurbo::Point;

    fn shape(x: f64) -> Shape {
        let mut s = Shape::begin(ShapeKind::Rectangle, "red", Point::new(x, x));
        s.extend_to(Point::new(x + 10.0, x + 10.0));
        s
    }

    #[test]
    fn test_undo_redo_moves_last() {
        let mut store = ShapeStore::new();
        let (a, b) = (shape(0.0), shape(20.0));
        store.append(a.clone());
        store.append(b.clone());

        assert!(store.undo());
        assert_eq!(store.committed(), &[a.clone()]);
        assert_eq!(store.undone(), &[b.clone()]);

        assert!(store.redo());
        assert_eq!(store.committed(), &[a, b]);
        assert!(store.undone().is_empty());
    }

    #[test]
    fn test_empty_undo_redo_are_noops() {
        let mut store = ShapeStore::new();
        assert!(!store.undo());
        assert!(!store.redo());
        assert!(store.is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_clear_empties_both() {
        let mut store = ShapeStore::new();
        store.extend([shape(0.0), shape(1.0), shape(2.0)]);
        store.undo();
        store.clear();
        assert!(store.committed().is_empty());
        assert!(store.undone().is_empty());
    }

    #[test]
    fn test_keep_policy_preserves_redo_on_append() {
        let mut store = ShapeStore::new();
        store.append(shape(0.0));
        store.undo();
        store.append(shape(5.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.undone().len(), 1);
        assert!(store.redo());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_discard_policy_drops_redo_on_append() {
        let mut store = ShapeStore::with_redo_policy(RedoPolicy::DiscardOnAppend);
        store.append(shape(0.0));
        store.undo();
        store.append(shape(5.0));
        assert!(store.undone().is_empty());
        assert!(!store.redo());
    }

    #[test]
    fn test_extend_keeps_redo_under_discard_policy() {
        let mut store = ShapeStore::with_redo_policy(RedoPolicy::DiscardOnAppend);
        store.append(shape(0.0));
        store.undo();
        store.extend([shape(5.0), shape(6.0)]);
        assert_eq!(store.len(), 2);
        assert!(store.redo());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get_mut_finds_undone_shapes() {
        let mut store = ShapeStore::new();
        let s = shape(0.0);
        let id = s.id();
        store.append(s);
        store.undo();
        store.get_mut(id).unwrap().set_name(Some("later".into()));
        assert!(store.redo());
        assert_eq!(store.get(id).and_then(Shape::name), Some("later"));
    }
}
