/// A reversible mutation of `Target`.
///
/// `apply` must be callable again after `revert` (redo). Commands carry
/// before/after snapshots rather than deltas so that any undo/redo sequence
/// lands on bit-identical state.
pub trait Undoable {
    type Target;
    type Tag: Copy + PartialEq + std::fmt::Debug;

    fn apply(&self, target: &mut Self::Target);

    fn revert(&self, target: &mut Self::Target);

    /// Identity used to decide whether two adjacent entries may fuse. `None`
    /// never merges.
    fn merge_tag(&self) -> Option<Self::Tag> {
        None
    }

    /// Absorbs `next`, which has already been applied. The receiver keeps its
    /// own before-state. Returns `false` to refuse.
    fn merge(&mut self, next: &Self) -> bool {
        let _ = next;
        false
    }

    fn label(&self) -> &'static str;
}
