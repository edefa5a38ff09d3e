use std::collections::VecDeque;

use super::Undoable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    /// Cursor at the top; nothing to redo.
    Clean,
    /// Cursor below the top; redo available.
    Branched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Appended,
    Merged,
}

/// Linear undo history with a single cursor. Entries below the cursor are
/// applied, entries at or above it are undone and redoable.
#[derive(Debug, Clone)]
pub struct UndoStack<C> {
    entries: VecDeque<C>,
    cursor: usize,
    capacity: Option<usize>,
}

impl<C> Default for UndoStack<C> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<C: Undoable> UndoStack<C> {
    pub fn push(&mut self, command: C, target: &mut C::Target) -> PushOutcome {
        command.apply(target);

        if self.cursor < self.entries.len() {
            log::trace!(
                "discarding {} redo entries",
                self.entries.len() - self.cursor
            );
            self.entries.truncate(self.cursor);
        }

        if let Some(tag) = command.merge_tag()
            && let Some(top) = self.entries.back_mut()
            && top.merge_tag() == Some(tag)
            && top.merge(&command)
        {
            log::trace!("merged `{}` into previous entry ({tag:?})", command.label());
            return PushOutcome::Merged;
        }

        log::trace!("pushed `{}`", command.label());
        self.entries.push_back(command);
        self.cursor = self.entries.len();
        self.evict();
        PushOutcome::Appended
    }

    pub fn undo(&mut self, target: &mut C::Target) -> Option<&'static str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let command = &self.entries[self.cursor];
        command.revert(target);
        log::trace!("undo `{}`", command.label());
        Some(command.label())
    }

    pub fn redo(&mut self, target: &mut C::Target) -> Option<&'static str> {
        let command = self.entries.get(self.cursor)?;
        command.apply(target);
        log::trace!("redo `{}`", command.label());
        self.cursor += 1;
        Some(command.label())
    }
}

impl<C> UndoStack<C> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            capacity,
        }
    }

    pub fn state(&self) -> StackState {
        if self.cursor == self.entries.len() {
            StackState::Clean
        } else {
            StackState::Branched
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of applied entries.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        self.evict();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn entries(&self) -> impl Iterator<Item = &C> {
        self.entries.iter()
    }

    fn evict(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() > capacity {
            self.entries.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

impl<C: Undoable> UndoStack<C> {
    /// Labels of the applied entries, oldest first.
    pub fn undo_labels(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .take(self.cursor)
            .map(Undoable::label)
            .collect()
    }
}
