//! Arena of reusable clip visuals.
//!
//! Every static redraw starts with [`ClipPool::release_all`] and then claims
//! one entry per visible clip. Claimed entries always form a prefix of the
//! arena, so acquiring is a cursor bump and the arena only grows when a pass
//! shows more clips than any pass before it.

use super::graphics::{Graphics, Text};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct PoolEntry {
    pub body: Graphics,
    pub label: Text,
    /// Shape whose bounds clip the label.
    pub label_mask: Graphics,
    in_use: bool,
}

impl PoolEntry {
    #[inline]
    pub fn in_use(&self) -> bool {
        self.in_use
    }

    fn hide(&mut self) {
        self.in_use = false;
        self.body.visible = false;
        self.label.visible = false;
        self.label_mask.visible = false;
    }

    fn destroy(&mut self) {
        self.in_use = false;
        self.body.destroy();
        self.label.destroy();
        self.label_mask.destroy();
    }
}

#[derive(Debug, Default)]
pub struct ClipPool {
    entries: Vec<PoolEntry>,
    cursor: usize,
}

impl ClipPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every entry free and invisible. Storage is kept.
    pub fn release_all(&mut self) {
        for entry in &mut self.entries[..self.cursor] {
            entry.hide();
        }
        self.cursor = 0;
    }

    /// Claim the next free entry, allocating one only when none is left.
    pub fn acquire(&mut self) -> (EntryId, &mut PoolEntry) {
        if self.cursor == self.entries.len() {
            self.entries.push(PoolEntry::default());
        }
        let id = EntryId(self.cursor);
        self.cursor += 1;
        let entry = &mut self.entries[id.0];
        entry.in_use = true;
        entry.body.visible = true;
        entry.label.visible = true;
        entry.label_mask.visible = true;
        (id, entry)
    }

    #[inline]
    pub fn get(&self, id: EntryId) -> Option<&PoolEntry> {
        self.entries.get(id.0)
    }

    /// Allocated entries, claimed or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.cursor
    }

    /// Release every retained resource. Only the host calls this, at teardown.
    pub fn destroy(&mut self) {
        for entry in &mut self.entries {
            entry.destroy();
        }
        self.entries = Vec::new();
        self.cursor = 0;
    }
}
