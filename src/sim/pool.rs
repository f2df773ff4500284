//! Soft-delete entity storage
//!
//! Entities are never removed while a level is running: destroying one flips
//! its `active` flag, and whole lists are cleared on level or game reset.
//! Gameplay code only ever walks the active entries.

/// An entity that can be logically deleted in place
pub trait SoftDelete {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Append-only list of entities with active-only iteration
#[derive(Debug, Clone)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: SoftDelete> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Drop every entry, live or dead
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of stored entries, including deactivated ones
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_active())
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}
