//! Recency ordering over arena-resident nodes.
//!
//! Each node knows its `newer` and `older` neighbour by [`SlotId`]. The list
//! itself only tracks the two ends:
//!
//! ```text
//!   newest ─► [a] ─older─► [b] ─older─► [c] ◄─ oldest
//!             [a] ◄─newer─ [b] ◄─newer─ [c]
//! ```
//!
//! Ids handed out by [`RecencyList::push_front`] stay valid until that node
//! is removed, however the other nodes are reordered. Every mutation is O(1)
//! except `clear`, which drops all values.

use std::iter::FusedIterator;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    newer: Option<SlotId>,
    older: Option<SlotId>,
}

#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    newest: Option<SlotId>,
    oldest: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserves room for `capacity` nodes up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            newest: None,
            oldest: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn front(&self) -> Option<&T> {
        self.get(self.newest?)
    }

    pub fn back(&self) -> Option<&T> {
        self.get(self.oldest?)
    }

    /// Id of the least recent node, the next eviction victim.
    pub fn back_id(&self) -> Option<SlotId> {
        self.oldest
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Values from newest to oldest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.newest,
            remaining: self.len(),
        }
    }

    /// Node ids from newest to oldest.
    pub fn iter_ids(&self) -> Ids<'_, T> {
        Ids(self.iter())
    }

    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            newer: None,
            older: None,
        });
        self.link_newest(id);
        id
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Makes `id` the newest node. Returns `false` for an unknown id.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.newest != Some(id) {
            self.unlink(id);
            self.link_newest(id);
        }
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.newest = None;
        self.oldest = None;
    }

    /// Like [`clear`](Self::clear), and also hands node storage back.
    pub fn clear_shrink(&mut self) {
        self.clear();
        self.arena.shrink_to_fit();
    }

    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.arena.approx_bytes()
    }

    /// Makes `newer` and `older` adjacent. `None` on either side means that
    /// side is an end of the list.
    fn join(&mut self, newer: Option<SlotId>, older: Option<SlotId>) {
        match newer.and_then(|id| self.arena.get_mut(id)) {
            Some(node) => node.older = older,
            None => self.newest = older,
        }
        match older.and_then(|id| self.arena.get_mut(id)) {
            Some(node) => node.newer = newer,
            None => self.oldest = newer,
        }
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (newer, older) = (node.newer.take(), node.older.take());
        self.join(newer, older);
        Some(())
    }

    fn link_newest(&mut self, id: SlotId) {
        let previous = self.newest;
        self.join(Some(id), previous);
        self.join(None, Some(id));
    }

    /// Walks newest to oldest and verifies every back link, both ends and the
    /// node count.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        let mut expected_newer = None;
        let mut cursor = self.newest;
        let mut walked = 0usize;

        while let Some(id) = cursor {
            walked += 1;
            if walked > self.len() {
                return Err(InvariantError::new("recency list loops back on itself"));
            }
            let node = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("link points at vacant slot {}", id.index()))
            })?;
            if node.newer != expected_newer {
                return Err(InvariantError::new(format!(
                    "slot {} disagrees with its newer neighbour",
                    id.index()
                )));
            }
            expected_newer = Some(id);
            cursor = node.older;
        }

        if self.oldest != expected_newer {
            return Err(InvariantError::new("oldest end is not where the walk stopped"));
        }
        if walked != self.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable, {} stored",
                walked,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a RecencyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    next: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn step(&mut self) -> Option<(SlotId, &'a T)> {
        let id = self.next?;
        let node = self.list.arena.get(id)?;
        self.next = node.older;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, &node.value))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct Ids<'a, T>(Iter<'a, T>);

impl<T> Iterator for Ids<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.step().map(|(id, _)| id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> ExactSizeIterator for Ids<'_, T> {}
