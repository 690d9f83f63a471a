//! Slot storage with stable handles.
//!
//! Vacant slots form a chain threaded through the slot vector itself, so
//! reuse costs no side allocation:
//!
//! ```text
//!   slots:        [ Occ(a) | Vac(→3) | Occ(b) | Vac(end) ]
//!   first_vacant: 1 ───────────┘                 ▲
//!                              └─────────────────┘
//! ```
//!
//! A [`SlotId`] stays valid until its value is removed. After that the slot
//! may be handed out again, so holders must forget ids of removed values.

use std::mem;

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_vacant: Option<usize> },
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    first_vacant: Option<usize>,
    live: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            first_vacant: None,
            live: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        self.live += 1;
        if let Some(idx) = self.first_vacant {
            if let Some(slot) = self.slots.get_mut(idx) {
                if let Slot::Vacant { next_vacant } = *slot {
                    self.first_vacant = next_vacant;
                    *slot = Slot::Occupied(value);
                    return SlotId(idx);
                }
            }
            // A broken chain only costs reuse; append instead.
            self.first_vacant = None;
        }
        self.slots.push(Slot::Occupied(value));
        SlotId(self.slots.len() - 1)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }
        let vacated = Slot::Vacant {
            next_vacant: self.first_vacant,
        };
        match mem::replace(slot, vacated) {
            Slot::Occupied(value) => {
                self.first_vacant = Some(id.0);
                self.live -= 1;
                Some(value)
            },
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Slots allocated, live or vacant.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.first_vacant = None;
        self.live = 0;
    }

    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
    }

    pub fn approx_bytes(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Slot<T>>()
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
