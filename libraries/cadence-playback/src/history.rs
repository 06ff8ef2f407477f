//! Recently played items
//!
//! Backs `Player::previous`. The buffer is bounded; once full, the oldest
//! entry makes room for the newest.

use cadence_core::PlayableItem;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History {
    /// Most recent at the back
    items: VecDeque<PlayableItem>,
    capacity: usize,
}

impl History {
    /// History keeping at most `capacity` items; zero keeps none
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn push(&mut self, item: PlayableItem) {
        if self.capacity == 0 {
            return;
        }
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Take the most recent item
    pub fn pop(&mut self) -> Option<PlayableItem> {
        self.items.pop_back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PlayableItem> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
