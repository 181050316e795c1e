//! Worklist of cells at or above capacity.

use crate::topple::ToppleOrder;
use std::collections::VecDeque;

/// Duplicate-free set of flat cell indices, kept in insertion order.
///
/// A membership bitmap sized to the grid makes `insert` idempotent in O(1);
/// the deque gives the deterministic tie-break. An index that is popped and
/// later re-inserted goes to the back, like a re-added set member.
#[derive(Clone, Debug, Default)]
pub struct UnstableSet {
    queue: VecDeque<usize>,
    member: Vec<bool>,
}

impl UnstableSet {
    #[must_use]
    pub fn with_cells(cell_count: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            member: vec![false; cell_count],
        }
    }

    /// Returns `false` if `index` was already pending.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.member[index] {
            return false;
        }
        self.member[index] = true;
        self.queue.push_back(index);
        true
    }

    pub fn pop(&mut self, order: ToppleOrder) -> Option<usize> {
        let index = match order {
            ToppleOrder::Fifo => self.queue.pop_front(),
            ToppleOrder::Lifo => self.queue.pop_back(),
        }?;
        self.member[index] = false;
        Some(index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.member.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending indices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }
}
