// Undo history: one mask snapshot per finished gesture.
// Visual expectation: pressing undo jumps back one whole stroke, never half of one.

use std::collections::VecDeque;

use crate::mask::Mask;

/// Undo steps kept unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Oldest-first stack of mask snapshots.
///
/// The bottom entry is the state undo falls back to; it is never popped by
/// `undo`, only pushed out by newer snapshots once the stack is full.
pub struct History {
    entries: VecDeque<Mask>,
    capacity: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: &Mask, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial.clone());
        Self { entries, capacity }
    }

    /// Record the current mask. Drops the oldest snapshot when over capacity.
    pub fn snapshot(&mut self, mask: &Mask) {
        self.entries.push_back(mask.clone());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::debug!("history full ({}), dropped oldest snapshot", self.capacity);
        }
    }

    /// Step back one snapshot and copy it into `mask`.
    /// Returns false (and leaves `mask` alone) when only one entry is left.
    pub fn undo(&mut self, mask: &mut Mask) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop_back();
        match self.entries.back() {
            Some(top) => {
                mask.copy_from(top);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    /// Most recent snapshot.
    pub fn top(&self) -> Option<&Mask> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mask filled with `tag`, so snapshots are easy to tell apart.
    fn tagged(tag: f32) -> Mask {
        let mut m = Mask::new(4, 4);
        m.fill(tag);
        m
    }

    #[test]
    fn undo_on_initial_entry_is_a_noop() {
        let mut mask = Mask::new(4, 4);
        let mut history = History::new(&mask, 5);
        mask.fill(0.25);
        assert!(!history.undo(&mut mask));
        assert_eq!(mask.alpha(0, 0), 0.25);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_walks_back_one_snapshot_at_a_time() {
        let mut mask = Mask::new(4, 4);
        let mut history = History::new(&mask, 10);
        for tag in [0.1, 0.2, 0.3] {
            mask.fill(tag);
            history.snapshot(&mask);
        }
        assert!(history.undo(&mut mask));
        assert_eq!(mask.alpha(0, 0), 0.2);
        assert!(history.undo(&mut mask));
        assert_eq!(mask.alpha(0, 0), 0.1);
        assert!(history.undo(&mut mask));
        assert!(mask.is_opaque());
        assert!(!history.undo(&mut mask));
        assert!(!history.can_undo());
    }

    #[test]
    fn oldest_snapshots_are_evicted() {
        let mask = Mask::new(4, 4);
        let mut history = History::new(&mask, 3);
        for i in 1..=5 {
            history.snapshot(&tagged(i as f32 / 10.0));
        }
        assert_eq!(history.len(), 3);
        let mut current = tagged(0.5);
        assert!(history.undo(&mut current));
        assert_eq!(current.alpha(0, 0), 0.4);
        assert!(history.undo(&mut current));
        assert_eq!(current.alpha(0, 0), 0.3);
        assert!(!history.undo(&mut current));
    }

    #[test]
    fn zero_capacity_still_keeps_one_entry() {
        let mask = Mask::new(2, 2);
        let mut history = History::new(&mask, 0);
        history.snapshot(&tagged(0.5));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.top().map(|m| m.alpha(0, 0)), Some(0.5));
    }

    #[test]
    fn snapshots_do_not_alias_the_live_mask() {
        let mut mask = Mask::new(4, 4);
        let mut history = History::new(&mask, 4);
        mask.fill(0.0);
        history.snapshot(&mask);
        mask.fill(0.75);
        assert_eq!(history.top().map(|m| m.alpha(1, 1)), Some(0.0));
    }
}
