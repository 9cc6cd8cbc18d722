/// Frame-scoped batch arena.
///
/// Render queues are runs of batches inside one linear storage that is
/// bulk-reset every frame; a queue is addressed by a `BatchRange` handle
/// (indices + generation), never a pointer. `reset` bumps the
/// generation, so a handle kept across frames trips a debug assert
/// instead of silently reading another frame's batches.

use rdst::RadixSort;

use super::render_batch::RenderBatch;

/// Queue sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending distance (opaque passes, early-z efficiency)
    FrontToBack,
    /// Descending distance (blended passes, correctness)
    BackToFront,
}

/// Handle to a run of batches inside the arena, valid for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    start: u32,
    end: u32,
    generation: u32,
}

impl BatchRange {
    /// Number of batches in the range.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Linear storage for the frame's render batches.
pub struct BatchArena {
    storage: Vec<RenderBatch>,
    generation: u32,
}

impl BatchArena {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            generation: 0,
        }
    }

    /// Bulk-reset for a new frame; all prior `BatchRange` handles become
    /// invalid. Storage capacity is kept.
    pub fn reset(&mut self) {
        self.storage.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current generation (matches handles created since the last reset).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start appending a queue. Queues must be built one at a time; the
    /// builder borrows the arena exclusively until `finish`.
    pub fn begin_queue(&mut self) -> QueueBuilder<'_> {
        let start = self.storage.len() as u32;
        QueueBuilder { arena: self, start }
    }

    /// Batches of a range.
    pub fn batches(&self, range: BatchRange) -> &[RenderBatch] {
        debug_assert_eq!(
            range.generation, self.generation,
            "BatchRange outlived its arena generation"
        );
        &self.storage[range.start as usize..range.end as usize]
    }

    /// Radix-sort a range in place. Back-to-front is the ascending sort
    /// reversed; the key layout has no descending mode.
    pub fn sort(&mut self, range: BatchRange, order: SortOrder) {
        debug_assert_eq!(
            range.generation, self.generation,
            "BatchRange outlived its arena generation"
        );
        let slice = &mut self.storage[range.start as usize..range.end as usize];
        slice.radix_sort_unstable();
        if order == SortOrder::BackToFront {
            slice.reverse();
        }
    }
}

impl Default for BatchArena {
    fn default() -> Self {
        Self::new()
    }
}

/// In-progress queue appending into the arena.
pub struct QueueBuilder<'a> {
    arena: &'a mut BatchArena,
    start: u32,
}

impl QueueBuilder<'_> {
    pub fn push(&mut self, batch: RenderBatch) {
        self.arena.storage.push(batch);
    }

    /// Seal the queue and hand back its range.
    pub fn finish(self) -> BatchRange {
        BatchRange {
            start: self.start,
            end: self.arena.storage.len() as u32,
            generation: self.arena.generation,
        }
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
