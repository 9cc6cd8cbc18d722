/// Lock-free stream-compaction target for the parallel culler.
///
/// Many workers filter a large index range down to the passing subset;
/// each worker batches its passes locally and publishes them with ONE
/// atomic fetch-and-add reserving a contiguous output range. This keeps
/// global contention to one atomic per group instead of one per element.
///
/// Output order is group completion order — nondeterministic across
/// runs. Callers that need an order re-establish it with an explicit
/// sort afterwards.

use std::sync::atomic::{AtomicU32, Ordering};

/// Compacted output array with an atomic cursor.
///
/// Reset once per frame before culling; consumed once after the wait
/// barrier. Slots are written relaxed: every slot is owned by exactly one
/// reservation, and the scope join that ends the culling phase orders all
/// writes before the single-threaded read-back.
pub struct CompactionBuffer {
    slots: Vec<AtomicU32>,
    counter: AtomicU32,
}

impl CompactionBuffer {
    /// Create an empty buffer; call [`reset`](Self::reset) before use.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            counter: AtomicU32::new(0),
        }
    }

    /// Clear the cursor and ensure room for `capacity` entries.
    ///
    /// `&mut self`: resetting is exclusive to the frame setup phase.
    pub fn reset(&mut self, capacity: usize) {
        if self.slots.len() < capacity {
            self.slots.resize_with(capacity, || AtomicU32::new(0));
        }
        self.counter.store(0, Ordering::Relaxed);
    }

    /// Reserve a contiguous range of `count` output slots; returns its base.
    ///
    /// The caller must have at most `capacity` total entries to publish
    /// across all reservations (guaranteed: each input item reserves at
    /// most one slot).
    pub fn reserve(&self, count: u32) -> u32 {
        self.counter.fetch_add(count, Ordering::Relaxed)
    }

    /// Publish one value into a reserved slot.
    pub fn publish(&self, slot: u32, value: u32) {
        self.slots[slot as usize].store(value, Ordering::Relaxed);
    }

    /// Number of published entries.
    pub fn len(&self) -> usize {
        (self.counter.load(Ordering::Relaxed) as usize).min(self.slots.len())
    }

    /// Whether nothing was published this frame.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the compacted entries into `out` (cleared first).
    pub fn drain_into(&self, out: &mut Vec<u32>) {
        out.clear();
        let len = self.len();
        out.extend(self.slots[..len].iter().map(|s| s.load(Ordering::Relaxed)));
    }
}

impl Default for CompactionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "compaction_tests.rs"]
mod tests;
