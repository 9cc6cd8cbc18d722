/// Occlusion query lifecycle manager.
///
/// Queries are recorded in frame N (one bounding-box draw each) and
/// their sample counts come back at least one frame later, so read-back
/// is double buffered: resolve never reads the buffer the GPU is still
/// filling for the in-flight frame.
///
/// Allocation is lazy and lock-free: per-entity handle slots plus one
/// monotonic atomic counter shared by the object and light culling
/// dispatches (which run concurrently). Heap exhaustion degrades softly:
/// further requests get no query and count as always visible.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use crate::scene::{Scene, AABB};

/// Handle meaning "no query allocated this frame".
pub const QUERY_NONE: i32 = -1;

/// A pending bounding-box query draw for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryDraw {
    /// Slot in the query heap; the draw goes between QueryBegin/QueryEnd
    pub handle: i32,
    /// World-space bounding box to rasterize as the occlusion proxy
    pub aabb: AABB,
}

/// Per-entity query handles, visibility history and double-buffered
/// read-back for one camera's occlusion culling.
pub struct OcclusionQueryManager {
    capacity: u32,
    allocator: AtomicU32,

    object_queries: Vec<AtomicI32>,
    light_queries: Vec<AtomicI32>,

    // History word per entity: bit 0 = visible this frame, shifted left
    // on every resolve. Zero means occluded for 32 consecutive frames.
    object_history: Vec<AtomicU32>,
    light_history: Vec<AtomicU32>,

    // Double-buffered sample-count read-back, toggled by write_index
    readback: [Vec<u64>; 2],
    write_index: usize,
}

impl OcclusionQueryManager {
    /// Create a manager with a fixed per-frame query heap capacity.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            allocator: AtomicU32::new(0),
            object_queries: Vec::new(),
            light_queries: Vec::new(),
            object_history: Vec::new(),
            light_history: Vec::new(),
            readback: [Vec::new(), Vec::new()],
            write_index: 0,
        }
    }

    /// Query heap capacity (queries per frame).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Fold completed sample counts into the per-entity history.
    ///
    /// Call once per frame BEFORE [`begin_frame`](Self::begin_frame),
    /// with the results of the queries recorded last frame (the handle
    /// slots still hold last frame's allocation). The counts are copied
    /// into the read-back buffer for this frame; entities without a
    /// query are treated as visible.
    pub fn resolve(&mut self, samples: &[u64]) {
        self.readback[self.write_index].clear();
        self.readback[self.write_index].extend_from_slice(samples);

        let results = &self.readback[self.write_index];
        for (slot, history) in self.object_queries.iter().zip(&self.object_history) {
            apply_result(slot, history, results);
        }
        for (slot, history) in self.light_queries.iter().zip(&self.light_history) {
            apply_result(slot, history, results);
        }
    }

    /// Start a new frame: flip the read-back buffers, reset the allocator
    /// and clear all handles. Entity counts size the per-entity arrays;
    /// new entities start with a visible history (never culled blind).
    pub fn begin_frame(&mut self, object_count: usize, light_count: usize) {
        self.write_index ^= 1;
        self.allocator.store(0, Ordering::Relaxed);

        grow_entities(&mut self.object_queries, &mut self.object_history, object_count);
        grow_entities(&mut self.light_queries, &mut self.light_history, light_count);

        for slot in &self.object_queries {
            slot.store(QUERY_NONE, Ordering::Relaxed);
        }
        for slot in &self.light_queries {
            slot.store(QUERY_NONE, Ordering::Relaxed);
        }
    }

    /// Drop this frame's handle allocation without flipping the
    /// read-back buffers or touching the history. Used when query
    /// recording is skipped for a frame so
    /// [`pending_queries`](Self::pending_queries) does not replay
    /// stale handles.
    pub fn clear_pending(&mut self) {
        self.allocator.store(0, Ordering::Relaxed);
        for slot in &self.object_queries {
            slot.store(QUERY_NONE, Ordering::Relaxed);
        }
        for slot in &self.light_queries {
            slot.store(QUERY_NONE, Ordering::Relaxed);
        }
    }

    fn allocate(&self, slot: &AtomicI32) -> i32 {
        let existing = slot.load(Ordering::Relaxed);
        if existing != QUERY_NONE {
            return existing;
        }
        let id = self.allocator.fetch_add(1, Ordering::Relaxed);
        if id >= self.capacity {
            // Heap exhausted for this frame: soft degrade, no query
            return QUERY_NONE;
        }
        // No store race: each entity slot is touched by exactly one lane
        slot.store(id as i32, Ordering::Relaxed);
        id as i32
    }

    /// Lazily allocate a query for an object; returns the handle or
    /// [`QUERY_NONE`] once the heap is exhausted.
    pub fn request_object_query(&self, object_index: usize) -> i32 {
        self.allocate(&self.object_queries[object_index])
    }

    /// Lazily allocate a query for a light.
    pub fn request_light_query(&self, light_index: usize) -> i32 {
        self.allocate(&self.light_queries[light_index])
    }

    /// Mark an object trivially visible this frame (camera inside bounds).
    pub fn mark_object_visible(&self, object_index: usize) {
        self.object_history[object_index].fetch_or(1, Ordering::Relaxed);
    }

    /// Mark a light trivially visible this frame.
    pub fn mark_light_visible(&self, light_index: usize) {
        self.light_history[light_index].fetch_or(1, Ordering::Relaxed);
    }

    /// Visibility predicate from resolved history (32-frame hysteresis):
    /// `false` only after an object was occluded every tracked frame.
    pub fn object_visible(&self, object_index: usize) -> bool {
        self.object_history[object_index].load(Ordering::Relaxed) != 0
    }

    /// Visibility predicate for a light.
    pub fn light_visible(&self, light_index: usize) -> bool {
        self.light_history[light_index].load(Ordering::Relaxed) != 0
    }

    /// Number of queries allocated so far this frame (clamped to capacity).
    pub fn allocated(&self) -> u32 {
        self.allocator.load(Ordering::Relaxed).min(self.capacity)
    }

    /// The bounding-box draws to record for this frame's pending queries.
    ///
    /// One draw per allocated handle, between QueryBegin/QueryEnd in the
    /// external command stream.
    pub fn pending_queries(&self, scene: &Scene) -> Vec<QueryDraw> {
        let mut draws = Vec::with_capacity(self.allocated() as usize);
        collect_draws(&self.object_queries, &scene.object_aabbs, &mut draws);
        collect_draws(&self.light_queries, &scene.light_aabbs, &mut draws);
        draws
    }

    /// Read-back sample count for a handle from the PREVIOUS resolve,
    /// for predication: the shadow pass skips geometry whose proxy
    /// passed zero samples last frame. Handles without data count as
    /// visible.
    pub fn predicate_samples(&self, handle: i32) -> u64 {
        if handle < 0 {
            return 1;
        }
        self.readback[self.write_index ^ 1]
            .get(handle as usize)
            .copied()
            .unwrap_or(1)
    }
}

fn apply_result(slot: &AtomicI32, history: &AtomicU32, results: &[u64]) {
    let handle = slot.load(Ordering::Relaxed);
    // Missing data (no query, or results shorter than the heap) counts
    // as visible; only a completed zero-sample query marks occlusion.
    let visible_bit = if handle < 0 {
        1
    } else {
        match results.get(handle as usize) {
            Some(0) => 0,
            _ => 1,
        }
    };
    let old = history.load(Ordering::Relaxed);
    history.store((old << 1) | visible_bit, Ordering::Relaxed);
}

fn grow_entities(queries: &mut Vec<AtomicI32>, history: &mut Vec<AtomicU32>, count: usize) {
    if queries.len() < count {
        queries.resize_with(count, || AtomicI32::new(QUERY_NONE));
        history.resize_with(count, || AtomicU32::new(1));
    }
}

fn collect_draws(queries: &[AtomicI32], aabbs: &[AABB], draws: &mut Vec<QueryDraw>) {
    for (index, slot) in queries.iter().enumerate().take(aabbs.len()) {
        let handle = slot.load(Ordering::Relaxed);
        if handle != QUERY_NONE {
            draws.push(QueryDraw {
                handle,
                aabb: aabbs[index],
            });
        }
    }
}

#[cfg(test)]
#[path = "query_manager_tests.rs"]
mod tests;
