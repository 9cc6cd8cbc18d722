/// Allocates shadow-map array slots for one frame.
///
/// The shadow atlas has two independent budgets: 2D-array slots (spot
/// lights and directional cascades) and cube-array slots (point lights).
/// Slots are consumed greedily in the caller's traversal order and never
/// freed individually — the allocator is reset wholesale each frame.
///
/// # Example
///
/// ```ignore
/// let mut slots = ShadowSlotAllocator::new(8, 2);
/// let cascades = slots.alloc_2d(3);  // Some(0): slots 0..3
/// let spot = slots.alloc_2d(1);      // Some(3)
/// let point = slots.alloc_cube();    // Some(0)
/// slots.reset();                     // next frame starts over
/// ```
pub struct ShadowSlotAllocator {
    capacity_2d: u32,
    capacity_cube: u32,
    next_2d: u32,
    next_cube: u32,
}

impl ShadowSlotAllocator {
    /// Create an allocator with the given per-frame budgets.
    pub fn new(capacity_2d: u32, capacity_cube: u32) -> Self {
        Self {
            capacity_2d,
            capacity_cube,
            next_2d: 0,
            next_cube: 0,
        }
    }

    /// Start a new frame: all slots become available again.
    pub fn reset(&mut self) {
        self.next_2d = 0;
        self.next_cube = 0;
    }

    /// Allocate `count` CONTIGUOUS 2D-array slots; returns the base slot.
    ///
    /// All or nothing: if fewer than `count` slots remain, nothing is
    /// consumed and `None` is returned (a directional light is never
    /// partially allocated).
    pub fn alloc_2d(&mut self, count: u32) -> Option<u32> {
        if self.next_2d + count > self.capacity_2d {
            return None;
        }
        let base = self.next_2d;
        self.next_2d += count;
        Some(base)
    }

    /// Allocate one cube-array slot.
    pub fn alloc_cube(&mut self) -> Option<u32> {
        if self.next_cube >= self.capacity_cube {
            return None;
        }
        let slot = self.next_cube;
        self.next_cube += 1;
        Some(slot)
    }

    /// 2D slots consumed so far this frame.
    pub fn used_2d(&self) -> u32 {
        self.next_2d
    }

    /// Cube slots consumed so far this frame.
    pub fn used_cube(&self) -> u32 {
        self.next_cube
    }
}

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;
