/// Packed render-batch sort key.
///
/// One u64 encodes "draw instance I of mesh M at distance D" so whole
/// queues order by raw key comparison, distance first, without decoding:
///
/// ```text
/// bits 63..48  distance (f16 bit pattern, non-negative)
/// bits 47..24  mesh index (24 bit)
/// bits 23..0   instance index (24 bit)
/// ```
///
/// Non-negative half floats compare correctly as unsigned bit patterns,
/// so ascending key order is ascending distance; mesh then instance act
/// as tiebreaks within equal distance.

use half::f16;
use rdst::RadixKey;

/// Largest mesh or instance index the 24-bit fields can carry.
pub const BATCH_INDEX_MAX: u32 = (1 << 24) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderBatch(u64);

impl RenderBatch {
    /// Encode a batch. Indices above 24 bits are an upstream contract
    /// violation, not a runtime condition.
    pub fn encode(mesh_index: u32, instance_index: u32, distance: f32) -> Self {
        debug_assert!(mesh_index <= BATCH_INDEX_MAX, "mesh index exceeds 24 bits");
        debug_assert!(
            instance_index <= BATCH_INDEX_MAX,
            "instance index exceeds 24 bits"
        );
        let distance_bits = f16::from_f32(distance.max(0.0)).to_bits() as u64;
        Self(
            (distance_bits << 48)
                | ((mesh_index as u64 & 0xFF_FFFF) << 24)
                | (instance_index as u64 & 0xFF_FFFF),
        )
    }

    /// Mesh index.
    pub fn mesh_index(&self) -> u32 {
        ((self.0 >> 24) & 0xFF_FFFF) as u32
    }

    /// Instance index.
    pub fn instance_index(&self) -> u32 {
        (self.0 & 0xFF_FFFF) as u32
    }

    /// Viewer distance (half precision, lossy but order preserving).
    pub fn distance(&self) -> f32 {
        f16::from_bits((self.0 >> 48) as u16).to_f32()
    }

    /// Raw packed key.
    pub fn key(&self) -> u64 {
        self.0
    }
}

impl RadixKey for RenderBatch {
    const LEVELS: usize = 8;

    #[inline]
    fn get_level(&self, level: usize) -> u8 {
        (self.0 >> (level * 8)) as u8
    }
}

#[cfg(test)]
#[path = "render_batch_tests.rs"]
mod tests;
