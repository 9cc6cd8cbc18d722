/// Visibility — the per-frame result of culling a scene from one camera.
///
/// Owns the compacted index sets per category plus the compaction
/// scratch they are produced through. The struct is retained across
/// frames and recycled (reset each frame) so the hot path allocates
/// nothing in steady state; the RESULTS are valid for one frame only.

use glam::Vec4;
use half::f16;

use crate::scene::Scene;
use super::compaction::CompactionBuffer;

/// A visible light: scene light index + viewer distance, both 16 bit.
///
/// The distance is half precision and is the shadow-priority sort key:
/// closer lights win shadow slots. Directional lights carry a synthetic
/// distance of 0 so they always sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleLight {
    index: u16,
    distance_bits: u16,
}

impl VisibleLight {
    /// Create from a scene light index and a world-space distance.
    pub fn new(index: u32, distance: f32) -> Self {
        debug_assert!(index <= u16::MAX as u32, "light index exceeds 16 bits");
        Self {
            index: index as u16,
            distance_bits: f16::from_f32(distance.max(0.0)).to_bits(),
        }
    }

    /// Scene light index.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Viewer distance (half precision; 0 for directional lights).
    pub fn distance(&self) -> f32 {
        f16::from_bits(self.distance_bits).to_f32()
    }

    /// Sort key: distance in the high bits, index tiebreak in the low.
    ///
    /// Non-negative half floats compare correctly by bit pattern, so the
    /// packed key orders by distance without decoding.
    pub fn sort_key(&self) -> u32 {
        ((self.distance_bits as u32) << 16) | self.index as u32
    }

    /// Pack into one u32 for the compaction buffer.
    pub(crate) fn pack(&self) -> u32 {
        ((self.distance_bits as u32) << 16) | self.index as u32
    }

    /// Inverse of [`pack`](Self::pack).
    pub(crate) fn unpack(raw: u32) -> Self {
        Self {
            index: (raw & 0xFFFF) as u16,
            distance_bits: (raw >> 16) as u16,
        }
    }
}

/// Per-frame visibility result (index sets per scene category).
pub struct Visibility {
    /// Visible object indices (compaction order, nondeterministic)
    pub visible_objects: Vec<u32>,
    /// Visible lights, sorted by ascending distance after culling
    pub visible_lights: Vec<VisibleLight>,
    /// Visible decal indices
    pub visible_decals: Vec<u32>,
    /// Visible environment probe indices
    pub visible_probes: Vec<u32>,
    /// Visible particle emitter indices
    pub visible_emitters: Vec<u32>,
    /// Visible hair group indices
    pub visible_hairs: Vec<u32>,

    /// Closest requested planar-reflection plane (normal, d), if any
    pub reflection_plane: Option<Vec4>,
    /// Whether any visible light wants volumetric scattering
    pub volumetric_lights_requested: bool,

    // Compaction scratch, reset each frame before culling and consumed
    // once after the wait barrier.
    pub(crate) object_compaction: CompactionBuffer,
    pub(crate) light_compaction: CompactionBuffer,
    pub(crate) decal_compaction: CompactionBuffer,
    pub(crate) probe_compaction: CompactionBuffer,
    pub(crate) emitter_compaction: CompactionBuffer,
    pub(crate) hair_compaction: CompactionBuffer,
    pub(crate) light_scratch: Vec<u32>,
}

impl Visibility {
    /// Create empty visibility scratch.
    pub fn new() -> Self {
        Self {
            visible_objects: Vec::new(),
            visible_lights: Vec::new(),
            visible_decals: Vec::new(),
            visible_probes: Vec::new(),
            visible_emitters: Vec::new(),
            visible_hairs: Vec::new(),
            reflection_plane: None,
            volumetric_lights_requested: false,
            object_compaction: CompactionBuffer::new(),
            light_compaction: CompactionBuffer::new(),
            decal_compaction: CompactionBuffer::new(),
            probe_compaction: CompactionBuffer::new(),
            emitter_compaction: CompactionBuffer::new(),
            hair_compaction: CompactionBuffer::new(),
            light_scratch: Vec::new(),
        }
    }

    /// Reset results and size the compaction scratch for `scene`.
    pub(crate) fn reset(&mut self, scene: &Scene) {
        self.visible_objects.clear();
        self.visible_lights.clear();
        self.visible_decals.clear();
        self.visible_probes.clear();
        self.visible_emitters.clear();
        self.visible_hairs.clear();
        self.reflection_plane = None;
        self.volumetric_lights_requested = false;

        self.object_compaction.reset(scene.object_aabbs.len());
        self.light_compaction.reset(scene.light_aabbs.len());
        self.decal_compaction.reset(scene.decal_aabbs.len());
        self.probe_compaction.reset(scene.probe_aabbs.len());
        self.emitter_compaction.reset(scene.emitter_aabbs.len());
        self.hair_compaction.reset(scene.hair_aabbs.len());
    }

    /// Membership check for downstream passes. Linear scan; the visible
    /// sets are compact and this is not on the per-item hot path.
    pub fn is_object_visible(&self, object_index: u32) -> bool {
        self.visible_objects.contains(&object_index)
    }

    /// Membership check over the sorted light list.
    pub fn is_light_visible(&self, light_index: usize) -> bool {
        self.visible_lights.iter().any(|light| light.index() == light_index)
    }

    /// Total number of visible entities across all categories.
    pub fn total_visible(&self) -> usize {
        self.visible_objects.len()
            + self.visible_lights.len()
            + self.visible_decals.len()
            + self.visible_probes.len()
            + self.visible_emitters.len()
            + self.visible_hairs.len()
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
