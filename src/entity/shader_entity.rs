/// GPU-facing entity record and array header.
///
/// Layout, field order and the type tags are wire contract with the
/// shading code; do not reorder fields without a matching shader change.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

/// Entity array capacity (build-time constant, mirrored in shaders).
pub const SHADER_ENTITY_CAPACITY: usize = 256;
/// Matrix array capacity (build-time constant, mirrored in shaders).
pub const MATRIX_CAPACITY: usize = 4096;

/// Sentinel for an unused 16-bit index half.
pub const INDEX_NONE: u32 = 0xFFFF;

// ===== ENTITY TYPE TAGS =====

pub const ENTITY_TYPE_DECAL: u32 = 0;
pub const ENTITY_TYPE_ENV_PROBE: u32 = 1;
pub const ENTITY_TYPE_DIRECTIONAL_LIGHT: u32 = 2;
pub const ENTITY_TYPE_POINT_LIGHT: u32 = 3;
pub const ENTITY_TYPE_SPOT_LIGHT: u32 = 4;
pub const ENTITY_TYPE_FORCE_FIELD_POINT: u32 = 5;
pub const ENTITY_TYPE_FORCE_FIELD_PLANE: u32 = 6;

// ===== ENTITY FLAGS =====

pub const ENTITY_FLAG_CAST_SHADOW: u32 = 1 << 0;
pub const ENTITY_FLAG_VOLUMETRICS: u32 = 1 << 1;

/// One 64-byte shader entity record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ShaderEntity {
    /// World position
    pub position: [f32; 3],
    /// One of the `ENTITY_TYPE_*` tags
    pub entity_type: u32,
    /// World direction (light direction, decal forward, field direction)
    pub direction: [f32; 3],
    /// Influence radius / extent
    pub range: f32,
    /// RGBA8-packed color
    pub color: u32,
    /// Intensity (lights), emissive strength (decals), gravity (fields)
    pub energy: f32,
    /// Matrix-array offset (low 16) and secondary index (high 16)
    pub indices: u32,
    /// `ENTITY_FLAG_*` bits
    pub flags: u32,
    /// Culling layer mask the entity was visible through
    pub layer_mask: u32,
    /// Cosine of the spot outer cone half-angle; 0 otherwise
    pub cone_angle_cos: f32,
    pub _pad: [u32; 2],
}

impl ShaderEntity {
    /// Pack the matrix-array offset and the secondary index (shadow
    /// slot, cube index or probe texture) into the shared index field.
    pub fn set_indices(&mut self, matrix_index: u32, secondary_index: u32) {
        debug_assert!(matrix_index <= INDEX_NONE && secondary_index <= INDEX_NONE);
        self.indices = (matrix_index & 0xFFFF) | ((secondary_index & 0xFFFF) << 16);
    }

    /// Matrix-array offset, or `INDEX_NONE`.
    pub fn matrix_index(&self) -> u32 {
        self.indices & 0xFFFF
    }

    /// Secondary index (shadow slot, cube index, probe texture), or
    /// `INDEX_NONE`.
    pub fn secondary_index(&self) -> u32 {
        self.indices >> 16
    }
}

/// Contiguous category ranges inside the entity array.
///
/// Field order is wire contract; shaders read this header verbatim to
/// iterate one category at a time.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct EntityArrayHeader {
    pub decal_offset: u32,
    pub decal_count: u32,
    pub probe_offset: u32,
    pub probe_count: u32,
    pub light_offset: u32,
    pub light_count: u32,
    pub force_field_offset: u32,
    pub force_field_count: u32,
}

/// Pack a linear color + alpha into RGBA8 (component clamp to [0, 1]).
pub fn pack_color(color: Vec4) -> u32 {
    let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    quantize(color.x)
        | (quantize(color.y) << 8)
        | (quantize(color.z) << 16)
        | (quantize(color.w) << 24)
}

#[cfg(test)]
#[path = "shader_entity_tests.rs"]
mod tests;
