//! Entity packing module
//!
//! Serialization of the visible sets into the bounded, byte-exact
//! GPU entity/matrix arrays and their category-range header.

mod bounded_vec;
mod packer;
mod shader_entity;

pub use bounded_vec::BoundedVec;
pub use packer::{pack_entities, PackedEntities};
pub use shader_entity::{
    pack_color, EntityArrayHeader, ShaderEntity, ENTITY_FLAG_CAST_SHADOW,
    ENTITY_FLAG_VOLUMETRICS, ENTITY_TYPE_DECAL, ENTITY_TYPE_DIRECTIONAL_LIGHT,
    ENTITY_TYPE_ENV_PROBE, ENTITY_TYPE_FORCE_FIELD_PLANE, ENTITY_TYPE_FORCE_FIELD_POINT,
    ENTITY_TYPE_POINT_LIGHT, ENTITY_TYPE_SPOT_LIGHT, INDEX_NONE, MATRIX_CAPACITY,
    SHADER_ENTITY_CAPACITY,
};
