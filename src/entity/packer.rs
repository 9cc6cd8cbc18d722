/// Shader entity packer.
///
/// Serializes the frame's visible decals, probes and lights plus all
/// force fields into the bounded GPU arrays. Category order (decals,
/// probes, lights, force fields) and the reverse traversal for the
/// blended categories are wire contract; lights follow the shadow plan
/// so a record's shadow slot is the slot the shadow pass renders into.

use bytemuck::Zeroable;
use glam::Mat4;

use crate::cull::Visibility;
use crate::engine_warn;
use crate::scene::{ForceFieldKind, LightFlags, LightKind, Scene, LAYER_ALL};
use crate::shadow::{ShadowPlan, ShadowSlot};

use super::bounded_vec::BoundedVec;
use super::shader_entity::{
    pack_color, EntityArrayHeader, ShaderEntity, ENTITY_FLAG_CAST_SHADOW,
    ENTITY_FLAG_VOLUMETRICS, ENTITY_TYPE_DECAL, ENTITY_TYPE_DIRECTIONAL_LIGHT,
    ENTITY_TYPE_ENV_PROBE, ENTITY_TYPE_FORCE_FIELD_PLANE, ENTITY_TYPE_FORCE_FIELD_POINT,
    ENTITY_TYPE_POINT_LIGHT, ENTITY_TYPE_SPOT_LIGHT, INDEX_NONE, MATRIX_CAPACITY,
    SHADER_ENTITY_CAPACITY,
};

const LOG_SOURCE: &str = "EntityPacker";

/// The frame's GPU-upload payload: entity array, matrix array, header.
pub struct PackedEntities {
    /// Category offset/count ranges (wire contract)
    pub header: EntityArrayHeader,
    /// Entity records, category-contiguous
    pub entities: BoundedVec<ShaderEntity>,
    /// Matrices referenced by the records (inverse world, shadow VP)
    pub matrices: BoundedVec<Mat4>,
}

impl PackedEntities {
    pub fn new() -> Self {
        Self {
            header: EntityArrayHeader::default(),
            entities: BoundedVec::new(SHADER_ENTITY_CAPACITY),
            matrices: BoundedVec::new(MATRIX_CAPACITY),
        }
    }

    /// Drop the previous frame's payload, keeping the allocations.
    pub fn reset(&mut self) {
        self.header = EntityArrayHeader::default();
        self.entities.clear();
        self.matrices.clear();
    }

    /// Whether either array rejected entries this frame.
    pub fn overflowed(&self) -> bool {
        self.entities.overflowed() || self.matrices.overflowed()
    }
}

impl Default for PackedEntities {
    fn default() -> Self {
        Self::new()
    }
}

/// Pack the visible sets into `out`.
///
/// Overflow of either array stops the current category and logs once;
/// the arrays never hold a partially initialized record.
pub fn pack_entities(
    scene: &Scene,
    visibility: &Visibility,
    shadow_plan: &ShadowPlan,
    out: &mut PackedEntities,
) {
    out.reset();
    let mut overflow_logged = false;

    // ===== DECALS (reverse visible order, back-to-front blending) =====

    out.header.decal_offset = out.entities.len() as u32;
    for &decal_index in visibility.visible_decals.iter().rev() {
        let decal = &scene.decals[decal_index as usize];

        let matrix_index = match out.matrices.try_push(decal.world.inverse()) {
            Ok(index) => index,
            Err(_) => {
                log_overflow_once(&mut overflow_logged);
                break;
            }
        };

        let mut entity = ShaderEntity::zeroed();
        entity.entity_type = ENTITY_TYPE_DECAL;
        entity.position = decal.world.w_axis.truncate().to_array();
        entity.direction = decal.world.z_axis.truncate().normalize_or_zero().to_array();
        entity.range = scene.decal_aabbs[decal_index as usize].half_extents().length();
        entity.color = pack_color(decal.color);
        entity.energy = decal.emissive;
        entity.layer_mask = scene.decal_aabbs[decal_index as usize].layer_mask;
        entity.set_indices(matrix_index, INDEX_NONE);

        if out.entities.try_push(entity).is_err() {
            log_overflow_once(&mut overflow_logged);
            break;
        }
    }
    out.header.decal_count = out.entities.len() as u32 - out.header.decal_offset;

    // ===== ENV PROBES (reverse visible order) =====

    out.header.probe_offset = out.entities.len() as u32;
    for &probe_index in visibility.visible_probes.iter().rev() {
        let probe = &scene.probes[probe_index as usize];

        let matrix_index = match out.matrices.try_push(probe.world.inverse()) {
            Ok(index) => index,
            Err(_) => {
                log_overflow_once(&mut overflow_logged);
                break;
            }
        };

        let mut entity = ShaderEntity::zeroed();
        entity.entity_type = ENTITY_TYPE_ENV_PROBE;
        entity.position = probe.position.to_array();
        entity.range = probe.range;
        entity.layer_mask = scene.probe_aabbs[probe_index as usize].layer_mask;
        entity.set_indices(matrix_index, probe.texture_index & 0xFFFF);

        if out.entities.try_push(entity).is_err() {
            log_overflow_once(&mut overflow_logged);
            break;
        }
    }
    out.header.probe_count = out.entities.len() as u32 - out.header.probe_offset;

    // ===== LIGHTS (visible order = shadow plan order) =====

    out.header.light_offset = out.entities.len() as u32;
    'lights: for (ordinal, visible) in visibility.visible_lights.iter().enumerate() {
        let light_index = visible.index();
        let light = &scene.lights[light_index];

        let mut matrix_index = INDEX_NONE;
        let mut secondary_index = INDEX_NONE;
        let mut flags = 0;

        if let Some(entry) = shadow_plan.entry_for_visible(ordinal) {
            flags |= ENTITY_FLAG_CAST_SHADOW;
            match entry.slot {
                ShadowSlot::TwoD { base, .. } => {
                    secondary_index = base;
                    // 2D lookups need the shadow view-projections; cube
                    // faces are sampled by direction and need none
                    for camera in &entry.cameras {
                        match out.matrices.try_push(camera.view_projection) {
                            Ok(index) => {
                                if matrix_index == INDEX_NONE {
                                    matrix_index = index;
                                }
                            }
                            Err(_) => {
                                log_overflow_once(&mut overflow_logged);
                                break 'lights;
                            }
                        }
                    }
                }
                ShadowSlot::Cube { index } => secondary_index = index,
            }
        }
        if light.flags.contains(LightFlags::VOLUMETRICS) {
            flags |= ENTITY_FLAG_VOLUMETRICS;
        }

        let mut entity = ShaderEntity::zeroed();
        entity.entity_type = match light.kind {
            LightKind::Directional => ENTITY_TYPE_DIRECTIONAL_LIGHT,
            LightKind::Point => ENTITY_TYPE_POINT_LIGHT,
            LightKind::Spot => ENTITY_TYPE_SPOT_LIGHT,
        };
        entity.position = light.position.to_array();
        entity.direction = light.direction.to_array();
        entity.range = light.range;
        entity.color = pack_color(light.color.extend(1.0));
        entity.energy = light.energy;
        entity.flags = flags;
        entity.layer_mask = scene.light_aabbs[light_index].layer_mask;
        entity.cone_angle_cos = match light.kind {
            LightKind::Spot => light.outer_cone_angle.cos(),
            _ => 0.0,
        };
        entity.set_indices(matrix_index, secondary_index);

        if out.entities.try_push(entity).is_err() {
            log_overflow_once(&mut overflow_logged);
            break;
        }
    }
    out.header.light_count = out.entities.len() as u32 - out.header.light_offset;

    // ===== FORCE FIELDS (all, unculled) =====

    out.header.force_field_offset = out.entities.len() as u32;
    for field in &scene.force_fields {
        let mut entity = ShaderEntity::zeroed();
        entity.entity_type = match field.kind {
            ForceFieldKind::Point => ENTITY_TYPE_FORCE_FIELD_POINT,
            ForceFieldKind::Plane => ENTITY_TYPE_FORCE_FIELD_PLANE,
        };
        entity.position = field.position.to_array();
        entity.direction = field.direction.to_array();
        entity.range = field.range;
        entity.energy = field.gravity;
        entity.layer_mask = LAYER_ALL;
        entity.set_indices(INDEX_NONE, INDEX_NONE);

        if out.entities.try_push(entity).is_err() {
            log_overflow_once(&mut overflow_logged);
            break;
        }
    }
    out.header.force_field_count = out.entities.len() as u32 - out.header.force_field_offset;
}

fn log_overflow_once(logged: &mut bool) {
    if !*logged {
        engine_warn!(
            LOG_SOURCE,
            "Shader entity/matrix capacity exceeded; remaining entries dropped this frame"
        );
        *logged = true;
    }
}

#[cfg(test)]
#[path = "packer_tests.rs"]
mod tests;
