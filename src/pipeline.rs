//! Per-frame orchestration.
//!
//! `VisibilityPipeline` owns the recycled per-frame state (visibility
//! scratch, occlusion query heap, packed entity arrays) and runs the
//! frame in the fixed order the subsystems contract on:
//!
//! 1. `resolve_occlusion` with last frame's query samples
//! 2. `update_visibility` (begins the occlusion frame, culls)
//! 3. `plan_shadows`
//! 4. `pack_entities`
//! 5. `build_queue` per render pass
//!
//! All renderer toggles live in [`PipelineSettings`]; nothing in the
//! crate reads process-global state.

use crate::batch::{BatchArena, BatchRange, RenderBatch, SortOrder};
use crate::camera::RenderCamera;
use crate::cull::{cull_scene, Visibility};
use crate::entity::{pack_entities, PackedEntities};
use crate::error::{Error, Result};
use crate::occlusion::{OcclusionQueryManager, QueryDraw};
use crate::scene::{ObjectFlags, Scene};
use crate::shadow::{plan_shadows, ShadowPlan};
use crate::{engine_debug, engine_info};

const LOG_SOURCE: &str = "VisibilityPipeline";

/// Render pass a queue is built for; selects the object filter and the
/// sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPassKind {
    /// Renderable, non-transparent objects, sorted front to back
    Opaque,
    /// Renderable transparent objects, sorted back to front
    Transparent,
    /// Shadow casters, sorted front to back
    Shadow,
}

/// Pipeline configuration, fixed at construction apart from the
/// explicit per-toggle setters.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Filter culling through last frame's occlusion results
    pub occlusion_culling: bool,
    /// Hold the last computed visible set fixed (debug aid)
    pub freeze_culling_camera: bool,
    /// Layer mask ANDed against every AABB's mask
    pub layer_mask: u32,
    /// Directional cascade count
    pub cascade_count: usize,
    /// Shadow map resolution (texels per 2D slot side)
    pub shadow_resolution: u32,
    /// 2D shadow-array slot budget per frame
    pub shadow_slots_2d: u32,
    /// Cube shadow-array slot budget per frame
    pub shadow_slots_cube: u32,
    /// Occlusion query heap capacity
    pub query_heap_capacity: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            occlusion_culling: true,
            freeze_culling_camera: false,
            layer_mask: crate::scene::LAYER_ALL,
            cascade_count: 3,
            shadow_resolution: 1024,
            shadow_slots_2d: 8,
            shadow_slots_cube: 4,
            query_heap_capacity: 1024,
        }
    }
}

impl PipelineSettings {
    /// Reject configurations no frame could run under.
    pub fn validate(&self) -> Result<()> {
        if self.cascade_count == 0 {
            return Err(Error::InvalidSettings(
                "cascade count must be at least 1".into(),
            ));
        }
        if self.shadow_resolution == 0 {
            return Err(Error::InvalidSettings(
                "shadow resolution must be non-zero".into(),
            ));
        }
        if self.layer_mask == 0 {
            return Err(Error::InvalidSettings(
                "layer mask 0 would cull everything".into(),
            ));
        }
        Ok(())
    }
}

/// Per-category visible counts for the frame, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects: usize,
    pub lights: usize,
    pub decals: usize,
    pub probes: usize,
    pub emitters: usize,
    pub hairs: usize,
    /// Occlusion queries allocated this frame
    pub queries: u32,
}

/// Owner of the recycled per-frame visibility state.
pub struct VisibilityPipeline {
    settings: PipelineSettings,
    visibility: Visibility,
    occlusion: OcclusionQueryManager,
    packed: PackedEntities,
    frozen: bool,
}

impl VisibilityPipeline {
    pub fn new(settings: PipelineSettings) -> Result<Self> {
        settings.validate()?;
        engine_info!(
            LOG_SOURCE,
            "Pipeline created ({} cascades, {}px shadows, {}/{} shadow slots, {} query slots)",
            settings.cascade_count,
            settings.shadow_resolution,
            settings.shadow_slots_2d,
            settings.shadow_slots_cube,
            settings.query_heap_capacity
        );
        let occlusion = OcclusionQueryManager::new(settings.query_heap_capacity);
        Ok(Self {
            settings,
            visibility: Visibility::new(),
            occlusion,
            packed: PackedEntities::new(),
            frozen: false,
        })
    }

    // ===== GETTERS =====

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Last frame's culling result.
    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Last packed GPU payload.
    pub fn packed(&self) -> &PackedEntities {
        &self.packed
    }

    /// Per-category counts of the current visibility result.
    pub fn frame_stats(&self) -> FrameStats {
        FrameStats {
            objects: self.visibility.visible_objects.len(),
            lights: self.visibility.visible_lights.len(),
            decals: self.visibility.visible_decals.len(),
            probes: self.visibility.visible_probes.len(),
            emitters: self.visibility.visible_emitters.len(),
            hairs: self.visibility.visible_hairs.len(),
            queries: self.occlusion.allocated(),
        }
    }

    // ===== SETTERS =====

    pub fn set_occlusion_culling(&mut self, enabled: bool) {
        self.settings.occlusion_culling = enabled;
    }

    /// Freeze or unfreeze the culling camera. While frozen,
    /// `update_visibility` keeps returning the set it last computed.
    pub fn set_freeze_culling_camera(&mut self, frozen: bool) {
        self.settings.freeze_culling_camera = frozen;
        if !frozen {
            self.frozen = false;
        }
    }

    pub fn set_layer_mask(&mut self, layer_mask: u32) {
        self.settings.layer_mask = layer_mask;
    }

    // ===== FRAME =====

    /// Feed back the query samples recorded last frame. Call before
    /// `update_visibility`; the handle slots still reference last
    /// frame's allocation.
    pub fn resolve_occlusion(&mut self, samples: &[u64]) {
        self.occlusion.resolve(samples);
    }

    /// Cull `scene` from `camera` and return the visibility result.
    ///
    /// While the culling camera is frozen the last computed set is
    /// returned unchanged; camera and scene edits do not re-cull.
    pub fn update_visibility(&mut self, scene: &Scene, camera: &RenderCamera) -> &Visibility {
        if self.settings.freeze_culling_camera {
            if !self.frozen {
                self.frozen = true;
                // No queries while frozen: the cached set is final
                self.occlusion.clear_pending();
                engine_debug!(LOG_SOURCE, "Culling camera frozen");
            }
            return &self.visibility;
        }
        self.frozen = false;

        let occlusion = if self.settings.occlusion_culling {
            self.occlusion
                .begin_frame(scene.objects.len(), scene.lights.len());
            Some(&self.occlusion)
        } else {
            self.occlusion.clear_pending();
            None
        };

        cull_scene(
            scene,
            camera.frustum(),
            camera.eye(),
            self.settings.layer_mask,
            occlusion,
            &mut self.visibility,
        );

        engine_debug!(
            LOG_SOURCE,
            "Visible: {} objects, {} lights, {} decals, {} probes",
            self.visibility.visible_objects.len(),
            self.visibility.visible_lights.len(),
            self.visibility.visible_decals.len(),
            self.visibility.visible_probes.len()
        );

        &self.visibility
    }

    /// Assign shadow slots and plan shadow cameras for the visible
    /// lights. Uses the real (unfrozen) camera: shadow fit follows what
    /// the viewer actually sees.
    pub fn plan_shadows(&self, scene: &Scene, camera: &RenderCamera) -> ShadowPlan {
        plan_shadows(
            scene,
            &self.visibility.visible_lights,
            camera,
            self.settings.cascade_count,
            self.settings.shadow_resolution,
            self.settings.shadow_slots_2d,
            self.settings.shadow_slots_cube,
        )
    }

    /// Pack the visible sets into the GPU entity/matrix arrays.
    pub fn pack_entities(&mut self, scene: &Scene, shadow_plan: &ShadowPlan) -> &PackedEntities {
        pack_entities(scene, &self.visibility, shadow_plan, &mut self.packed);
        &self.packed
    }

    /// Bounding-box draws for this frame's pending occlusion queries.
    pub fn pending_query_draws(&self, scene: &Scene) -> Vec<QueryDraw> {
        self.occlusion.pending_queries(scene)
    }

    /// Build the sorted batch queue for one render pass.
    pub fn build_queue(
        &self,
        scene: &Scene,
        camera: &RenderCamera,
        pass: RenderPassKind,
        arena: &mut BatchArena,
    ) -> BatchRange {
        let eye = camera.eye();
        let mut builder = arena.begin_queue();

        for &object_index in &self.visibility.visible_objects {
            let object = &scene.objects[object_index as usize];
            let wanted = match pass {
                RenderPassKind::Opaque => {
                    object.flags.contains(ObjectFlags::RENDERABLE)
                        && !object.flags.contains(ObjectFlags::TRANSPARENT)
                }
                RenderPassKind::Transparent => {
                    object.flags.contains(ObjectFlags::RENDERABLE)
                        && object.flags.contains(ObjectFlags::TRANSPARENT)
                }
                RenderPassKind::Shadow => object.flags.contains(ObjectFlags::CAST_SHADOW),
            };
            if !wanted {
                continue;
            }

            let distance = scene.object_aabbs[object_index as usize].center().distance(eye);
            builder.push(RenderBatch::encode(object.mesh_index, object_index, distance));
        }

        let range = builder.finish();
        let order = match pass {
            RenderPassKind::Transparent => SortOrder::BackToFront,
            RenderPassKind::Opaque | RenderPassKind::Shadow => SortOrder::FrontToBack,
        };
        arena.sort(range, order);
        range
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
