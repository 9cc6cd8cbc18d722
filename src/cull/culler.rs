/// Parallel frustum culler.
///
/// Objects and lights are dispatched in fixed-size groups over the rayon
/// pool; decals, probes, emitters and hairs each run as one concurrent
/// job (they are few). Each group filters into a stack-local list and
/// publishes it with a single atomic reservation (see CompactionBuffer).
///
/// Opportunistic side effects ride along in the same pass so the AABB
/// stream is only touched once per frame: volumetric-light accumulation,
/// lazy occlusion-query allocation, and closest planar-reflection
/// tracking (mutex, taken only by the rare requesting objects).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use glam::{Vec3, Vec4};

use crate::camera::Frustum;
use crate::occlusion::OcclusionQueryManager;
use crate::scene::{LightFlags, LightKind, ObjectFlags, Scene, AABB};
use super::compaction::CompactionBuffer;
use super::visibility::{VisibleLight, Visibility};

/// Items per culling group; one atomic add per group, not per item.
pub(crate) const CULL_GROUP_SIZE: usize = 64;

/// Cull `scene` against `frustum`, filling `visibility`.
///
/// `occlusion` carries the previous frame's resolved query results; pass
/// `None` to disable occlusion filtering (frozen camera, or the feature
/// toggled off). The visible-light list comes back sorted by ascending
/// distance, directional lights (synthetic distance 0) first.
///
/// The visible sets are exact: an AABB is in its set iff its layer mask
/// overlaps `layer_mask` and it intersects `frustum` (and, for objects
/// and lights, it was not occlusion-rejected). Output ORDER within a set
/// is group completion order and may differ between runs.
pub fn cull_scene(
    scene: &Scene,
    frustum: &Frustum,
    eye: Vec3,
    layer_mask: u32,
    occlusion: Option<&OcclusionQueryManager>,
    visibility: &mut Visibility,
) {
    debug_assert!(
        scene.lights.len() <= u16::MAX as usize,
        "light index exceeds the 16-bit VisibleLight contract"
    );

    visibility.reset(scene);

    let reflection: Mutex<Option<(f32, Vec4)>> = Mutex::new(None);
    let volumetrics = AtomicBool::new(false);

    {
        let vis: &Visibility = visibility;
        let reflection = &reflection;
        let volumetrics = &volumetrics;

        rayon::scope(|s| {
            // Objects: group dispatch
            for (group_index, chunk) in
                scene.object_aabbs.chunks(CULL_GROUP_SIZE).enumerate()
            {
                s.spawn(move |_| {
                    cull_object_group(
                        scene, frustum, eye, layer_mask, occlusion, vis, reflection,
                        group_index, chunk,
                    );
                });
            }

            // Lights: group dispatch, may run concurrently with objects
            for (group_index, chunk) in
                scene.light_aabbs.chunks(CULL_GROUP_SIZE).enumerate()
            {
                s.spawn(move |_| {
                    cull_light_group(
                        scene, frustum, eye, layer_mask, occlusion, vis, volumetrics,
                        group_index, chunk,
                    );
                });
            }

            // Small categories: one job each, concurrent with the dispatches
            s.spawn(move |_| {
                cull_category(&scene.decal_aabbs, frustum, layer_mask, &vis.decal_compaction)
            });
            s.spawn(move |_| {
                cull_category(&scene.probe_aabbs, frustum, layer_mask, &vis.probe_compaction)
            });
            s.spawn(move |_| {
                cull_category(&scene.emitter_aabbs, frustum, layer_mask, &vis.emitter_compaction)
            });
            s.spawn(move |_| {
                cull_category(&scene.hair_aabbs, frustum, layer_mask, &vis.hair_compaction)
            });
        });
        // Wait barrier: all culling jobs are complete past this point.
    }

    visibility.object_compaction.drain_into(&mut visibility.visible_objects);
    visibility.decal_compaction.drain_into(&mut visibility.visible_decals);
    visibility.probe_compaction.drain_into(&mut visibility.visible_probes);
    visibility.emitter_compaction.drain_into(&mut visibility.visible_emitters);
    visibility.hair_compaction.drain_into(&mut visibility.visible_hairs);

    // Re-establish a total order for lights: ascending distance so nearer
    // lights win shadow slots; directional lights sort first at distance 0.
    let mut packed = std::mem::take(&mut visibility.light_scratch);
    visibility.light_compaction.drain_into(&mut packed);
    visibility.visible_lights.clear();
    visibility
        .visible_lights
        .extend(packed.iter().map(|&raw| VisibleLight::unpack(raw)));
    visibility.light_scratch = packed;
    visibility
        .visible_lights
        .sort_unstable_by_key(|light| light.sort_key());

    if let Ok(best) = reflection.into_inner() {
        visibility.reflection_plane = best.map(|(_, plane)| plane);
    }
    visibility.volumetric_lights_requested = volumetrics.into_inner();
}

fn cull_object_group(
    scene: &Scene,
    frustum: &Frustum,
    eye: Vec3,
    layer_mask: u32,
    occlusion: Option<&OcclusionQueryManager>,
    vis: &Visibility,
    reflection: &Mutex<Option<(f32, Vec4)>>,
    group_index: usize,
    chunk: &[AABB],
) {
    // Group-local list: non-atomic append, this group is one lane sequence
    let mut local = [0u32; CULL_GROUP_SIZE];
    let mut local_count = 0usize;

    for (lane, aabb) in chunk.iter().enumerate() {
        let index = (group_index * CULL_GROUP_SIZE + lane) as u32;

        if aabb.layer_mask & layer_mask == 0 {
            continue;
        }
        if !frustum.intersects_aabb(aabb) {
            continue;
        }

        let object = &scene.objects[index as usize];

        // Closest reflection-plane candidate; contention is low because
        // only objects requesting planar reflection take the lock.
        if object.flags.contains(ObjectFlags::PLANAR_REFLECTION) {
            let distance = aabb.center().distance(eye);
            if let Ok(mut best) = reflection.lock() {
                let closer = best.map_or(true, |(d, _)| distance < d);
                if closer {
                    *best = Some((distance, object.reflection_plane()));
                }
            }
        }

        if let Some(occlusion) = occlusion {
            if aabb.contains_point(eye) {
                // Camera inside the bounds: trivially visible, no query
                occlusion.mark_object_visible(index as usize);
            } else {
                occlusion.request_object_query(index as usize);
                if !occlusion.object_visible(index as usize) {
                    // Known occluded last frame: keep the query alive but
                    // drop the object from this frame's visible set
                    continue;
                }
            }
        }

        local[local_count] = index;
        local_count += 1;
    }

    if local_count > 0 {
        let base = vis.object_compaction.reserve(local_count as u32);
        for (offset, &value) in local[..local_count].iter().enumerate() {
            vis.object_compaction.publish(base + offset as u32, value);
        }
    }
}

fn cull_light_group(
    scene: &Scene,
    frustum: &Frustum,
    eye: Vec3,
    layer_mask: u32,
    occlusion: Option<&OcclusionQueryManager>,
    vis: &Visibility,
    volumetrics: &AtomicBool,
    group_index: usize,
    chunk: &[AABB],
) {
    let mut local = [0u32; CULL_GROUP_SIZE];
    let mut local_count = 0usize;

    for (lane, aabb) in chunk.iter().enumerate() {
        let index = (group_index * CULL_GROUP_SIZE + lane) as u32;

        if aabb.layer_mask & layer_mask == 0 {
            continue;
        }
        if !frustum.intersects_aabb(aabb) {
            continue;
        }

        let light = &scene.lights[index as usize];

        if light.flags.contains(LightFlags::VOLUMETRICS) {
            volumetrics.store(true, Ordering::Relaxed);
        }

        // Synthetic distance 0 gives directional lights first claim on
        // shadow slots regardless of viewer position.
        let distance = match light.kind {
            LightKind::Directional => 0.0,
            LightKind::Point | LightKind::Spot => light.position.distance(eye),
        };

        if let Some(occlusion) = occlusion {
            if aabb.contains_point(eye) {
                occlusion.mark_light_visible(index as usize);
            } else {
                occlusion.request_light_query(index as usize);
                if !occlusion.light_visible(index as usize) {
                    continue;
                }
            }
        }

        local[local_count] = VisibleLight::new(index, distance).pack();
        local_count += 1;
    }

    if local_count > 0 {
        let base = vis.light_compaction.reserve(local_count as u32);
        for (offset, &value) in local[..local_count].iter().enumerate() {
            vis.light_compaction.publish(base + offset as u32, value);
        }
    }
}

/// Cull a small category as one sequential job with one reservation.
fn cull_category(
    aabbs: &[AABB],
    frustum: &Frustum,
    layer_mask: u32,
    compaction: &CompactionBuffer,
) {
    if aabbs.is_empty() {
        return;
    }

    let mut passing: Vec<u32> = Vec::new();
    for (index, aabb) in aabbs.iter().enumerate() {
        if aabb.layer_mask & layer_mask != 0 && frustum.intersects_aabb(aabb) {
            passing.push(index as u32);
        }
    }

    if !passing.is_empty() {
        let base = compaction.reserve(passing.len() as u32);
        for (offset, &value) in passing.iter().enumerate() {
            compaction.publish(base + offset as u32, value);
        }
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
