/// Shadow plan — slot assignment + cameras for one frame's lights.
///
/// The entity packer and the shadow-rendering stage MUST agree on which
/// light got which slot. Both therefore consume this one plan, built
/// from the distance-sorted visible-light list, instead of re-deriving
/// the traversal independently: the slot a light's shader record points
/// at is the slot its shadow map is rendered into.

use crate::camera::RenderCamera;
use crate::cull::VisibleLight;
use crate::scene::{LightFlags, LightKind, Scene};

use super::shadow_camera::{plan_directional, plan_point, plan_spot, ShadowCamera};
use super::slot_allocator::ShadowSlotAllocator;

/// A shadow-array slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowSlot {
    /// `count` contiguous 2D-array slots starting at `base`
    /// (spot: count 1; directional: count = cascade count)
    TwoD { base: u32, count: u32 },
    /// One cube-array slot
    Cube { index: u32 },
}

/// One shadow-casting light with its slot and render cameras.
#[derive(Debug, Clone)]
pub struct ShadowEntry {
    /// Scene light index
    pub light_index: usize,
    /// Assigned shadow-array slot(s)
    pub slot: ShadowSlot,
    /// Render cameras: cascades, one spot camera, or six cube faces
    pub cameras: Vec<ShadowCamera>,
}

/// Per-frame shadow slot assignment in visible-light order.
pub struct ShadowPlan {
    /// Shadow casters in the traversal order the shadow pass renders
    pub entries: Vec<ShadowEntry>,
    // Maps a visible-light ordinal to its entry, if it got a slot
    entry_by_visible: Vec<Option<u32>>,
}

impl ShadowPlan {
    /// Entry for the `ordinal`-th visible light, if it was allocated.
    pub fn entry_for_visible(&self, ordinal: usize) -> Option<&ShadowEntry> {
        let slot = *self.entry_by_visible.get(ordinal)?;
        slot.map(|index| &self.entries[index as usize])
    }

    /// Slot for the `ordinal`-th visible light, if any.
    pub fn slot_for_visible(&self, ordinal: usize) -> Option<ShadowSlot> {
        self.entry_for_visible(ordinal).map(|entry| entry.slot)
    }
}

/// Assign shadow slots greedily over the distance-sorted visible lights
/// and plan the render cameras for every allocated light.
///
/// Non-shadow-casting and static lights are skipped. Directional lights
/// need `cascade_count` contiguous 2D slots and are skipped entirely if
/// that many don't remain; spot lights take one 2D slot; point lights
/// one cube slot. Lights beyond budget render unshadowed this frame —
/// an expected steady state under many-light scenes, not an error.
pub fn plan_shadows(
    scene: &Scene,
    visible_lights: &[VisibleLight],
    viewer: &RenderCamera,
    cascade_count: usize,
    resolution: u32,
    slots_2d: u32,
    slots_cube: u32,
) -> ShadowPlan {
    let mut slots = ShadowSlotAllocator::new(slots_2d, slots_cube);
    let mut entries = Vec::new();
    let mut entry_by_visible = Vec::with_capacity(visible_lights.len());

    for visible in visible_lights {
        let light_index = visible.index();
        let light = &scene.lights[light_index];

        if !light.flags.contains(LightFlags::CAST_SHADOW)
            || light.flags.contains(LightFlags::STATIC)
        {
            entry_by_visible.push(None);
            continue;
        }

        let planned = match light.kind {
            LightKind::Directional => slots.alloc_2d(cascade_count as u32).map(|base| {
                let cameras = plan_directional(light, viewer, cascade_count, resolution);
                ShadowEntry {
                    light_index,
                    slot: ShadowSlot::TwoD { base, count: cascade_count as u32 },
                    cameras,
                }
            }),
            LightKind::Spot => slots.alloc_2d(1).map(|base| ShadowEntry {
                light_index,
                slot: ShadowSlot::TwoD { base, count: 1 },
                cameras: vec![plan_spot(light)],
            }),
            LightKind::Point => slots.alloc_cube().map(|index| ShadowEntry {
                light_index,
                slot: ShadowSlot::Cube { index },
                cameras: plan_point(light),
            }),
        };

        match planned {
            Some(entry) => {
                entry_by_visible.push(Some(entries.len() as u32));
                entries.push(entry);
            }
            None => entry_by_visible.push(None),
        }
    }

    ShadowPlan {
        entries,
        entry_by_visible,
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
