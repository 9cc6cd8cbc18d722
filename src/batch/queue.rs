/// Draw-call grouping over a sorted queue.
///
/// Consecutive batches sharing a mesh index collapse into one instanced
/// draw. The sort key orders by distance first, so equal-mesh runs are
/// not guaranteed; grouping scans rather than assuming pre-grouping.
/// A per-instance stencil override also breaks a run, because the draw
/// state changes even though the mesh does not.

use crate::scene::Scene;

use super::render_batch::RenderBatch;

/// One instanced draw: `instance_count` consecutive batches starting at
/// `first` within the queue, all sharing `mesh_index` and `stencil_ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawGroup {
    /// Mesh to draw
    pub mesh_index: u32,
    /// Stencil reference shared by the run
    pub stencil_ref: u8,
    /// Offset of the first batch within the queue slice
    pub first: u32,
    /// Number of instances in the run
    pub instance_count: u32,
}

/// Scan `batches` into mesh-grouped instanced draws.
///
/// `scene` supplies the per-instance stencil override; batches must
/// reference valid object indices (single-frame contract).
pub fn draw_groups(batches: &[RenderBatch], scene: &Scene) -> Vec<DrawGroup> {
    let mut groups: Vec<DrawGroup> = Vec::new();

    for (offset, batch) in batches.iter().enumerate() {
        let mesh_index = batch.mesh_index();
        let stencil_ref = scene.objects[batch.instance_index() as usize].stencil_ref;

        match groups.last_mut() {
            Some(group)
                if group.mesh_index == mesh_index && group.stencil_ref == stencil_ref =>
            {
                group.instance_count += 1;
            }
            _ => groups.push(DrawGroup {
                mesh_index,
                stencil_ref,
                first: offset as u32,
                instance_count: 1,
            }),
        }
    }

    groups
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
