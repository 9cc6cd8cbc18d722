/*!
# Nebula 3D Visibility

Per-frame scene visibility and render-batch compilation for the Nebula
renderer.

Given a scene (bounding volumes, lights, decals, probes, renderable
instances) and a viewer camera, this crate determines which entities are
visible, packs visible lights/decals/probes into a bounded shader-readable
array with shadow-slot assignment, builds sorted mesh-grouped instance
batches for rasterization, computes shadow-casting cameras (cascaded
directional, spot, cubemap) and manages an occlusion-query lifecycle
across frames.

## Architecture

- **scene**: scene component arrays, AABBs, layer masks
- **camera**: viewer camera and frustum plane math
- **cull**: parallel frustum culling with lock-free stream compaction
- **shadow**: shadow camera planning and slot budgeting
- **occlusion**: double-buffered GPU occlusion-query lifecycle
- **entity**: fixed-capacity shader entity/matrix array packing
- **batch**: packed 64-bit sort keys, frame arena, draw grouping
- **pipeline**: per-frame orchestration of the above

The graphics device is an external collaborator: this crate produces
index sets, byte-exact upload arrays and draw groups; it never touches
GPU objects itself.
*/

mod error;
pub mod log;

pub mod batch;
pub mod camera;
pub mod cull;
pub mod entity;
pub mod occlusion;
pub mod pipeline;
pub mod scene;
pub mod shadow;

pub use error::{Error, Result};

pub use batch::{BatchArena, BatchRange, DrawGroup, RenderBatch, SortOrder};
pub use camera::{Frustum, RenderCamera};
pub use cull::{Visibility, VisibleLight};
pub use entity::{PackedEntities, ShaderEntity};
pub use occlusion::OcclusionQueryManager;
pub use pipeline::{PipelineSettings, RenderPassKind, VisibilityPipeline};
pub use scene::{Scene, AABB};
pub use shadow::{ShadowCamera, ShadowPlan};

// Re-export math library at crate root
pub use glam;
