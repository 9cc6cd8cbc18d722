//! Shadow module
//!
//! Shadow camera planning (directional cascades, spot, cube faces),
//! per-frame shadow-array slot budgeting, and the ordered shadow plan
//! shared by entity packing and shadow rendering.

mod plan;
mod shadow_camera;
mod slot_allocator;

pub use plan::{plan_shadows, ShadowEntry, ShadowPlan, ShadowSlot};
pub use shadow_camera::{
    cascade_splits, plan_directional, plan_point, plan_spot, ShadowCamera, REFERENCE_FAR_PLANE,
};
pub use slot_allocator::ShadowSlotAllocator;
