//! Camera module
//!
//! Viewer camera state and frustum plane math for culling.

mod camera;
mod frustum;

pub use camera::RenderCamera;
pub use frustum::{
    Frustum, FrustumTest, PLANE_BOTTOM, PLANE_FAR, PLANE_LEFT, PLANE_NEAR, PLANE_RIGHT, PLANE_TOP,
};
