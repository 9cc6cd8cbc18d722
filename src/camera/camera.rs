/// Viewer camera — passive data container for the culling pipeline.
///
/// The camera stores the unjittered view/projection pair; temporal jitter
/// is kept as a separate offset and applied only by callers that want
/// the jittered projection for rasterization. Shadow planning and
/// frustum-corner unprojection always see the unjittered matrices, so a
/// jittering viewer never produces cascade shimmer.

use glam::{Mat4, Vec2, Vec3, Vec4};
use super::frustum::Frustum;

/// NDC-cube corners in the fixed unprojection order: 4 near (z = 0),
/// then 4 far (z = 1), x/y in (-,-) (+,-) (-,+) (+,+) order. Corner `j`
/// and corner `j + 4` lie on the same corner ray.
const NDC_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Viewer camera state consumed by culling and shadow planning.
#[derive(Debug, Clone)]
pub struct RenderCamera {
    eye: Vec3,
    view: Mat4,
    projection: Mat4,
    near: f32,
    far: f32,
    jitter: Vec2,
    frustum: Frustum,
}

impl RenderCamera {
    /// Create a perspective camera looking from `eye` toward `target`.
    pub fn perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let view = Mat4::look_at_rh(eye, target, up);
        let projection = Mat4::perspective_rh(fov_y, aspect, near, far);
        Self::from_matrices(view, projection, eye, near, far)
    }

    /// Create a camera from explicit matrices (owner computed them).
    pub fn from_matrices(view: Mat4, projection: Mat4, eye: Vec3, near: f32, far: f32) -> Self {
        let frustum = Frustum::from_view_projection(&(projection * view));
        Self {
            eye,
            view,
            projection,
            near,
            far,
            jitter: Vec2::ZERO,
            frustum,
        }
    }

    // ===== GETTERS =====

    /// World-space eye position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Unjittered projection matrix.
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Unjittered view-projection matrix (projection * view).
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Projection with the temporal jitter offset applied, for rasterization.
    pub fn jittered_projection(&self) -> Mat4 {
        let mut m = self.projection;
        let mut col = m.col(2);
        col += Vec4::new(self.jitter.x, self.jitter.y, 0.0, 0.0);
        *m.col_mut(2) = col;
        m
    }

    /// Near plane distance.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far plane distance.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Frustum planes for culling (always unjittered).
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Current temporal jitter offset in clip space.
    pub fn jitter(&self) -> Vec2 {
        self.jitter
    }

    // ===== SETTERS =====

    /// Set the temporal jitter offset. Does not touch the frustum.
    pub fn set_jitter(&mut self, jitter: Vec2) {
        self.jitter = jitter;
    }

    /// Replace view/projection and recompute the frustum.
    pub fn set_matrices(&mut self, view: Mat4, projection: Mat4, eye: Vec3, near: f32, far: f32) {
        self.view = view;
        self.projection = projection;
        self.eye = eye;
        self.near = near;
        self.far = far;
        self.frustum = Frustum::from_view_projection(&(projection * view));
    }

    // ===== DERIVED =====

    /// The 8 world-space frustum corners: 4 near then 4 far, paired by ray.
    ///
    /// Unprojected through the unjittered inverse view-projection; the
    /// cascade planner interpolates along the near/far corner pairs.
    pub fn frustum_corners_world(&self) -> [Vec3; 8] {
        let inv_vp = (self.projection * self.view).inverse();
        let mut corners = [Vec3::ZERO; 8];
        for (i, ndc) in NDC_CORNERS.iter().enumerate() {
            let h = inv_vp * ndc.extend(1.0);
            corners[i] = h.truncate() / h.w;
        }
        corners
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
