/// Shadow camera planning (SHCAM).
///
/// Builds view-projection matrices and frusta for directional cascades,
/// spot lights and point-light cubemap faces. Cameras are created fresh
/// per shadow-casting light per frame and never persisted.

use glam::{Mat4, Vec3};

use crate::camera::{Frustum, RenderCamera};
use crate::scene::{Light, Sphere};

/// Near plane for spot and cube-face shadow cameras.
const SHADOW_NEAR: f32 = 0.1;

/// Viewer far distance the cascade split fractions are tuned for; when
/// the viewer sees further, splits are compressed so absolute cascade
/// sizes don't balloon with draw distance.
pub const REFERENCE_FAR_PLANE: f32 = 800.0;

/// One shadow-rendering camera.
///
/// `corners` is the bounding-frustum representation used for cheap
/// frustum-vs-frustum rejection (skip face/cascade renders that cannot
/// intersect the viewer frustum).
#[derive(Debug, Clone)]
pub struct ShadowCamera {
    /// Combined view-projection used by the shadow pass
    pub view_projection: Mat4,
    /// Culling frustum for caster selection
    pub frustum: Frustum,
    /// World-space frustum corners (4 near then 4 far)
    pub corners: [Vec3; 8],
    /// GPU face-selection tag: cube face or cascade index
    pub properties: u32,
}

impl ShadowCamera {
    fn new(view: Mat4, projection: Mat4, properties: u32) -> Self {
        let view_projection = projection * view;
        let frustum = Frustum::from_view_projection(&view_projection);
        let inv_vp = view_projection.inverse();

        let mut corners = [Vec3::ZERO; 8];
        let ndc = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        for (i, c) in ndc.iter().enumerate() {
            let h = inv_vp * c.extend(1.0);
            corners[i] = h.truncate() / h.w;
        }

        Self {
            view_projection,
            frustum,
            corners,
            properties,
        }
    }

    /// Cheap frustum-vs-frustum test against the viewer.
    ///
    /// Conservative: `false` only when one frustum's corners are all
    /// outside a single plane of the other. Used to skip shadow renders
    /// that cannot affect anything on screen.
    pub fn intersects_viewer(&self, viewer: &RenderCamera) -> bool {
        let viewer_corners = viewer.frustum_corners_world();
        !(self.frustum.rejects(&viewer_corners) || viewer.frustum().rejects(&self.corners))
    }
}

/// Up vector that is safely non-collinear with `direction`.
fn shadow_up(direction: Vec3) -> Vec3 {
    if direction.dot(Vec3::Y).abs() > 0.99 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}

/// Cascade split fractions along [0, 1] of the viewer range.
///
/// Returns `cascade_count + 1` non-decreasing fractions starting at 0;
/// interior splits are powers of 0.1 (0.01, 0.1, 1 for three cascades),
/// all scaled by `min(1, REFERENCE_FAR_PLANE / camera_far)` so the
/// absolute cascade extents stop growing past the reference distance.
pub fn cascade_splits(cascade_count: usize, camera_far: f32) -> Vec<f32> {
    let clamp = (REFERENCE_FAR_PLANE / camera_far).min(1.0);
    let mut splits = Vec::with_capacity(cascade_count + 1);
    splits.push(0.0);
    for i in 1..=cascade_count {
        splits.push(clamp * 0.1_f32.powi((cascade_count - i) as i32));
    }
    splits
}

/// Plan the cascade cameras for a directional light.
///
/// Per cascade: interpolate the viewer frustum's near/far corner pairs
/// (in LIGHT view space) at the cascade's split fractions, bound the 8
/// points with a sphere (rotation stable), fit a conservative AABB,
/// snap it to a shadow-texel grid, extrude near/far symmetrically by at
/// least half the viewer far plane, and wrap the box in an orthographic
/// projection.
pub fn plan_directional(
    light: &Light,
    viewer: &RenderCamera,
    cascade_count: usize,
    resolution: u32,
) -> Vec<ShadowCamera> {
    debug_assert!(cascade_count >= 1);
    debug_assert!(resolution > 0);

    let light_view = Mat4::look_to_rh(Vec3::ZERO, light.direction, shadow_up(light.direction));

    // Viewer frustum corners in light view space, paired near (0..4) /
    // far (4..8) along the same ray
    let world_corners = viewer.frustum_corners_world();
    let mut corners = [Vec3::ZERO; 8];
    for (i, c) in world_corners.iter().enumerate() {
        corners[i] = light_view.transform_point3(*c);
    }

    let splits = cascade_splits(cascade_count, viewer.far());
    let mut cameras = Vec::with_capacity(cascade_count);

    for cascade in 0..cascade_count {
        let (split_near, split_far) = (splits[cascade], splits[cascade + 1]);

        let mut points = [Vec3::ZERO; 8];
        for ray in 0..4 {
            let near = corners[ray];
            let far = corners[ray + 4];
            points[ray] = near.lerp(far, split_near);
            points[ray + 4] = near.lerp(far, split_far);
        }

        // Bounding sphere keeps the box size invariant under viewer
        // rotation; the AABB around it is conservative by construction
        let sphere = Sphere::from_points(&points);
        let mut vmin = sphere.center - Vec3::splat(sphere.radius);
        let mut vmax = sphere.center + Vec3::splat(sphere.radius);

        // Snap to the shadow-map texel grid to stop edge shimmer under
        // camera translation
        let texel = (vmax - vmin) / resolution as f32;
        vmin = (vmin / texel).floor() * texel;
        vmax = (vmax / texel).floor() * texel;

        // Extrude the depth bounds symmetrically so tall casters behind
        // the cascade volume still reach the near plane
        let extrusion = (viewer.far() * 0.5).max(sphere.radius);
        let center_z = (vmin.z + vmax.z) * 0.5;
        vmin.z = center_z - extrusion;
        vmax.z = center_z + extrusion;

        // Light view space looks down -Z: ortho near/far negate the
        // box's z extents
        let projection =
            Mat4::orthographic_rh(vmin.x, vmax.x, vmin.y, vmax.y, -vmax.z, -vmin.z);
        cameras.push(ShadowCamera::new(light_view, projection, cascade as u32));
    }

    cameras
}

/// Plan the single perspective camera for a spot light.
pub fn plan_spot(light: &Light) -> ShadowCamera {
    let view = Mat4::look_to_rh(light.position, light.direction, shadow_up(light.direction));
    let far = light.range.max(SHADOW_NEAR * 2.0);
    let projection = Mat4::perspective_rh(light.outer_cone_angle * 2.0, 1.0, SHADOW_NEAR, far);
    ShadowCamera::new(view, projection, 0)
}

/// Cube face directions and ups, in the face order shaders select by.
const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y),
    (Vec3::NEG_X, Vec3::Y),
    (Vec3::Y, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::Z),
    (Vec3::Z, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y),
];

/// Plan the six 90° cube-face cameras for a point light.
///
/// Each camera's `properties` carries its face index for GPU face
/// selection; its frustum pre-filters candidate casters per face.
pub fn plan_point(light: &Light) -> Vec<ShadowCamera> {
    let far = light.range.max(1.0);
    let projection =
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, SHADOW_NEAR, far);

    CUBE_FACES
        .iter()
        .enumerate()
        .map(|(face, (direction, up))| {
            let view = Mat4::look_to_rh(light.position, *direction, *up);
            ShadowCamera::new(view, projection, face as u32)
        })
        .collect()
}

#[cfg(test)]
#[path = "shadow_camera_tests.rs"]
mod tests;
