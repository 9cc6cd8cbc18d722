use glam::{Mat4, Vec3};
use crate::scene::{Sphere, AABB};
use super::*;

fn look_down_z_from(eye: Vec3, fov: f32, near: f32, far: f32) -> Frustum {
    let projection = Mat4::perspective_rh(fov, 1.0, near, far);
    let view = Mat4::look_at_rh(eye, eye + Vec3::NEG_Z, Vec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_frustum_from_identity_matrix() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);

    // Identity VP → NDC cube; all planes normalized
    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-5, "plane normal should be unit length");
    }
}

#[test]
fn test_frustum_from_perspective_projection() {
    let projection = Mat4::perspective_rh(
        std::f32::consts::FRAC_PI_4, // 45° FOV
        16.0 / 9.0,
        0.1,
        100.0,
    );
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let frustum = Frustum::from_view_projection(&(projection * view));

    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_frustum_from_orthographic_projection() {
    let projection = Mat4::orthographic_rh(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection);

    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

// ============================================================================
// Frustum::intersects_aabb
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = look_down_z_from(Vec3::new(0.0, 0.0, 5.0), std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    // AABB at the origin, in front of the camera
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_behind_camera_is_outside() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    let aabb = AABB::new(Vec3::new(-1.0, -1.0, 9.0), Vec3::new(1.0, 1.0, 11.0));
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_beyond_far_plane_is_outside() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    let aabb = AABB::new(Vec3::new(-1.0, -1.0, -200.0), Vec3::new(1.0, 1.0, -150.0));
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_far_to_the_side_is_outside() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_4, 0.1, 100.0);

    // At z = -10 with a 45° total FOV, the half-width is ~4.1 units
    let aabb = AABB::new(Vec3::new(50.0, -1.0, -11.0), Vec3::new(52.0, 1.0, -9.0));
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_straddling_near_plane_intersects() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.5, 100.0);

    // Box enclosing the camera position extends through the near plane
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(frustum.intersects_aabb(&aabb));
}

// ============================================================================
// Frustum::intersects_sphere
// ============================================================================

#[test]
fn test_sphere_inside_and_outside() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    let inside = Sphere { center: Vec3::new(0.0, 0.0, -10.0), radius: 1.0 };
    let outside = Sphere { center: Vec3::new(0.0, 0.0, 50.0), radius: 1.0 };

    assert!(frustum.intersects_sphere(&inside));
    assert!(!frustum.intersects_sphere(&outside));
}

#[test]
fn test_sphere_straddling_plane_intersects() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    // Center beyond the far plane but radius reaches back inside
    let sphere = Sphere { center: Vec3::new(0.0, 0.0, -104.0), radius: 6.0 };
    assert!(frustum.intersects_sphere(&sphere));
}

// ============================================================================
// Frustum::classify_aabb
// ============================================================================

#[test]
fn test_classify_inside_partial_outside() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    let inside = AABB::new(Vec3::new(-1.0, -1.0, -11.0), Vec3::new(1.0, 1.0, -9.0));
    let outside = AABB::new(Vec3::new(-1.0, -1.0, 9.0), Vec3::new(1.0, 1.0, 11.0));
    let partial = AABB::new(Vec3::new(-1.0, -1.0, -101.0), Vec3::new(1.0, 1.0, -99.0));

    assert_eq!(frustum.classify_aabb(&inside), FrustumTest::Inside);
    assert_eq!(frustum.classify_aabb(&outside), FrustumTest::Outside);
    assert_eq!(frustum.classify_aabb(&partial), FrustumTest::Partial);
}

// ============================================================================
// Frustum::rejects (frustum-vs-frustum pre-filter)
// ============================================================================

#[test]
fn test_rejects_points_behind_camera() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    // All points behind the near plane → rejected by one plane
    let behind: Vec<Vec3> = (0..8)
        .map(|i| Vec3::new(i as f32, 0.0, 5.0 + i as f32))
        .collect();
    assert!(frustum.rejects(&behind));
}

#[test]
fn test_rejects_is_conservative_for_visible_points() {
    let frustum = look_down_z_from(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.1, 100.0);

    // One point inside is enough to defeat every plane's all-outside test
    let mixed = [
        Vec3::new(0.0, 0.0, -10.0),
        Vec3::new(1000.0, 0.0, -10.0),
        Vec3::new(-1000.0, 0.0, -10.0),
    ];
    assert!(!frustum.rejects(&mixed));
}
