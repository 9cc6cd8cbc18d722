use glam::Vec3;
use super::*;
use crate::camera::RenderCamera;
use crate::scene::{Light, LightFlags, LightKind, AABB};

fn viewer() -> RenderCamera {
    RenderCamera::perspective(
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(0.0, 5.0, -10.0),
        Vec3::Y,
        std::f32::consts::FRAC_PI_2,
        1.0,
        0.1,
        100.0,
    )
}

fn sun() -> Light {
    Light {
        kind: LightKind::Directional,
        position: Vec3::ZERO,
        direction: Vec3::new(-0.5, -1.0, -0.3).normalize(),
        color: Vec3::ONE,
        energy: 10.0,
        range: 0.0,
        outer_cone_angle: 0.0,
        flags: LightFlags::CAST_SHADOW,
    }
}

/// Width of the shadow camera's view volume, measured between the two
/// bottom-near corners.
fn camera_width(camera: &ShadowCamera) -> f32 {
    camera.corners[0].distance(camera.corners[1])
}

// ============================================================================
// cascade_splits
// ============================================================================

#[test]
fn test_splits_count_and_monotonicity() {
    let splits = cascade_splits(3, 100.0);
    assert_eq!(splits.len(), 4); // cascade count + 1
    assert_eq!(splits[0], 0.0);
    for pair in splits.windows(2) {
        assert!(pair[0] <= pair[1], "splits must be non-decreasing: {:?}", splits);
    }
}

#[test]
fn test_splits_reach_full_range_below_reference_far() {
    let splits = cascade_splits(3, 100.0);
    // 100 < reference far → no compression
    assert!((splits[3] - 1.0).abs() < 1e-6);
    assert!((splits[1] - 0.01).abs() < 1e-6);
    assert!((splits[2] - 0.1).abs() < 1e-6);
}

#[test]
fn test_splits_compress_beyond_reference_far() {
    let splits = cascade_splits(3, REFERENCE_FAR_PLANE * 2.0);
    // Far plane twice the reference → all fractions halved
    assert!((splits[3] - 0.5).abs() < 1e-6);
    assert!((splits[2] - 0.05).abs() < 1e-6);
}

#[test]
fn test_splits_other_cascade_counts() {
    assert_eq!(cascade_splits(1, 100.0).len(), 2);
    assert_eq!(cascade_splits(5, 100.0).len(), 6);
}

// ============================================================================
// plan_directional
// ============================================================================

#[test]
fn test_directional_produces_one_camera_per_cascade() {
    let cameras = plan_directional(&sun(), &viewer(), 3, 2048);
    assert_eq!(cameras.len(), 3);
    for (i, camera) in cameras.iter().enumerate() {
        assert_eq!(camera.properties, i as u32);
    }
}

#[test]
fn test_nearer_cascades_are_tighter() {
    let cameras = plan_directional(&sun(), &viewer(), 3, 2048);
    let w0 = camera_width(&cameras[0]);
    let w2 = camera_width(&cameras[2]);
    assert!(
        w0 < w2,
        "cascade 0 ({}) must be strictly tighter than cascade 2 ({})",
        w0,
        w2
    );
}

#[test]
fn test_cascades_cover_their_viewer_sub_frusta() {
    let view = viewer();
    let cameras = plan_directional(&sun(), &view, 3, 2048);
    let world_corners = view.frustum_corners_world();
    let splits = cascade_splits(3, view.far());

    for (cascade, camera) in cameras.iter().enumerate() {
        // Lerping world corners matches the planner's light-space lerp
        // (the light view transform is affine)
        for split in [splits[cascade], splits[cascade + 1]] {
            for ray in 0..4 {
                let point = world_corners[ray].lerp(world_corners[ray + 4], split);
                // Texel snapping may shift the box by up to one texel;
                // probe with a box comfortably larger than that
                let slack = camera_width(camera) / 2048.0 * 2.0;
                let probe = AABB::from_center_half_extents(point, Vec3::splat(slack));
                assert!(
                    camera.frustum.intersects_aabb(&probe),
                    "cascade {} misses split point {:?}",
                    cascade,
                    point
                );
            }
        }
    }
}

#[test]
fn test_cascade_depth_is_extruded_by_half_viewer_far() {
    let view = viewer();
    let cameras = plan_directional(&sun(), &view, 3, 2048);

    for camera in &cameras {
        // Ortho volume: near corner 0 and far corner 4 differ only along
        // the light direction, so their distance is the depth extent
        let depth = camera.corners[0].distance(camera.corners[4]);
        assert!(
            depth >= view.far() - 1e-3,
            "depth {} must cover the symmetric extrusion",
            depth
        );
    }
}

// ============================================================================
// plan_spot
// ============================================================================

#[test]
fn test_spot_camera_covers_its_cone() {
    let light = Light {
        kind: LightKind::Spot,
        position: Vec3::new(0.0, 10.0, 0.0),
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range: 9.0,
        outer_cone_angle: std::f32::consts::FRAC_PI_4,
        flags: LightFlags::CAST_SHADOW,
    };
    let camera = plan_spot(&light);

    // A point under the light within range is lit
    let inside = AABB::from_center_half_extents(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(0.1));
    assert!(camera.frustum.intersects_aabb(&inside));

    // A point beyond the range is not
    let beyond = AABB::from_center_half_extents(Vec3::new(0.0, -5.0, 0.0), Vec3::splat(0.1));
    assert!(!camera.frustum.intersects_aabb(&beyond));

    // A point behind the light is not
    let behind = AABB::from_center_half_extents(Vec3::new(0.0, 15.0, 0.0), Vec3::splat(0.1));
    assert!(!camera.frustum.intersects_aabb(&behind));
}

// ============================================================================
// plan_point
// ============================================================================

#[test]
fn test_point_light_has_six_tagged_faces() {
    let light = Light {
        kind: LightKind::Point,
        position: Vec3::ZERO,
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range: 10.0,
        outer_cone_angle: 0.0,
        flags: LightFlags::CAST_SHADOW,
    };
    let cameras = plan_point(&light);

    assert_eq!(cameras.len(), 6);
    for (face, camera) in cameras.iter().enumerate() {
        assert_eq!(camera.properties, face as u32);
    }
}

#[test]
fn test_cube_faces_partition_the_axes() {
    let light = Light {
        kind: LightKind::Point,
        position: Vec3::new(1.0, 2.0, 3.0),
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range: 10.0,
        outer_cone_angle: 0.0,
        flags: LightFlags::CAST_SHADOW,
    };
    let cameras = plan_point(&light);

    // A probe 5 units along each axis lands in the matching face
    let probes = [
        light.position + Vec3::X * 5.0,
        light.position + Vec3::NEG_X * 5.0,
        light.position + Vec3::Y * 5.0,
        light.position + Vec3::NEG_Y * 5.0,
        light.position + Vec3::Z * 5.0,
        light.position + Vec3::NEG_Z * 5.0,
    ];
    for (face, probe) in probes.iter().enumerate() {
        let aabb = AABB::from_center_half_extents(*probe, Vec3::splat(0.01));
        assert!(
            cameras[face].frustum.intersects_aabb(&aabb),
            "face {} should see its axis probe",
            face
        );
    }
}

#[test]
fn test_point_far_plane_is_at_least_one() {
    let light = Light {
        kind: LightKind::Point,
        position: Vec3::ZERO,
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range: 0.2, // below the minimum far plane
        outer_cone_angle: 0.0,
        flags: LightFlags::CAST_SHADOW,
    };
    let cameras = plan_point(&light);

    // Far plane clamps to 1.0, so a probe at 0.8 is still covered
    let probe = AABB::from_center_half_extents(Vec3::X * 0.8, Vec3::splat(0.01));
    assert!(cameras[0].frustum.intersects_aabb(&probe));
}

// ============================================================================
// ShadowCamera::intersects_viewer
// ============================================================================

#[test]
fn test_spot_facing_viewer_volume_intersects() {
    let view = viewer();
    let light = Light {
        kind: LightKind::Spot,
        position: Vec3::new(0.0, 20.0, -20.0),
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range: 30.0,
        outer_cone_angle: std::f32::consts::FRAC_PI_4,
        flags: LightFlags::CAST_SHADOW,
    };
    assert!(plan_spot(&light).intersects_viewer(&view));
}

#[test]
fn test_spot_far_behind_viewer_is_rejected() {
    let view = viewer();
    let light = Light {
        kind: LightKind::Spot,
        position: Vec3::new(0.0, 5.0, 1000.0),
        direction: Vec3::Z, // pointing away from the viewer volume
        color: Vec3::ONE,
        energy: 1.0,
        range: 10.0,
        outer_cone_angle: std::f32::consts::FRAC_PI_4,
        flags: LightFlags::CAST_SHADOW,
    };
    assert!(!plan_spot(&light).intersects_viewer(&view));
}
