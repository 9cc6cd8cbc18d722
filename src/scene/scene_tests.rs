use glam::{Mat4, Vec3};
use super::*;
use crate::scene::{
    ForceField, ForceFieldKind, Light, LightFlags, LightKind, ObjectFlags, ObjectInstance, AABB,
};

fn test_object() -> ObjectInstance {
    ObjectInstance {
        mesh_index: 0,
        world: Mat4::IDENTITY,
        flags: ObjectFlags::RENDERABLE,
        stencil_ref: 0,
    }
}

fn test_point_light(position: Vec3, range: f32) -> Light {
    Light {
        kind: LightKind::Point,
        position,
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range,
        outer_cone_angle: 0.0,
        flags: LightFlags::empty(),
    }
}

// ============================================================================
// Entity registration and lookup
// ============================================================================

#[test]
fn test_entities_are_unique_across_categories() {
    let mut scene = Scene::new();
    let a = scene.add_object(test_object(), AABB::new(Vec3::ZERO, Vec3::ONE));
    let b = scene.add_light(test_point_light(Vec3::ZERO, 5.0));
    let c = scene.add_emitter(AABB::new(Vec3::ZERO, Vec3::ONE));

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn test_lookup_resolves_kind_and_index() {
    let mut scene = Scene::new();
    scene.add_object(test_object(), AABB::new(Vec3::ZERO, Vec3::ONE));
    let second = scene.add_object(test_object(), AABB::new(Vec3::ZERO, Vec3::ONE));
    let light = scene.add_light(test_point_light(Vec3::ZERO, 5.0));

    let obj_ref = scene.lookup(second).unwrap();
    assert_eq!(obj_ref.kind, ComponentKind::Object);
    assert_eq!(obj_ref.index, 1);

    let light_ref = scene.lookup(light).unwrap();
    assert_eq!(light_ref.kind, ComponentKind::Light);
    assert_eq!(light_ref.index, 0);
}

// ============================================================================
// Parallel array consistency
// ============================================================================

#[test]
fn test_component_and_aabb_arrays_stay_parallel() {
    let mut scene = Scene::new();
    for i in 0..10 {
        scene.add_object(
            test_object(),
            AABB::new(Vec3::splat(i as f32), Vec3::splat(i as f32 + 1.0)),
        );
    }
    scene.add_light(test_point_light(Vec3::ZERO, 2.0));
    scene.add_light(test_point_light(Vec3::X, 3.0));

    assert_eq!(scene.objects.len(), scene.object_aabbs.len());
    assert_eq!(scene.lights.len(), scene.light_aabbs.len());
}

#[test]
fn test_light_aabb_derived_from_range() {
    let mut scene = Scene::new();
    scene.add_light(test_point_light(Vec3::new(10.0, 0.0, 0.0), 5.0));

    let aabb = &scene.light_aabbs[0];
    assert_eq!(aabb.min, Vec3::new(5.0, -5.0, -5.0));
    assert_eq!(aabb.max, Vec3::new(15.0, 5.0, 5.0));
}

#[test]
fn test_refresh_light_aabb_tracks_mutation() {
    let mut scene = Scene::new();
    scene.add_light(test_point_light(Vec3::ZERO, 5.0));

    scene.lights[0].range = 20.0;
    scene.refresh_light_aabb(0);

    assert_eq!(scene.light_aabbs[0].max, Vec3::splat(20.0));
}

#[test]
fn test_directional_light_bounds_are_effectively_unbounded() {
    let mut scene = Scene::new();
    scene.add_light(Light {
        kind: LightKind::Directional,
        position: Vec3::ZERO,
        direction: Vec3::NEG_Y,
        color: Vec3::ONE,
        energy: 1.0,
        range: 0.0,
        outer_cone_angle: 0.0,
        flags: LightFlags::empty(),
    });

    let aabb = &scene.light_aabbs[0];
    assert!(aabb.contains_point(Vec3::splat(1.0e6)));
    assert!(aabb.contains_point(Vec3::splat(-1.0e6)));
}

// ============================================================================
// Force fields
// ============================================================================

#[test]
fn test_force_fields_have_no_aabb_array() {
    let mut scene = Scene::new();
    let entity = scene.add_force_field(ForceField {
        kind: ForceFieldKind::Point,
        position: Vec3::ZERO,
        direction: Vec3::Y,
        gravity: -9.8,
        range: 10.0,
    });

    // Force fields are unculled: they are looked up by entity, not bounds.
    let field_ref = scene.lookup(entity).unwrap();
    assert_eq!(field_ref.kind, ComponentKind::ForceField);
    assert_eq!(scene.force_fields.len(), 1);
}
