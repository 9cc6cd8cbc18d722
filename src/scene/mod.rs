//! Scene data module
//!
//! Parallel component arrays (objects, lights, decals, probes, emitters,
//! hairs, force fields) with world-space AABBs, plus the bounding-volume
//! math the culler runs on.

mod aabb;
mod components;
mod scene;

pub use aabb::{Sphere, AABB, LAYER_ALL};
pub use components::{
    Decal, EnvProbe, ForceField, ForceFieldKind, Light, LightFlags, LightKind,
    ObjectFlags, ObjectInstance,
};
pub use scene::{ComponentKind, ComponentRef, Entity, Scene};
