/// Scene component types addressed by dense per-category indices.
///
/// These are the subsystem's view of the scene owner's data: parallel
/// arrays (component + AABB per index). The owner mutates them between
/// frames; they are read-only for the duration of one frame.

use bitflags::bitflags;
use glam::{Mat4, Vec3, Vec4};

use super::aabb::AABB;

bitflags! {
    /// Per-object render flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ObjectFlags: u32 {
        /// Object participates in rasterization passes
        const RENDERABLE = 1 << 0;
        /// Object is drawn into shadow maps
        const CAST_SHADOW = 1 << 1;
        /// Object is alpha blended (back-to-front queue)
        const TRANSPARENT = 1 << 2;
        /// Object requests a planar reflection of its surface plane
        const PLANAR_REFLECTION = 1 << 3;
    }
}

bitflags! {
    /// Per-light flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LightFlags: u32 {
        /// Light renders a shadow map when a slot is available
        const CAST_SHADOW = 1 << 0;
        /// Light contributes to volumetric scattering
        const VOLUMETRICS = 1 << 1;
        /// Light is baked; never allocated a per-frame shadow slot
        const STATIC = 1 << 2;
    }
}

/// Half extent of the box enclosing a directional light (covers any scene).
const DIRECTIONAL_EXTENT: f32 = 1.0e9;

/// A renderable mesh instance.
#[derive(Debug, Clone)]
pub struct ObjectInstance {
    /// Index into the external mesh table (must fit in 24 bits)
    pub mesh_index: u32,
    /// World transform
    pub world: Mat4,
    /// Render flags
    pub flags: ObjectFlags,
    /// Per-instance stencil reference override; a change forces a draw flush
    pub stencil_ref: u8,
}

impl ObjectInstance {
    /// Reflection plane of the object's local XZ surface: (normal, d).
    ///
    /// Only meaningful for objects with [`ObjectFlags::PLANAR_REFLECTION`].
    pub fn reflection_plane(&self) -> Vec4 {
        let normal = self.world.transform_vector3(Vec3::Y).normalize_or_zero();
        let position = self.world.col(3).truncate();
        normal.extend(-normal.dot(position))
    }
}

/// Light source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Infinitely distant light; always shadow-priority 0
    Directional,
    /// Omnidirectional point light (cubemap shadows)
    Point,
    /// Cone spot light (one 2D shadow map)
    Spot,
}

/// A light source.
#[derive(Debug, Clone)]
pub struct Light {
    /// Kind of light
    pub kind: LightKind,
    /// World position (ignored for directional)
    pub position: Vec3,
    /// Normalized direction the light points toward
    pub direction: Vec3,
    /// Linear RGB color in [0, 1]
    pub color: Vec3,
    /// Intensity multiplier
    pub energy: f32,
    /// Influence radius (point/spot); shadow far plane
    pub range: f32,
    /// Outer cone half-angle in radians (spot only)
    pub outer_cone_angle: f32,
    /// Behavior flags
    pub flags: LightFlags,
}

impl Light {
    /// World-space bounds of the light's influence region.
    ///
    /// Directional lights get an effectively unbounded box so they pass
    /// every frustum test.
    pub fn aabb(&self) -> AABB {
        match self.kind {
            LightKind::Directional => AABB::from_center_half_extents(
                Vec3::ZERO,
                Vec3::splat(DIRECTIONAL_EXTENT),
            ),
            LightKind::Point | LightKind::Spot => {
                AABB::from_center_half_extents(self.position, Vec3::splat(self.range))
            }
        }
    }
}

/// A projected decal volume (oriented unit cube under `world`).
#[derive(Debug, Clone)]
pub struct Decal {
    /// World transform of the decal's unit cube
    pub world: Mat4,
    /// RGBA tint
    pub color: Vec4,
    /// Emissive strength
    pub emissive: f32,
}

/// An environment reflection probe.
#[derive(Debug, Clone)]
pub struct EnvProbe {
    /// World transform of the probe's capture volume
    pub world: Mat4,
    /// Probe center
    pub position: Vec3,
    /// Influence radius
    pub range: f32,
    /// Index of the probe's cubemap in the external texture array
    pub texture_index: u32,
}

/// Force field kind for the simulation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceFieldKind {
    /// Radial attraction/repulsion around a point
    Point,
    /// Directional push from an infinite plane
    Plane,
}

/// A force field affecting GPU simulation (never culled: simulation is
/// not view dependent, and fields are assumed few).
#[derive(Debug, Clone)]
pub struct ForceField {
    /// Kind of field
    pub kind: ForceFieldKind,
    /// Field origin (point) or a point on the plane
    pub position: Vec3,
    /// Plane normal / unused for point fields
    pub direction: Vec3,
    /// Signed strength; negative attracts
    pub gravity: f32,
    /// Influence radius
    pub range: f32,
}
