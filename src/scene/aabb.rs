/// Bounding volumes used for visibility culling.
///
/// AABBs are recomputed by the scene owner whenever the corresponding
/// transform changes; this subsystem only reads them. The layer mask is
/// carried on the AABB so a single cache line answers both the layer
/// test and the plane tests during culling.

use glam::{Mat4, Vec3};

/// Layer mask accepting every culling query.
pub const LAYER_ALL: u32 = u32::MAX;

/// Axis-Aligned Bounding Box in world space with a culling layer mask.
///
/// Invariant: `min <= max` componentwise. An AABB with `layer_mask == 0`
/// participates in no culling test (it fails every query mask).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
    /// 32-bit culling layer mask; 0 = never visible
    pub layer_mask: u32,
}

impl AABB {
    /// Create an AABB on the default layer (all bits set).
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "AABB min must be <= max componentwise"
        );
        Self {
            min,
            max,
            layer_mask: LAYER_ALL,
        }
    }

    /// Create an AABB from a center point and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Same AABB on a specific layer mask.
    pub fn with_layer_mask(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half extents of the box (always non-negative).
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    /// The layer mask is preserved.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB {
            min: new_min,
            max: new_max,
            layer_mask: self.layer_mask,
        }
    }

    /// Test if this AABB intersects (overlaps) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
            && self.min.y <= other.max.y && self.max.y >= other.min.y
            && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
            && self.min.y <= other.min.y && self.max.y >= other.max.y
            && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if a point lies inside (or on the surface of) the box.
    ///
    /// Used by the occlusion-query path: an object whose box contains the
    /// camera eye is trivially visible and never receives a query.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
            && point.z >= self.min.z && point.z <= self.max.z
    }

    /// The 8 corner points of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (mn, mx) = (self.min, self.max);
        [
            Vec3::new(mn.x, mn.y, mn.z),
            Vec3::new(mx.x, mn.y, mn.z),
            Vec3::new(mn.x, mx.y, mn.z),
            Vec3::new(mx.x, mx.y, mn.z),
            Vec3::new(mn.x, mn.y, mx.z),
            Vec3::new(mx.x, mn.y, mx.z),
            Vec3::new(mn.x, mx.y, mx.z),
            Vec3::new(mx.x, mx.y, mx.z),
        ]
    }
}

// ===== SPHERE =====

/// Bounding sphere.
///
/// Used by the cascade planner: fitting an AABB to the bounding sphere of
/// the cascade corner points keeps the shadow box size stable while the
/// viewer camera rotates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point
    pub center: Vec3,
    /// Radius (non-negative)
    pub radius: f32,
}

impl Sphere {
    /// Bounding sphere of a point set: centroid center, max-distance radius.
    ///
    /// Not the minimal enclosing sphere, but deterministic and rotation
    /// stable, which is what cascade fitting needs.
    pub fn from_points(points: &[Vec3]) -> Self {
        debug_assert!(!points.is_empty(), "bounding sphere of an empty point set");

        let mut center = Vec3::ZERO;
        for p in points {
            center += *p;
        }
        center /= points.len() as f32;

        let mut radius: f32 = 0.0;
        for p in points {
            radius = radius.max(center.distance(*p));
        }

        Self { center, radius }
    }

    /// Conservative AABB enclosing this sphere (on the default layer).
    pub fn aabb(&self) -> AABB {
        AABB::from_center_half_extents(self.center, Vec3::splat(self.radius))
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
