/// Scene — parallel component arrays addressed by dense indices.
///
/// The culler and packer iterate these arrays by index; entity ids exist
/// only for cross-referencing components from owner code, never for
/// iteration. Each cullable category keeps its AABBs in a dedicated
/// array so the culling dispatches stream through contiguous memory.

use rustc_hash::FxHashMap;

use super::aabb::AABB;
use super::components::{Decal, EnvProbe, ForceField, Light, ObjectInstance};

/// Opaque, monotonically growing entity identifier.
///
/// Never reused; never an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity(u64);

/// Which component array an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Object,
    Light,
    Decal,
    Probe,
    Emitter,
    Hair,
    ForceField,
}

/// Resolved location of an entity's component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentRef {
    /// Category array holding the component
    pub kind: ComponentKind,
    /// Dense index within that array
    pub index: usize,
}

/// A scene: parallel component + AABB arrays per category.
///
/// Mutated only by the owner between frames. The visibility subsystem
/// treats the arrays as internally consistent for the duration of one
/// frame; mid-frame index mutation is a contract violation upstream.
#[derive(Default)]
pub struct Scene {
    /// Renderable instances
    pub objects: Vec<ObjectInstance>,
    /// World-space object bounds, parallel to `objects`
    pub object_aabbs: Vec<AABB>,

    /// Light sources
    pub lights: Vec<Light>,
    /// Light influence bounds, parallel to `lights`
    pub light_aabbs: Vec<AABB>,

    /// Decal volumes
    pub decals: Vec<Decal>,
    /// Decal bounds, parallel to `decals`
    pub decal_aabbs: Vec<AABB>,

    /// Environment probes
    pub probes: Vec<EnvProbe>,
    /// Probe bounds, parallel to `probes`
    pub probe_aabbs: Vec<AABB>,

    /// Particle emitter bounds (emitters themselves live in the sim stage)
    pub emitter_aabbs: Vec<AABB>,

    /// Hair strand group bounds (strand data lives in the sim stage)
    pub hair_aabbs: Vec<AABB>,

    /// Force fields; never culled
    pub force_fields: Vec<ForceField>,

    next_entity: u64,
    entity_lookup: FxHashMap<Entity, ComponentRef>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, kind: ComponentKind, index: usize) -> Entity {
        let entity = Entity(self.next_entity);
        self.next_entity += 1;
        self.entity_lookup.insert(entity, ComponentRef { kind, index });
        entity
    }

    /// Resolve an entity id to its component location.
    pub fn lookup(&self, entity: Entity) -> Option<ComponentRef> {
        self.entity_lookup.get(&entity).copied()
    }

    /// Add a renderable object with its world-space bounds.
    pub fn add_object(&mut self, object: ObjectInstance, aabb: AABB) -> Entity {
        let index = self.objects.len();
        self.objects.push(object);
        self.object_aabbs.push(aabb);
        self.register(ComponentKind::Object, index)
    }

    /// Add a light; bounds are derived from the light parameters.
    pub fn add_light(&mut self, light: Light) -> Entity {
        let index = self.lights.len();
        self.light_aabbs.push(light.aabb());
        self.lights.push(light);
        self.register(ComponentKind::Light, index)
    }

    /// Add a decal with its world-space bounds.
    pub fn add_decal(&mut self, decal: Decal, aabb: AABB) -> Entity {
        let index = self.decals.len();
        self.decals.push(decal);
        self.decal_aabbs.push(aabb);
        self.register(ComponentKind::Decal, index)
    }

    /// Add an environment probe with its world-space bounds.
    pub fn add_probe(&mut self, probe: EnvProbe, aabb: AABB) -> Entity {
        let index = self.probes.len();
        self.probes.push(probe);
        self.probe_aabbs.push(aabb);
        self.register(ComponentKind::Probe, index)
    }

    /// Add a particle emitter's bounds.
    pub fn add_emitter(&mut self, aabb: AABB) -> Entity {
        let index = self.emitter_aabbs.len();
        self.emitter_aabbs.push(aabb);
        self.register(ComponentKind::Emitter, index)
    }

    /// Add a hair strand group's bounds.
    pub fn add_hair(&mut self, aabb: AABB) -> Entity {
        let index = self.hair_aabbs.len();
        self.hair_aabbs.push(aabb);
        self.register(ComponentKind::Hair, index)
    }

    /// Add a force field (unculled).
    pub fn add_force_field(&mut self, field: ForceField) -> Entity {
        let index = self.force_fields.len();
        self.force_fields.push(field);
        self.register(ComponentKind::ForceField, index)
    }

    /// Replace an object's bounds (owner calls this when the transform moves).
    pub fn set_object_aabb(&mut self, index: usize, aabb: AABB) {
        self.object_aabbs[index] = aabb;
    }

    /// Refresh a light's derived bounds after the owner mutated it.
    pub fn refresh_light_aabb(&mut self, index: usize) {
        self.light_aabbs[index] = self.lights[index].aabb();
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
