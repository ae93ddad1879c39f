/// Scene: the set of textured objects drawn by the geometry pass.
///
/// Objects live in a SlotMap, so keys stay valid when other objects are
/// removed. Every object carries its own mesh, texture, material and
/// transform; meshes and textures are shared through `AssetCache`.

use std::fmt;
use std::sync::Arc;
use glam::{Mat4, Quat, Vec3};
use slotmap::{new_key_type, SlotMap};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::engine_info;
use crate::renderer::{Mesh, ObjectUniforms, Texture};
use super::assets::{AssetCache, AssetLoader};
use super::material::MaterialParams;

new_key_type! {
    /// Stable handle to a scene object
    pub struct ObjectKey;
}

/// Object groups of the vegetation scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectGroup {
    Terrain,
    Grass,
    Leaves,
    Stems,
    Plants,
    Rocks,
    Water,
}

impl ObjectGroup {
    pub const ALL: [ObjectGroup; 7] = [
        ObjectGroup::Terrain,
        ObjectGroup::Grass,
        ObjectGroup::Leaves,
        ObjectGroup::Stems,
        ObjectGroup::Plants,
        ObjectGroup::Rocks,
        ObjectGroup::Water,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ObjectGroup::Terrain => "terrain",
            ObjectGroup::Grass => "grass",
            ObjectGroup::Leaves => "leaves",
            ObjectGroup::Stems => "stems",
            ObjectGroup::Plants => "plants",
            ObjectGroup::Rocks => "rocks",
            ObjectGroup::Water => "water",
        }
    }
}

impl fmt::Display for ObjectGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model transform of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectTransform {
    Static(Mat4),
    /// `base` moved vertically by `amplitude * sin(time * frequency)`
    Oscillating {
        base: Mat4,
        amplitude: f32,
        frequency: f32,
    },
}

impl ObjectTransform {
    /// World matrix at scene time `time` (seconds)
    pub fn world(&self, time: f32) -> Mat4 {
        match *self {
            ObjectTransform::Static(world) => world,
            ObjectTransform::Oscillating { base, amplitude, frequency } => {
                Mat4::from_translation(Vec3::new(0.0, amplitude * (time * frequency).sin(), 0.0)) * base
            }
        }
    }
}

pub struct SceneObject {
    pub name: String,
    pub group: ObjectGroup,
    pub mesh: Arc<dyn Mesh>,
    pub texture: Arc<dyn Texture>,
    pub material: MaterialParams,
    pub transform: ObjectTransform,
    /// Drawn into the shadow map
    pub casts_shadow: bool,
}

impl SceneObject {
    pub fn world_matrix(&self, time: f32) -> Mat4 {
        self.transform.world(time)
    }

    pub fn object_uniforms(&self, time: f32) -> ObjectUniforms {
        ObjectUniforms::from_world(self.world_matrix(time))
    }
}

/// One object group of the vegetation layout
struct GroupLayout {
    group: ObjectGroup,
    mesh: &'static str,
    texture: &'static str,
    material: MaterialParams,
    /// (translation, uniform scale, rotation about Y in radians)
    placements: &'static [([f32; 3], f32, f32)],
}

const TREES: &[([f32; 3], f32, f32)] = &[
    ([-12.0, 0.0, -8.0], 1.0, 0.0),
    ([14.0, 0.0, -18.0], 1.3, 1.2),
    ([6.0, 0.0, 20.0], 0.9, 2.5),
];

const VEGETATION: [GroupLayout; 7] = [
    GroupLayout {
        group: ObjectGroup::Terrain,
        mesh: "terrain.obj",
        texture: "terrain.png",
        material: MaterialParams::MATTE,
        placements: &[([0.0, 0.0, 0.0], 1.0, 0.0)],
    },
    GroupLayout {
        group: ObjectGroup::Grass,
        mesh: "grass.obj",
        texture: "grass.png",
        material: MaterialParams::FOLIAGE,
        placements: &[
            ([-20.0, 0.0, 10.0], 1.0, 0.0),
            ([18.0, 0.0, 6.0], 1.0, 0.8),
            ([-4.0, 0.0, -24.0], 1.2, 1.9),
            ([25.0, 0.0, -30.0], 0.8, 3.0),
        ],
    },
    GroupLayout {
        group: ObjectGroup::Leaves,
        mesh: "leaves.obj",
        texture: "leaves.png",
        material: MaterialParams::FOLIAGE,
        placements: TREES,
    },
    GroupLayout {
        group: ObjectGroup::Stems,
        mesh: "stems.obj",
        texture: "bark.png",
        material: MaterialParams::FOLIAGE,
        placements: TREES,
    },
    GroupLayout {
        group: ObjectGroup::Plants,
        mesh: "plant.obj",
        texture: "plant.png",
        material: MaterialParams::FOLIAGE,
        placements: &[
            ([-8.0, 0.0, 4.0], 1.0, 0.3),
            ([2.0, 0.0, -6.0], 0.7, 1.1),
            ([10.0, 0.0, 12.0], 1.1, 2.2),
        ],
    },
    GroupLayout {
        group: ObjectGroup::Rocks,
        mesh: "rock.obj",
        texture: "rock.png",
        material: MaterialParams::STONE,
        placements: &[
            ([-16.0, 0.0, -2.0], 1.5, 0.0),
            ([9.0, 0.0, -10.0], 0.8, 0.9),
            ([-3.0, 0.0, 18.0], 1.1, 2.7),
        ],
    },
    GroupLayout {
        group: ObjectGroup::Water,
        mesh: "water.obj",
        texture: "water.png",
        material: MaterialParams::WATER,
        placements: &[([0.0, 0.5, 0.0], 1.0, 0.0)],
    },
];

/// Skybox faces in +X, -X, +Y, -Y, +Z, -Z order
pub const SKYBOX_FACES: [&str; 6] = [
    "xpos.png", "xneg.png", "ypos.png", "yneg.png", "zpos.png", "zneg.png",
];

pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self { objects: SlotMap::with_key() }
    }

    /// Build the vegetation demo scene
    ///
    /// Every mesh and texture is requested once, relative to
    /// `config.asset_root`. The first missing file aborts the build.
    pub fn vegetation(loader: &mut dyn AssetLoader, config: &SceneConfig) -> Result<Scene> {
        let mut cache = AssetCache::new(config.asset_root.clone());
        let mut scene = Scene::new();

        for layout in &VEGETATION {
            let mesh = cache.mesh(loader, layout.mesh)?;
            let texture = cache.texture(loader, layout.texture)?;

            for (index, &(translation, scale, yaw)) in layout.placements.iter().enumerate() {
                let base = Mat4::from_scale_rotation_translation(
                    Vec3::splat(scale),
                    Quat::from_rotation_y(yaw),
                    Vec3::from(translation),
                );
                let (transform, casts_shadow) = match layout.group {
                    ObjectGroup::Water => (
                        ObjectTransform::Oscillating {
                            base,
                            amplitude: config.water.amplitude,
                            frequency: config.water.frequency,
                        },
                        false,
                    ),
                    _ => (ObjectTransform::Static(base), true),
                };

                scene.insert(SceneObject {
                    name: format!("{}#{}", layout.group, index),
                    group: layout.group,
                    mesh: mesh.clone(),
                    texture: texture.clone(),
                    material: layout.material,
                    transform,
                    casts_shadow,
                });
            }
        }

        engine_info!("grove3d::Scene",
            "Vegetation scene ready: {} objects, {} meshes, {} textures",
            scene.len(), cache.mesh_count(), cache.texture_count());

        Ok(scene)
    }

    pub fn insert(&mut self, object: SceneObject) -> ObjectKey {
        self.objects.insert(object)
    }

    pub fn remove(&mut self, key: ObjectKey) -> Option<SceneObject> {
        self.objects.remove(key)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> + '_ {
        self.objects.iter()
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.objects.values()
    }

    /// Objects drawn into the shadow map
    pub fn shadow_casters(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.objects.values().filter(|object| object.casts_shadow)
    }

    pub fn group(&self, group: ObjectGroup) -> impl Iterator<Item = &SceneObject> + '_ {
        self.objects.values().filter(move |object| object.group == group)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
