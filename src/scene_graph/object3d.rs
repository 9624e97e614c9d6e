use glam::{Quat, Vec3};
use id_arena::Id;

use crate::interaction::descriptor::NodeDescriptor;
use crate::materials::Surface;
use crate::scene_graph::scene_model::SceneModelId;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

/// Local transform as authored in the scene file. Animators compose on top of it.
#[derive(Debug, Clone, Copy)]
pub struct RestPose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for RestPose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

pub struct Object3D {
    pub name: String,
    pub descriptor: NodeDescriptor,
    pub surface: Surface,
    pub transform: Transform,
    pub rest: RestPose,
    pub model_id: Option<SceneModelId>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn world_position(&self) -> Vec3 {
        self.transform.get_world_matrix().w_axis.truncate()
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            descriptor: NodeDescriptor::default(),
            surface: Surface::Imported,
            transform: Transform::from_translation(Vec3::ZERO),
            rest: RestPose::default(),
            model_id: None,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}
