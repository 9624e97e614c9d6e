use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;
use std::collections::HashMap;

use crate::model::{Buffers, Model};
use crate::scene_graph::object3d::{Object3D, ObjectId, RestPose};
use crate::scene_graph::scene_model::{SceneModel, SceneModelId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub models: Arena<SceneModel>,
    gltf_mesh_to_model: HashMap<usize, SceneModelId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            models: Arena::new(),
            gltf_mesh_to_model: HashMap::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    pub fn add_model(&mut self, model: SceneModel) -> SceneModelId {
        self.models.alloc(model)
    }

    pub fn get_model(&self, id: SceneModelId) -> Option<&Model> {
        self.models.get(id).map(|scene_model| &scene_model.model)
    }

    pub fn object_model(&self, object_id: ObjectId) -> Option<&Model> {
        self.get_object(object_id)
            .and_then(|object| object.model_id)
            .and_then(|model_id| self.get_model(model_id))
    }

    pub fn is_empty(&self) -> bool {
        self.objects.len() == 0
    }

    /// Spawns every node of `scene` and returns the ids of its root nodes.
    /// Nodes are allocated depth first, so arena order is a pre-order walk.
    pub fn spawn_gltf_scene(&mut self, buffers: Buffers, scene: &gltf::Scene) -> Vec<ObjectId> {
        scene
            .nodes()
            .map(|node| self.spawn_gltf_node(buffers, &node, None))
            .collect()
    }

    fn spawn_gltf_node(
        &mut self,
        buffers: Buffers,
        node: &gltf::Node,
        parent: Option<ObjectId>,
    ) -> ObjectId {
        let node_name = node.name().unwrap_or("Unnamed").to_string();
        let mut object = Object3D::named(node_name.clone());
        let (translation, rotation, scale) = node.transform().decomposed();

        object.rest = RestPose {
            translation: translation.into(),
            rotation: Quat::from_array(rotation),
            // Assume uniform scale
            scale: scale[0],
        };
        object.transform.set_transform(
            object.rest.translation,
            object.rest.rotation,
            object.rest.scale,
        );

        if let Some(mesh) = node.mesh() {
            object.model_id = self.model_for_mesh(buffers, mesh, &node_name);
        }

        let object_id = self.add_object(object);

        if let Some(parent_id) = parent {
            self.set_object_parent(object_id, Some(parent_id));
        }

        for child in node.children() {
            self.spawn_gltf_node(buffers, &child, Some(object_id));
        }

        object_id
    }

    fn model_for_mesh(
        &mut self,
        buffers: Buffers,
        mesh: gltf::Mesh,
        node_name: &str,
    ) -> Option<SceneModelId> {
        let mesh_index = mesh.index();

        if let Some(model_id) = self.gltf_mesh_to_model.get(&mesh_index).copied() {
            return Some(model_id);
        }

        let mesh_name = mesh
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("{} (Mesh)", node_name));

        match Model::from_gltf(mesh_name, mesh, buffers) {
            Ok(model) => {
                let model_id = self.add_model(SceneModel::new(model));
                self.gltf_mesh_to_model.insert(mesh_index, model_id);
                Some(model_id)
            }
            Err(err) => {
                log::warn!("Node {} has no usable mesh: {:#}", node_name, err);
                None
            }
        }
    }

    /// Recomputes world matrices for every dirty object, parents before children.
    pub fn update_world_transforms(&self) {
        let root_objects = self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        });

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_object_hierarchy(child_id);
    }

    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Quat) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_scale(&mut self, object_id: ObjectId, scale: f32) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_scale(scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_translation(translation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    pub fn rest_pose(&self, object_id: ObjectId) -> RestPose {
        self.objects
            .get(object_id)
            .map(|object| object.rest)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_world_matrix_follows_parent() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("Parent"));
        let child = scene.add_object(Object3D::named("Child"));
        scene.set_object_parent(child, Some(parent));

        scene.set_object_translation(parent, Vec3::new(1.0, 0.0, 0.0));
        scene.set_object_translation(child, Vec3::new(0.0, 2.0, 0.0));
        scene.update_world_transforms();

        let position = scene.get_object(child).unwrap().world_position();
        assert!((position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn moving_parent_after_update_moves_child() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("Parent"));
        let child = scene.add_object(Object3D::named("Child"));
        scene.set_object_parent(child, Some(parent));
        scene.update_world_transforms();

        scene.set_object_translation(parent, Vec3::new(0.0, 0.0, 3.0));
        scene.update_world_transforms();

        let position = scene.get_object(child).unwrap().world_position();
        assert!((position.z - 3.0).abs() < 1e-5);
    }
}
