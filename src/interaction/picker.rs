use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::math::ray::TriangleHit;
use crate::math::Ray;
use crate::model::Vertex;
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};

#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    pub object: ObjectId,
    /// World-space distance from the ray origin
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Casts the pointer ray against the registered raycast targets.
pub struct PointerPicker {
    enabled: bool,
    hits: Vec<Intersection>,
}

impl Default for PointerPicker {
    fn default() -> Self {
        Self {
            enabled: true,
            hits: Vec::new(),
        }
    }
}

impl PointerPicker {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops the last hits so nothing stale gets clicked.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.hits.clear();
        }
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Returns the hits under `ndc`, nearest first. Empty while disabled.
    pub fn update(
        &mut self,
        ndc: Vec2,
        camera: &Camera,
        scene: &Scene,
        registry: &InteractiveRegistry,
    ) -> &[Intersection] {
        self.hits.clear();

        if !self.enabled {
            return &self.hits;
        }

        let ray = camera.ray_from_ndc(ndc);

        self.hits.extend(
            registry
                .raycast_targets
                .iter()
                .filter_map(|&object| intersect_object(&ray, scene, object)),
        );
        self.hits
            .sort_by(|a, b| a.distance.total_cmp(&b.distance));

        &self.hits
    }

    pub fn hits(&self) -> &[Intersection] {
        &self.hits
    }

    pub fn nearest(&self) -> Option<&Intersection> {
        self.hits.first()
    }
}

/// Nearest hit of a world-space ray on one object's mesh. Needs up to date
/// world transforms.
pub fn intersect_object(ray: &Ray, scene: &Scene, object_id: ObjectId) -> Option<Intersection> {
    let object = scene.get_object(object_id)?;
    let model = scene.object_model(object_id)?;

    let world = *object.transform.get_world_matrix();
    model.bounding_box.transformed(&world).ray_hit(ray)?;

    let inverse = *object.transform.get_inverse_world_matrix();
    let local_ray = ray.transformed(&inverse);

    let mut nearest: Option<(TriangleHit, [&Vertex; 3])> = None;

    for primitive in &model.primitives {
        if primitive.bounding_box.ray_hit(&local_ray).is_none() {
            continue;
        }

        for triangle in primitive.triangles() {
            let [a, b, c] = triangle;
            let Some(hit) = local_ray.intersect_triangle(a.position, b.position, c.position) else {
                continue;
            };

            if nearest.map_or(true, |(best, _)| hit.t < best.t) {
                nearest = Some((hit, triangle));
            }
        }
    }

    let (hit, [a, b, c]) = nearest?;
    let w = 1.0 - hit.u - hit.v;

    let local_point = local_ray.at(hit.t);
    let local_normal = a.normal * w + b.normal * hit.u + c.normal * hit.v;
    let uv = a.tex_coords * w + b.tex_coords * hit.u + c.tex_coords * hit.v;

    let point = world.transform_point3(local_point);
    let normal = inverse
        .transpose()
        .transform_vector3(local_normal)
        .normalize_or_zero();

    Some(Intersection {
        object: object_id,
        distance: ray.origin.distance(point),
        point,
        normal,
        uv,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::quad_model;
    use crate::scene_graph::{Object3D, SceneModel};

    fn add_quad(scene: &mut Scene, name: &str, translation: Vec3) -> ObjectId {
        let model_id = scene.add_model(SceneModel::new(quad_model(name)));
        let mut object = Object3D::named(name);
        object.model_id = Some(model_id);
        let id = scene.add_object(object);
        scene.set_object_translation(id, translation);
        id
    }

    fn camera() -> Camera {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            ..Default::default()
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    #[test]
    fn no_targets_means_no_hits() {
        let mut scene = Scene::new();
        add_quad(&mut scene, "Poster", Vec3::ZERO);
        scene.update_world_transforms();

        let registry = InteractiveRegistry::default();
        let mut picker = PointerPicker::default();

        for ndc in [Vec2::ZERO, Vec2::new(0.9, -0.9), Vec2::new(-1.0, 1.0)] {
            assert!(picker.update(ndc, &camera(), &scene, &registry).is_empty());
        }
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let mut scene = Scene::new();
        let far = add_quad(&mut scene, "Far", Vec3::new(0.0, 0.0, -2.0));
        let near = add_quad(&mut scene, "Near", Vec3::ZERO);
        scene.update_world_transforms();

        let registry = InteractiveRegistry {
            raycast_targets: vec![far, near],
            ..Default::default()
        };
        let mut picker = PointerPicker::default();
        let camera = camera();
        let hits = picker.update(Vec2::ZERO, &camera, &scene, &registry);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].object, near);
        assert_eq!(hits[1].object, far);
        // Rays start on the near plane
        assert!((hits[0].distance - (5.0 - camera.near)).abs() < 1e-2);
        assert!((hits[0].normal - Vec3::Z).length() < 1e-4);
        assert!((hits[0].uv - Vec2::new(0.5, 0.5)).length() < 1e-3);
    }

    #[test]
    fn disabled_picker_returns_nothing() {
        let mut scene = Scene::new();
        let quad = add_quad(&mut scene, "Poster", Vec3::ZERO);
        scene.update_world_transforms();

        let registry = InteractiveRegistry {
            raycast_targets: vec![quad],
            ..Default::default()
        };
        let mut picker = PointerPicker::default();
        picker.set_enabled(false);

        assert!(picker.update(Vec2::ZERO, &camera(), &scene, &registry).is_empty());
    }

    #[test]
    fn scaled_object_reports_world_distance() {
        let mut scene = Scene::new();
        let quad = add_quad(&mut scene, "Poster", Vec3::new(0.0, 0.0, 1.0));
        scene.set_object_scale(quad, 3.0);
        scene.update_world_transforms();

        let ray = Ray::new(Vec3::new(1.2, 0.0, 5.0), Vec3::NEG_Z);
        let hit = intersect_object(&ray, &scene, quad).unwrap();

        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(1.2, 0.0, 1.0)).length() < 1e-4);
        assert!((hit.uv.x - 0.9).abs() < 1e-4);
    }
}
