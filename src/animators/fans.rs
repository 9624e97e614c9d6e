use std::f32::consts::TAU;

use glam::Quat;

use crate::interaction::descriptor::Axis;
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};

/// Spins every registered fan by a fixed step per frame.
///
/// The angle is derived from the frame count, so after `k` frames it is
/// exactly `k * increment` wrapped to one turn, however long the frames took.
pub struct FanAnimator {
    increment: f32,
    frames: u64,
    fans: Vec<(ObjectId, Axis)>,
}

impl FanAnimator {
    pub fn new(increment: f32, registry: &InteractiveRegistry) -> Self {
        Self {
            increment,
            frames: 0,
            fans: registry.fans().collect(),
        }
    }

    pub fn angle(&self) -> f32 {
        (self.frames as f64 * self.increment as f64).rem_euclid(TAU as f64) as f32
    }

    pub fn update(&mut self, scene: &mut Scene) {
        self.frames += 1;
        let angle = self.angle();

        for &(id, axis) in &self.fans {
            let base = scene.rest_pose(id).rotation;
            scene.set_object_rotation(id, base * Quat::from_axis_angle(axis.unit(), angle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::Object3D;

    #[test]
    fn k_frames_rotate_by_k_increments() {
        let mut scene = Scene::new();
        let fan = scene.add_object(Object3D::named("Fan_X"));
        let registry = InteractiveRegistry {
            fans_x: vec![fan],
            ..Default::default()
        };

        let mut animator = FanAnimator::new(0.05, &registry);
        for _ in 0..200 {
            animator.update(&mut scene);
        }

        let expected = (200.0_f64 * 0.05_f32 as f64).rem_euclid(TAU as f64) as f32;
        let rotation = scene.get_object_transform(fan).unwrap().rotation();

        assert!((animator.angle() - expected).abs() < 1e-5);
        assert!(rotation.dot(Quat::from_rotation_x(expected)).abs() > 0.99999);
    }

    #[test]
    fn fans_compose_with_their_rest_rotation() {
        let mut scene = Scene::new();
        let mut object = Object3D::named("Fan_Y");
        object.rest.rotation = Quat::from_rotation_x(0.5);
        let fan = scene.add_object(object);
        let registry = InteractiveRegistry {
            fans_y: vec![fan],
            ..Default::default()
        };

        let mut animator = FanAnimator::new(0.1, &registry);
        animator.update(&mut scene);

        let rotation = scene.get_object_transform(fan).unwrap().rotation();
        let expected = Quat::from_rotation_x(0.5) * Quat::from_rotation_y(0.1);
        assert!(rotation.dot(expected).abs() > 0.99999);
    }
}
