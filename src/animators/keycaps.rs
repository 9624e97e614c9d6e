use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec3;

use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};
use crate::tween::{Easing, Tween};

const KEY_TRAVEL: f32 = 0.02;
const KEY_PRESS_DURATION: f32 = 0.18;

/// Dips the keycap bound to a pressed key and lets it spring back.
#[derive(Debug, Default)]
pub struct KeycapAnimator {
    presses: HashMap<ObjectId, Tween<f32>>,
}

impl KeycapAnimator {
    /// Returns how many keycaps reacted.
    pub fn press(&mut self, key: &str, registry: &InteractiveRegistry) -> usize {
        let key = key.to_lowercase();
        let mut pressed = 0;

        for id in registry.keycaps_for(&key) {
            self.presses
                .insert(id, Tween::new(0.0, 1.0, KEY_PRESS_DURATION, Easing::Linear));
            pressed += 1;
        }

        pressed
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for (&id, press) in self.presses.iter_mut() {
            let progress = press.advance(dt);
            let depth = KEY_TRAVEL * (PI * progress).sin();
            let rest = scene.rest_pose(id).translation;

            scene.set_object_translation(id, rest - Vec3::Y * depth);
        }
        self.presses.retain(|_, press| !press.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::Object3D;

    #[test]
    fn pressed_key_dips_and_returns() {
        let mut scene = Scene::new();
        let key_q = scene.add_object(Object3D::named("Key_Q"));
        let key_w = scene.add_object(Object3D::named("Key_W"));
        let registry = InteractiveRegistry {
            keycaps: vec![("q".to_string(), key_q), ("w".to_string(), key_w)],
            ..Default::default()
        };
        let mut keycaps = KeycapAnimator::default();

        assert_eq!(keycaps.press("Q", &registry), 1);
        keycaps.update(KEY_PRESS_DURATION / 2.0, &mut scene);

        let dipped = scene.get_object_transform(key_q).unwrap().translation();
        assert!((dipped.y + KEY_TRAVEL).abs() < 1e-5);
        assert_eq!(scene.get_object_transform(key_w).unwrap().translation(), Vec3::ZERO);

        keycaps.update(KEY_PRESS_DURATION, &mut scene);
        let back = scene.get_object_transform(key_q).unwrap().translation();
        assert!(back.y.abs() < 1e-5);
    }

    #[test]
    fn unbound_key_does_nothing() {
        let registry = InteractiveRegistry::default();
        assert_eq!(KeycapAnimator::default().press("z", &registry), 0);
    }
}
