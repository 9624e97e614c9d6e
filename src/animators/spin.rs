//! Click-triggered spins
//!
//! Each object keeps its own trigger count and cooldown for the life of the
//! process. Every third accepted trigger is a special spin.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::Quat;

use crate::cooldown::Cooldown;
use crate::scene_graph::{ObjectId, Scene};
use crate::tween::{Easing, Tween};

const SPECIAL_EVERY: u32 = 3;
const SPECIAL_ROTATION: f32 = 1.5;
const SPECIAL_DURATION: f32 = 0.7;
/// Smallest scale reached halfway through a spin
const SQUASH: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinOutcome {
    Suppressed,
    Spun { special: bool },
}

#[derive(Debug, Default)]
struct SpinState {
    count: u32,
    cooldown: Cooldown,
    active: Option<ActiveSpin>,
}

#[derive(Debug)]
struct ActiveSpin {
    base_rotation: Quat,
    base_scale: f32,
    yaw: Tween<f32>,
}

pub struct SpinAnimator {
    base_duration: f32,
    cooldown: f64,
    states: HashMap<ObjectId, SpinState>,
}

impl SpinAnimator {
    pub fn new(base_duration: f32, cooldown: f64) -> Self {
        Self {
            base_duration,
            cooldown,
            states: HashMap::new(),
        }
    }

    pub fn trigger(&mut self, object: ObjectId, now: f64, scene: &Scene) -> SpinOutcome {
        let state = self.states.entry(object).or_default();

        if !state.cooldown.try_trigger(now, self.cooldown) {
            log::debug!("Spin suppressed, object still cooling down");
            return SpinOutcome::Suppressed;
        }

        state.count += 1;
        let special = state.count % SPECIAL_EVERY == 0;

        let (turns, duration) = if special {
            (SPECIAL_ROTATION, self.base_duration * SPECIAL_DURATION)
        } else {
            (1.0, self.base_duration)
        };

        // A spin still running when the cooldown expires is finished in place
        let (base_rotation, base_scale) = match state.active.take() {
            Some(active) => (
                active.base_rotation * Quat::from_rotation_y(active.yaw.target()),
                active.base_scale,
            ),
            None => {
                let transform = scene.get_object_transform(object);
                (
                    transform.map(|t| t.rotation()).unwrap_or(Quat::IDENTITY),
                    transform.map(|t| t.scale()).unwrap_or(1.0),
                )
            }
        };

        state.active = Some(ActiveSpin {
            base_rotation,
            base_scale,
            yaw: Tween::new(0.0, TAU * turns, duration, Easing::CubicInOut),
        });

        SpinOutcome::Spun { special }
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for (&id, state) in self.states.iter_mut() {
            let Some(active) = state.active.as_mut() else {
                continue;
            };

            let yaw = active.yaw.advance(dt);
            let squash = 1.0 - (1.0 - SQUASH) * (PI * active.yaw.progress()).sin();

            scene.set_object_rotation(id, active.base_rotation * Quat::from_rotation_y(yaw));
            scene.set_object_scale(id, active.base_scale * squash);

            if active.yaw.is_finished() {
                scene.set_object_scale(id, active.base_scale);
                state.active = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::Object3D;

    fn setup() -> (Scene, ObjectId, SpinAnimator) {
        let mut scene = Scene::new();
        let chair = scene.add_object(Object3D::named("Chair_Spin"));
        (scene, chair, SpinAnimator::new(1.0, 2.0))
    }

    #[test]
    fn every_third_spin_is_special() {
        let (scene, chair, mut spins) = setup();

        let outcomes: Vec<SpinOutcome> = [0.0, 2.5, 5.0, 7.5, 10.0, 12.5]
            .into_iter()
            .map(|now| spins.trigger(chair, now, &scene))
            .collect();

        assert_eq!(
            outcomes,
            vec![
                SpinOutcome::Spun { special: false },
                SpinOutcome::Spun { special: false },
                SpinOutcome::Spun { special: true },
                SpinOutcome::Spun { special: false },
                SpinOutcome::Spun { special: false },
                SpinOutcome::Spun { special: true },
            ]
        );
    }

    #[test]
    fn trigger_inside_cooldown_changes_nothing() {
        let (mut scene, chair, mut spins) = setup();

        for now in [0.0, 2.5, 5.0] {
            spins.trigger(chair, now, &scene);
            spins.update(2.0, &mut scene);
        }
        let rotation = scene.get_object_transform(chair).unwrap().rotation();

        assert_eq!(spins.trigger(chair, 5.5, &scene), SpinOutcome::Suppressed);
        assert!(spins.states[&chair].active.is_none());
        spins.update(1.0, &mut scene);
        assert_eq!(scene.get_object_transform(chair).unwrap().rotation(), rotation);
    }

    #[test]
    fn special_spin_is_faster_and_turns_further() {
        let (mut scene, chair, mut spins) = setup();

        for now in [0.0, 2.5] {
            spins.trigger(chair, now, &scene);
            spins.update(2.0, &mut scene);
        }
        // Two full turns leave the chair facing where it started
        let rotation = scene.get_object_transform(chair).unwrap().rotation();
        assert!(rotation.dot(Quat::IDENTITY).abs() > 0.9999);

        spins.trigger(chair, 5.0, &scene);
        spins.update(0.7, &mut scene);

        assert!(spins.states[&chair].active.is_none());
        let rotation = scene.get_object_transform(chair).unwrap().rotation();
        assert!(rotation.dot(Quat::from_rotation_y(PI)).abs() > 0.9999);
    }

    #[test]
    fn scale_dips_mid_spin_and_recovers() {
        let (mut scene, chair, mut spins) = setup();
        spins.trigger(chair, 0.0, &scene);

        spins.update(0.5, &mut scene);
        let mid = scene.get_object_transform(chair).unwrap().scale();
        assert!((mid - SQUASH).abs() < 1e-4);

        spins.update(0.5, &mut scene);
        let end = scene.get_object_transform(chair).unwrap().scale();
        assert!((end - 1.0).abs() < 1e-5);
    }

    #[test]
    fn cooldowns_are_per_object() {
        let (mut scene, chair, mut spins) = setup();
        let stool = scene.add_object(Object3D::named("Stool_Spin"));

        spins.trigger(chair, 0.0, &scene);

        assert_eq!(
            spins.trigger(stool, 0.1, &scene),
            SpinOutcome::Spun { special: false }
        );
    }
}
