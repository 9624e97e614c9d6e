use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::cooldown::Cooldown;
use crate::scene_graph::{ObjectId, Scene};
use crate::tween::{Easing, Tween};

const BOUNCE_HEIGHT: f32 = 0.08;
const BOUNCE_DURATION: f32 = 0.35;

/// The oinking pig: a random clip plus a hop, gated by a cooldown.
pub struct Pig {
    cooldown: Cooldown,
    cooldown_duration: f64,
    bounce: Option<(ObjectId, Tween<f32>)>,
}

impl Pig {
    pub fn new(cooldown_duration: f64) -> Self {
        Self {
            cooldown: Cooldown::Ready,
            cooldown_duration,
            bounce: None,
        }
    }

    /// Returns the index of the clip to play, None while cooling down.
    pub fn oink(
        &mut self,
        object: ObjectId,
        now: f64,
        clip_count: usize,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        if !self.cooldown.try_trigger(now, self.cooldown_duration) {
            log::debug!("Oink suppressed by cooldown");
            return None;
        }

        self.bounce = Some((object, Tween::new(0.0, 1.0, BOUNCE_DURATION, Easing::Linear)));

        if clip_count == 0 {
            return None;
        }
        Some(rng.gen_range(0..clip_count))
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        let Some((object, tween)) = self.bounce.as_mut() else {
            return;
        };

        let progress = tween.advance(dt);
        let rest = scene.rest_pose(*object).translation;
        let hop = BOUNCE_HEIGHT * (PI * progress).sin().max(0.0);
        scene.set_object_translation(*object, rest + Vec3::Y * hop);

        if tween.is_finished() {
            self.bounce = None;
        }
    }
}
