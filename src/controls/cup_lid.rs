use glam::{Quat, Vec3};

use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};
use crate::tween::{Easing, Tween};

const LIFT_HEIGHT: f32 = 0.12;
const LIFT_TILT: f32 = 0.35;
const LIFT_DURATION: f32 = 0.45;

/// Lifts the cup lid off and puts it back. A toggle mid-move turns the lid around.
pub struct CupLid {
    lid: Option<ObjectId>,
    lifted: bool,
    amount: Tween<f32>,
}

impl CupLid {
    pub fn new(registry: &InteractiveRegistry) -> Self {
        Self {
            lid: registry.cup_lid,
            lifted: false,
            amount: Tween::new(0.0, 0.0, 0.0, Easing::Linear),
        }
    }

    pub fn toggle(&mut self) {
        if self.lid.is_none() {
            log::debug!("No cup lid in the scene");
            return;
        }

        self.lifted = !self.lifted;
        let target = if self.lifted { 1.0 } else { 0.0 };
        self.amount = Tween::new(self.amount.value(), target, LIFT_DURATION, Easing::QuadOut);
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        let Some(lid) = self.lid else {
            return;
        };
        if self.amount.is_finished() {
            return;
        }

        let amount = self.amount.advance(dt);
        let rest = scene.rest_pose(lid);

        scene.set_object_translation(lid, rest.translation + Vec3::Y * LIFT_HEIGHT * amount);
        scene.set_object_rotation(lid, rest.rotation * Quat::from_rotation_z(LIFT_TILT * amount));
    }
}
