use std::f32::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Quat;

use crate::interaction::descriptor::Axis;
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl WallTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// System time shifted by a fixed UTC offset.
    pub fn now(utc_offset_minutes: i32) -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs() as i64)
            .unwrap_or(0);

        let seconds_of_day = (since_epoch + utc_offset_minutes as i64 * 60).rem_euclid(86_400);

        Self {
            hours: (seconds_of_day / 3600) as u32,
            minutes: (seconds_of_day / 60 % 60) as u32,
            seconds: (seconds_of_day % 60) as u32,
        }
    }
}

/// Hour and minute hand angles in radians. Negative is clockwise.
pub fn clock_angles(time: WallTime) -> (f32, f32) {
    let hours = (time.hours % 12) as f32 + time.minutes as f32 / 60.0;
    let minutes = time.minutes as f32 + time.seconds as f32 / 60.0;

    (-hours * TAU / 12.0, -minutes * TAU / 60.0)
}

/// Sets absolute hand rotations. A hand missing from the scene is skipped.
pub struct ClockAnimator {
    hour_hand: Option<ObjectId>,
    minute_hand: Option<ObjectId>,
    axis: Axis,
    utc_offset_minutes: i32,
}

impl ClockAnimator {
    pub fn new(registry: &InteractiveRegistry, axis: Axis, utc_offset_minutes: i32) -> Self {
        Self {
            hour_hand: registry.hour_hand,
            minute_hand: registry.minute_hand,
            axis,
            utc_offset_minutes,
        }
    }

    pub fn update(&self, scene: &mut Scene) {
        self.apply(WallTime::now(self.utc_offset_minutes), scene);
    }

    pub fn apply(&self, time: WallTime, scene: &mut Scene) {
        let (hour, minute) = clock_angles(time);
        let axis = self.axis.unit();

        for (hand, angle) in [(self.hour_hand, hour), (self.minute_hand, minute)] {
            if let Some(hand) = hand {
                let rest = scene.rest_pose(hand).rotation;
                scene.set_object_rotation(hand, rest * Quat::from_axis_angle(axis, angle));
            }
        }
    }
}
