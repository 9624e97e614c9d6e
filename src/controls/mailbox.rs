//! Mailbox collaborator
//!
//! The cover opens on the first click and lowers the flag. A click on the
//! open mailbox asks for the contact modal and closes the cover. Clicks that
//! arrive while the cover is still moving are swallowed.

use std::f32::consts::FRAC_PI_2;

use glam::Quat;

use crate::interaction::descriptor::NodeDescriptor;
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};
use crate::tween::{Easing, Tween};

const COVER_OPEN_ANGLE: f32 = FRAC_PI_2 * 1.1;
const FLAG_DOWN_ANGLE: f32 = -FRAC_PI_2;
const COVER_DURATION: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxOutcome {
    /// The object is not part of the mailbox.
    NotMine,
    /// Clicked while animating. Handled, nothing happens.
    Dropped,
    Opened,
    /// The cover is closing and the contact modal should open.
    ContactRequested,
}

impl MailboxOutcome {
    pub fn is_handled(self) -> bool {
        self != MailboxOutcome::NotMine
    }
}

pub struct Mailbox {
    cover: Option<ObjectId>,
    flag: Option<ObjectId>,
    open: bool,
    cover_angle: Tween<f32>,
    flag_angle: Tween<f32>,
}

impl Mailbox {
    pub fn new(registry: &InteractiveRegistry) -> Self {
        Self {
            cover: registry.mailbox_cover,
            flag: registry.mailbox_flag,
            open: false,
            cover_angle: Tween::new(0.0, 0.0, 0.0, Easing::Linear),
            flag_angle: Tween::new(0.0, 0.0, 0.0, Easing::Linear),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_animating(&self) -> bool {
        !self.cover_angle.is_finished() || !self.flag_angle.is_finished()
    }

    pub fn handle_intersection(&mut self, descriptor: &NodeDescriptor) -> MailboxOutcome {
        if descriptor.mailbox.is_none() {
            return MailboxOutcome::NotMine;
        }

        if self.is_animating() {
            log::debug!("Mailbox click dropped while animating");
            return MailboxOutcome::Dropped;
        }

        if self.open {
            self.open = false;
            self.cover_angle = Tween::new(
                self.cover_angle.value(),
                0.0,
                COVER_DURATION,
                Easing::CubicInOut,
            );
            MailboxOutcome::ContactRequested
        } else {
            self.open = true;
            self.cover_angle = Tween::new(
                self.cover_angle.value(),
                COVER_OPEN_ANGLE,
                COVER_DURATION,
                Easing::BackOut,
            );
            self.flag_angle = Tween::new(
                self.flag_angle.value(),
                FLAG_DOWN_ANGLE,
                COVER_DURATION,
                Easing::CubicInOut,
            );
            MailboxOutcome::Opened
        }
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        if !self.is_animating() {
            return;
        }

        let cover_angle = self.cover_angle.advance(dt);
        let flag_angle = self.flag_angle.advance(dt);

        if let Some(cover) = self.cover {
            let rest = scene.rest_pose(cover).rotation;
            scene.set_object_rotation(cover, rest * Quat::from_rotation_x(-cover_angle));
        }
        if let Some(flag) = self.flag {
            let rest = scene.rest_pose(flag).rotation;
            scene.set_object_rotation(flag, rest * Quat::from_rotation_z(flag_angle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::Object3D;

    fn setup() -> (Scene, Mailbox, NodeDescriptor) {
        let mut scene = Scene::new();
        let cover = scene.add_object(Object3D::named("Mailbox_Cover_Raycast"));
        let flag = scene.add_object(Object3D::named("Mailbox_Flag"));
        let registry = InteractiveRegistry {
            mailbox_cover: Some(cover),
            mailbox_flag: Some(flag),
            ..Default::default()
        };

        let descriptor = NodeDescriptor::parse("Mailbox_Cover_Raycast", &[]);
        (scene, Mailbox::new(&registry), descriptor)
    }

    #[test]
    fn open_then_contact() {
        let (mut scene, mut mailbox, descriptor) = setup();

        assert_eq!(mailbox.handle_intersection(&descriptor), MailboxOutcome::Opened);
        mailbox.update(1.0, &mut scene);
        assert!(mailbox.is_open());

        assert_eq!(
            mailbox.handle_intersection(&descriptor),
            MailboxOutcome::ContactRequested
        );
        assert!(!mailbox.is_open());
    }

    #[test]
    fn clicks_while_animating_are_dropped_but_handled() {
        let (mut scene, mut mailbox, descriptor) = setup();

        mailbox.handle_intersection(&descriptor);
        mailbox.update(0.1, &mut scene);

        let outcome = mailbox.handle_intersection(&descriptor);
        assert_eq!(outcome, MailboxOutcome::Dropped);
        assert!(outcome.is_handled());
        assert!(mailbox.is_open());
    }

    #[test]
    fn other_objects_are_not_handled() {
        let (_, mut mailbox, _) = setup();
        let chair = NodeDescriptor::parse("Chair_Spin_Raycast", &[]);

        assert!(!mailbox.handle_intersection(&chair).is_handled());
    }
}
