use std::collections::HashMap;

use crate::interaction::picker::Intersection;
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};
use crate::tween::{Easing, Tween};

const HOVER_SCALE_DURATION: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Unchanged,
    Changed {
        previous: Option<ObjectId>,
        hovered: Option<ObjectId>,
        cursor: Cursor,
    },
}

/// Owns the outline highlight set and the cursor style.
#[derive(Debug, Default)]
pub struct HoverResponder {
    hovered: Option<ObjectId>,
    highlight: Vec<ObjectId>,
    cursor: Cursor,
}

impl HoverResponder {
    pub fn respond(&mut self, hits: &[Intersection], scene: &Scene) -> HoverChange {
        let nearest = hits
            .first()
            .map(|hit| hit.object)
            .filter(|id| scene.get_object(*id).is_some());

        if nearest == self.hovered {
            return HoverChange::Unchanged;
        }

        let previous = self.hovered;
        self.hovered = nearest;
        self.highlight.clear();
        self.cursor = Cursor::Default;

        if let Some((id, object)) = nearest.and_then(|id| Some((id, scene.get_object(id)?))) {
            self.highlight.push(id);
            self.highlight.extend(object.child_ids.iter().copied());

            if object.descriptor.is_clickable() {
                self.cursor = Cursor::Pointer;
            }
        }

        HoverChange::Changed {
            previous,
            hovered: self.hovered,
            cursor: self.cursor,
        }
    }

    pub fn clear(&mut self) -> HoverChange {
        if self.hovered.is_none() {
            return HoverChange::Unchanged;
        }

        let previous = self.hovered.take();
        self.highlight.clear();
        self.cursor = Cursor::Default;

        HoverChange::Changed {
            previous,
            hovered: None,
            cursor: Cursor::Default,
        }
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    pub fn highlight(&self) -> &[ObjectId] {
        &self.highlight
    }

    pub fn is_highlighted(&self, object: ObjectId) -> bool {
        self.highlight.contains(&object)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

/// Grows members of the hover-scale list while they are hovered.
#[derive(Debug)]
pub struct HoverScaler {
    factor: f32,
    tweens: HashMap<ObjectId, Tween<f32>>,
}

impl HoverScaler {
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            tweens: HashMap::new(),
        }
    }

    pub fn on_hover_change(&mut self, change: HoverChange, scene: &Scene, registry: &InteractiveRegistry) {
        let HoverChange::Changed {
            previous, hovered, ..
        } = change
        else {
            return;
        };

        if let Some(id) = previous.filter(|id| registry.hover_scale.contains(id)) {
            self.retarget(id, scene, 1.0);
        }
        if let Some(id) = hovered.filter(|id| registry.hover_scale.contains(id)) {
            self.retarget(id, scene, self.factor);
        }
    }

    fn retarget(&mut self, id: ObjectId, scene: &Scene, factor: f32) {
        let rest = scene.rest_pose(id).scale;
        let current = scene
            .get_object_transform(id)
            .map(|transform| transform.scale())
            .unwrap_or(rest);

        self.tweens.insert(
            id,
            Tween::new(current, rest * factor, HOVER_SCALE_DURATION, Easing::BackOut),
        );
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for (id, tween) in self.tweens.iter_mut() {
            scene.set_object_scale(*id, tween.advance(dt));
        }
        self.tweens.retain(|_, tween| !tween.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::interaction::descriptor::NodeDescriptor;
    use crate::scene_graph::Object3D;

    fn hit(object: ObjectId) -> Intersection {
        Intersection {
            object,
            distance: 1.0,
            point: Vec3::ZERO,
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        }
    }

    fn object(scene: &mut Scene, name: &str) -> ObjectId {
        let mut object = Object3D::named(name);
        object.descriptor = NodeDescriptor::parse(name, &[]);
        scene.add_object(object)
    }

    #[test]
    fn nearest_hit_and_children_are_highlighted() {
        let mut scene = Scene::new();
        let chair = object(&mut scene, "Chair_Raycast");
        let leg = object(&mut scene, "Chair_Leg");
        let desk = object(&mut scene, "Desk_Raycast");
        scene.set_object_parent(leg, Some(chair));

        let mut responder = HoverResponder::default();
        let change = responder.respond(&[hit(chair), hit(desk)], &scene);

        assert_eq!(
            change,
            HoverChange::Changed {
                previous: None,
                hovered: Some(chair),
                cursor: Cursor::Pointer,
            }
        );
        assert_eq!(responder.highlight(), &[chair, leg]);
        assert!(!responder.is_highlighted(desk));
    }

    #[test]
    fn repeated_input_is_idempotent() {
        let mut scene = Scene::new();
        let chair = object(&mut scene, "Chair_Raycast");

        let mut responder = HoverResponder::default();
        responder.respond(&[hit(chair)], &scene);

        for _ in 0..3 {
            assert_eq!(responder.respond(&[hit(chair)], &scene), HoverChange::Unchanged);
            assert_eq!(responder.highlight(), &[chair]);
        }
    }

    #[test]
    fn hover_only_objects_keep_default_cursor() {
        let mut scene = Scene::new();
        let plant = object(&mut scene, "Plant_Hover");

        let mut responder = HoverResponder::default();
        responder.respond(&[hit(plant)], &scene);

        assert_eq!(responder.cursor(), Cursor::Default);
        assert_eq!(responder.hovered(), Some(plant));
    }

    #[test]
    fn empty_hits_clear_everything() {
        let mut scene = Scene::new();
        let chair = object(&mut scene, "Chair_Raycast");

        let mut responder = HoverResponder::default();
        responder.respond(&[hit(chair)], &scene);
        let change = responder.respond(&[], &scene);

        assert_eq!(
            change,
            HoverChange::Changed {
                previous: Some(chair),
                hovered: None,
                cursor: Cursor::Default,
            }
        );
        assert!(responder.highlight().is_empty());
        assert_eq!(responder.respond(&[], &scene), HoverChange::Unchanged);
    }

    #[test]
    fn hover_scale_grows_and_returns() {
        let mut scene = Scene::new();
        let lamp = object(&mut scene, "Lamp_Scale_Raycast");
        let registry = InteractiveRegistry {
            hover_scale: vec![lamp],
            ..Default::default()
        };

        let mut responder = HoverResponder::default();
        let mut scaler = HoverScaler::new(1.1);

        let change = responder.respond(&[hit(lamp)], &scene);
        scaler.on_hover_change(change, &scene, &registry);
        scaler.update(1.0, &mut scene);
        let scale = scene.get_object_transform(lamp).unwrap().scale();
        assert!((scale - 1.1).abs() < 1e-4);

        let change = responder.respond(&[], &scene);
        scaler.on_hover_change(change, &scene, &registry);
        scaler.update(1.0, &mut scene);
        let scale = scene.get_object_transform(lamp).unwrap().scale();
        assert!((scale - 1.0).abs() < 1e-4);
    }
}
