//! One-time pass over a freshly loaded scene: classify every node, swap in
//! the surface materials and fill the interactive registry.

use std::collections::BTreeSet;

use crate::config::SocialLink;
use crate::interaction::descriptor::{ClockHand, MailboxPart, NodeDescriptor, SurfaceMarker};
use crate::materials::{Surface, TextureSet};
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};
use crate::theme::ThemeMix;

pub struct BindResult {
    pub registry: InteractiveRegistry,
    /// Texture sets referenced by themed surfaces.
    pub texture_sets: BTreeSet<TextureSet>,
}

pub fn bind_scene(scene: &mut Scene, social_links: &[SocialLink], theme_mix: &ThemeMix) -> BindResult {
    let mut registry = InteractiveRegistry::default();
    let mut texture_sets = BTreeSet::new();

    let ids: Vec<ObjectId> = scene.objects.iter().map(|(id, _)| id).collect();

    for id in ids {
        let Some(object) = scene.get_object_mut(id) else {
            continue;
        };

        let descriptor = NodeDescriptor::parse(&object.name, social_links);

        match &descriptor.surface {
            SurfaceMarker::None => {}
            SurfaceMarker::Themed(set) => {
                texture_sets.insert(set.clone());
                registry.themed.push(id);
                object.surface = Surface::Themed {
                    texture_set: set.clone(),
                    mix: theme_mix.clone(),
                };
            }
            SurfaceMarker::Glass => {
                registry.glass.push(id);
                object.surface = Surface::Glass;
            }
            SurfaceMarker::Steam => {
                registry.steam.push(id);
                object.surface = Surface::Steam;
            }
            SurfaceMarker::Canvas => {
                object.surface = Surface::Canvas;
            }
        }

        register(&mut registry, id, &descriptor);
        object.descriptor = descriptor;
    }

    if registry.hour_hand.is_none() || registry.minute_hand.is_none() {
        log::warn!("Clock hands not found; the clock stays still");
    }

    log::info!(
        "Bound scene: {} raycast targets, {} fans, {} themed surfaces",
        registry.raycast_targets.len(),
        registry.fans().count(),
        registry.themed.len()
    );

    BindResult {
        registry,
        texture_sets,
    }
}

fn register(registry: &mut InteractiveRegistry, id: ObjectId, descriptor: &NodeDescriptor) {
    if descriptor.is_raycast_target() {
        registry.raycast_targets.push(id);
    }

    if let Some(axis) = descriptor.fan_axis {
        registry.fan_list_mut(axis).push(id);
    }

    if descriptor.spin {
        registry.spin.push(id);
    }
    if descriptor.hover_scale {
        registry.hover_scale.push(id);
    }
    if descriptor.scale_light {
        registry.scale_lights.push(id);
    }
    if let Some(key) = &descriptor.keycap {
        registry.keycaps.push((key.clone(), id));
    }

    match descriptor.clock_hand {
        Some(ClockHand::Hour) => registry.hour_hand = registry.hour_hand.or(Some(id)),
        Some(ClockHand::Minute) => registry.minute_hand = registry.minute_hand.or(Some(id)),
        None => {}
    }

    if descriptor.whiteboard {
        registry.whiteboard = registry.whiteboard.or(Some(id));
    }
    if descriptor.screen {
        registry.screen = registry.screen.or(Some(id));
    }
    if descriptor.toggle_handle {
        registry.cup_lid = registry.cup_lid.or(Some(id));
    }

    match descriptor.mailbox {
        Some(MailboxPart::Cover) => registry.mailbox_cover = registry.mailbox_cover.or(Some(id)),
        Some(MailboxPart::Flag) => registry.mailbox_flag = registry.mailbox_flag.or(Some(id)),
        Some(MailboxPart::Body) | None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::SurfaceKind;
    use crate::scene_graph::Object3D;

    fn scene_with(names: &[&str]) -> (Scene, Vec<ObjectId>) {
        let mut scene = Scene::new();
        let ids = names
            .iter()
            .map(|name| scene.add_object(Object3D::named(*name)))
            .collect();
        (scene, ids)
    }

    #[test]
    fn objects_land_in_every_matching_list() {
        let (mut scene, ids) = scene_with(&["Fan_X_Raycast_First", "Chair_Spin_Raycast", "Desk"]);

        let result = bind_scene(&mut scene, &[], &ThemeMix::default());
        let registry = result.registry;

        assert_eq!(registry.fans_x, vec![ids[0]]);
        assert!(registry.fans_y.is_empty() && registry.fans_z.is_empty());
        assert_eq!(registry.raycast_targets, vec![ids[0], ids[1]]);
        assert_eq!(registry.spin, vec![ids[1]]);
        assert!(result.texture_sets.contains("First"));
    }

    #[test]
    fn unmarked_nodes_are_untouched() {
        let (mut scene, ids) = scene_with(&["Desk", "Floor"]);

        let result = bind_scene(&mut scene, &[], &ThemeMix::default());

        assert!(result.registry.raycast_targets.is_empty());
        for id in ids {
            assert_eq!(scene.get_object(id).unwrap().surface.kind(), SurfaceKind::Imported);
        }
    }

    #[test]
    fn surfaces_are_replaced_by_marker() {
        let (mut scene, ids) =
            scene_with(&["Window_Glass", "Coffee_Steam", "Wall_Second", "Whiteboard"]);

        let result = bind_scene(&mut scene, &[], &ThemeMix::default());

        let kind = |index: usize| scene.get_object(ids[index]).unwrap().surface.kind();
        assert_eq!(kind(0), SurfaceKind::Glass);
        assert_eq!(kind(1), SurfaceKind::Steam);
        assert_eq!(kind(2), SurfaceKind::Themed);
        assert_eq!(kind(3), SurfaceKind::Canvas);
        assert_eq!(result.registry.whiteboard, Some(ids[3]));
        assert_eq!(result.registry.steam, vec![ids[1]]);
    }

    #[test]
    fn themed_surfaces_share_the_theme_mix() {
        let (mut scene, ids) = scene_with(&["Wall_First", "Shelf_Second"]);
        let mut theme = crate::theme::ThemeController::new(0.0);

        bind_scene(&mut scene, &[], &theme.mix());
        theme.toggle();
        theme.update(0.0);

        for id in ids {
            let mix = scene.get_object(id).unwrap().surface.theme_mix();
            assert!((mix - 1.0).abs() < 1e-5);
        }
    }
}
