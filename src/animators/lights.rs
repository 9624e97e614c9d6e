use crate::registry::InteractiveRegistry;
use crate::scene_graph::Scene;
use crate::theme::ThemeMix;

/// Scales the night-only lights with the theme mix: hidden by day, full size at night.
pub struct ScaleLightAnimator {
    mix: ThemeMix,
    applied: Option<f32>,
}

impl ScaleLightAnimator {
    pub fn new(mix: ThemeMix) -> Self {
        Self { mix, applied: None }
    }

    pub fn update(&mut self, scene: &mut Scene, registry: &InteractiveRegistry) {
        let mix = self.mix.get();
        if self.applied == Some(mix) {
            return;
        }

        for &id in &registry.scale_lights {
            let rest = scene.rest_pose(id).scale;
            scene.set_object_scale(id, rest * mix);
        }
        self.applied = Some(mix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::Object3D;
    use crate::theme::ThemeController;

    #[test]
    fn lights_follow_the_theme() {
        let mut scene = Scene::new();
        let lamp = scene.add_object(Object3D::named("Lamp_ScaleLight"));
        let registry = InteractiveRegistry {
            scale_lights: vec![lamp],
            ..Default::default()
        };
        let mut theme = ThemeController::new(1.0);
        let mut lights = ScaleLightAnimator::new(theme.mix());

        lights.update(&mut scene, &registry);
        assert_eq!(scene.get_object_transform(lamp).unwrap().scale(), 0.0);

        theme.toggle();
        theme.update(1.0);
        lights.update(&mut scene, &registry);
        assert!((scene.get_object_transform(lamp).unwrap().scale() - 1.0).abs() < 1e-5);
    }
}
