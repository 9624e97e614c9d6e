use std::cell::Cell;
use std::rc::Rc;

use crate::tween::{Easing, Tween};

/// Day (0.0) to night (1.0) blend shared by every themed surface.
///
/// Clones share the same cell. Only `ThemeController` writes it; materials
/// sample it when they are drawn.
#[derive(Debug, Clone, Default)]
pub struct ThemeMix(Rc<Cell<f32>>);

impl ThemeMix {
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    fn set(&self, value: f32) {
        self.0.set(value.clamp(0.0, 1.0));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Day,
    Night,
}

impl Theme {
    fn mix_target(self) -> f32 {
        match self {
            Theme::Day => 0.0,
            Theme::Night => 1.0,
        }
    }

    fn toggled(self) -> Theme {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

pub struct ThemeController {
    mix: ThemeMix,
    theme: Theme,
    transition: Option<Tween<f32>>,
    duration: f32,
}

impl ThemeController {
    pub fn new(duration: f32) -> Self {
        Self {
            mix: ThemeMix::default(),
            theme: Theme::Day,
            transition: None,
            duration,
        }
    }

    /// A reader handle for materials.
    pub fn mix(&self) -> ThemeMix {
        self.mix.clone()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Retargets from the live value, so toggling mid-transition reverses smoothly.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.transition = Some(Tween::new(
            self.mix.get(),
            self.theme.mix_target(),
            self.duration,
            Easing::SineInOut,
        ));
        log::debug!("Theme switching to {:?}", self.theme);
        self.theme
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(transition) = self.transition.as_mut() {
            self.mix.set(transition.advance(dt));

            if transition.is_finished() {
                self.transition = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_handle_sees_the_written_mix() {
        let mut controller = ThemeController::new(1.0);
        let surface_a = controller.mix();
        let surface_b = controller.mix();

        controller.toggle();
        controller.update(1.0);

        assert_eq!(controller.theme(), Theme::Night);
        assert!((surface_a.get() - 1.0).abs() < 1e-5);
        assert!((surface_b.get() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn toggle_mid_transition_reverses_from_live_value() {
        let mut controller = ThemeController::new(1.0);
        let mix = controller.mix();

        controller.toggle();
        controller.update(0.5);
        let halfway = mix.get();
        assert!(halfway > 0.0 && halfway < 1.0);

        controller.toggle();
        controller.update(0.0);
        assert!((mix.get() - halfway).abs() < 1e-5);

        controller.update(1.0);
        assert!(mix.get().abs() < 1e-5);
        assert_eq!(controller.theme(), Theme::Day);
    }
}
