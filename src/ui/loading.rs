use crate::tween::{Easing, Tween};

const DISMISS_DURATION: f32 = 0.8;

#[derive(Debug)]
enum Phase {
    Loading,
    Dismissing(Tween<f32>),
    Done,
}

/// Covers the room until assets are in and the visitor presses Enter.
#[derive(Debug)]
pub struct LoadingScreen {
    progress: f32,
    phase: Phase,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self {
            progress: 0.0,
            phase: Phase::Loading,
        }
    }
}

impl LoadingScreen {
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn can_enter(&self) -> bool {
        matches!(self.phase, Phase::Loading) && self.progress >= 1.0
    }

    /// Starts the fade out. Returns false until loading has finished.
    pub fn enter(&mut self) -> bool {
        if !self.can_enter() {
            return false;
        }

        self.phase = Phase::Dismissing(Tween::new(1.0, 0.0, DISMISS_DURATION, Easing::SineInOut));
        true
    }

    /// Overlay opacity.
    pub fn opacity(&self) -> f32 {
        match &self.phase {
            Phase::Loading => 1.0,
            Phase::Dismissing(fade) => fade.value(),
            Phase::Done => 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, Phase::Done)
    }

    pub fn update(&mut self, dt: f32) {
        if let Phase::Dismissing(fade) = &mut self.phase {
            fade.advance(dt);
            if fade.is_finished() {
                self.phase = Phase::Done;
            }
        }
    }
}
