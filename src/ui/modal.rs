//! Modal overlays
//!
//! Each modal fades in and out. A request that arrives while that modal is
//! still fading is dropped, not queued.

use std::collections::HashMap;

use crate::interaction::descriptor::ModalKind;
use crate::tween::{Easing, Tween};

pub const ALL_MODALS: [ModalKind; 3] = [ModalKind::About, ModalKind::Work, ModalKind::Contact];

#[derive(Debug)]
pub struct ModalState {
    open: bool,
    fade: Tween<f32>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            open: false,
            fade: Tween::new(0.0, 0.0, 0.0, Easing::Linear),
        }
    }
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_animating(&self) -> bool {
        !self.fade.is_finished()
    }

    pub fn opacity(&self) -> f32 {
        self.fade.value()
    }

    /// Visible at all, including while fading out.
    pub fn is_visible(&self) -> bool {
        self.open || self.is_animating()
    }

    fn start(&mut self, open: bool, duration: f32) -> bool {
        if self.is_animating() {
            log::debug!("Modal request dropped while animating");
            return false;
        }
        if self.open == open {
            return false;
        }

        let target = if open { 1.0 } else { 0.0 };
        self.open = open;
        self.fade = Tween::new(self.fade.value(), target, duration, Easing::QuadOut);
        true
    }
}

pub struct Modals {
    states: HashMap<ModalKind, ModalState>,
    fade_duration: f32,
}

impl Modals {
    pub fn new(fade_duration: f32) -> Self {
        Self {
            states: ALL_MODALS
                .into_iter()
                .map(|kind| (kind, ModalState::default()))
                .collect(),
            fade_duration,
        }
    }

    pub fn state(&self, kind: ModalKind) -> &ModalState {
        &self.states[&kind]
    }

    fn state_mut(&mut self, kind: ModalKind) -> &mut ModalState {
        self.states.entry(kind).or_default()
    }

    /// Opens `kind`, closing any other open modal. Returns false when dropped.
    pub fn open(&mut self, kind: ModalKind) -> bool {
        if self.state(kind).is_animating() {
            log::debug!("{:?} modal busy, open dropped", kind);
            return false;
        }

        let others: Vec<ModalKind> = ALL_MODALS
            .into_iter()
            .filter(|other| *other != kind && self.state(*other).is_open())
            .collect();
        // A fading-in modal cannot be closed yet, so it keeps the screen
        if let Some(busy) = others.iter().find(|other| self.state(**other).is_animating()) {
            log::debug!("{:?} modal busy, {:?} open dropped", busy, kind);
            return false;
        }
        for other in others {
            self.close(other);
        }

        let duration = self.fade_duration;
        self.state_mut(kind).start(true, duration)
    }

    pub fn close(&mut self, kind: ModalKind) -> bool {
        let duration = self.fade_duration;
        self.state_mut(kind).start(false, duration)
    }

    /// Closes whichever modal is open.
    pub fn close_open(&mut self) -> bool {
        match self.open_modal() {
            Some(kind) => self.close(kind),
            None => false,
        }
    }

    pub fn open_modal(&self) -> Option<ModalKind> {
        ALL_MODALS
            .into_iter()
            .find(|kind| self.state(*kind).is_open())
    }

    /// True while any modal is open or fading. Picking is off meanwhile.
    pub fn is_blocking(&self) -> bool {
        self.states.values().any(|state| state.is_visible())
    }

    pub fn update(&mut self, dt: f32) {
        for state in self.states.values_mut() {
            state.fade.advance(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_while_animating_are_dropped() {
        let mut modals = Modals::new(0.5);

        assert!(modals.open(ModalKind::About));
        assert!(modals.state(ModalKind::About).is_animating());

        assert!(!modals.close(ModalKind::About));
        assert!(!modals.open(ModalKind::About));

        modals.update(0.5);
        assert!(!modals.state(ModalKind::About).is_animating());
        assert!(modals.state(ModalKind::About).is_open());

        // The dropped close was not queued
        modals.update(1.0);
        assert!(modals.state(ModalKind::About).is_open());
    }

    #[test]
    fn fade_runs_both_ways() {
        let mut modals = Modals::new(0.4);

        modals.open(ModalKind::Work);
        modals.update(0.4);
        assert!((modals.state(ModalKind::Work).opacity() - 1.0).abs() < 1e-5);

        assert!(modals.close(ModalKind::Work));
        assert!(modals.is_blocking());
        modals.update(0.4);

        assert!(modals.state(ModalKind::Work).opacity().abs() < 1e-5);
        assert!(!modals.is_blocking());
    }

    #[test]
    fn open_is_dropped_while_another_modal_fades_in() {
        let mut modals = Modals::new(0.5);

        assert!(modals.open(ModalKind::About));
        assert!(!modals.open(ModalKind::Work));

        assert!(!modals.state(ModalKind::Work).is_open());
        assert_eq!(modals.open_modal(), Some(ModalKind::About));
    }

    #[test]
    fn opening_another_modal_closes_the_first() {
        let mut modals = Modals::new(0.2);
        modals.open(ModalKind::About);
        modals.update(0.2);

        assert!(modals.open(ModalKind::Contact));

        assert!(!modals.state(ModalKind::About).is_open());
        assert_eq!(modals.open_modal(), Some(ModalKind::Contact));
    }

    #[test]
    fn close_open_targets_the_visible_modal() {
        let mut modals = Modals::new(0.2);
        assert!(!modals.close_open());

        modals.open(ModalKind::Work);
        modals.update(0.2);

        assert!(modals.close_open());
        assert_eq!(modals.open_modal(), None);
    }
}
