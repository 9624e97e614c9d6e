//! Sound board
//!
//! Clips are addressed by path. Playback is delegated to an `AudioOutput`;
//! the board only tracks mute state and what should be playing.

use std::collections::HashSet;

pub trait AudioOutput {
    fn play(&mut self, clip: &str, looping: bool);
    fn stop_all(&mut self);
}

/// Output used when no audio backend is wired in.
#[derive(Debug, Default)]
pub struct LogOutput;

impl AudioOutput for LogOutput {
    fn play(&mut self, clip: &str, looping: bool) {
        log::debug!("Play {} (looping: {})", clip, looping);
    }

    fn stop_all(&mut self) {
        log::debug!("Stop all sounds");
    }
}

pub struct SoundBoard {
    output: Box<dyn AudioOutput>,
    muted: bool,
    ambient: Option<String>,
    missing: HashSet<String>,
}

impl SoundBoard {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            muted: false,
            ambient: None,
            missing: HashSet::new(),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Clips the loader could not find stay silent.
    pub fn mark_missing(&mut self, clip: &str) {
        self.missing.insert(clip.to_string());
    }

    fn is_playable(&self, clip: &str) -> bool {
        !self.muted && !clip.is_empty() && !self.missing.contains(clip)
    }

    pub fn play(&mut self, clip: &str) {
        if self.is_playable(clip) {
            self.output.play(clip, false);
        }
    }

    /// Starts the looping background clip. Remembered across mute toggles.
    pub fn play_ambient(&mut self, clip: &str) {
        if clip.is_empty() {
            return;
        }
        self.ambient = Some(clip.to_string());
        if self.is_playable(clip) {
            self.output.play(clip, true);
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;

        if self.muted {
            self.output.stop_all();
        } else if let Some(ambient) = self.ambient.clone() {
            if self.is_playable(&ambient) {
                self.output.play(&ambient, true);
            }
        }

        log::info!("Sound {}", if self.muted { "muted" } else { "on" });
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default, Clone)]
    struct Recording(Rc<RefCell<Vec<String>>>);

    impl AudioOutput for Recording {
        fn play(&mut self, clip: &str, looping: bool) {
            self.0.borrow_mut().push(format!("{} {}", clip, looping));
        }

        fn stop_all(&mut self) {
            self.0.borrow_mut().push("stop".to_string());
        }
    }

    #[test]
    fn muted_board_plays_nothing() {
        let recording = Recording::default();
        let mut board = SoundBoard::new(Box::new(recording.clone()));

        board.toggle_mute();
        board.play("oink.ogg");

        assert_eq!(*recording.0.borrow(), vec!["stop".to_string()]);
    }

    #[test]
    fn missing_clips_stay_silent() {
        let recording = Recording::default();
        let mut board = SoundBoard::new(Box::new(recording.clone()));

        board.mark_missing("oink.ogg");
        board.play("oink.ogg");
        board.play("click.ogg");

        assert_eq!(*recording.0.borrow(), vec!["click.ogg false".to_string()]);
    }

    #[test]
    fn unmute_resumes_ambient() {
        let recording = Recording::default();
        let mut board = SoundBoard::new(Box::new(recording.clone()));

        board.play_ambient("ambient.ogg");
        board.toggle_mute();
        board.toggle_mute();

        assert_eq!(
            *recording.0.borrow(),
            vec![
                "ambient.ogg true".to_string(),
                "stop".to_string(),
                "ambient.ogg true".to_string()
            ]
        );
    }
}
