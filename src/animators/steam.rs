/// Clock for the steam shader. Only ever moves forward.
#[derive(Debug, Default)]
pub struct SteamAnimator {
    time: f32,
}

impl SteamAnimator {
    pub fn update(&mut self, dt: f32) {
        self.time += dt.max(0.0);
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_accumulates_and_ignores_negative_steps() {
        let mut steam = SteamAnimator::default();

        steam.update(0.25);
        steam.update(0.5);
        steam.update(-1.0);

        assert!((steam.time() - 0.75).abs() < 1e-6);
    }
}
