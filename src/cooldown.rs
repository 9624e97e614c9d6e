/// Per-entity trigger gate. Time is the portfolio clock in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cooldown {
    #[default]
    Ready,
    CoolingDown {
        until: f64,
    },
}

impl Cooldown {
    /// Checks and arms the gate in one step. Returns false while cooling down.
    pub fn try_trigger(&mut self, now: f64, duration: f64) -> bool {
        if let Cooldown::CoolingDown { until } = *self {
            if now < until {
                return false;
            }
        }

        *self = Cooldown::CoolingDown {
            until: now + duration,
        };
        true
    }
}
