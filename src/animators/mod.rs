pub mod clock;
pub mod fans;
pub mod keycaps;
pub mod lights;
pub mod particles;
pub mod spin;
pub mod steam;

pub use clock::{ClockAnimator, WallTime};
pub use fans::FanAnimator;
pub use keycaps::KeycapAnimator;
pub use lights::ScaleLightAnimator;
pub use particles::TrailPool;
pub use spin::{SpinAnimator, SpinOutcome};
pub use steam::SteamAnimator;
