pub mod cup_lid;
pub mod mailbox;
pub mod pig;

pub use cup_lid::CupLid;
pub use mailbox::{Mailbox, MailboxOutcome};
pub use pig::Pig;
