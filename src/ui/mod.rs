pub mod loading;
pub mod modal;
pub mod panel;
pub mod shell;

pub use loading::LoadingScreen;
pub use modal::Modals;
pub use panel::SidePanel;
pub use shell::{ShellAction, ShellView};
