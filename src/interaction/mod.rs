pub mod descriptor;
pub mod dispatch;
pub mod hover;
pub mod picker;

pub use dispatch::{dispatch_click, InteractionTarget, Route};
pub use hover::{Cursor, HoverChange, HoverResponder, HoverScaler};
pub use picker::{Intersection, PointerPicker};
