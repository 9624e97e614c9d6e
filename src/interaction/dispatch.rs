//! Click routing. Only the nearest intersection is considered and the first
//! matching rule wins, since one node can carry several markers.

use crate::interaction::descriptor::{ModalKind, NodeDescriptor, ToggleKind};
use crate::scene_graph::ObjectId;

/// Everything a click can reach. Implemented by the portfolio context.
pub trait InteractionTarget {
    fn embedded_page_interactive(&self) -> bool;
    fn open_embedded_page(&mut self);
    fn open_modal(&mut self, kind: ModalKind);
    fn open_link(&mut self, link: usize);
    fn enter_whiteboard(&mut self);
    fn toggle_control(&mut self, control: ToggleKind);
    fn oink(&mut self, object: ObjectId);
    /// Returns true when the mailbox consumed the click.
    fn mailbox_intersection(&mut self, object: ObjectId, descriptor: &NodeDescriptor) -> bool;
    fn is_spin_target(&self, object: ObjectId) -> bool;
    fn spin(&mut self, object: ObjectId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    EmbeddedPage,
    Modal(ModalKind),
    Link(usize),
    Whiteboard,
    Toggle(ToggleKind),
    Oink,
    Mailbox,
    Spin,
    Ignored,
}

pub fn dispatch_click(
    nearest: Option<(ObjectId, &NodeDescriptor)>,
    target: &mut impl InteractionTarget,
) -> Route {
    let Some((object, descriptor)) = nearest else {
        return Route::Ignored;
    };

    if descriptor.screen && target.embedded_page_interactive() {
        target.open_embedded_page();
        return Route::EmbeddedPage;
    }

    if let Some(kind) = descriptor.content {
        target.open_modal(kind);
        return Route::Modal(kind);
    }

    if let Some(link) = descriptor.link {
        target.open_link(link);
        return Route::Link(link);
    }

    if descriptor.whiteboard {
        target.enter_whiteboard();
        return Route::Whiteboard;
    }

    if let Some(control) = descriptor.toggle {
        target.toggle_control(control);
        return Route::Toggle(control);
    }

    if descriptor.audio_reactive {
        target.oink(object);
        return Route::Oink;
    }

    if target.mailbox_intersection(object, descriptor) {
        return Route::Mailbox;
    }

    if target.is_spin_target(object) {
        target.spin(object);
        return Route::Spin;
    }

    Route::Ignored
}
