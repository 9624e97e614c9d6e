//! Immediate-mode overlay drawn on top of the room.
//!
//! Drawing never mutates state; buttons come back as `ShellAction`s for the
//! portfolio to apply after the frame.

use imgui::{Condition, ProgressBar, StyleColor, StyleVar, WindowFlags};

use crate::config::{ModalContent, ModalContents};
use crate::interaction::descriptor::ModalKind;
use crate::theme::Theme;
use crate::ui::loading::LoadingScreen;
use crate::ui::modal::{Modals, ALL_MODALS};
use crate::ui::panel::SidePanel;
use crate::whiteboard::Whiteboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Enter,
    OpenModal(ModalKind),
    CloseModal(ModalKind),
    ToggleTheme,
    ToggleSound,
    TogglePanel,
    ClearWhiteboard,
    BrushColor(usize),
    LeaveWhiteboard,
    LeaveEmbeddedPage,
}

pub struct ShellView<'a> {
    pub loading: &'a LoadingScreen,
    pub modals: &'a Modals,
    pub contents: &'a ModalContents,
    pub panel: &'a SidePanel,
    pub theme: Theme,
    pub muted: bool,
    /// Set while whiteboard draw mode is on.
    pub whiteboard: Option<&'a Whiteboard>,
    /// Set while the embedded page is interactive.
    pub embedded_page: Option<&'a str>,
}

const OVERLAY_FLAGS: WindowFlags = WindowFlags::NO_DECORATION
    .union(WindowFlags::NO_MOVE)
    .union(WindowFlags::NO_SAVED_SETTINGS);

pub fn draw(ui: &imgui::Ui, view: &ShellView) -> Vec<ShellAction> {
    let mut actions = Vec::new();

    if view.loading.is_visible() {
        draw_loading(ui, view.loading, &mut actions);
        return actions;
    }

    draw_toolbar(ui, view, &mut actions);

    if view.panel.is_open() {
        draw_panel(ui, view, &mut actions);
    }

    for kind in ALL_MODALS {
        let state = view.modals.state(kind);
        if state.is_visible() {
            draw_modal(ui, kind, modal_content(view.contents, kind), state.opacity(), &mut actions);
        }
    }

    if let Some(whiteboard) = view.whiteboard {
        draw_whiteboard_tools(ui, whiteboard, &mut actions);
    }

    if let Some(url) = view.embedded_page {
        draw_embedded_page_hint(ui, url, &mut actions);
    }

    actions
}

fn modal_content(contents: &ModalContents, kind: ModalKind) -> &ModalContent {
    match kind {
        ModalKind::About => &contents.about,
        ModalKind::Work => &contents.work,
        ModalKind::Contact => &contents.contact,
    }
}

fn draw_loading(ui: &imgui::Ui, loading: &LoadingScreen, actions: &mut Vec<ShellAction>) {
    let [width, height] = ui.io().display_size;
    let _alpha = ui.push_style_var(StyleVar::Alpha(loading.opacity()));

    ui.window("Loading")
        .position([0.0, 0.0], Condition::Always)
        .size([width, height], Condition::Always)
        .flags(OVERLAY_FLAGS)
        .build(|| {
            ui.set_cursor_pos([width * 0.5 - 150.0, height * 0.5 - 30.0]);
            ProgressBar::new(loading.progress())
                .size([300.0, 20.0])
                .build(ui);

            ui.set_cursor_pos([width * 0.5 - 40.0, height * 0.5 + 10.0]);
            if loading.can_enter() {
                if ui.button_with_size("Enter", [80.0, 28.0]) {
                    actions.push(ShellAction::Enter);
                }
            } else {
                ui.text(format!("Loading {:.0}%", loading.progress() * 100.0));
            }
        });
}

fn draw_toolbar(ui: &imgui::Ui, view: &ShellView, actions: &mut Vec<ShellAction>) {
    let [width, _] = ui.io().display_size;

    ui.window("Toolbar")
        .position([width - 250.0, 10.0], Condition::Always)
        .flags(OVERLAY_FLAGS | WindowFlags::ALWAYS_AUTO_RESIZE)
        .bg_alpha(0.6)
        .build(|| {
            let theme_label = match view.theme {
                Theme::Day => "Night",
                Theme::Night => "Day",
            };
            if ui.button(theme_label) {
                actions.push(ShellAction::ToggleTheme);
            }
            ui.same_line();
            if ui.button(if view.muted { "Sound on" } else { "Mute" }) {
                actions.push(ShellAction::ToggleSound);
            }
            ui.same_line();
            if ui.button(if view.panel.is_open() { "Close menu" } else { "Menu" }) {
                actions.push(ShellAction::TogglePanel);
            }
        });
}

fn draw_panel(ui: &imgui::Ui, view: &ShellView, actions: &mut Vec<ShellAction>) {
    let [_, height] = ui.io().display_size;

    ui.window("Menu")
        .position([0.0, 0.0], Condition::Always)
        .size([220.0, height], Condition::Always)
        .flags(OVERLAY_FLAGS)
        .build(|| {
            for kind in ALL_MODALS {
                let title = &modal_content(view.contents, kind).title;
                if ui.button_with_size(title, [200.0, 32.0]) {
                    actions.push(ShellAction::OpenModal(kind));
                }
            }

            ui.separator();
            if ui.button_with_size("Toggle theme", [200.0, 28.0]) {
                actions.push(ShellAction::ToggleTheme);
            }
            if ui.button_with_size("Toggle sound", [200.0, 28.0]) {
                actions.push(ShellAction::ToggleSound);
            }
        });
}

fn draw_modal(
    ui: &imgui::Ui,
    kind: ModalKind,
    content: &ModalContent,
    opacity: f32,
    actions: &mut Vec<ShellAction>,
) {
    let [width, height] = ui.io().display_size;
    let size = [(width * 0.5).max(320.0), (height * 0.6).max(240.0)];
    let _alpha = ui.push_style_var(StyleVar::Alpha(opacity));

    ui.window(format!("{}##modal_{:?}", content.title, kind))
        .position(
            [(width - size[0]) * 0.5, (height - size[1]) * 0.5],
            Condition::Always,
        )
        .size(size, Condition::Always)
        .flags(WindowFlags::NO_MOVE | WindowFlags::NO_RESIZE | WindowFlags::NO_COLLAPSE)
        .build(|| {
            for paragraph in &content.body {
                ui.text_wrapped(paragraph);
                ui.spacing();
            }

            ui.separator();
            if ui.button("Close") {
                actions.push(ShellAction::CloseModal(kind));
            }
        });
}

fn draw_whiteboard_tools(ui: &imgui::Ui, whiteboard: &Whiteboard, actions: &mut Vec<ShellAction>) {
    let [width, height] = ui.io().display_size;

    ui.window("Whiteboard")
        .position([width * 0.5 - 160.0, height - 60.0], Condition::Always)
        .flags(OVERLAY_FLAGS | WindowFlags::ALWAYS_AUTO_RESIZE)
        .bg_alpha(0.7)
        .build(|| {
            for (index, color) in whiteboard.palette().iter().enumerate() {
                let rgba = color.0.map(|channel| channel as f32 / 255.0);
                let _button = ui.push_style_color(StyleColor::Button, rgba);
                let _hovered = ui.push_style_color(StyleColor::ButtonHovered, rgba);
                let label = if index == whiteboard.color() { "*" } else { " " };

                if ui.button_with_size(format!("{}##brush{}", label, index), [24.0, 24.0]) {
                    actions.push(ShellAction::BrushColor(index));
                }
                ui.same_line();
            }

            if ui.button("Clear") {
                actions.push(ShellAction::ClearWhiteboard);
            }
            ui.same_line();
            if ui.button("Leave (p)") {
                actions.push(ShellAction::LeaveWhiteboard);
            }
        });
}

fn draw_embedded_page_hint(ui: &imgui::Ui, url: &str, actions: &mut Vec<ShellAction>) {
    ui.window("Screen")
        .position([10.0, 10.0], Condition::Always)
        .flags(OVERLAY_FLAGS | WindowFlags::ALWAYS_AUTO_RESIZE)
        .bg_alpha(0.7)
        .build(|| {
            ui.text("Click the screen to open");
            ui.text_colored([0.5, 0.8, 1.0, 1.0], url);
            if ui.button("Back (i)") {
                actions.push(ShellAction::LeaveEmbeddedPage);
            }
        });
}
