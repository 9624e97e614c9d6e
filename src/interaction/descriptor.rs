//! Typed classification of scene node names.
//!
//! Node names are parsed exactly once, when the scene is bound. Everything
//! downstream reads the resulting `NodeDescriptor`.

use glam::Vec3;
use serde::Deserialize;

use crate::config::SocialLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    fn from_token(token: &str) -> Option<Axis> {
        match token {
            "X" => Some(Axis::X),
            "Y" => Some(Axis::Y),
            "Z" => Some(Axis::Z),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotspot {
    /// Pickable, shows the pointer cursor and receives clicks.
    Clickable,
    /// Pickable for the outline only.
    HoverOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    About,
    Work,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    CupLid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxPart {
    Body,
    Cover,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockHand {
    Hour,
    Minute,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SurfaceMarker {
    #[default]
    None,
    Themed(String),
    Glass,
    Steam,
    Canvas,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDescriptor {
    pub surface: SurfaceMarker,
    pub hotspot: Option<Hotspot>,
    pub fan_axis: Option<Axis>,
    pub spin: bool,
    pub hover_scale: bool,
    pub scale_light: bool,
    pub keycap: Option<String>,
    pub clock_hand: Option<ClockHand>,
    pub content: Option<ModalKind>,
    /// Index into the configured social links.
    pub link: Option<usize>,
    pub whiteboard: bool,
    pub toggle: Option<ToggleKind>,
    /// The animated half of a toggle control, e.g. the lid of the cup.
    pub toggle_handle: bool,
    pub audio_reactive: bool,
    pub mailbox: Option<MailboxPart>,
    pub screen: bool,
}

const TEXTURE_SET_TOKENS: [&str; 4] = ["First", "Second", "Third", "Fourth"];

impl NodeDescriptor {
    pub fn parse(name: &str, social_links: &[SocialLink]) -> NodeDescriptor {
        let base = strip_duplicate_suffix(name);
        let tokens: Vec<&str> = base.split('_').filter(|token| !token.is_empty()).collect();
        let has = |marker: &str| tokens.iter().any(|token| *token == marker);

        let mut descriptor = NodeDescriptor::default();

        descriptor.surface = if has("Whiteboard") {
            SurfaceMarker::Canvas
        } else if has("Glass") {
            SurfaceMarker::Glass
        } else if has("Steam") {
            SurfaceMarker::Steam
        } else if let Some(set) = tokens
            .iter()
            .find(|token| TEXTURE_SET_TOKENS.contains(*token))
        {
            SurfaceMarker::Themed(set.to_string())
        } else {
            SurfaceMarker::None
        };

        descriptor.hotspot = if has("Raycast") || has("Whiteboard") {
            Some(Hotspot::Clickable)
        } else if has("Hover") {
            Some(Hotspot::HoverOnly)
        } else {
            None
        };

        if has("Fan") {
            descriptor.fan_axis = Some(
                tokens
                    .iter()
                    .find_map(|token| Axis::from_token(token))
                    .unwrap_or(Axis::Y),
            );
        }

        descriptor.spin = has("Spin");
        descriptor.hover_scale = has("Scale");
        descriptor.scale_light = has("ScaleLight");

        descriptor.keycap = tokens
            .iter()
            .position(|token| *token == "Key")
            .and_then(|index| tokens.get(index + 1))
            .map(|label| label.to_lowercase());

        if has("Hand") {
            descriptor.clock_hand = if has("Hour") {
                Some(ClockHand::Hour)
            } else if has("Minute") {
                Some(ClockHand::Minute)
            } else {
                None
            };
        }

        descriptor.content = if has("About") {
            Some(ModalKind::About)
        } else if has("Work") {
            Some(ModalKind::Work)
        } else {
            None
        };

        let lowercase_name = base.to_lowercase();
        descriptor.link = social_links.iter().position(|link| {
            !link.label.is_empty() && lowercase_name.contains(&link.label.to_lowercase())
        });

        descriptor.whiteboard = has("Whiteboard");

        if has("Lid") || has("Cup") {
            descriptor.toggle = Some(ToggleKind::CupLid);
            descriptor.toggle_handle = has("Lid");
        }

        descriptor.audio_reactive = has("Pig");

        if has("Mailbox") {
            descriptor.mailbox = Some(if has("Cover") {
                MailboxPart::Cover
            } else if has("Flag") {
                MailboxPart::Flag
            } else {
                MailboxPart::Body
            });
        }

        descriptor.screen = has("Screen");

        descriptor
    }

    pub fn is_raycast_target(&self) -> bool {
        self.hotspot.is_some()
    }

    pub fn is_clickable(&self) -> bool {
        self.hotspot == Some(Hotspot::Clickable)
    }
}

/// Blender appends `.001` style suffixes to duplicated names.
fn strip_duplicate_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, suffix)) if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) => {
            base
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<SocialLink> {
        vec![
            SocialLink {
                label: "GitHub".to_string(),
                url: "https://github.com/".to_string(),
            },
            SocialLink {
                label: "YouTube".to_string(),
                url: "https://youtube.com/".to_string(),
            },
        ]
    }

    #[test]
    fn unmarked_names_describe_nothing() {
        assert_eq!(
            NodeDescriptor::parse("Desk", &links()),
            NodeDescriptor::default()
        );
    }

    #[test]
    fn fan_axis_comes_from_axis_token() {
        let descriptor = NodeDescriptor::parse("Fan_Blades_Z_Second", &links());

        assert_eq!(descriptor.fan_axis, Some(Axis::Z));
        assert_eq!(descriptor.surface, SurfaceMarker::Themed("Second".into()));
    }

    #[test]
    fn fan_without_axis_defaults_to_y() {
        assert_eq!(
            NodeDescriptor::parse("Fan_Ceiling", &links()).fan_axis,
            Some(Axis::Y)
        );
    }

    #[test]
    fn markers_combine() {
        let descriptor = NodeDescriptor::parse("Chair_Spin_Raycast_Third.002", &links());

        assert!(descriptor.spin);
        assert!(descriptor.is_clickable());
        assert_eq!(descriptor.surface, SurfaceMarker::Themed("Third".into()));
    }

    #[test]
    fn social_links_match_case_insensitively() {
        let descriptor = NodeDescriptor::parse("Poster_github_Raycast", &links());
        assert_eq!(descriptor.link, Some(0));

        let descriptor = NodeDescriptor::parse("YOUTUBE_Button_Hover", &links());
        assert_eq!(descriptor.link, Some(1));
        assert_eq!(descriptor.hotspot, Some(Hotspot::HoverOnly));
    }

    #[test]
    fn control_parts_are_recognised() {
        let lid = NodeDescriptor::parse("Cup_Lid_Raycast", &links());
        assert_eq!(lid.toggle, Some(ToggleKind::CupLid));
        assert!(lid.toggle_handle);

        let cup = NodeDescriptor::parse("Cup_Raycast", &links());
        assert_eq!(cup.toggle, Some(ToggleKind::CupLid));
        assert!(!cup.toggle_handle);

        let cover = NodeDescriptor::parse("Mailbox_Cover_Raycast", &links());
        assert_eq!(cover.mailbox, Some(MailboxPart::Cover));

        let pig = NodeDescriptor::parse("Pig_Head_Raycast", &links());
        assert!(pig.audio_reactive);
    }

    #[test]
    fn whiteboard_is_canvas_and_clickable() {
        let descriptor = NodeDescriptor::parse("Whiteboard", &links());

        assert!(descriptor.whiteboard);
        assert!(descriptor.is_clickable());
        assert_eq!(descriptor.surface, SurfaceMarker::Canvas);
    }

    #[test]
    fn keycaps_and_clock_hands() {
        assert_eq!(
            NodeDescriptor::parse("Key_Q_First", &links()).keycap.as_deref(),
            Some("q")
        );
        assert_eq!(
            NodeDescriptor::parse("Clock_Hour_Hand", &links()).clock_hand,
            Some(ClockHand::Hour)
        );
        assert_eq!(
            NodeDescriptor::parse("Clock_Minute_Hand", &links()).clock_hand,
            Some(ClockHand::Minute)
        );
    }
}
