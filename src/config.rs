use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::camera::Pose;
use crate::interaction::descriptor::Axis;

pub const DEFAULT_CONFIG_PATH: &str = "assets/portfolio.ron";
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub assets: AssetConfig,
    pub social_links: Vec<SocialLink>,
    pub embedded_page_url: String,
    pub poses: BTreeMap<String, Pose>,
    pub modals: ModalContents,
    pub tuning: Tuning,
    pub whiteboard: WhiteboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub scene: PathBuf,
    pub texture_dir: PathBuf,
    pub texture_sets: Vec<String>,
    pub oink_clips: Vec<String>,
    pub ambient_clip: String,
    pub click_clip: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModalContent {
    pub title: String,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModalContents {
    pub about: ModalContent,
    pub work: ModalContent,
    pub contact: ModalContent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Radians per frame.
    pub fan_increment: f32,
    pub spin_duration: f32,
    pub spin_cooldown: f64,
    pub oink_cooldown: f64,
    pub particle_pool_size: usize,
    pub particle_lifetime: f32,
    pub particle_burst: usize,
    pub theme_duration: f32,
    pub modal_fade: f32,
    pub camera_duration: f32,
    pub hover_scale: f32,
    pub clock_axis: Axis,
    pub clock_utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub width: u32,
    pub height: u32,
    pub brush_radius: f32,
    pub background: [u8; 4],
    pub palette: Vec<[u8; 4]>,
}

impl PortfolioConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        ron::from_str(&source).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Loads the configured file, falling back to the stock room on any failure.
    pub fn load_or_default() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log::warn!("{:#}; using built-in defaults", err);
                Self::default()
            }
        }
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        let mut poses = BTreeMap::new();
        poses.insert(
            "default".to_string(),
            Pose::looking_at([12.0, 8.0, 12.0], [0.0, 2.5, 0.0]),
        );
        poses.insert(
            "intro".to_string(),
            Pose::looking_at([26.0, 18.0, 26.0], [0.0, 2.5, 0.0]),
        );
        poses.insert(
            "whiteboard".to_string(),
            Pose::looking_at([-1.2, 4.2, 1.5], [-1.2, 4.2, -3.5]),
        );

        Self {
            assets: AssetConfig::default(),
            social_links: vec![
                SocialLink {
                    label: "GitHub".to_string(),
                    url: "https://github.com/".to_string(),
                },
                SocialLink {
                    label: "LinkedIn".to_string(),
                    url: "https://www.linkedin.com/".to_string(),
                },
                SocialLink {
                    label: "YouTube".to_string(),
                    url: "https://www.youtube.com/".to_string(),
                },
            ],
            embedded_page_url: "https://www.rust-lang.org/".to_string(),
            poses,
            modals: ModalContents::default(),
            tuning: Tuning::default(),
            whiteboard: WhiteboardConfig::default(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            scene: PathBuf::from("assets/models/room.glb"),
            texture_dir: PathBuf::from("assets/textures"),
            texture_sets: ["First", "Second", "Third", "Fourth"]
                .into_iter()
                .map(String::from)
                .collect(),
            oink_clips: vec![
                "assets/audio/oink_1.ogg".to_string(),
                "assets/audio/oink_2.ogg".to_string(),
                "assets/audio/oink_3.ogg".to_string(),
            ],
            ambient_clip: "assets/audio/ambient.ogg".to_string(),
            click_clip: "assets/audio/click.ogg".to_string(),
        }
    }
}

impl Default for ModalContents {
    fn default() -> Self {
        Self {
            about: ModalContent {
                title: "About".to_string(),
                body: vec!["Hi! This room is a small tour of what I build.".to_string()],
            },
            work: ModalContent {
                title: "Work".to_string(),
                body: vec!["Selected projects live here.".to_string()],
            },
            contact: ModalContent {
                title: "Contact".to_string(),
                body: vec!["Drop a line in the mailbox any time.".to_string()],
            },
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fan_increment: 0.05,
            spin_duration: 1.0,
            spin_cooldown: 2.0,
            oink_cooldown: 1.0,
            particle_pool_size: 1000,
            particle_lifetime: 1.0,
            particle_burst: 24,
            theme_duration: 1.5,
            modal_fade: 0.35,
            camera_duration: 1.6,
            hover_scale: 1.1,
            clock_axis: Axis::Z,
            clock_utc_offset_minutes: 0,
        }
    }
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            brush_radius: 4.0,
            background: [245, 245, 240, 255],
            palette: vec![
                [20, 20, 24, 255],
                [200, 40, 40, 255],
                [40, 90, 200, 255],
                [40, 150, 70, 255],
            ],
        }
    }
}
