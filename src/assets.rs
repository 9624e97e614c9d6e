//! Background asset loading
//!
//! A worker thread works through the job list and posts one message per
//! asset. The main tick drains them without blocking; nothing that depends
//! on an asset runs before its message arrives.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, channel};
use std::thread;

use anyhow::Context;
use image::RgbaImage;

use crate::config::AssetConfig;
use crate::materials::TextureSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureVariant {
    Day,
    Night,
}

impl TextureVariant {
    fn folder(self) -> &'static str {
        match self {
            TextureVariant::Day => "day",
            TextureVariant::Night => "night",
        }
    }
}

#[derive(Debug, Clone)]
pub enum AssetJob {
    Scene(PathBuf),
    Texture {
        set: TextureSet,
        variant: TextureVariant,
        path: PathBuf,
    },
    Audio(String),
}

pub struct SceneData {
    pub document: gltf::Document,
    pub buffers: Vec<gltf::buffer::Data>,
}

pub enum LoadedAsset {
    Scene(anyhow::Result<SceneData>),
    /// `None` when the file could not be read; the material falls back to white.
    Texture {
        set: TextureSet,
        variant: TextureVariant,
        image: Option<RgbaImage>,
    },
    Audio {
        clip: String,
        available: bool,
    },
}

pub fn texture_path(texture_dir: &Path, set: &str, variant: TextureVariant) -> PathBuf {
    texture_dir
        .join(variant.folder())
        .join(format!("{}.png", set))
}

/// Every job needed to furnish the room described by `config`.
pub fn jobs_for(config: &AssetConfig) -> Vec<AssetJob> {
    let mut jobs = vec![AssetJob::Scene(config.scene.clone())];

    for set in &config.texture_sets {
        for variant in [TextureVariant::Day, TextureVariant::Night] {
            jobs.push(AssetJob::Texture {
                set: set.clone(),
                variant,
                path: texture_path(&config.texture_dir, set, variant),
            });
        }
    }

    let clips = config
        .oink_clips
        .iter()
        .chain([&config.ambient_clip, &config.click_clip])
        .filter(|clip| !clip.is_empty());
    jobs.extend(clips.cloned().map(AssetJob::Audio));

    jobs
}

pub struct AssetLoader {
    receiver: mpsc::Receiver<LoadedAsset>,
    requested: usize,
    completed: usize,
}

impl AssetLoader {
    pub fn spawn(jobs: Vec<AssetJob>) -> anyhow::Result<Self> {
        let (sender, receiver) = channel();
        let requested = jobs.len();

        thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                for job in jobs {
                    if sender.send(load(job)).is_err() {
                        // The window closed while loading
                        break;
                    }
                }
            })
            .context("Failed to spawn asset loader thread")?;

        Ok(Self {
            receiver,
            requested,
            completed: 0,
        })
    }

    /// Returns every message that arrived since the last call.
    pub fn drain(&mut self) -> Vec<LoadedAsset> {
        let loaded: Vec<LoadedAsset> = self.receiver.try_iter().collect();
        self.completed += loaded.len();
        loaded
    }

    /// Completed over requested, 1.0 when nothing was requested.
    pub fn progress(&self) -> f32 {
        if self.requested == 0 {
            1.0
        } else {
            self.completed as f32 / self.requested as f32
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.requested
    }
}

fn load(job: AssetJob) -> LoadedAsset {
    match job {
        AssetJob::Scene(path) => LoadedAsset::Scene(load_scene(&path)),
        AssetJob::Texture { set, variant, path } => {
            let image = match image::open(&path) {
                Ok(image) => Some(image.to_rgba8()),
                Err(err) => {
                    log::warn!("Texture {} unavailable: {}", path.display(), err);
                    None
                }
            };
            LoadedAsset::Texture {
                set,
                variant,
                image,
            }
        }
        AssetJob::Audio(clip) => {
            let available = Path::new(&clip).is_file();
            if !available {
                log::warn!("Audio clip {} not found; it will stay silent", clip);
            }
            LoadedAsset::Audio { clip, available }
        }
    }
}

fn load_scene(path: &Path) -> anyhow::Result<SceneData> {
    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to import scene {}", path.display()))?;

    Ok(SceneData { document, buffers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_pairs_live_in_day_and_night_folders() {
        let dir = Path::new("assets/textures");

        assert_eq!(
            texture_path(dir, "First", TextureVariant::Night),
            Path::new("assets/textures/night/First.png")
        );
    }

    #[test]
    fn job_list_covers_scene_textures_and_clips() {
        let config = AssetConfig::default();
        let jobs = jobs_for(&config);

        let textures = jobs
            .iter()
            .filter(|job| matches!(job, AssetJob::Texture { .. }))
            .count();
        let clips = jobs
            .iter()
            .filter(|job| matches!(job, AssetJob::Audio(_)))
            .count();

        assert!(matches!(jobs[0], AssetJob::Scene(_)));
        assert_eq!(textures, config.texture_sets.len() * 2);
        assert_eq!(clips, config.oink_clips.len() + 2);
    }

    #[test]
    fn missing_files_degrade_instead_of_failing() {
        let jobs = vec![
            AssetJob::Scene(PathBuf::from("does/not/exist.glb")),
            AssetJob::Texture {
                set: "First".into(),
                variant: TextureVariant::Day,
                path: PathBuf::from("does/not/exist.png"),
            },
        ];
        let mut loader = AssetLoader::spawn(jobs).unwrap();

        let mut loaded = Vec::new();
        while loaded.len() < 2 {
            loaded.extend(loader.drain());
            thread::yield_now();
        }

        assert!(loader.is_finished());
        assert!((loader.progress() - 1.0).abs() < 1e-6);
        assert!(matches!(loaded[0], LoadedAsset::Scene(Err(_))));
        assert!(matches!(loaded[1], LoadedAsset::Texture { image: None, .. }));
    }

    #[test]
    fn empty_job_list_is_complete() {
        let loader = AssetLoader::spawn(Vec::new()).unwrap();
        assert!(loader.is_finished());
    }
}
