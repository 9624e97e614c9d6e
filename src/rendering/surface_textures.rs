//! Day/night texture pairs and the whiteboard canvas, bound per surface.

use std::collections::HashMap;

use image::RgbaImage;

use crate::assets::TextureVariant;
use crate::materials::{Surface, TextureSet};
use crate::portfolio::TextureUpload;
use crate::rendering::texture::Texture;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SurfaceKey {
    Plain,
    Themed(TextureSet),
    Canvas,
}

impl SurfaceKey {
    fn of(surface: &Surface) -> Self {
        match surface {
            Surface::Themed { texture_set, .. } => SurfaceKey::Themed(texture_set.clone()),
            Surface::Canvas => SurfaceKey::Canvas,
            Surface::Imported | Surface::Glass | Surface::Steam => SurfaceKey::Plain,
        }
    }
}

pub struct SurfaceTextureManager {
    device: wgpu::Device,
    queue: wgpu::Queue,

    white: Texture,
    textures: HashMap<(TextureSet, TextureVariant), Texture>,
    canvas: Option<(Texture, (u32, u32))>,
    sampler: wgpu::Sampler,

    bind_group_layout: wgpu::BindGroupLayout,
    // Created lazily, dropped when one of their textures changes
    bind_groups: HashMap<SurfaceKey, wgpu::BindGroup>,
}

impl SurfaceTextureManager {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Surface sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Surface texture bind group layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            white: Texture::white(device, queue),
            textures: HashMap::new(),
            canvas: None,
            sampler,
            bind_group_layout,
            bind_groups: HashMap::new(),
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn upload(&mut self, upload: TextureUpload) {
        let Some(image) = upload.image else {
            log::debug!("{} ({:?}) stays white", upload.set, upload.variant);
            return;
        };

        let label = format!("{} ({:?})", upload.set, upload.variant);
        let texture = Texture::from_image(&self.device, &self.queue, &image, &label);

        self.bind_groups
            .remove(&SurfaceKey::Themed(upload.set.clone()));
        self.textures.insert((upload.set, upload.variant), texture);
    }

    /// Copies the whiteboard canvas to the GPU, creating the texture on first use.
    pub fn upload_canvas(&mut self, canvas: &RgbaImage) {
        match &self.canvas {
            Some((texture, size)) if *size == canvas.dimensions() => {
                texture.write(&self.queue, canvas);
            }
            _ => {
                let texture = Texture::from_image(&self.device, &self.queue, canvas, "Whiteboard");
                self.canvas = Some((texture, canvas.dimensions()));
                self.bind_groups.remove(&SurfaceKey::Canvas);
            }
        }
    }

    fn view(&self, set: &str, variant: TextureVariant) -> &wgpu::TextureView {
        self.textures
            .get(&(set.to_string(), variant))
            .map(|texture| &texture.view)
            .unwrap_or(&self.white.view)
    }

    pub fn bind_group(&mut self, surface: &Surface) -> &wgpu::BindGroup {
        let key = SurfaceKey::of(surface);

        if !self.bind_groups.contains_key(&key) {
            let (day, night) = match &key {
                SurfaceKey::Plain => (&self.white.view, &self.white.view),
                SurfaceKey::Themed(set) => (
                    self.view(set, TextureVariant::Day),
                    self.view(set, TextureVariant::Night),
                ),
                SurfaceKey::Canvas => {
                    let view = self
                        .canvas
                        .as_ref()
                        .map(|(texture, _)| &texture.view)
                        .unwrap_or(&self.white.view);
                    (view, view)
                }
            };

            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Surface texture bind group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(day),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(night),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });

            self.bind_groups.insert(key.clone(), bind_group);
        }

        &self.bind_groups[&key]
    }
}
