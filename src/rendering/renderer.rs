use std::sync::Arc;

use anyhow::Context;
use glam::Vec2;
use id_arena::Arena;
use wgpu::CommandEncoderDescriptor;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::Camera;
use crate::interaction::HoverResponder;
use crate::materials::{Surface, GLASS_TINT, STEAM_TINT};
use crate::portfolio::Portfolio;
use crate::rendering::{
    config::RenderConfig,
    global_uniform::{GlobalUniform, GlobalUniformState},
    imgui_renderer::ImguiRendererState,
    passes::{
        particle_pass::{ParticleInstance, ParticlePass},
        scene_pass::{order_draws, ObjectUniform, SceneDraw, ScenePass, SceneTextureViews},
    },
    render_model::RenderModel,
    surface_textures::SurfaceTextureManager,
    texture::DepthTexture,
};
use crate::scene_graph::Scene;

pub struct Renderer {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,

    config: RenderConfig,
    depth_texture: DepthTexture,
    global_uniform: GlobalUniform,
    render_models: Arena<RenderModel>,
    surfaces: SurfaceTextureManager,

    scene_pass: ScenePass,
    particle_pass: ParticlePass,
    imgui: ImguiRendererState,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        config: RenderConfig,
        particle_capacity: usize,
        imgui_context: &mut imgui::Context,
    ) -> anyhow::Result<Renderer> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no formats")?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let depth_texture = DepthTexture::new(
            &device,
            surface_config.width,
            surface_config.height,
            "Depth Texture",
        );

        let global_uniform = GlobalUniform::new(
            &device,
            GlobalUniformState::new(
                &Camera::default(),
                Vec2::new(size.width as f32, size.height as f32),
                0.0,
                0.0,
                config.highlight_color,
            ),
        );
        let surfaces = SurfaceTextureManager::new(&device, &queue);

        let scene_pass = ScenePass::create(
            &device,
            surface_format,
            &global_uniform.bind_group_layout,
            surfaces.bind_group_layout(),
        );
        let particle_pass = ParticlePass::create(
            &device,
            surface_format,
            &global_uniform.bind_group_layout,
            particle_capacity,
        );
        let imgui = ImguiRendererState::new(&device, &queue, surface_format, imgui_context);

        log::info!(
            "Renderer ready on {} ({:?})",
            adapter.get_info().name,
            surface_format
        );

        Ok(Self {
            window,
            size,
            surface,
            surface_config,
            device,
            queue,
            config,
            depth_texture,
            global_uniform,
            render_models: Arena::new(),
            surfaces,
            scene_pass,
            particle_pass,
            imgui,
        })
    }

    /// Uploads every scene model that has no GPU counterpart yet.
    fn load_models(&mut self, scene: &mut Scene) {
        for (_id, scene_model) in scene.models.iter_mut() {
            if scene_model.render_model.is_some() {
                continue;
            }

            let render_model = RenderModel::from_model(&self.device, &scene_model.model);
            scene_model.render_model = Some(self.render_models.alloc(render_model));
            log::debug!(
                "Uploaded model {} with {} primitives",
                scene_model.model.name,
                scene_model.model.primitives.len()
            );
        }
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.device, &self.surface_config);
            self.depth_texture
                .resize(&self.device, new_size.width, new_size.height);
        }
    }

    pub fn render(
        &mut self,
        portfolio: &mut Portfolio,
        imgui_context: &mut imgui::Context,
    ) -> Result<(), wgpu::SurfaceError> {
        self.load_models(&mut portfolio.scene);

        for upload in portfolio.take_texture_uploads() {
            self.surfaces.upload(upload);
        }
        if portfolio.whiteboard.take_dirty() {
            self.surfaces.upload_canvas(portfolio.whiteboard.canvas());
        }

        self.global_uniform.update(
            &self.queue,
            GlobalUniformState::new(
                &portfolio.camera,
                Vec2::new(self.size.width as f32, self.size.height as f32),
                portfolio.now() as f32,
                portfolio.steam_time(),
                self.config.highlight_color,
            ),
        );

        let mut draws = gather_draws(&portfolio.scene, portfolio.hover(), &portfolio.camera);
        order_draws(&mut draws);

        let mut particles = Vec::with_capacity(portfolio.trails.live_count());
        particles.extend(
            portfolio
                .trails
                .live()
                .map(|particle| ParticleInstance::new(particle, self.config.particle_size)),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.scene_pass.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &SceneTextureViews {
                color: &view,
                depth: self.depth_texture.view(),
            },
            self.config.clear_color(portfolio.theme.mix().get()),
            &self.global_uniform.bind_group,
            &self.render_models,
            &mut self.surfaces,
            &draws,
        );

        self.particle_pass.render(
            &self.queue,
            &mut encoder,
            &view,
            self.depth_texture.view(),
            &self.global_uniform.bind_group,
            &particles,
        );

        self.imgui
            .render(&view, imgui_context, &self.device, &self.queue, &mut encoder);

        self.queue.submit([encoder.finish()]);
        output.present();

        Ok(())
    }
}

fn gather_draws(scene: &Scene, hover: &HoverResponder, camera: &Camera) -> Vec<SceneDraw> {
    let mut draws = Vec::new();

    for (object_id, object) in scene.objects.iter() {
        let Some(scene_model) = object.model_id.and_then(|id| scene.models.get(id)) else {
            continue;
        };
        let Some(render_model) = scene_model.render_model else {
            continue;
        };

        let world = *object.transform.get_world_matrix();
        let highlighted = hover.is_highlighted(object_id);
        let depth = camera.position.distance_squared(object.world_position());

        for (index, primitive) in scene_model.model.primitives.iter().enumerate() {
            let base_color = match object.surface {
                Surface::Glass => GLASS_TINT,
                Surface::Steam => STEAM_TINT,
                _ => primitive.base_color,
            };

            draws.push(SceneDraw {
                render_model,
                primitive: index,
                surface: object.surface.clone(),
                uniform: ObjectUniform::new(world, base_color, &object.surface, highlighted),
                depth,
            });
        }
    }

    draws
}
