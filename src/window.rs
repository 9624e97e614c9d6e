use std::{sync::Arc, time::Instant};

use anyhow::Context;
use glam::Vec2;
use imgui::{FontConfig, FontSource};
use imgui_winit_support::WinitPlatform;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key as WinitKey, NamedKey},
    window::{CursorIcon, Window, WindowId},
};

use crate::{
    assets::{jobs_for, AssetLoader},
    config::PortfolioConfig,
    interaction::Cursor,
    portfolio::{Key, Portfolio},
    rendering::{config::RenderConfig, renderer::Renderer},
    sound::{LogOutput, SoundBoard},
    ui,
};

/// Pixels the pointer may travel between press and release and still click
const CLICK_SLOP: f32 = 4.0;
/// Pixels per wheel line for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 40.0;

struct ImguiState {
    context: imgui::Context,
    platform: WinitPlatform,
}

#[derive(Debug, Default)]
struct PointerState {
    position: Option<Vec2>,
    pressed_at: Option<Vec2>,
    dragging: bool,
}

struct App {
    portfolio: Portfolio,
    render_config: RenderConfig,
    renderer: Option<Renderer>,
    imgui: Option<ImguiState>,
    pointer: PointerState,
    last_frame: Instant,
}

impl App {
    fn new(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            render_config: RenderConfig::default(),
            renderer: None,
            imgui: None,
            pointer: PointerState::default(),
            last_frame: Instant::now(),
        }
    }

    fn setup_imgui(window: &Window) -> ImguiState {
        let mut context = imgui::Context::create();
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(
            context.io_mut(),
            window,
            imgui_winit_support::HiDpiMode::Default,
        );

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: 15.0,
                ..Default::default()
            }),
        }]);

        // Window layout comes from the shell, not from imgui.ini
        context.set_ini_filename(None);

        ImguiState { context, platform }
    }

    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes().with_title("Portfolio");
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let mut imgui = Self::setup_imgui(&window);
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            self.render_config.clone(),
            self.portfolio.trails.capacity(),
            &mut imgui.context,
        ))?;

        let size = renderer.size;
        self.portfolio
            .resize(Vec2::new(size.width as f32, size.height as f32));

        self.imgui = Some(imgui);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn ndc(&self, position: Vec2) -> Option<Vec2> {
        let size = self.renderer.as_ref()?.size;
        if size.width == 0 || size.height == 0 {
            return None;
        }

        Some(Vec2::new(
            position.x / size.width as f32 * 2.0 - 1.0,
            1.0 - position.y / size.height as f32 * 2.0,
        ))
    }

    fn overlay_wants_mouse(&self) -> bool {
        self.imgui
            .as_ref()
            .is_some_and(|imgui| imgui.context.io().want_capture_mouse)
    }

    fn overlay_wants_keyboard(&self) -> bool {
        self.imgui
            .as_ref()
            .is_some_and(|imgui| imgui.context.io().want_capture_keyboard)
    }

    fn cursor_moved(&mut self, position: Vec2) {
        let previous = self.pointer.position.replace(position);

        if let Some(pressed_at) = self.pointer.pressed_at {
            if !self.pointer.dragging && pressed_at.distance(position) > CLICK_SLOP {
                self.pointer.dragging = true;
            }
            if self.pointer.dragging {
                if let Some(previous) = previous {
                    self.portfolio.drag(position - previous);
                }
            }
        }

        if self.overlay_wants_mouse() {
            self.portfolio.pointer_left();
        } else if let Some(ndc) = self.ndc(position) {
            self.portfolio.pointer_moved(ndc);
        }
    }

    fn mouse_input(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.overlay_wants_mouse() {
                    return;
                }
                self.pointer.pressed_at = self.pointer.position;
                self.pointer.dragging = false;
                self.portfolio.pointer_pressed();
            }
            ElementState::Released => {
                if self.pointer.pressed_at.take().is_some() && !self.pointer.dragging {
                    self.portfolio.click();
                }
                self.pointer.dragging = false;
                self.portfolio.pointer_released();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(imgui)) = (self.renderer.as_mut(), self.imgui.as_mut()) else {
            return;
        };

        let now = Instant::now();
        let delta_time = now - self.last_frame;
        self.last_frame = now;
        imgui.context.io_mut().update_delta_time(delta_time);

        if let Some(cursor) = self.portfolio.tick(delta_time.as_secs_f32()) {
            renderer.window.set_cursor(match cursor {
                Cursor::Default => CursorIcon::Default,
                Cursor::Pointer => CursorIcon::Pointer,
            });
        }

        if let Err(err) = imgui
            .platform
            .prepare_frame(imgui.context.io_mut(), &renderer.window)
        {
            log::error!("Failed to prepare overlay frame: {}", err);
        }

        let frame = imgui.context.new_frame();
        let actions = ui::shell::draw(frame, &self.portfolio.shell_view());
        for action in actions {
            self.portfolio.apply_action(action);
        }

        match renderer.render(&mut self.portfolio, &mut imgui.context) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(renderer.size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
            }
            Err(other) => {
                log::error!("Unexpected error: {:?}", other);
            }
        }

        renderer.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        if let Err(err) = self.create_renderer(event_loop) {
            log::error!("{:#}", err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(*new_size);
                }
                self.portfolio
                    .resize(Vec2::new(new_size.width as f32, new_size.height as f32));
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = PointerState::default();
                self.portfolio.pointer_left();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_input(*state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !self.overlay_wants_mouse() {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(position) => {
                            position.y as f32 / PIXELS_PER_LINE
                        }
                    };
                    self.portfolio.scroll(lines);
                }
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state == ElementState::Pressed
                    && !key_event.repeat
                    && !self.overlay_wants_keyboard()
                {
                    match &key_event.logical_key {
                        WinitKey::Named(NamedKey::Escape) => {
                            self.portfolio.key_pressed(Key::Escape);
                        }
                        WinitKey::Character(text) => {
                            self.portfolio.key_pressed(Key::Character(text.as_str()));
                        }
                        _ => {}
                    }
                }
            }
            _ => (),
        }

        if let (Some(renderer), Some(imgui)) = (self.renderer.as_ref(), self.imgui.as_mut()) {
            imgui.platform.handle_event::<()>(
                imgui.context.io_mut(),
                &renderer.window,
                &Event::WindowEvent { window_id, event },
            );
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let config = PortfolioConfig::load_or_default();

    let assets = match AssetLoader::spawn(jobs_for(&config.assets)) {
        Ok(loader) => Some(loader),
        Err(err) => {
            log::warn!("{:#}; starting with an empty room", err);
            None
        }
    };
    let sound = SoundBoard::new(Box::new(LogOutput));

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(Portfolio::new(config, sound, assets));
    event_loop.run_app(&mut app)?;

    Ok(())
}
