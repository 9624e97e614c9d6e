//! Drawable whiteboard canvas
//!
//! Strokes are painted into a CPU-side RGBA image addressed by the surface
//! UV of the pointer hit. The renderer re-uploads the image when it is dirty.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::config::WhiteboardConfig;

pub struct Whiteboard {
    canvas: RgbaImage,
    background: Rgba<u8>,
    palette: Vec<Rgba<u8>>,
    color: usize,
    brush_radius: f32,
    draw_mode: bool,
    last_point: Option<Vec2>,
    dirty: bool,
}

impl Whiteboard {
    pub fn new(config: &WhiteboardConfig) -> Self {
        let background = Rgba(config.background);
        let mut palette: Vec<Rgba<u8>> = config.palette.iter().copied().map(Rgba).collect();
        if palette.is_empty() {
            palette.push(Rgba([0, 0, 0, 255]));
        }

        Self {
            canvas: RgbaImage::from_pixel(config.width.max(1), config.height.max(1), background),
            background,
            palette,
            color: 0,
            brush_radius: config.brush_radius.max(0.5),
            draw_mode: false,
            last_point: None,
            dirty: true,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, enabled: bool) {
        self.draw_mode = enabled;
        self.last_point = None;
    }

    pub fn palette(&self) -> &[Rgba<u8>] {
        &self.palette
    }

    pub fn color(&self) -> usize {
        self.color
    }

    pub fn set_color(&mut self, index: usize) {
        if index < self.palette.len() {
            self.color = index;
        }
    }

    /// Surface UV (origin top left) to canvas pixel coordinates.
    pub fn uv_to_pixel(&self, uv: Vec2) -> Vec2 {
        let uv = uv.clamp(Vec2::ZERO, Vec2::ONE);
        Vec2::new(
            uv.x * (self.canvas.width() - 1) as f32,
            uv.y * (self.canvas.height() - 1) as f32,
        )
    }

    /// Paints from the previous stroke point to `uv`. No-op outside draw mode.
    pub fn stroke_to(&mut self, uv: Vec2) {
        if !self.draw_mode {
            return;
        }

        let point = self.uv_to_pixel(uv);
        let from = self.last_point.unwrap_or(point);

        // Stamps overlap by half a radius so fast strokes stay continuous
        let spacing = (self.brush_radius * 0.5).max(0.5);
        let steps = (from.distance(point) / spacing).ceil().max(1.0) as usize;

        for step in 0..=steps {
            self.stamp(from.lerp(point, step as f32 / steps as f32));
        }

        self.last_point = Some(point);
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    fn stamp(&mut self, center: Vec2) {
        let color = self.palette[self.color];
        let radius = self.brush_radius;
        let (width, height) = self.canvas.dimensions();

        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = ((center.x + radius).ceil() as u32).min(width - 1);
        let max_y = ((center.y + radius).ceil() as u32).min(height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let offset = Vec2::new(x as f32, y as f32) - center;
                if offset.length_squared() <= radius * radius {
                    self.canvas.put_pixel(x, y, color);
                }
            }
        }

        self.dirty = true;
    }

    pub fn clear(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = self.background;
        }
        self.last_point = None;
        self.dirty = true;
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Returns true once after every change.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
