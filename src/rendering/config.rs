#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub clear_day: wgpu::Color,
    pub clear_night: wgpu::Color,
    /// Added to hovered objects, alpha is the strength
    pub highlight_color: [f32; 4],
    pub particle_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_day: wgpu::Color {
                r: 0.93,
                g: 0.89,
                b: 0.84,
                a: 1.0,
            },
            clear_night: wgpu::Color {
                r: 0.06,
                g: 0.07,
                b: 0.12,
                a: 1.0,
            },
            highlight_color: [1.0, 0.85, 0.55, 0.35],
            particle_size: 0.06,
        }
    }
}

impl RenderConfig {
    /// Background for a theme mix between 0 (day) and 1 (night).
    pub fn clear_color(&self, mix: f32) -> wgpu::Color {
        let mix = mix.clamp(0.0, 1.0) as f64;
        let lerp = |day: f64, night: f64| day * (1.0 - mix) + night * mix;

        wgpu::Color {
            r: lerp(self.clear_day.r, self.clear_night.r),
            g: lerp(self.clear_day.g, self.clear_night.g),
            b: lerp(self.clear_day.b, self.clear_night.b),
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_follows_theme_mix() {
        let config = RenderConfig::default();

        assert_eq!(config.clear_color(0.0), config.clear_day);
        assert_eq!(config.clear_color(1.0), config.clear_night);
        assert_eq!(config.clear_color(4.0), config.clear_night);
    }
}
