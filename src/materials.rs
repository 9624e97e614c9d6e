use crate::theme::ThemeMix;

pub const GLASS_TINT: [f32; 4] = [0.85, 0.92, 1.0, 0.28];
pub const STEAM_TINT: [f32; 4] = [1.0, 1.0, 1.0, 0.45];

/// Named day/night texture pair, e.g. `First`.
pub type TextureSet = String;

/// Material assigned to an object by the binder. Objects that matched no
/// surface marker keep `Imported`, which draws the glTF base color.
#[derive(Debug, Clone)]
pub enum Surface {
    Imported,
    Themed { texture_set: TextureSet, mix: ThemeMix },
    Glass,
    Steam,
    Canvas,
}

/// Matches the `kind` switch in `scene.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SurfaceKind {
    Imported = 0,
    Themed = 1,
    Glass = 2,
    Steam = 3,
    Canvas = 4,
}

impl Surface {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Surface::Imported => SurfaceKind::Imported,
            Surface::Themed { .. } => SurfaceKind::Themed,
            Surface::Glass => SurfaceKind::Glass,
            Surface::Steam => SurfaceKind::Steam,
            Surface::Canvas => SurfaceKind::Canvas,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Surface::Glass | Surface::Steam)
    }

    /// Samples the shared theme mix. Non-themed surfaces ignore it.
    pub fn theme_mix(&self) -> f32 {
        match self {
            Surface::Themed { mix, .. } => mix.get(),
            _ => 0.0,
        }
    }
}
