pub mod config;
pub mod global_uniform;
pub mod imgui_renderer;
pub mod passes;
pub mod render_model;
pub mod renderer;
pub mod surface_textures;
pub mod texture;
