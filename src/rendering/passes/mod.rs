pub mod particle_pass;
pub mod scene_pass;
