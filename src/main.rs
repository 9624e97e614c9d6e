mod animators;
mod assets;
mod binder;
mod camera;
mod config;
mod controls;
mod cooldown;
mod interaction;
mod materials;
mod math;
mod model;
mod portfolio;
mod registry;
mod rendering;
mod scene_graph;
mod sound;
mod theme;
mod tween;
mod ui;
mod whiteboard;
mod window;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    pollster::block_on(window::run())?;

    Ok(())
}
