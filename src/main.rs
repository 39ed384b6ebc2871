mod app;
mod camera;
mod config;
mod error;
mod pipeline;
mod render;
mod scene;

use std::sync::Arc;

use winit::{
    dpi::PhysicalSize,
    event_loop::EventLoop,
    window::WindowBuilder,
};

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Path Tracer")
            .with_inner_size(PhysicalSize::new(config::WIDTH, config::HEIGHT))
            .build(&event_loop)
            .unwrap(),
    );

    pollster::block_on(app::run(event_loop, window));
}
