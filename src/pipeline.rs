// src/pipeline.rs
//
// Host-facing orchestration: one `PathTracer` per window, driven by
// `render()` once per display tick and `resize()` on surface changes.
// Per frame: bump the sample counter, overwrite the constants block,
// dispatch trace then accumulate on one encoder, blit, present.

use std::path::Path;
use std::sync::Arc;

use winit::window::Window;

use crate::camera::{Camera, CameraFrame};
use crate::config;
use crate::error::{RenderError, RenderResult};
use crate::render::environment::{self, EnvironmentPixels};
use crate::render::{ConstantsGpu, Renderer, SurfaceTarget};
use crate::scene::{self, Bounds};

/// Progressive sample bookkeeping. The counter advances before each trace
/// dispatch, so the first frame after construction or a reset runs with
/// sample index 1 and the accumulate kernel never divides by zero.
pub struct SampleCounter {
    index: u32,
}

impl SampleCounter {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Pre-increment: returns the index the upcoming frame renders with.
    pub fn advance(&mut self) -> u32 {
        self.index = self.index.wrapping_add(1);
        self.index
    }

    /// Discard all accumulated history. Any change to the projection or the
    /// surface size invalidates every previous sample.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn current(&self) -> u32 {
        self.index
    }
}

pub struct PathTracer {
    // Keeps the adapter's backing instance alive for the surface.
    _instance: wgpu::Instance,
    target: SurfaceTarget,
    renderer: Renderer,

    camera: Camera,
    frame: CameraFrame,
    samples: SampleCounter,

    width: u32,
    height: u32,
}

fn load_environment() -> EnvironmentPixels {
    let path = Path::new(config::ASSET_ROOT).join(config::SKYBOX_FILE);
    match environment::load(&path) {
        Ok(env) => env,
        Err(err) => {
            log::warn!("no skybox at {}: {err}; using procedural sky", path.display());
            environment::procedural_sky(512, 256)
        }
    }
}

impl PathTracer {
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> RenderResult<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let scene = scene::generate(config::SCENE_SEED, config::SCENE_ATTEMPTS, Bounds::default());
        log::info!("generated {} primitives from seed {}", scene.len(), config::SCENE_SEED);

        let environment_pixels = load_environment();

        let target = SurfaceTarget::new(surface, &adapter, width, height);
        let renderer = Renderer::new(
            &adapter,
            target.format(),
            width,
            height,
            &scene,
            &environment_pixels,
        )
        .await?;
        target.configure(renderer.device());

        let camera = Camera::default();
        let frame = camera.frame_matrices(width as f32 / height as f32);

        Ok(Self {
            _instance: instance,
            target,
            renderer,
            camera,
            frame,
            samples: SampleCounter::new(),
            width: width.max(1),
            height: height.max(1),
        })
    }

    /// Surface-size change: rebuild the swapchain and every size-dependent
    /// target, recompute the projection for the new aspect ratio and drop all
    /// accumulated samples (the primary-ray directions just changed).
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width.max(1);
        self.height = height.max(1);

        self.target.resize(self.renderer.device(), self.width, self.height);
        self.renderer.resize_targets(self.width, self.height)?;

        self.frame = self
            .camera
            .frame_matrices(self.width as f32 / self.height as f32);
        self.samples.reset();

        Ok(())
    }

    /// One progressive step: trace, accumulate, present.
    pub fn render(&mut self) -> RenderResult<()> {
        let sample_index = self.samples.advance();

        let constants = ConstantsGpu::new(
            &self.frame,
            self.camera.aperture_radius,
            self.camera.focus_distance,
            sample_index,
            self.renderer.primitive_count(),
        );
        self.renderer.write_constants(&constants);

        let mut encoder =
            self.renderer
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame_encoder"),
                });

        self.renderer.encode_compute(&mut encoder);

        // Acquire as late as possible. When no frame is available the compute
        // work is still submitted, keeping the accumulation in step with the
        // sample counter.
        match self.target.acquire(self.renderer.device())? {
            Some(frame) => {
                let view = frame.texture.create_view(&Default::default());
                self.renderer.encode_blit(&mut encoder, &view);
                self.renderer.queue().submit(Some(encoder.finish()));
                frame.present();
            }
            None => {
                self.renderer.queue().submit(Some(encoder.finish()));
            }
        }

        Ok(())
    }

    pub fn sample_index(&self) -> u32 {
        self.samples.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_renders_with_sample_one() {
        let mut samples = SampleCounter::new();
        assert_eq!(samples.advance(), 1);
        assert_eq!(samples.advance(), 2);
    }

    #[test]
    fn reset_restarts_accumulation_at_one() {
        let mut samples = SampleCounter::new();
        for _ in 0..17 {
            samples.advance();
        }

        samples.reset();
        assert_eq!(samples.current(), 0);
        // The frame issued right after a resize must run with index 1.
        assert_eq!(samples.advance(), 1);
    }
}
