// src/render/state/mod.rs
// -----------------------

mod bindgroups;
mod buffers;
mod layout;
mod pipelines;
mod textures;

use std::path::Path;

use crate::config;
use crate::error::RenderResult;
use crate::render::environment::EnvironmentPixels;
use crate::render::gpu_types::ConstantsGpu;
use crate::render::resources::{sampled_tex2d_from_pixels, Tex2D};
use crate::render::shaders;
use crate::scene::Primitive;

use bindgroups::{create_bind_groups, BindGroups};
use buffers::{create_persistent_buffers, Buffers};
use layout::{create_layouts, Layouts};
use pipelines::{create_pipelines, Pipelines};
use textures::{create_targets, TargetSet};

/// Thread-group grid covering a `width` x `height` viewport with 8x8 groups.
pub fn group_counts(width: u32, height: u32) -> (u32, u32, u32) {
    let ws = config::WORKGROUP_SIZE;
    ((width + ws - 1) / ws, (height + ws - 1) / ws, 1)
}

/// Owns the device, queue and everything dispatched on them: the two compute
/// kernels, the persistent scene/constants buffers, the environment texture
/// and the size-dependent target set.
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,

    sampler: wgpu::Sampler,
    environment: Tex2D,

    layouts: Layouts,
    pipelines: Pipelines,
    buffers: Buffers,
    targets: TargetSet,
    bind_groups: BindGroups,

    width: u32,
    height: u32,
}

impl Renderer {
    pub async fn new(
        adapter: &wgpu::Adapter,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        scene: &[Primitive],
        environment_pixels: &EnvironmentPixels,
    ) -> RenderResult<Self> {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let root = Path::new(config::SHADER_ROOT);
        let trace_src = shaders::preprocess(root, "trace.wgsl")?;
        let accumulate_src = shaders::preprocess(root, "accumulate.wgsl")?;
        let blit_src = shaders::preprocess(root, "blit.wgsl")?;

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_clamp_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest, // level 0 anyway
            ..Default::default()
        });

        let environment = sampled_tex2d_from_pixels(
            &device,
            &queue,
            "environment_tex",
            environment_pixels.width,
            environment_pixels.height,
            &environment_pixels.pixels,
        );

        let layouts = create_layouts(&device);
        let pipelines = create_pipelines(
            &device,
            &layouts,
            &trace_src,
            &accumulate_src,
            &blit_src,
            surface_format,
        )?;

        let buffers = create_persistent_buffers(&device, &queue, scene)?;
        let targets = create_targets(&device, width, height)?;
        let bind_groups = create_bind_groups(
            &device,
            &layouts,
            &buffers,
            &targets,
            &environment.view,
            &sampler,
        );

        log::info!(
            "renderer up: {}x{} viewport, {} primitives, trace entry '{}', accumulate entry '{}'",
            width,
            height,
            scene.len(),
            trace_src.entry,
            accumulate_src.entry,
        );

        Ok(Self {
            device,
            queue,
            sampler,
            environment,
            layouts,
            pipelines,
            buffers,
            targets,
            bind_groups,
            width: width.max(1),
            height: height.max(1),
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn primitive_count(&self) -> u32 {
        self.buffers.primitives.len
    }

    /// Rebuild everything that depends on the viewport size. The fresh
    /// accumulation buffer is zeroed, so the caller must reset its sample
    /// counter to keep the blend denominator honest.
    pub fn resize_targets(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width.max(1);
        self.height = height.max(1);

        self.targets = create_targets(&self.device, self.width, self.height)?;
        self.bind_groups = create_bind_groups(
            &self.device,
            &self.layouts,
            &self.buffers,
            &self.targets,
            &self.environment.view,
            &self.sampler,
        );

        Ok(())
    }

    pub fn write_constants(&self, constants: &ConstantsGpu) {
        self.buffers.constants.write(&self.queue, constants);
    }

    /// Encode both kernel dispatches. Trace runs first and accumulate second
    /// on the same serial command stream, which is the ordering guarantee the
    /// accumulate kernel relies on to see this frame's sample.
    pub fn encode_compute(&self, encoder: &mut wgpu::CommandEncoder) {
        let (gx, gy, gz) = group_counts(self.width, self.height);

        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("trace_pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.pipelines.trace);
            cpass.set_bind_group(0, &self.bind_groups.trace, &[]);
            cpass.dispatch_workgroups(gx, gy, gz);
        }

        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("accumulate_pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.pipelines.accumulate);
            cpass.set_bind_group(0, &self.bind_groups.accumulate, &[]);
            cpass.dispatch_workgroups(gx, gy, gz);
        }
    }

    /// Fullscreen blit of the display target into the acquired frame.
    pub fn encode_blit(&self, encoder: &mut wgpu::CommandEncoder, frame_view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("blit_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        rpass.set_pipeline(&self.pipelines.blit);
        rpass.set_bind_group(0, &self.bind_groups.blit, &[]);
        rpass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_the_viewport_exactly_or_over() {
        assert_eq!(group_counts(800, 450), (100, 57, 1));
        assert_eq!(group_counts(8, 8), (1, 1, 1));
        assert_eq!(group_counts(9, 8), (2, 1, 1));
        assert_eq!(group_counts(1, 1), (1, 1, 1));
        assert_eq!(group_counts(1920, 1080), (240, 135, 1));
    }
}
