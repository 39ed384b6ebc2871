// src/render/state/pipelines.rs
//
// Kernel compilation and pipeline creation. Shader modules are compiled
// inside a validation error scope so WGSL diagnostics surface as a
// `Compilation` error with the driver's message verbatim instead of an
// uncaptured-error panic.

use super::layout::Layouts;
use crate::error::{RenderError, RenderResult};
use crate::render::shaders::ShaderSource;

pub struct Pipelines {
    pub trace: wgpu::ComputePipeline,
    pub accumulate: wgpu::ComputePipeline,
    pub blit: wgpu::RenderPipeline,
}

fn compile_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> RenderResult<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::Compilation(err.to_string()));
    }
    Ok(module)
}

fn make_compute_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &ShaderSource,
    layout: &wgpu::BindGroupLayout,
) -> RenderResult<wgpu::ComputePipeline> {
    let module = compile_module(device, label, &shader.source)?;

    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label}_pl")),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some(label),
        layout: Some(&pl),
        module: &module,
        entry_point: &shader.entry,
        compilation_options: Default::default(),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::Compilation(err.to_string()));
    }

    Ok(pipeline)
}

pub fn create_pipelines(
    device: &wgpu::Device,
    layouts: &Layouts,
    trace_src: &ShaderSource,
    accumulate_src: &ShaderSource,
    blit_src: &ShaderSource,
    surface_format: wgpu::TextureFormat,
) -> RenderResult<Pipelines> {
    let trace = make_compute_pipeline(device, "trace_pipeline", trace_src, &layouts.trace)?;
    let accumulate = make_compute_pipeline(
        device,
        "accumulate_pipeline",
        accumulate_src,
        &layouts.accumulate,
    )?;

    let blit_module = compile_module(device, "blit", &blit_src.source)?;
    let blit_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("blit_pl"),
        bind_group_layouts: &[&layouts.blit],
        push_constant_ranges: &[],
    });

    let blit = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("blit_pipeline"),
        layout: Some(&blit_pl),
        vertex: wgpu::VertexState {
            module: &blit_module,
            entry_point: "vs_main",
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &blit_module,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    Ok(Pipelines {
        trace,
        accumulate,
        blit,
    })
}
