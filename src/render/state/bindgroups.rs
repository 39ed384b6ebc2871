// src/render/state/bindgroups.rs
//
// Bind group creation. Recreated together with the target set on resize;
// the persistent buffers and environment texture are rebound as-is.

use super::{buffers::Buffers, layout::Layouts, textures::TargetSet};

pub struct BindGroups {
    pub trace: wgpu::BindGroup,
    pub accumulate: wgpu::BindGroup,
    pub blit: wgpu::BindGroup,
}

pub fn create_bind_groups(
    device: &wgpu::Device,
    layouts: &Layouts,
    buffers: &Buffers,
    targets: &TargetSet,
    environment_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> BindGroups {
    let trace = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("trace_bg"),
        layout: &layouts.trace,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.sample.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: buffers.constants.buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: buffers.primitives.buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(environment_view),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    let accumulate = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("accumulate_bg"),
        layout: &layouts.accumulate,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.display.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: buffers.constants.buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&targets.sample.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: targets.accumulation.buffer.as_entire_binding(),
            },
        ],
    });

    let blit = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("blit_bg"),
        layout: &layouts.blit,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.display.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    BindGroups {
        trace,
        accumulate,
        blit,
    }
}
