// src/render/state/layout.rs
//
// Bind group layouts: the schema contract between the WGSL `@group/@binding`
// declarations and the Rust-side setup. Binding order is fixed per pass:
// binding 0 is always the pass's primary storage output, the per-frame
// constants come next, read-only resources after that. If anything here
// drifts from the shaders, pipeline or bind group creation trips validation.

pub struct Layouts {
    /// group(0) for the trace kernel: sample HDR output + constants +
    /// primitive buffer + environment texture/sampler.
    pub trace: wgpu::BindGroupLayout,

    /// group(0) for the accumulate kernel: display output + constants +
    /// traced sample texture + running-mean buffer.
    pub accumulate: wgpu::BindGroupLayout,

    /// Blit render pass: display texture + sampler.
    pub blit: wgpu::BindGroupLayout,
}

fn bgl_uniform(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn bgl_storage(
    binding: u32,
    visibility: wgpu::ShaderStages,
    read_only: bool,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn bgl_tex_sample(
    binding: u32,
    visibility: wgpu::ShaderStages,
    filterable: bool,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn bgl_storage_tex_wo(
    binding: u32,
    visibility: wgpu::ShaderStages,
    format: wgpu::TextureFormat,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::StorageTexture {
            access: wgpu::StorageTextureAccess::WriteOnly,
            format,
            view_dimension: wgpu::TextureViewDimension::D2,
        },
        count: None,
    }
}

fn bgl_sampler(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub fn create_layouts(device: &wgpu::Device) -> Layouts {
    let cs = wgpu::ShaderStages::COMPUTE;
    let fs = wgpu::ShaderStages::FRAGMENT;

    // Matches trace.wgsl:
    //   @binding(0) var sample_target : texture_storage_2d<rgba16float, write>
    //   @binding(1) var<uniform> constants : Constants
    //   @binding(2) var<storage, read> primitives : array<Primitive>
    //   @binding(3) var environment : texture_2d<f32>
    //   @binding(4) var environment_sampler : sampler
    let trace = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("trace_bgl"),
        entries: &[
            bgl_storage_tex_wo(0, cs, wgpu::TextureFormat::Rgba16Float),
            bgl_uniform(1, cs),
            bgl_storage(2, cs, true),
            bgl_tex_sample(3, cs, true),
            bgl_sampler(4, cs),
        ],
    });

    // Matches accumulate.wgsl:
    //   @binding(0) var display_target : texture_storage_2d<rgba8unorm, write>
    //   @binding(1) var<uniform> constants : Constants
    //   @binding(2) var sample_tex : texture_2d<f32>
    //   @binding(3) var<storage, read_write> accumulation : array<vec4f>
    //
    // The sampled texture is non-filterable: it is read texel-exact.
    let accumulate = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("accumulate_bgl"),
        entries: &[
            bgl_storage_tex_wo(0, cs, wgpu::TextureFormat::Rgba8Unorm),
            bgl_uniform(1, cs),
            bgl_tex_sample(2, cs, false),
            bgl_storage(3, cs, false),
        ],
    });

    let blit = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("blit_bgl"),
        entries: &[bgl_tex_sample(0, fs, true), bgl_sampler(1, fs)],
    });

    Layouts {
        trace,
        accumulate,
        blit,
    }
}
