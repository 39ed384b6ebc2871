// src/render/state/textures.rs
//
// Size-dependent render targets, rebuilt as a set on every resize. Rebuilding
// also resets the running mean: the fresh accumulation buffer is zeroed, and
// the caller resets the sample counter to match.

use crate::error::RenderResult;
use crate::render::resources::{storage_tex2d, StorageBuffer, Tex2D};

pub struct TargetSet {
    /// HDR radiance written by the trace kernel each frame.
    pub sample: Tex2D,
    /// Resolved average written by the accumulate kernel, blitted to the
    /// swapchain. Stands in for the back buffer as dispatch target 0.
    pub display: Tex2D,
    /// Running per-pixel mean, one vec4 per pixel.
    pub accumulation: StorageBuffer<[f32; 4]>,
}

pub fn create_targets(device: &wgpu::Device, w: u32, h: u32) -> RenderResult<TargetSet> {
    let w = w.max(1);
    let h = h.max(1);

    let sample = storage_tex2d(device, "sample_tex", w, h, wgpu::TextureFormat::Rgba16Float);
    let display = storage_tex2d(device, "display_tex", w, h, wgpu::TextureFormat::Rgba8Unorm);
    let accumulation = StorageBuffer::read_write(device, "accumulation_buf", w * h)?;

    Ok(TargetSet {
        sample,
        display,
        accumulation,
    })
}
