// src/render/resources.rs
//
// Typed GPU resource wrappers. Each wrapper owns its allocation; views keep
// the underlying texture alive through wgpu's ref-counted ownership, so a
// wrapper dropping releases view first, then allocation, exactly once.

use std::marker::PhantomData;

use bytemuck::Pod;

use crate::error::{RenderError, RenderResult};

/// Round `size` up to the next multiple of 16 (constant-buffer alignment).
pub const fn round16(size: usize) -> usize {
    ((size - 1) | 15) + 1
}

/// Uniform buffer for a single POD record, allocated at the 16-byte-rounded
/// size and overwritten whole every frame.
pub struct UniformBuffer<T: Pod> {
    pub buffer: wgpu::Buffer,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: round16(std::mem::size_of::<T>()) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

/// Structured buffer of `len` fixed-stride records. The read-only kind is the
/// kernel's shader-resource input; the read-write kind its unordered-access
/// scratch.
pub struct StorageBuffer<T: Pod> {
    pub buffer: wgpu::Buffer,
    pub len: u32,
    _marker: PhantomData<T>,
}

impl<T: Pod> StorageBuffer<T> {
    pub fn read_only(device: &wgpu::Device, label: &str, len: u32) -> RenderResult<Self> {
        Self::create(device, label, len, wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST)
    }

    pub fn read_write(device: &wgpu::Device, label: &str, len: u32) -> RenderResult<Self> {
        Self::create(
            device,
            label,
            len,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
        )
    }

    fn create(
        device: &wgpu::Device,
        label: &str,
        len: u32,
        usage: wgpu::BufferUsages,
    ) -> RenderResult<Self> {
        if len == 0 {
            return Err(RenderError::resource(format!(
                "structured buffer '{label}' needs at least one element"
            )));
        }

        let stride = std::mem::size_of::<T>() as u64;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * len as u64,
            usage,
            mapped_at_creation: false,
        });

        Ok(Self {
            buffer,
            len,
            _marker: PhantomData,
        })
    }

    /// Whole-buffer upload. Element count must equal the declared length;
    /// a mismatch is a host/GPU layout contract violation, not a recoverable
    /// condition.
    pub fn upload(&self, queue: &wgpu::Queue, data: &[T]) {
        assert_eq!(
            data.len(),
            self.len as usize,
            "structured buffer element count mismatch"
        );
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
    }
}

/// 2-D texture plus its default whole-texture view.
pub struct Tex2D {
    pub tex: wgpu::Texture,
    pub view: wgpu::TextureView,
}

fn make_tex2d(
    device: &wgpu::Device,
    label: &str,
    w: u32,
    h: u32,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> Tex2D {
    // wgpu forbids zero-sized textures (minimized windows hit this).
    let w = w.max(1);
    let h = h.max(1);

    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });

    let view = tex.create_view(&Default::default());
    Tex2D { tex, view }
}

/// Storage texture: written by compute, sampled by later passes.
pub fn storage_tex2d(
    device: &wgpu::Device,
    label: &str,
    w: u32,
    h: u32,
    format: wgpu::TextureFormat,
) -> Tex2D {
    make_tex2d(
        device,
        label,
        w,
        h,
        format,
        wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}

/// Sampled texture initialized from decoded RGBA8 pixels (row-major,
/// 4 bytes per pixel, tightly packed rows).
pub fn sampled_tex2d_from_pixels(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    w: u32,
    h: u32,
    pixels: &[u8],
) -> Tex2D {
    assert_eq!(
        pixels.len(),
        (w as usize) * (h as usize) * 4,
        "pixel data does not match {w}x{h} RGBA8"
    );

    let tex = make_tex2d(
        device,
        label,
        w,
        h,
        wgpu::TextureFormat::Rgba8Unorm,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &tex.tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(w * 4),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        },
    );

    tex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round16_snaps_to_the_next_multiple() {
        let cases = [(1, 16), (15, 16), (16, 16), (17, 32), (32, 32), (33, 48)];
        for (input, expected) in cases {
            assert_eq!(round16(input), expected, "round16({input})");
        }
    }

    #[test]
    fn round16_is_identity_on_aligned_sizes() {
        for k in 1..64usize {
            assert_eq!(round16(k * 16), k * 16);
        }
    }
}
