// src/render/state/buffers.rs
//
// Persistent GPU buffers: per-frame constants and the scene's primitive
// list. Both live for the whole pipeline; the primitive buffer is written
// once and never updated incrementally.

use crate::error::RenderResult;
use crate::render::gpu_types::{ConstantsGpu, PrimitiveGpu};
use crate::render::resources::{StorageBuffer, UniformBuffer};
use crate::scene::Primitive;

pub struct Buffers {
    pub constants: UniformBuffer<ConstantsGpu>,
    pub primitives: StorageBuffer<PrimitiveGpu>,
}

pub fn create_persistent_buffers(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    scene: &[Primitive],
) -> RenderResult<Buffers> {
    let constants = UniformBuffer::new(device, "constants_buf");

    let packed = crate::render::gpu_types::pack_primitives(scene);
    let primitives = StorageBuffer::read_only(device, "primitives_buf", packed.len() as u32)?;
    primitives.upload(queue, &packed);

    Ok(Buffers {
        constants,
        primitives,
    })
}
