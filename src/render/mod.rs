// src/render/mod.rs
// -----------------
pub mod environment;
pub mod gpu_types;
pub mod resources;
pub mod shaders;
pub mod state;
pub mod target;

pub use gpu_types::ConstantsGpu;
pub use state::{group_counts, Renderer};
pub use target::SurfaceTarget;
