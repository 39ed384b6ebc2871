// src/config.rs

use glam::Vec3;

// --- Window / surface ---
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 450;

// --- File roots ---
pub const SHADER_ROOT: &str = "shaders";
pub const ASSET_ROOT: &str = "assets";
pub const SKYBOX_FILE: &str = "skybox.jpg";

// Entry symbol used when a kernel source carries no `#pragma kernel` directive.
pub const DEFAULT_KERNEL_ENTRY: &str = "main";

// --- Scene generation ---
pub const SCENE_SEED: u64 = 3;
pub const SCENE_ATTEMPTS: usize = 100;

/// Spheres land with x/z in [-PLACEMENT_HALF_EXTENT, PLACEMENT_HALF_EXTENT].
pub const PLACEMENT_HALF_EXTENT: f32 = 50.0;

pub const RADIUS_MIN: f32 = 2.0;
pub const RADIUS_MAX: f32 = 12.0;

/// Material classification thresholds on a uniform draw in [0, 1):
/// u < DIFFUSE => diffuse, u < SPECULAR => specular, else emissive.
pub const DIFFUSE_THRESHOLD: f32 = 0.5;
pub const SPECULAR_THRESHOLD: f32 = 0.9;

// --- Camera ---
pub const CAMERA_EYE: Vec3 = Vec3::new(80.0, 30.0, -80.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Thin-lens parameters carried in the per-frame constants.
pub const APERTURE_RADIUS: f32 = 0.4;
pub const FOCUS_DISTANCE: f32 = 115.0;

// --- Dispatch ---
/// Compute kernels run in 8x8 thread groups; grids round up.
pub const WORKGROUP_SIZE: u32 = 8;
