// src/render/gpu_types.rs
//
// Host-side mirrors of the WGSL records. Field order, stride and padding must
// match the shader declarations byte-for-byte; the const asserts below pin the
// strides so a drifted layout fails at compile time instead of corrupting
// bindings at run time.

use bytemuck::{Pod, Zeroable};

use crate::camera::CameraFrame;
use crate::scene::{Material, Primitive};

pub const PRIMITIVE_SPHERE: u32 = 0;
pub const PRIMITIVE_TRIANGLE: u32 = 1;

/// Per-frame constants. Whole-buffer overwrite every frame.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ConstantsGpu {
    pub camera_to_world: [[f32; 4]; 4],
    pub inverse_projection: [[f32; 4]; 4],
    /// x = aperture radius, y = focus distance, zw unused.
    pub lens: [f32; 4],
    /// Monotonic count of completed trace passes since the last resize;
    /// the accumulate kernel's blend denominator.
    pub sample_index: u32,
    pub primitive_count: u32,
    pub _pad: [u32; 2],
}

impl ConstantsGpu {
    pub fn new(
        frame: &CameraFrame,
        aperture_radius: f32,
        focus_distance: f32,
        sample_index: u32,
        primitive_count: u32,
    ) -> Self {
        Self {
            camera_to_world: frame.to_world.to_cols_array_2d(),
            inverse_projection: frame.inverse_projection.to_cols_array_2d(),
            lens: [aperture_radius, focus_distance, 0.0, 0.0],
            sample_index,
            primitive_count,
            _pad: [0; 2],
        }
    }
}

/// One scene primitive. Spheres pack center+radius into `p0`; triangles use
/// `p0..p2` as vertices. The material record rides along in full.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct PrimitiveGpu {
    /// x = primitive kind, yzw reserved.
    pub header: [u32; 4],
    pub p0: [f32; 4],
    pub p1: [f32; 4],
    pub p2: [f32; 4],
    /// w = roughness.
    pub albedo: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
}

// Stride contracts with the WGSL structs.
const _: () = assert!(std::mem::size_of::<ConstantsGpu>() == 160);
const _: () = assert!(std::mem::size_of::<ConstantsGpu>() % 16 == 0);
const _: () = assert!(std::mem::size_of::<PrimitiveGpu>() == 112);

fn material_fields(m: &Material) -> ([f32; 4], [f32; 4], [f32; 4]) {
    (
        [m.albedo.x, m.albedo.y, m.albedo.z, m.roughness],
        [m.specular.x, m.specular.y, m.specular.z, 0.0],
        [m.emission.x, m.emission.y, m.emission.z, 0.0],
    )
}

impl From<&Primitive> for PrimitiveGpu {
    fn from(p: &Primitive) -> Self {
        match p {
            Primitive::Sphere(s) => {
                let (albedo, specular, emission) = material_fields(&s.material);
                Self {
                    header: [PRIMITIVE_SPHERE, 0, 0, 0],
                    p0: [s.center.x, s.center.y, s.center.z, s.radius],
                    p1: [0.0; 4],
                    p2: [0.0; 4],
                    albedo,
                    specular,
                    emission,
                }
            }
            Primitive::Triangle(t) => {
                let (albedo, specular, emission) = material_fields(&t.material);
                Self {
                    header: [PRIMITIVE_TRIANGLE, 0, 0, 0],
                    p0: [t.a.x, t.a.y, t.a.z, 0.0],
                    p1: [t.b.x, t.b.y, t.b.z, 0.0],
                    p2: [t.c.x, t.c.y, t.c.z, 0.0],
                    albedo,
                    specular,
                    emission,
                }
            }
        }
    }
}

/// Serialize the ordered primitive list for the structured buffer.
pub fn pack_primitives(scene: &[Primitive]) -> Vec<PrimitiveGpu> {
    scene.iter().map(PrimitiveGpu::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::{Bounds, Sphere};
    use glam::Vec3;

    #[test]
    fn sphere_packs_center_and_radius() {
        let sphere = Primitive::Sphere(Sphere {
            center: Vec3::new(1.0, 2.0, 3.0),
            radius: 4.0,
            material: Material {
                albedo: Vec3::new(0.5, 0.6, 0.7),
                specular: Vec3::splat(0.04),
                roughness: 0.25,
                emission: Vec3::ZERO,
            },
        });

        let gpu = PrimitiveGpu::from(&sphere);
        assert_eq!(gpu.header[0], PRIMITIVE_SPHERE);
        assert_eq!(gpu.p0, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(gpu.albedo, [0.5, 0.6, 0.7, 0.25]);
        assert_eq!(gpu.specular, [0.04, 0.04, 0.04, 0.0]);
    }

    #[test]
    fn triangle_packs_its_vertices() {
        let material = Material {
            albedo: Vec3::splat(0.8),
            specular: Vec3::splat(0.04),
            roughness: 0.5,
            emission: Vec3::ZERO,
        };
        let tri = Primitive::Triangle(crate::scene::Triangle {
            a: Vec3::new(-1.0, 0.0, -1.0),
            b: Vec3::new(1.0, 0.0, -1.0),
            c: Vec3::new(0.0, 0.0, 1.0),
            material,
        });

        let gpu = PrimitiveGpu::from(&tri);
        assert_eq!(gpu.header[0], PRIMITIVE_TRIANGLE);
        assert_eq!(gpu.p0, [-1.0, 0.0, -1.0, 0.0]);
        assert_eq!(gpu.p1, [1.0, 0.0, -1.0, 0.0]);
        assert_eq!(gpu.p2, [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn packed_list_preserves_order_and_length() {
        let scene = crate::scene::generate(3, 100, Bounds::default());
        let packed = pack_primitives(&scene);
        assert_eq!(packed.len(), scene.len());

        // Spot-check the first record against its source primitive.
        if let Some(Primitive::Sphere(first)) = scene.first() {
            assert_eq!(packed[0].p0[3], first.radius);
        }
    }

    #[test]
    fn constants_carry_the_frame_inverses() {
        let frame = Camera::default().frame_matrices(16.0 / 9.0);
        let constants = ConstantsGpu::new(&frame, 0.4, 115.0, 5, 42);

        assert_eq!(constants.camera_to_world, frame.to_world.to_cols_array_2d());
        assert_eq!(constants.sample_index, 5);
        assert_eq!(constants.primitive_count, 42);
        assert_eq!(constants.lens[0], 0.4);
    }
}
