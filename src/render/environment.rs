// src/render/environment.rs
//
// Environment (skybox) pixels. The trace kernel samples this equirectangular
// map for rays that escape the scene.

use std::path::Path;

use crate::error::RenderResult;

pub struct EnvironmentPixels {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, stride = width * 4.
    pub pixels: Vec<u8>,
}

/// Decode an image asset to RGBA8.
pub fn load(path: &Path) -> RenderResult<EnvironmentPixels> {
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();

    Ok(EnvironmentPixels {
        width,
        height,
        pixels: decoded.into_raw(),
    })
}

/// Vertical sky gradient used when no skybox asset is installed: horizon
/// white fading to blue overhead, dimming below the horizon.
pub fn procedural_sky(width: u32, height: u32) -> EnvironmentPixels {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        // t = 0 at the top of the map (zenith), 1 at the bottom (nadir).
        let t = (y as f32 + 0.5) / height as f32;
        let (r, g, b) = if t < 0.5 {
            let k = t * 2.0;
            (
                0.35 + 0.65 * k, // deep blue zenith -> white horizon
                0.55 + 0.45 * k,
                1.0,
            )
        } else {
            let k = (t - 0.5) * 2.0;
            let ground = 1.0 - 0.75 * k;
            (ground, ground * 0.95, ground * 0.85)
        };

        let row = [
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            255,
        ];
        for _ in 0..width {
            pixels.extend_from_slice(&row);
        }
    }

    EnvironmentPixels {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_sky_has_the_declared_stride() {
        let env = procedural_sky(64, 32);
        assert_eq!(env.pixels.len(), 64 * 32 * 4);
    }

    #[test]
    fn procedural_sky_is_brighter_at_the_horizon_than_the_zenith() {
        let env = procedural_sky(8, 64);
        let zenith_r = env.pixels[0];
        let horizon_r = env.pixels[(31 * 8 * 4) as usize];
        assert!(horizon_r > zenith_r);
    }

    #[test]
    fn missing_asset_is_an_error() {
        assert!(load(Path::new("assets/definitely-not-here.jpg")).is_err());
    }
}
