//! The coin image.
//!
//! Every coin is drawn with the same RGBA sprite, tinted only by its opacity.
//! Load one from a PNG/JPEG file, or use the procedural gold coin.
//!
//! ```ignore
//! let sprite = CoinSprite::from_file("assets/oro.png")?;
//! Coinfall::new().with_sprite(sprite).run()?;
//! ```

use crate::error::TextureError;
use std::path::Path;

/// Base gold color of the procedural coin face.
const GOLD: [f32; 3] = [0.95, 0.75, 0.2];
/// Darker rim color.
const RIM: [f32; 3] = [0.7, 0.5, 0.1];

/// RGBA8 pixels for the coin sprite.
#[derive(Debug, Clone)]
pub struct CoinSprite {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CoinSprite {
    /// Wrap raw RGBA data, checking it matches the dimensions.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Load a sprite from an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        check_dimensions(width, height)?;
        log::debug!("Loaded coin sprite {} ({}x{})", path.as_ref().display(), width, height);
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Paint a gold coin: a shaded disc with a darker rim and an inner ring.
    ///
    /// Outside the disc the sprite is fully transparent. The edge gets one
    /// pixel of antialiasing.
    pub fn gold(resolution: u32) -> Self {
        let resolution = resolution.max(1);
        let mut data = Vec::with_capacity((resolution * resolution * 4) as usize);
        let half = resolution as f32 * 0.5;

        for y in 0..resolution {
            for x in 0..resolution {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let r = (dx * dx + dy * dy).sqrt();

                let coverage = ((1.0 - r) * half).clamp(0.0, 1.0);
                let base = if r > 0.86 || (0.62..0.68).contains(&r) {
                    RIM
                } else {
                    GOLD
                };
                // Light from the top-left
                let shade = 1.0 + 0.25 * (-dx - dy) * 0.5;

                for channel in base {
                    data.push(to_u8(channel * shade));
                }
                data.push(to_u8(coverage));
            }
        }

        Self {
            data,
            width: resolution,
            height: resolution,
        }
    }

    /// RGBA of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }
}

impl Default for CoinSprite {
    fn default() -> Self {
        Self::gold(128)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_center_opaque_corners_clear() {
        let sprite = CoinSprite::gold(64);
        assert_eq!(sprite.data.len(), 64 * 64 * 4);

        let center = sprite.pixel(32, 32).unwrap();
        assert_eq!(center[3], 255);
        // Gold: red > green > blue
        assert!(center[0] > center[1] && center[1] > center[2]);

        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(sprite.pixel(x, y).unwrap()[3], 0);
        }
    }

    #[test]
    fn test_gold_rim_is_darker() {
        let sprite = CoinSprite::gold(128);
        let face = sprite.pixel(64, 64).unwrap();
        // Just inside the edge on the horizontal axis
        let rim = sprite.pixel(64 + 58, 64).unwrap();
        assert!(rim[0] < face[0]);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let sprite = CoinSprite::gold(8);
        assert!(sprite.pixel(8, 0).is_none());
        assert!(sprite.pixel(0, 8).is_none());
    }

    #[test]
    fn test_from_rgba_checks_size() {
        assert!(CoinSprite::from_rgba(vec![0; 16], 2, 2).is_ok());
        match CoinSprite::from_rgba(vec![0; 12], 2, 2) {
            Err(TextureError::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 12);
            }
            other => panic!("expected size mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_rgba_rejects_empty() {
        assert!(matches!(
            CoinSprite::from_rgba(Vec::new(), 0, 0),
            Err(TextureError::InvalidDimensions { width: 0, height: 0 })
        ));
        assert!(matches!(
            CoinSprite::from_rgba(Vec::new(), 4, 0),
            Err(TextureError::InvalidDimensions { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let result = CoinSprite::from_file("definitely/not/here.png");
        assert!(matches!(result, Err(TextureError::Io(_))));
    }

    #[test]
    fn test_zero_resolution_clamped() {
        let sprite = CoinSprite::gold(0);
        assert_eq!((sprite.width, sprite.height), (1, 1));
    }
}
