//! Error types for coinfall.
//!
//! The simulation itself cannot fail. These errors cover the window host:
//! GPU setup, sprite loading, config validation and the event loop.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The coin sprite cannot be uploaded as a texture on this device.
    SpriteSize { width: u32, height: u32, max: u32 },
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::SpriteSize { width, height, max } => write!(
                f,
                "Coin sprite is {}x{}, the GPU accepts 1x1 up to {}x{}",
                width, height, max, max
            ),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::SpriteSize { .. } => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while building a coin sprite.
#[derive(Debug)]
pub enum TextureError {
    /// Failed to decode the image file.
    ImageLoad(image::ImageError),
    /// Failed to read the file from disk.
    Io(std::io::Error),
    /// Raw RGBA data does not match the stated dimensions.
    SizeMismatch { expected: usize, actual: usize },
    /// Width or height is zero.
    InvalidDimensions { width: u32, height: u32 },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageLoad(e) => write!(f, "Failed to load image: {}", e),
            TextureError::Io(e) => write!(f, "Failed to read sprite file: {}", e),
            TextureError::SizeMismatch { expected, actual } => write!(
                f,
                "RGBA data size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            TextureError::InvalidDimensions { width, height } => {
                write!(f, "Sprite dimensions {}x{} have no pixels", width, height)
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageLoad(e) => Some(e),
            TextureError::Io(e) => Some(e),
            TextureError::SizeMismatch { .. } | TextureError::InvalidDimensions { .. } => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageLoad(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

/// Contradictory values in a [`ShowerConfig`](crate::ShowerConfig).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `min_size` is zero or negative.
    NonPositiveSize(f32),
    /// `min_size` is larger than `max_size`.
    SizeRange { min: f32, max: f32 },
    /// `min_speed` is larger than `max_speed`.
    SpeedRange { min: f32, max: f32 },
    /// Negative spawn interval, or one longer than the final delay.
    SpawnTiming { interval_ms: f32, max_delay_ms: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveSize(size) => {
                write!(f, "Minimum coin size must be positive, got {}", size)
            }
            ConfigError::SizeRange { min, max } => {
                write!(f, "Coin size range is inverted: min {} > max {}", min, max)
            }
            ConfigError::SpeedRange { min, max } => {
                write!(f, "Coin speed range is inverted: min {} > max {}", min, max)
            }
            ConfigError::SpawnTiming { interval_ms, max_delay_ms } => write!(
                f,
                "Spawn interval {}ms must be between 0 and the max spawn delay {}ms",
                interval_ms, max_delay_ms
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when running the shower in a window.
#[derive(Debug)]
pub enum ShowerError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The configuration was rejected.
    Config(ConfigError),
    /// The coin sprite could not be loaded.
    Texture(TextureError),
}

impl fmt::Display for ShowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ShowerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ShowerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ShowerError::Config(e) => write!(f, "Invalid configuration: {}", e),
            ShowerError::Texture(e) => write!(f, "Sprite error: {}", e),
        }
    }
}

impl std::error::Error for ShowerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShowerError::EventLoop(e) => Some(e),
            ShowerError::Window(e) => Some(e),
            ShowerError::Gpu(e) => Some(e),
            ShowerError::Config(e) => Some(e),
            ShowerError::Texture(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ShowerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ShowerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ShowerError {
    fn from(e: winit::error::OsError) -> Self {
        ShowerError::Window(e)
    }
}

impl From<GpuError> for ShowerError {
    fn from(e: GpuError) -> Self {
        ShowerError::Gpu(e)
    }
}

impl From<ConfigError> for ShowerError {
    fn from(e: ConfigError) -> Self {
        ShowerError::Config(e)
    }
}

impl From<TextureError> for ShowerError {
    fn from(e: TextureError) -> Self {
        ShowerError::Texture(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ShowerError::from(ConfigError::SizeRange { min: 10.0, max: 5.0 });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Coin size range is inverted: min 10 > max 5"
        );
    }

    #[test]
    fn test_sprite_size_messages() {
        let err = GpuError::SpriteSize { width: 9000, height: 64, max: 8192 };
        assert_eq!(err.to_string(), "Coin sprite is 9000x64, the GPU accepts 1x1 up to 8192x8192");
        let err = TextureError::InvalidDimensions { width: 0, height: 3 };
        assert_eq!(err.to_string(), "Sprite dimensions 0x3 have no pixels");
    }

    #[test]
    fn test_size_mismatch_has_no_source() {
        use std::error::Error;
        let err = TextureError::SizeMismatch { expected: 16, actual: 12 };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("expected 16 bytes, got 12"));
    }
}
