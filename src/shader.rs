use crate::coin::Coin;
use bytemuck::{Pod, Zeroable};

pub const COIN_SHADER: &str = include_str!("coin.wgsl");

/// Per-coin vertex data. One instance draws one textured quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CoinInstance {
    /// Box center in logical pixels.
    pub center: [f32; 2],
    /// Edge length in logical pixels.
    pub size: f32,
    /// Radians, clockwise on screen.
    pub rotation: f32,
    pub opacity: f32,
}

impl CoinInstance {
    pub fn new(center: [f32; 2], size: f32, rotation_deg: f32, opacity: f32) -> Self {
        Self {
            center,
            size,
            rotation: rotation_deg.to_radians(),
            opacity,
        }
    }
}

impl From<&Coin> for CoinInstance {
    fn from(coin: &Coin) -> Self {
        Self::new(coin.center().to_array(), coin.size, coin.rotation, coin.opacity)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use naga::front::wgsl;
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    #[test]
    fn test_coin_shader_validates() {
        let module = match wgsl::parse_str(COIN_SHADER) {
            Ok(module) => module,
            Err(err) => panic!("{}", err.emit_to_string(COIN_SHADER)),
        };
        let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
        if let Err(err) = validator.validate(&module) {
            panic!("coin shader failed validation: {}", err);
        }
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<CoinInstance>(), 20);
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
    }

    #[test]
    fn test_instance_from_coin() {
        let coin = Coin::new(Vec2::new(10.0, 20.0), Vec2::ZERO, 100.0).with_rotation(180.0, 0.0);
        let instance = CoinInstance::from(&coin);
        assert_eq!(instance.center, [60.0, 70.0]);
        assert_eq!(instance.size, 100.0);
        assert!((instance.rotation - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(instance.opacity, 0.0);
    }
}
