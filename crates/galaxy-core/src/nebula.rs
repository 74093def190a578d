use crate::color::Rgb;
use crate::constants::{NEBULA_ANGULAR_SPEED, NEBULA_LAYERS};
use crate::error::Result;
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaConfig {
    pub size: f32,
    pub color: Rgb,
    pub angular_speed: f32,
}

/// One glowing plane. `rotation` spins the plane about its own normal and
/// `time` feeds the noise in the fragment stage.
#[derive(Clone, Debug)]
pub struct NebulaLayer {
    pub config: NebulaConfig,
    pub rotation: f32,
    pub time: f32,
}

impl NebulaLayer {
    pub fn new(config: NebulaConfig) -> Self {
        Self {
            config,
            rotation: 0.0,
            time: 0.0,
        }
    }

    /// Unit quad in XY → flat square of side `size` in the galaxy's XZ plane.
    pub fn model_matrix(&self, group: Mat4) -> Mat4 {
        group
            * Mat4::from_rotation_x(-FRAC_PI_2)
            * Mat4::from_rotation_z(self.rotation)
            * Mat4::from_scale(Vec3::new(self.config.size, self.config.size, 1.0))
    }
}

/// The stock five-layer stack, sized relative to the galaxy radius.
pub fn default_nebulae(radius: f32) -> Result<Vec<NebulaConfig>> {
    NEBULA_LAYERS
        .iter()
        .map(|(scale, hex)| {
            Ok(NebulaConfig {
                size: radius * scale,
                color: Rgb::from_hex(hex)?,
                angular_speed: NEBULA_ANGULAR_SPEED,
            })
        })
        .collect()
}
