use crate::color::Rgb;
use crate::constants::*;
use crate::error::{GalaxyError, Result};
use crate::nebula::{default_nebulae, NebulaConfig};
use crate::spiral::SpiralParams;
use crate::words::WordParams;

#[derive(Clone, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

/// Everything needed to build and animate one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParams {
    pub spiral: SpiralParams,
    pub stars_per_arm: u32,
    pub words: WordParams,
    pub nebulae: Vec<NebulaConfig>,
    pub galaxy_rotation_step: f32,
    pub bloom: BloomParams,
    pub point_size: f32,
    pub label_size: [f32; 2],
    pub core_radius: f32,
    pub core_segments: u32,
    pub core_color: Rgb,
    /// Multiply the heart texture by each star's spiral colour.
    pub tint_stars: bool,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            spiral: SpiralParams::default(),
            stars_per_arm: STARS_PER_ARM,
            words: WordParams::default(),
            nebulae: default_nebulae(GALAXY_RADIUS).unwrap_or_default(),
            galaxy_rotation_step: GALAXY_ROTATION_STEP,
            bloom: BloomParams::default(),
            point_size: POINT_SIZE,
            label_size: LABEL_SIZE,
            core_radius: CORE_RADIUS,
            core_segments: CORE_SEGMENTS,
            core_color: Rgb::from_hex(CORE_COLOR).unwrap_or(Rgb::WHITE),
            tint_stars: false,
        }
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> GalaxyError {
    GalaxyError::InvalidParam {
        name,
        reason: reason.into(),
    }
}

fn positive(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be finite and > 0, got {v}")))
    }
}

fn non_negative(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be finite and >= 0, got {v}")))
    }
}

impl GalaxyParams {
    /// Checked once at startup; frame-time code assumes valid params.
    pub fn validate(&self) -> Result<()> {
        positive("spiral.radius", self.spiral.radius)?;
        if self.spiral.arms == 0 {
            return Err(invalid("spiral.arms", "need at least one arm"));
        }
        non_negative("spiral.thickness", self.spiral.thickness)?;
        non_negative("spiral.arm_jitter", self.spiral.arm_jitter)?;
        if !self.spiral.winding.is_finite() {
            return Err(invalid("spiral.winding", "must be finite"));
        }
        non_negative("words.amplitude", self.words.amplitude)?;
        non_negative("words.speed_min", self.words.speed_min)?;
        non_negative("words.speed_span", self.words.speed_span)?;
        if !self.galaxy_rotation_step.is_finite() {
            return Err(invalid("galaxy_rotation_step", "must be finite"));
        }
        for nebula in &self.nebulae {
            positive("nebulae.size", nebula.size)?;
            if !nebula.angular_speed.is_finite() {
                return Err(invalid("nebulae.angular_speed", "must be finite"));
            }
        }
        non_negative("bloom.strength", self.bloom.strength)?;
        non_negative("bloom.radius", self.bloom.radius)?;
        non_negative("bloom.threshold", self.bloom.threshold)?;
        positive("point_size", self.point_size)?;
        positive("label_size.width", self.label_size[0])?;
        positive("label_size.height", self.label_size[1])?;
        positive("core_radius", self.core_radius)?;
        if self.core_segments < 3 {
            return Err(invalid("core_segments", "need at least 3 segments"));
        }
        Ok(())
    }

    pub fn star_count(&self) -> usize {
        (self.spiral.arms * self.stars_per_arm) as usize
    }

    /// World-space side of a star quad that matches a size-attenuated point of
    /// `point_size` pixels at a viewport with vertical field of view `fovy`.
    pub fn star_world_size(&self, fovy_radians: f32) -> f32 {
        self.point_size * (fovy_radians * 0.5).tan()
    }
}
