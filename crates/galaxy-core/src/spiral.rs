//! Spiral placement shared by star particles and word markers.
//!
//! A placement is a pure function of the arm index and a [`SpiralDraw`]; the
//! random source only ever supplies the draw. This keeps the layout
//! reproducible from a seed and lets tests feed fixed draws.

use crate::color::Rgb;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct SpiralParams {
    pub radius: f32,
    pub arms: u32,
    pub winding: f32,
    pub arm_jitter: f32,
    pub thickness: f32,
    pub hue_span: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            radius: GALAXY_RADIUS,
            arms: GALAXY_ARMS,
            winding: SPIRAL_WINDING,
            arm_jitter: ARM_JITTER,
            thickness: DISK_THICKNESS,
            hue_span: HUE_SPAN,
            saturation: STAR_SATURATION,
            lightness: STAR_LIGHTNESS,
        }
    }
}

/// The three uniform samples in \[0, 1) consumed by one placement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpiralDraw {
    pub radial: f32,
    pub jitter: f32,
    pub height: f32,
}

impl SpiralDraw {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let radial = rng.gen::<f32>();
        let jitter = rng.gen::<f32>();
        let height = rng.gen::<f32>();
        Self {
            radial,
            jitter,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralPoint {
    pub distance: f32,
    pub angle: f32,
    pub position: Vec3,
    pub hue: f32,
    pub color: Rgb,
}

/// Place one point on arm `arm` of the spiral.
///
/// `distance = sqrt(radial) * R` concentrates density toward the centre
/// compared with a linear radial draw, and the hue ramps from 0 at the core to
/// `hue_span` at the rim.
pub fn place(params: &SpiralParams, arm: u32, draw: SpiralDraw) -> SpiralPoint {
    let arms = params.arms.max(1);
    let distance = draw.radial.sqrt() * params.radius;
    let angle = distance * params.winding
        + arm as f32 * (TAU / arms as f32)
        + draw.jitter * params.arm_jitter;
    let position = Vec3::new(
        angle.cos() * distance,
        (draw.height - 0.5) * params.thickness,
        angle.sin() * distance,
    );
    let hue = if params.radius > 0.0 {
        (distance / params.radius) * params.hue_span
    } else {
        0.0
    };
    SpiralPoint {
        distance,
        angle,
        position,
        hue,
        color: Rgb::from_hsl(hue, params.saturation, params.lightness),
    }
}

/// Generate `arms * stars_per_arm` stars, arm-major.
pub fn generate_stars<R: Rng + ?Sized>(
    params: &SpiralParams,
    stars_per_arm: u32,
    rng: &mut R,
) -> Vec<SpiralPoint> {
    let mut stars = Vec::with_capacity((params.arms * stars_per_arm) as usize);
    for arm in 0..params.arms {
        for _ in 0..stars_per_arm {
            stars.push(place(params, arm, SpiralDraw::sample(rng)));
        }
    }
    stars
}
