//! Scene state owned by the frontend and handed to the animation updater.
//!
//! The host owns this value for the lifetime of the scene; tests build and
//! step it directly without a GPU.

use crate::nebula::NebulaLayer;
use crate::params::GalaxyParams;
use crate::spiral::{generate_stars, SpiralPoint};
use crate::words::{scatter_words, WordMarker};
use glam::Mat4;
use rand::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

pub struct SimulationState {
    pub stars: Vec<SpiralPoint>,
    pub nebulae: SmallVec<[NebulaLayer; 5]>,
    pub markers: Vec<WordMarker>,
    /// Rotation of the whole galaxy group about Y, in radians.
    pub galaxy_rotation: f32,
    pub rotation_step: f32,
    pub word_amplitude: f32,
    pub frame: u64,
    pub elapsed: Duration,
}

impl SimulationState {
    /// Stars are drawn before word markers from one seeded RNG, so a seed
    /// fully determines the layout.
    pub fn new(params: &GalaxyParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = generate_stars(&params.spiral, params.stars_per_arm, &mut rng);
        let markers = scatter_words(&params.spiral, &params.words, &mut rng);
        let nebulae = params
            .nebulae
            .iter()
            .cloned()
            .map(NebulaLayer::new)
            .collect();
        log::info!(
            "[scene] seed={} stars={} words={} nebulae={}",
            seed,
            stars.len(),
            markers.len(),
            params.nebulae.len()
        );
        Self {
            stars,
            nebulae,
            markers,
            galaxy_rotation: 0.0,
            rotation_step: params.galaxy_rotation_step,
            word_amplitude: params.words.amplitude,
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.galaxy_rotation)
    }
}
