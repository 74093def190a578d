use crate::state::SimulationState;
use std::time::Duration;

/// The rendering side of a frame: camera controls and the actual draw.
pub trait FrameBackend {
    type Error;

    fn update_controls(&mut self);

    fn draw(&mut self, state: &SimulationState) -> Result<(), Self::Error>;
}

/// Advance time-varying state to `elapsed` (time since the scene started).
///
/// Rotations step by a fixed amount per call rather than per second, so the
/// perceived speed follows the display refresh rate. Marker heights are
/// recomputed from `elapsed` alone and never drift.
pub fn advance(state: &mut SimulationState, elapsed: Duration) {
    let t = elapsed.as_secs_f32();
    for nebula in state.nebulae.iter_mut() {
        nebula.time = t;
        nebula.rotation -= nebula.config.angular_speed;
    }
    state.galaxy_rotation += state.rotation_step;

    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let amplitude = state.word_amplitude;
    for marker in state.markers.iter_mut() {
        marker.update(elapsed_ms, amplitude);
    }
    state.elapsed = elapsed;
    state.frame += 1;
}

/// One full frame: advance the scene, then let the backend update controls and draw.
pub fn run_frame<B: FrameBackend + ?Sized>(
    state: &mut SimulationState,
    elapsed: Duration,
    backend: &mut B,
) -> Result<(), B::Error> {
    advance(state, elapsed);
    backend.update_controls();
    backend.draw(state)
}
