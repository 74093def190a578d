// Host-side tests for the per-frame updater and the frame loop.

use galaxy_core::{
    advance, oscillate, run_frame, FrameBackend, FrameLoop, GalaxyParams, SimulationState, Tick,
};
use std::time::Duration;

fn scene() -> SimulationState {
    SimulationState::new(&GalaxyParams::default(), 7)
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<&'static str>,
    frames_seen: Vec<u64>,
    fail: bool,
}

impl FrameBackend for RecordingBackend {
    type Error = String;

    fn update_controls(&mut self) {
        self.calls.push("controls");
    }

    fn draw(&mut self, state: &SimulationState) -> Result<(), String> {
        self.calls.push("draw");
        self.frames_seen.push(state.frame);
        if self.fail {
            Err("surface lost".to_string())
        } else {
            Ok(())
        }
    }
}

#[test]
fn oscillation_matches_reference_point() {
    let y = oscillate(10.0, 1.0, 1000.0, 10.0);
    assert!((y - 18.4147).abs() < 1e-3, "y = {}", y);
    assert_eq!(oscillate(10.0, 1.0, 0.0, 10.0), 10.0);
}

#[test]
fn marker_heights_depend_only_on_elapsed_time() {
    let mut state = scene();
    advance(&mut state, Duration::from_millis(1000));
    let at_one: Vec<f32> = state.markers.iter().map(|m| m.position.y).collect();
    for ms in [1500, 4000, 12345] {
        advance(&mut state, Duration::from_millis(ms));
    }
    advance(&mut state, Duration::from_millis(1000));
    let again: Vec<f32> = state.markers.iter().map(|m| m.position.y).collect();
    assert_eq!(at_one, again);
}

#[test]
fn markers_only_move_vertically_within_amplitude() {
    let mut state = scene();
    advance(&mut state, Duration::from_millis(2750));
    for m in &state.markers {
        assert_eq!(m.position.x, m.base_position.x);
        assert_eq!(m.position.z, m.base_position.z);
        assert!((m.position.y - m.base_position.y).abs() <= 10.0 + 1e-4);
    }
}

#[test]
fn galaxy_rotation_steps_once_per_frame() {
    let mut state = scene();
    for _ in 0..1000 {
        advance(&mut state, Duration::from_millis(16));
    }
    assert!((state.galaxy_rotation - 1000.0 * 0.0005).abs() < 1e-4);
    assert_eq!(state.frame, 1000);
}

#[test]
fn nebulae_take_elapsed_time_and_spin_backwards() {
    let mut state = scene();
    for _ in 0..3 {
        advance(&mut state, Duration::from_millis(2500));
    }
    assert_eq!(state.nebulae.len(), 5);
    for n in &state.nebulae {
        assert!((n.time - 2.5).abs() < 1e-6);
        assert!((n.rotation + 3.0 * 0.0005).abs() < 1e-7);
    }
    assert_eq!(state.elapsed, Duration::from_millis(2500));
}

#[test]
fn run_frame_advances_before_controls_and_draw() {
    let mut state = scene();
    let mut backend = RecordingBackend::default();
    run_frame(&mut state, Duration::from_millis(16), &mut backend).unwrap();
    run_frame(&mut state, Duration::from_millis(33), &mut backend).unwrap();
    assert_eq!(backend.calls, ["controls", "draw", "controls", "draw"]);
    assert_eq!(backend.frames_seen, [1, 2]);
}

#[test]
fn draw_errors_surface_after_state_advanced() {
    let mut state = scene();
    let mut backend = RecordingBackend {
        fail: true,
        ..Default::default()
    };
    let err = run_frame(&mut state, Duration::from_millis(16), &mut backend).unwrap_err();
    assert_eq!(err, "surface lost");
    assert_eq!(state.frame, 1);
}

#[test]
fn stopped_loop_runs_no_more_frames() {
    let mut state = scene();
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();
    let handle = frame_loop.stop_handle();
    for i in 0..3 {
        let tick = frame_loop
            .tick(Duration::from_millis(16 * i), &mut state, &mut backend)
            .unwrap();
        assert_eq!(tick, Tick::Continue);
    }
    handle.stop();
    for _ in 0..5 {
        let tick = frame_loop
            .tick(Duration::from_secs(1), &mut state, &mut backend)
            .unwrap();
        assert_eq!(tick, Tick::Stopped);
    }
    assert_eq!(frame_loop.frames(), 3);
    assert_eq!(state.frame, 3);
    assert_eq!(backend.frames_seen.len(), 3);
}

#[test]
fn stop_before_first_tick_draws_nothing() {
    let mut state = scene();
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();
    frame_loop.stop_handle().clone().stop();
    assert!(frame_loop.stop_handle().is_stopped());
    let tick = frame_loop
        .tick(Duration::ZERO, &mut state, &mut backend)
        .unwrap();
    assert_eq!(tick, Tick::Stopped);
    assert!(backend.calls.is_empty());
    assert_eq!(state.galaxy_rotation, 0.0);
}
