use crate::animation::{run_frame, FrameBackend};
use crate::state::SimulationState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared cancellation flag for a [`FrameLoop`].
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// A frame ran; the host should schedule the next one.
    Continue,
    /// The loop was stopped; the host must not reschedule.
    Stopped,
}

/// Host-driven animation loop. The host calls [`tick`](Self::tick) once per
/// display refresh and reschedules only while it returns [`Tick::Continue`].
#[derive(Debug, Default)]
pub struct FrameLoop {
    stop: StopHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick<B: FrameBackend + ?Sized>(
        &mut self,
        elapsed: Duration,
        state: &mut SimulationState,
        backend: &mut B,
    ) -> Result<Tick, B::Error> {
        if self.stop.is_stopped() {
            return Ok(Tick::Stopped);
        }
        self.frames += 1;
        run_frame(state, elapsed, backend)?;
        Ok(Tick::Continue)
    }
}
