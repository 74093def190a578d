use glam::Vec2;

/// Tracks one active pointer drag and turns moves into per-event deltas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragTracker {
    pointer: Option<i32>,
    last: Vec2,
}

impl DragTracker {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        self.pointer = Some(pointer_id);
        self.last = pos;
    }

    /// Delta since the previous position, or `None` when `pointer_id` is not dragging.
    pub fn move_to(&mut self, pointer_id: i32, pos: Vec2) -> Option<Vec2> {
        if self.pointer != Some(pointer_id) {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if self.pointer == Some(pointer_id) {
            self.pointer = None;
        }
    }

    pub fn active(&self) -> bool {
        self.pointer.is_some()
    }
}

/// Normalise a wheel delta to a zoom direction: negative dollies in.
#[inline]
pub fn wheel_direction(delta_y: f32, deadzone: f32) -> f32 {
    if delta_y.abs() < deadzone {
        0.0
    } else {
        delta_y.signum()
    }
}
