// Pointer handling helpers are plain Rust, so host tests include them directly.
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::{wheel_direction, DragTracker};

#[test]
fn drag_reports_deltas_between_moves() {
    let mut drag = DragTracker::default();
    assert!(!drag.active());
    drag.begin(1, Vec2::new(10.0, 10.0));
    assert!(drag.active());
    assert_eq!(drag.move_to(1, Vec2::new(15.0, 7.0)), Some(Vec2::new(5.0, -3.0)));
    assert_eq!(drag.move_to(1, Vec2::new(15.0, 7.0)), Some(Vec2::ZERO));
    drag.end(1);
    assert!(!drag.active());
    assert_eq!(drag.move_to(1, Vec2::new(20.0, 20.0)), None);
}

#[test]
fn other_pointers_are_ignored() {
    let mut drag = DragTracker::default();
    drag.begin(3, Vec2::ZERO);
    assert_eq!(drag.move_to(4, Vec2::ONE), None);
    drag.end(4);
    assert!(drag.active());
    // ignored moves do not shift the anchor
    assert_eq!(drag.move_to(3, Vec2::new(2.0, 0.0)), Some(Vec2::new(2.0, 0.0)));
}

#[test]
fn wheel_direction_has_a_deadzone() {
    assert_eq!(wheel_direction(0.2, 0.5), 0.0);
    assert_eq!(wheel_direction(-0.49, 0.5), 0.0);
    assert_eq!(wheel_direction(120.0, 0.5), 1.0);
    assert_eq!(wheel_direction(-3.0, 0.5), -1.0);
}
