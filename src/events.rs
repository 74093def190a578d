//! Pointer and wheel listeners feeding the orbit controls.

use crate::constants::WHEEL_DEADZONE;
use crate::dom;
use crate::input::{self, DragTracker};
use galaxy_core::OrbitControls;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub drag: Rc<RefCell<DragTracker>>,
}

pub fn wire_orbit_input(w: OrbitWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w, "pointerup");
    wire_pointerup(&w, "pointercancel");
    wire_wheel(&w);
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[input] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let pos = dom::pointer_canvas_px(&ev, &w2.canvas);
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        w2.drag.borrow_mut().begin(ev.pointer_id(), pos);
    });
}

fn wire_pointermove(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let pos = dom::pointer_canvas_px(&ev, &w2.canvas);
        let delta = w2.drag.borrow_mut().move_to(ev.pointer_id(), pos);
        if let Some(d) = delta {
            let height = w2.canvas.height() as f32;
            w2.controls.borrow_mut().rotate(d.x, d.y, height);
        }
    });
}

fn wire_pointerup(w: &OrbitWiring, event: &str) {
    let w2 = w.clone();
    listen(&w.canvas, event, move |ev: web::PointerEvent| {
        w2.drag.borrow_mut().end(ev.pointer_id());
        _ = w2.canvas.release_pointer_capture(ev.pointer_id());
    });
}

fn wire_wheel(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dir = input::wheel_direction(ev.delta_y() as f32, WHEEL_DEADZONE);
        if dir != 0.0 {
            w2.controls.borrow_mut().zoom(dir);
        }
    });
}
