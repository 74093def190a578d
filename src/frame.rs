use crate::dom;
use galaxy_core::{Camera, FrameBackend, FrameLoop, OrbitControls, SimulationState, Tick};
use galaxy_render::Renderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// GPU side of a frame: orbit controls, camera and renderer.
pub struct WebBackend {
    pub canvas: web::HtmlCanvasElement,
    pub renderer: Renderer<'static>,
    pub camera: Camera,
    pub controls: Rc<RefCell<OrbitControls>>,
}

impl WebBackend {
    /// Follow the canvas backing size, which the window resize listener keeps in sync.
    fn resize_if_needed(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        if size.0 == 0 || size.1 == 0 || size == self.renderer.size() {
            return;
        }
        self.renderer.resize(size.0, size.1);
        self.camera.set_aspect(size.0, size.1);
    }
}

impl FrameBackend for WebBackend {
    type Error = wgpu::SurfaceError;

    fn update_controls(&mut self) {
        self.controls.borrow_mut().update(&mut self.camera);
    }

    fn draw(&mut self, state: &SimulationState) -> Result<(), Self::Error> {
        self.resize_if_needed();
        match self.renderer.render(&self.camera, state) {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[frame] surface timeout; skipping frame");
                Ok(())
            }
            other => other,
        }
    }
}

pub struct FrameContext {
    pub frame_loop: FrameLoop,
    pub state: SimulationState,
    pub backend: WebBackend,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) -> Result<Tick, wgpu::SurfaceError> {
        let elapsed = self.started.elapsed();
        self.frame_loop.tick(elapsed, &mut self.state, &mut self.backend)
    }
}

/// Keep the canvas backing store in step with CSS size and devicePixelRatio.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until its loop is stopped or
/// the surface runs out of memory.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let result = frame_ctx.borrow_mut().frame();
        match result {
            Ok(Tick::Continue) => request_frame(&tick_clone),
            Ok(Tick::Stopped) => {
                log::info!(
                    "[frame] stopped after {} frames",
                    frame_ctx.borrow().frame_loop.frames()
                );
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[frame] surface out of memory; stopping");
            }
            Err(e) => {
                log::error!("[frame] render error: {:?}", e);
                request_frame(&tick_clone);
            }
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
