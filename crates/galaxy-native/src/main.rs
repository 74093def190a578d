use std::sync::Arc;
use std::time::Instant;

use galaxy_core::constants::{
    HEART_TEXTURE_SIZE, LABEL_ATLAS_COLUMNS, LABEL_CELL_HEIGHT, LABEL_CELL_WIDTH,
};
use galaxy_core::{
    heart_texture, BitmapFontRasterizer, Camera, FrameBackend, FrameLoop, GalaxyParams,
    LabelAtlas, OrbitControls, SimulationState, StopHandle, Tick,
};
use galaxy_render::{Renderer, SceneAssets};
use glam::Vec2;
use rand::Rng;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

const WINDOW_TITLE: &str = "Spiral Galaxy";
const WINDOW_SIZE: (f64, f64) = (1280.0, 800.0);
// Pixel deltas per wheel "line" on trackpads
const PIXELS_PER_LINE: f64 = 40.0;

struct NativeBackend {
    window: Arc<Window>,
    renderer: Renderer<'static>,
    camera: Camera,
    controls: OrbitControls,
}

impl NativeBackend {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.renderer.resize(width, height);
        self.camera.set_aspect(width, height);
    }
}

impl FrameBackend for NativeBackend {
    type Error = wgpu::SurfaceError;

    fn update_controls(&mut self) {
        self.controls.update(&mut self.camera);
    }

    fn draw(&mut self, state: &SimulationState) -> Result<(), Self::Error> {
        match self.renderer.render(&self.camera, state) {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.resize(size.width, size.height);
                self.renderer.reconfigure();
                Ok(())
            }
            other => other,
        }
    }
}

/// Tracks the cursor and the left-button drag that orbits the camera.
#[derive(Default)]
struct MouseDrag {
    cursor: Option<Vec2>,
    dragging: bool,
}

impl MouseDrag {
    fn moved(&mut self, pos: PhysicalPosition<f64>) -> Option<Vec2> {
        let p = Vec2::new(pos.x as f32, pos.y as f32);
        let prev = self.cursor.replace(p);
        match (self.dragging, prev) {
            (true, Some(prev)) => Some(p - prev),
            _ => None,
        }
    }
}

fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let params = GalaxyParams::default();
    params.validate()?;
    let seed: u64 = rand::thread_rng().gen();
    let mut state = SimulationState::new(&params, seed);
    let heart = heart_texture(HEART_TEXTURE_SIZE);
    let atlas = LabelAtlas::build(
        &state.markers,
        LABEL_CELL_WIDTH,
        LABEL_CELL_HEIGHT,
        LABEL_ATLAS_COLUMNS,
        &mut BitmapFontRasterizer,
    )?;

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("event loop: {e}"))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
            .build(&event_loop)
            .map_err(|e| anyhow::anyhow!("window: {e}"))?,
    );
    let size = window.inner_size();
    let camera = Camera::new(size.width.max(1) as f32 / size.height.max(1) as f32);
    let renderer = pollster::block_on(Renderer::new(
        window.clone(),
        size.width,
        size.height,
        SceneAssets {
            params: &params,
            state: &state,
            heart: &heart,
            atlas: &atlas,
            fovy_radians: camera.fovy_radians,
        },
    ))?;

    let mut backend = NativeBackend {
        window: window.clone(),
        renderer,
        camera,
        controls: OrbitControls::default(),
    };
    let mut frame_loop = FrameLoop::new();
    let stop: StopHandle = frame_loop.stop_handle();
    let mut mouse = MouseDrag::default();
    let started = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => backend.resize(size.width, size.height),
            WindowEvent::CloseRequested => stop.stop(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => stop.stop(),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => mouse.dragging = button_state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(d) = mouse.moved(position) {
                    let height = backend.window.inner_size().height as f32;
                    backend.controls.rotate(d.x, d.y, height);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Scrolling up (positive lines) dollies in
                let lines = wheel_lines(delta);
                if lines != 0.0 {
                    backend.controls.zoom(-lines);
                }
            }
            _ => {}
        },
        Event::AboutToWait => match frame_loop.tick(started.elapsed(), &mut state, &mut backend) {
            Ok(Tick::Continue) => backend.window.request_redraw(),
            Ok(Tick::Stopped) => {
                log::info!("[frame] stopped after {} frames", frame_loop.frames());
                elwt.exit();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[frame] surface out of memory");
                elwt.exit();
            }
            Err(e) => log::warn!("[frame] render error: {:?}", e),
        },
        _ => {}
    })
    .map_err(|e| anyhow::anyhow!("event loop: {e}"))
}
