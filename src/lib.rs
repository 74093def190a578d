#![cfg(target_arch = "wasm32")]
use galaxy_core::constants::{
    HEART_TEXTURE_SIZE, LABEL_ATLAS_COLUMNS, LABEL_CELL_HEIGHT, LABEL_CELL_WIDTH,
};
use galaxy_core::{
    heart_texture, Camera, FrameLoop, GalaxyParams, LabelAtlas, OrbitControls, SimulationState,
    StopHandle,
};
use galaxy_render::{Renderer, SceneAssets};
use instant::Instant;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod text;

thread_local! {
    static STOP: RefCell<Option<StopHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("galaxy-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the animation loop; the last drawn frame stays on the canvas.
#[wasm_bindgen]
pub fn stop() {
    STOP.with(|s| {
        if let Some(handle) = s.borrow().as_ref() {
            handle.stop();
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document, constants::CANVAS_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    frame::wire_canvas_resize(&canvas);

    let params = GalaxyParams::default();
    params.validate()?;
    let seed: u64 = rand::thread_rng().gen();
    let state = SimulationState::new(&params, seed);

    let heart = heart_texture(HEART_TEXTURE_SIZE);
    let mut rasterizer = text::CanvasLabelRasterizer::new(&document)?;
    let atlas = LabelAtlas::build(
        &state.markers,
        LABEL_CELL_WIDTH,
        LABEL_CELL_HEIGHT,
        LABEL_ATLAS_COLUMNS,
        &mut rasterizer,
    )?;

    let (width, height) = (canvas.width(), canvas.height());
    let camera = Camera::new(width.max(1) as f32 / height.max(1) as f32);
    let renderer = Renderer::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        width,
        height,
        SceneAssets {
            params: &params,
            state: &state,
            heart: &heart,
            atlas: &atlas,
            fovy_radians: camera.fovy_radians,
        },
    )
    .await?;

    let mut orbit = OrbitControls::default();
    orbit.rotate_speed = constants::ROTATE_SENSITIVITY;
    orbit.zoom_speed = constants::WHEEL_SENSITIVITY;
    let controls = Rc::new(RefCell::new(orbit));
    events::wire_orbit_input(events::OrbitWiring {
        canvas: canvas.clone(),
        controls: controls.clone(),
        drag: Rc::new(RefCell::new(input::DragTracker::default())),
    });

    let frame_loop = FrameLoop::new();
    STOP.with(|s| *s.borrow_mut() = Some(frame_loop.stop_handle()));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        frame_loop,
        state,
        backend: frame::WebBackend {
            canvas,
            renderer,
            camera,
            controls,
        },
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
