//! wgpu renderer shared by the web and native front-ends.
//!
//! Frame layout: scene pass into an `Rgba16Float` target with depth, then the
//! bloom chain (bright pass, separable blur at half resolution) composited
//! onto the swapchain.

mod helpers;
mod post;
mod scene;
mod targets;

use galaxy_core::{Camera, GalaxyParams, LabelAtlas, RgbaImage, SimulationState};
use post::PostResources;
use scene::ScenePass;
use targets::RenderTargets;

pub static CORE_WGSL: &str = include_str!("../shaders/core.wgsl");
pub static NEBULA_WGSL: &str = include_str!("../shaders/nebula.wgsl");
pub static SPRITES_WGSL: &str = include_str!("../shaders/sprites.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

/// Everything uploaded once at startup.
pub struct SceneAssets<'s> {
    pub params: &'s GalaxyParams,
    pub state: &'s SimulationState,
    pub heart: &'s RgbaImage,
    pub atlas: &'s LabelAtlas,
    pub fovy_radians: f32,
}

pub struct Renderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    scene: ScenePass,
    post: PostResources,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl<'w> Renderer<'w> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
        assets: SceneAssets<'_>,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] adapter={} surface={:?} {}x{}",
            adapter.get_info().name,
            format,
            width,
            height
        );

        let max_dim = device.limits().max_texture_dimension_2d;
        if assets.atlas.image.width > max_dim || assets.atlas.image.height > max_dim {
            anyhow::bail!(
                "label atlas {}x{} exceeds the device texture limit {}",
                assets.atlas.image.width,
                assets.atlas.image.height,
                max_dim
            );
        }

        let targets = RenderTargets::new(&device, width, height);
        let scene = ScenePass::new(
            &device,
            &queue,
            assets.params,
            assets.state,
            assets.heart,
            assets.atlas,
            assets.fovy_radians,
        );
        let post = PostResources::new(&device, &targets, format, &assets.params.bloom);
        post.write_uniforms(&queue, targets.bloom_size);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene,
            post,
            clear_color: wgpu::Color::BLACK,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reconfigure the surface and rebuild size-dependent targets. Zero-sized
    /// requests (minimised windows, hidden canvases) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        log::debug!("[gpu] resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.post.resize(&self.device, &self.queue, &self.targets);
    }

    /// Reconfigure at the current size, after `SurfaceError::Lost` or `Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        state: &SimulationState,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.scene.upload(&self.queue, camera, state);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.scene.encode(
            &mut encoder,
            &self.targets.hdr_view,
            &self.targets.depth_view,
            self.clear_color,
        );
        self.post.encode(&mut encoder, &self.targets, &view);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
