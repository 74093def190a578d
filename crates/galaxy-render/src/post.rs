//! Bloom chain: bright pass into `bloom_a`, horizontal blur into `bloom_b`,
//! vertical blur back into `bloom_a`, then composite over the HDR scene onto
//! the swapchain.
//!
//! Every pass owns its uniform buffer: passes recorded into one encoder all
//! read a buffer's last written value.

use super::helpers;
use super::targets::RenderTargets;
use galaxy_core::BloomParams;

/// Blur tap spacing in texels is `1 + radius * BLUR_SPREAD`.
const BLUR_SPREAD: f32 = 2.5;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    threshold: f32,
    strength: f32,
    spread: f32,
    encode_srgb: f32,
}

struct PassUniforms {
    bright: wgpu::Buffer,
    blur_h: wgpu::Buffer,
    blur_v: wgpu::Buffer,
    composite: wgpu::Buffer,
}

struct PostBindGroups {
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite: wgpu::BindGroup,
    composite_bloom: wgpu::BindGroup,
}

pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    uniforms: PassUniforms,
    groups: PostBindGroups,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    bloom: BloomParams,
    encode_srgb: bool,
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        targets: &RenderTargets,
        swap_format: wgpu::TextureFormat,
        bloom: &BloomParams,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::POST_WGSL.into()),
        });
        let [tex0, samp0] = helpers::texture_layout_entries(0);
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                tex0,
                samp0,
                helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &helpers::texture_layout_entries(0),
        });
        let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline = helpers::make_post_pipeline(
            device,
            "bright_pipeline",
            &pl_bright_blur,
            &shader,
            "fs_bright",
            helpers::HDR_FORMAT,
        );
        let blur_pipeline = helpers::make_post_pipeline(
            device,
            "blur_pipeline",
            &pl_bright_blur,
            &shader,
            "fs_blur",
            helpers::HDR_FORMAT,
        );
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            "composite_pipeline",
            &pl_composite,
            &shader,
            "fs_composite",
            swap_format,
        );

        let encode_srgb = !swap_format.is_srgb();
        let blank = PostUniforms::default();
        let uniforms = PassUniforms {
            bright: helpers::uniform_buffer(device, "post_bright_uniforms", &blank),
            blur_h: helpers::uniform_buffer(device, "post_blur_h_uniforms", &blank),
            blur_v: helpers::uniform_buffer(device, "post_blur_v_uniforms", &blank),
            composite: helpers::uniform_buffer(device, "post_composite_uniforms", &blank),
        };
        let sampler = helpers::linear_sampler(device, "post_sampler");
        let groups = Self::bind_groups(device, &bgl0, &bgl1, &sampler, &uniforms, targets);
        Self {
            bgl0,
            bgl1,
            sampler,
            uniforms,
            groups,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            bloom: bloom.clone(),
            encode_srgb,
        }
    }

    fn bind_groups(
        device: &wgpu::Device,
        bgl0: &wgpu::BindGroupLayout,
        bgl1: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        uniforms: &PassUniforms,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let hdr = &targets.hdr_view;
        let a = &targets.bloom_a_view;
        let b = &targets.bloom_b_view;
        let pass = |label: &str, view: &wgpu::TextureView, buf: &wgpu::Buffer| {
            helpers::texture_bind_group(device, label, bgl0, view, sampler, Some(buf))
        };
        PostBindGroups {
            bright: pass("bg_bright", hdr, &uniforms.bright),
            blur_h: pass("bg_blur_h", a, &uniforms.blur_h),
            blur_v: pass("bg_blur_v", b, &uniforms.blur_v),
            composite: pass("bg_composite", hdr, &uniforms.composite),
            composite_bloom: helpers::texture_bind_group(
                device,
                "bg_bloom_a_only",
                bgl1,
                a,
                sampler,
                None,
            ),
        }
    }

    /// Rebind to freshly recreated targets and refresh the resolution-dependent uniforms.
    pub(crate) fn resize(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
    ) {
        self.groups = Self::bind_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.sampler,
            &self.uniforms,
            targets,
        );
        self.write_uniforms(queue, targets.bloom_size);
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, bloom_size: [u32; 2]) {
        let base = PostUniforms {
            resolution: [bloom_size[0] as f32, bloom_size[1] as f32],
            blur_dir: [0.0, 0.0],
            threshold: self.bloom.threshold,
            strength: self.bloom.strength,
            spread: 1.0 + self.bloom.radius * BLUR_SPREAD,
            encode_srgb: if self.encode_srgb { 1.0 } else { 0.0 },
        };
        let blur_h = PostUniforms {
            blur_dir: [1.0, 0.0],
            ..base
        };
        let blur_v = PostUniforms {
            blur_dir: [0.0, 1.0],
            ..base
        };
        queue.write_buffer(&self.uniforms.bright, 0, bytemuck::bytes_of(&base));
        queue.write_buffer(&self.uniforms.blur_h, 0, bytemuck::bytes_of(&blur_h));
        queue.write_buffer(&self.uniforms.blur_v, 0, bytemuck::bytes_of(&blur_v));
        queue.write_buffer(&self.uniforms.composite, 0, bytemuck::bytes_of(&base));
    }

    /// Record the whole bloom chain, ending on `output`.
    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        let g = &self.groups;
        let (a, b) = (&targets.bloom_a_view, &targets.bloom_b_view);
        blit(encoder, "bright_pass", a, &self.bright_pipeline, &g.bright, None);
        blit(encoder, "blur_h", b, &self.blur_pipeline, &g.blur_h, None);
        blit(encoder, "blur_v", a, &self.blur_pipeline, &g.blur_v, None);
        blit(
            encoder,
            "composite",
            output,
            &self.composite_pipeline,
            &g.composite,
            Some(&g.composite_bloom),
        );
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
