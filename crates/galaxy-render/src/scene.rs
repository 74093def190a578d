//! Scene pass into the HDR target, drawn in order: core sphere (the only
//! depth writer), nebula planes, heart points, word labels.

use super::helpers::{self, ADDITIVE, HDR_FORMAT};
use galaxy_core::{uv_sphere, Camera, GalaxyParams, LabelAtlas, RgbaImage, SimulationState};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    group: [[f32; 4]; 4],
    right: [f32; 4],
    up: [f32; 4],
    // star size, label width, label height, star tint weight
    sizes: [f32; 4],
    core_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct NebulaUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    time: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct StarInstance {
    position: [f32; 3],
    _pad: f32,
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LabelInstance {
    position: [f32; 3],
    _pad: f32,
    uv_rect: [f32; 4],
}

// Offsets follow the struct fields, which are padded to 16 bytes after `position`.
const STAR_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: std::mem::offset_of!(StarInstance, position) as u64,
        shader_location: 1,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: std::mem::offset_of!(StarInstance, color) as u64,
        shader_location: 2,
    },
];

const LABEL_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: std::mem::offset_of!(LabelInstance, position) as u64,
        shader_location: 1,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: std::mem::offset_of!(LabelInstance, uv_rect) as u64,
        shader_location: 2,
    },
];

const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

struct NebulaDraw {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 4],
}

/// Immutable per-scene sizing carried into every camera upload.
struct SceneSizes {
    star: f32,
    label: [f32; 2],
    tint: f32,
    core_color: [f32; 4],
}

pub(crate) struct ScenePass {
    camera_buffer: wgpu::Buffer,
    camera_bg: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,

    core_pipeline: wgpu::RenderPipeline,
    core_vb: wgpu::Buffer,
    core_ib: wgpu::Buffer,
    core_index_count: u32,

    nebula_pipeline: wgpu::RenderPipeline,
    nebulae: Vec<NebulaDraw>,

    star_pipeline: wgpu::RenderPipeline,
    star_vb: wgpu::Buffer,
    star_count: u32,
    heart_bg: wgpu::BindGroup,

    label_pipeline: wgpu::RenderPipeline,
    label_vb: wgpu::Buffer,
    label_instances: Vec<LabelInstance>,
    atlas_bg: wgpu::BindGroup,

    sizes: SceneSizes,
    _textures: [wgpu::Texture; 2],
}

fn linear_rgba(c: galaxy_core::Rgb) -> [f32; 4] {
    let [r, g, b] = c.to_linear().to_array();
    [r, g, b, 1.0]
}

fn instance_layout<T>(
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<T>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes,
    }
}

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 2) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

#[allow(clippy::too_many_arguments)]
fn scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vs: &str,
    fs: &str,
    buffers: &[wgpu::VertexBufferLayout],
    blend: wgpu::BlendState,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(depth_write)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl ScenePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        params: &GalaxyParams,
        state: &SimulationState,
        heart: &RgbaImage,
        atlas: &LabelAtlas,
        fovy_radians: f32,
    ) -> Self {
        let vis = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
            entries: &[helpers::uniform_layout_entry(0, vis)],
        });
        let nebula_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("nebula_bgl"),
            entries: &[helpers::uniform_layout_entry(0, vis)],
        });
        let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bgl"),
            entries: &helpers::texture_layout_entries(0),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Core sphere
        let core_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("core_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::CORE_WGSL.into()),
        });
        let core_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("core_pl"),
            bind_group_layouts: &[&camera_bgl],
            push_constant_ranges: &[],
        });
        const CORE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        let core_pipeline = scene_pipeline(
            device,
            "core_pipeline",
            &core_pl,
            &core_shader,
            "vs_core",
            "fs_core",
            &[wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 3) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &CORE_ATTRS,
            }],
            wgpu::BlendState::REPLACE,
            Some(wgpu::Face::Back),
            true,
        );
        let mesh = uv_sphere(params.core_radius, params.core_segments, params.core_segments);
        let core_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("core_vb"),
            contents: bytemuck::cast_slice(&mesh.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let core_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("core_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Nebula planes
        let nebula_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("nebula_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::NEBULA_WGSL.into()),
        });
        let nebula_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("nebula_pl"),
            bind_group_layouts: &[&camera_bgl, &nebula_bgl],
            push_constant_ranges: &[],
        });
        let nebula_pipeline = scene_pipeline(
            device,
            "nebula_pipeline",
            &nebula_pl,
            &nebula_shader,
            "vs_nebula",
            "fs_nebula",
            &[quad_layout()],
            ADDITIVE,
            Some(wgpu::Face::Back),
            false,
        );
        let group = state.group_matrix();
        let nebulae = state
            .nebulae
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let color = linear_rgba(layer.config.color);
                let uniforms = NebulaUniforms {
                    model: layer.model_matrix(group).to_cols_array_2d(),
                    color,
                    time: [layer.time, 0.0, 0.0, 0.0],
                };
                let uniform_buffer =
                    helpers::uniform_buffer(device, &format!("nebula_uniforms_{i}"), &uniforms);
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("nebula_bg"),
                    layout: &nebula_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });
                NebulaDraw {
                    uniform_buffer,
                    bind_group,
                    color,
                }
            })
            .collect();

        // Heart points and word labels share one shader module
        let sprite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SPRITES_WGSL.into()),
        });
        let sprite_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&camera_bgl, &sprite_bgl],
            push_constant_ranges: &[],
        });
        let star_pipeline = scene_pipeline(
            device,
            "star_pipeline",
            &sprite_pl,
            &sprite_shader,
            "vs_star",
            "fs_star",
            &[
                quad_layout(),
                instance_layout::<StarInstance>(&STAR_ATTRS),
            ],
            ADDITIVE,
            None,
            false,
        );
        let stars: Vec<StarInstance> = state
            .stars
            .iter()
            .map(|s| StarInstance {
                position: s.position.to_array(),
                _pad: 0.0,
                color: linear_rgba(s.color),
            })
            .collect();
        let star_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_instances"),
            contents: bytemuck::cast_slice(&stars),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let label_pipeline = scene_pipeline(
            device,
            "label_pipeline",
            &sprite_pl,
            &sprite_shader,
            "vs_label",
            "fs_label",
            &[
                quad_layout(),
                instance_layout::<LabelInstance>(&LABEL_ATTRS),
            ],
            wgpu::BlendState::ALPHA_BLENDING,
            None,
            false,
        );
        let label_instances: Vec<LabelInstance> = state
            .markers
            .iter()
            .zip(atlas.marker_cells.iter())
            .map(|(m, &cell)| LabelInstance {
                position: m.position.to_array(),
                _pad: 0.0,
                uv_rect: atlas.uv_rect(cell),
            })
            .collect();
        // At least one element so an empty marker set still yields a valid buffer.
        let label_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("label_instances"),
            size: (std::mem::size_of::<LabelInstance>() * label_instances.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = helpers::linear_sampler(device, "sprite_sampler");
        let (heart_tex, heart_view) = helpers::upload_rgba_texture(device, queue, "heart_tex", heart);
        let heart_bg =
            helpers::texture_bind_group(device, "heart_bg", &sprite_bgl, &heart_view, &sampler, None);
        let (atlas_tex, atlas_view) =
            helpers::upload_rgba_texture(device, queue, "label_atlas", &atlas.image);
        let atlas_bg =
            helpers::texture_bind_group(device, "atlas_bg", &sprite_bgl, &atlas_view, &sampler, None);

        Self {
            camera_buffer,
            camera_bg,
            quad_vb,
            core_pipeline,
            core_vb,
            core_ib,
            core_index_count: mesh.indices.len() as u32,
            nebula_pipeline,
            nebulae,
            star_pipeline,
            star_vb,
            star_count: stars.len() as u32,
            heart_bg,
            label_pipeline,
            label_vb,
            label_instances,
            atlas_bg,
            sizes: SceneSizes {
                star: params.star_world_size(fovy_radians),
                label: params.label_size,
                tint: if params.tint_stars { 1.0 } else { 0.0 },
                core_color: linear_rgba(params.core_color),
            },
            _textures: [heart_tex, atlas_tex],
        }
    }

    /// Push this frame's camera, nebula and label state to the GPU.
    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, camera: &Camera, state: &SimulationState) {
        let group: Mat4 = state.group_matrix();
        let (right, up) = camera.billboard_axes();
        let cam = CameraUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            group: group.to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
            sizes: [
                self.sizes.star,
                self.sizes.label[0],
                self.sizes.label[1],
                self.sizes.tint,
            ],
            core_color: self.sizes.core_color,
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));

        for (draw, layer) in self.nebulae.iter().zip(state.nebulae.iter()) {
            let uniforms = NebulaUniforms {
                model: layer.model_matrix(group).to_cols_array_2d(),
                color: draw.color,
                time: [layer.time, 0.0, 0.0, 0.0],
            };
            queue.write_buffer(&draw.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        for (instance, marker) in self.label_instances.iter_mut().zip(state.markers.iter()) {
            instance.position = marker.position.to_array();
        }
        if !self.label_instances.is_empty() {
            queue.write_buffer(&self.label_vb, 0, bytemuck::cast_slice(&self.label_instances));
        }
    }

    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.camera_bg, &[]);

        rpass.set_pipeline(&self.core_pipeline);
        rpass.set_vertex_buffer(0, self.core_vb.slice(..));
        rpass.set_index_buffer(self.core_ib.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.core_index_count, 0, 0..1);

        rpass.set_pipeline(&self.nebula_pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        for nebula in &self.nebulae {
            rpass.set_bind_group(1, &nebula.bind_group, &[]);
            rpass.draw(0..6, 0..1);
        }

        if self.star_count > 0 {
            rpass.set_pipeline(&self.star_pipeline);
            rpass.set_bind_group(1, &self.heart_bg, &[]);
            rpass.set_vertex_buffer(1, self.star_vb.slice(..));
            rpass.draw(0..6, 0..self.star_count);
        }

        if !self.label_instances.is_empty() {
            rpass.set_pipeline(&self.label_pipeline);
            rpass.set_bind_group(1, &self.atlas_bg, &[]);
            rpass.set_vertex_buffer(1, self.label_vb.slice(..));
            rpass.draw(0..6, 0..self.label_instances.len() as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    fn attr(attrs: &[wgpu::VertexAttribute], location: u32) -> wgpu::VertexAttribute {
        *attrs
            .iter()
            .find(|a| a.shader_location == location)
            .expect("attribute location")
    }

    #[test]
    fn star_attributes_match_instance_fields() {
        let layout = instance_layout::<StarInstance>(&STAR_ATTRS);
        assert_eq!(layout.array_stride, size_of::<StarInstance>() as u64);
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(attr(&STAR_ATTRS, 1).offset, offset_of!(StarInstance, position) as u64);
        assert_eq!(attr(&STAR_ATTRS, 2).offset, offset_of!(StarInstance, color) as u64);
        assert_eq!(attr(&STAR_ATTRS, 2).offset, 16);
        assert_eq!(attr(&STAR_ATTRS, 2).format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn label_attributes_match_instance_fields() {
        let layout = instance_layout::<LabelInstance>(&LABEL_ATTRS);
        assert_eq!(layout.array_stride, size_of::<LabelInstance>() as u64);
        assert_eq!(attr(&LABEL_ATTRS, 1).offset, offset_of!(LabelInstance, position) as u64);
        assert_eq!(attr(&LABEL_ATTRS, 2).offset, offset_of!(LabelInstance, uv_rect) as u64);
        assert_eq!(attr(&LABEL_ATTRS, 2).offset, 16);
    }

    #[test]
    fn label_rect_bytes_land_on_the_rect_attribute() {
        let instance = LabelInstance {
            position: [1.0, 2.0, 3.0],
            _pad: 0.0,
            uv_rect: [0.25, 0.5, 0.75, 1.0],
        };
        let bytes = bytemuck::bytes_of(&instance);
        let at = attr(&LABEL_ATTRS, 2).offset as usize;
        let rect: [f32; 4] = bytemuck::pod_read_unaligned(&bytes[at..at + 16]);
        assert_eq!(rect, [0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn attributes_fit_inside_the_stride() {
        for (attrs, stride) in [
            (&STAR_ATTRS, size_of::<StarInstance>()),
            (&LABEL_ATTRS, size_of::<LabelInstance>()),
        ] {
            for a in attrs.iter() {
                assert!(a.offset + a.format.size() <= stride as u64);
            }
        }
    }
}
