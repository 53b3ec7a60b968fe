//! GPU particle renderer shared by the web and native front-ends.
//!
//! Point sprites are drawn as instanced quads: each particle is one
//! instance of six vertices expanded in clip space by the vertex shader.
//! The renderer never owns a surface; callers hand it a target view.

use crate::camera::Camera;
use crate::constants::BACKGROUND_RGB;
use crate::heatmap::HeatMap;
use crate::particles::{ParticleField, ParticleVertex};
use crate::picture::SourceImage;
use crate::session::{FrameOutput, Session};
use glam::Vec2;
use wgpu::util::DeviceExt;

mod helpers;
mod overlay;

pub use helpers::srgb_to_linear;
pub use overlay::overlay_rect;

use helpers::{sampler_entry, texture_entry};
use overlay::{create_overlay_resources, OverlayResources};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub strength: f32,
    pub _pad: f32,
}

impl ParticleUniforms {
    pub fn new(camera: &Camera, resolution: Vec2, strength: f32) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            resolution: resolution.to_array(),
            strength,
            _pad: 0.0,
        }
    }
}

const PARTICLE_ATTRIBUTES: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x2, 3 => Float32];

pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    heat_tex: wgpu::Texture,
    heat_view: wgpu::TextureView,
    heat_size: (u32, u32),
    picture_tex: wgpu::Texture,
    overlay: OverlayResources,
    clear_color: wgpu::Color,
}

impl ParticleRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        field: &ParticleField,
        heatmap: &HeatMap,
        picture: &SourceImage,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::PARTICLES_WGSL.into()),
        });
        let vertex_fragment = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particles_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(1, wgpu::ShaderStages::VERTEX),
                texture_entry(2, wgpu::ShaderStages::VERTEX),
                sampler_entry(3, vertex_fragment),
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &PARTICLE_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles_instances"),
            contents: bytemuck::cast_slice(field.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particles_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let heat_size = (heatmap.width(), heatmap.height());
        let (heat_tex, heat_view) = helpers::create_color_texture(
            device,
            "heatmap_tex",
            heat_size.0,
            heat_size.1,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        helpers::write_rgba8(queue, &heat_tex, heat_size.0, heat_size.1, &heatmap.to_rgba8());

        let (picture_tex, picture_view) = helpers::upload_picture(device, queue, picture);
        let bind_group = create_particles_bind_group(
            device,
            &bgl,
            &uniform_buffer,
            &heat_view,
            &picture_view,
            &sampler,
        );
        let overlay = create_overlay_resources(device, color_format, &heat_view, &sampler);

        log::info!(
            "[render] {} particles, heat-map {}x{}, picture {}x{}",
            field.len(),
            heat_size.0,
            heat_size.1,
            picture.width(),
            picture.height()
        );

        Self {
            pipeline,
            bgl,
            bind_group,
            instance_buffer,
            instance_count: field.len() as u32,
            uniform_buffer,
            sampler,
            heat_tex,
            heat_view,
            heat_size,
            picture_tex,
            overlay,
            clear_color: wgpu::Color {
                r: srgb_to_linear(BACKGROUND_RGB[0]),
                g: srgb_to_linear(BACKGROUND_RGB[1]),
                b: srgb_to_linear(BACKGROUND_RGB[2]),
                a: 1.0,
            },
        }
    }

    /// Bind a new source picture. Particle buffers are untouched.
    pub fn set_picture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, picture: &SourceImage) {
        let (tex, view) = helpers::upload_picture(device, queue, picture);
        self.bind_group = create_particles_bind_group(
            device,
            &self.bgl,
            &self.uniform_buffer,
            &self.heat_view,
            &view,
            &self.sampler,
        );
        self.picture_tex = tex;
        log::info!(
            "[render] picture rebound {}x{}",
            picture.width(),
            picture.height()
        );
    }

    pub fn upload_heatmap(&self, queue: &wgpu::Queue, heatmap: &HeatMap) {
        if (heatmap.width(), heatmap.height()) != self.heat_size {
            log::warn!(
                "[render] heat-map size {}x{} does not match texture {}x{}",
                heatmap.width(),
                heatmap.height(),
                self.heat_size.0,
                self.heat_size.1
            );
            return;
        }
        helpers::write_rgba8(
            queue,
            &self.heat_tex,
            self.heat_size.0,
            self.heat_size.1,
            &heatmap.to_rgba8(),
        );
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, camera: &Camera, resolution: Vec2, strength: f32) {
        let u = ParticleUniforms::new(camera, resolution, strength);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    /// Push everything a tick produced to the GPU.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        session: &Session,
        frame: &FrameOutput,
    ) {
        if let Some(picture) = &frame.image {
            self.set_picture(device, queue, picture);
        }
        if frame.heatmap_dirty {
            self.upload_heatmap(queue, session.heatmap());
        }
        self.update_uniforms(queue, session.camera(), frame.resolution, frame.strength);
    }

    /// Draw the particle field, and optionally the heat-map overlay, into
    /// `view` of physical size `surface_size`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        surface_size: (u32, u32),
        overlay_visible: bool,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
            rpass.draw(0..6, 0..self.instance_count);

            if overlay_visible {
                let (x, y, w, h) = overlay_rect(surface_size.0, surface_size.1);
                rpass.set_viewport(x, y, w, h, 0.0, 1.0);
                rpass.set_pipeline(&self.overlay.pipeline);
                rpass.set_bind_group(0, &self.overlay.bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }
        }
        queue.submit(Some(encoder.finish()));
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    pub fn picture_size(&self) -> (u32, u32) {
        let size = self.picture_tex.size();
        (size.width, size.height)
    }
}

fn create_particles_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    heat_view: &wgpu::TextureView,
    picture_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("particles_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(heat_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(picture_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
