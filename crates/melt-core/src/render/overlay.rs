use super::helpers::{sampler_entry, texture_entry};

pub(crate) struct OverlayResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_overlay_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    heat_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> OverlayResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("overlay_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::OVERLAY_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("overlay_bgl"),
        entries: &[
            texture_entry(0, wgpu::ShaderStages::FRAGMENT),
            sampler_entry(1, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("overlay_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("overlay_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_overlay"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("overlay_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(heat_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    OverlayResources {
        pipeline,
        bind_group,
    }
}

/// Square viewport in the top-right corner, in physical pixels.
pub fn overlay_rect(surface_width: u32, surface_height: u32) -> (f32, f32, f32, f32) {
    let w = surface_width as f32;
    let h = surface_height as f32;
    let side = (w.min(h) * 0.3).floor().max(1.0);
    let margin = (w.min(h) * 0.02).floor();
    let x = (w - side - margin).max(0.0);
    let y = margin.min((h - side).max(0.0));
    (x, y, side.min(w), side.min(h))
}
