use bytemuck::{Pod, Zeroable};

use crate::coords::Mat4;
use crate::render::{RenderCtx, RenderTarget};
use crate::shapes::PolylineStore;

use super::common::{alpha_blend, create_transform_ubo, primitive, transform_layout_entry, TransformUniform};

/// Interleaved point + color, as read by `polyline.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PolylineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl PolylineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PolylineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Flattens the store into one vertex per point, in storage order.
pub fn polyline_vertices(store: &PolylineStore) -> Vec<PolylineVertex> {
    let mut out = Vec::with_capacity(store.point_count());
    extend_vertices(store, &mut out);
    out
}

fn extend_vertices(store: &PolylineStore, out: &mut Vec<PolylineVertex>) {
    out.extend(
        store
            .points()
            .iter()
            .zip(store.colors())
            .map(|(p, c)| PolylineVertex {
                position: *p,
                color: c.to_array(),
            }),
    );
}

/// Draws every stroke as a line strip through the view's forward matrix.
///
/// All points are re-uploaded each frame; one draw call is issued per
/// non-empty polyline.
#[derive(Default)]
pub struct PolylineRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    transform_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    // Reused between frames.
    staging: Vec<PolylineVertex>,
}

impl PolylineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        shapes: &PolylineStore,
        forward: Mat4,
    ) {
        if shapes.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vbo_capacity(ctx, shapes.point_count());

        self.staging.clear();
        extend_vertices(shapes, &mut self.staging);

        let Some(ubo) = self.transform_ubo.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&TransformUniform::from(forward)));
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.staging));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.load_pass("scribble polyline pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for range in shapes.draw_ranges() {
            rpass.draw(range.start as u32..range.end as u32, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scribble polyline shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/polyline.wgsl").into()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scribble polyline bgl"),
                entries: &[transform_layout_entry(0)],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("scribble polyline pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scribble polyline pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PolylineVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive(wgpu::PrimitiveTopology::LineStrip),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("polyline pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.transform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.transform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = create_transform_ubo(ctx.device, "scribble polyline transform ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scribble polyline bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.transform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_vbo_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scribble polyline vbo"),
            size: (new_cap * std::mem::size_of::<PolylineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
        log::trace!("polyline vbo grown to {new_cap} vertices");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{ColorRgba, Vec2};

    #[test]
    fn vertices_follow_storage_order() {
        let mut store = PolylineStore::new();
        store.append_point(Vec2::new(0.1, 0.2), ColorRgba::opaque(1.0, 0.0, 0.0));
        store.begin_polyline();
        store.append_point(Vec2::new(-0.3, 0.4), ColorRgba::new(0.0, 1.0, 0.0, 0.5));

        let v = polyline_vertices(&store);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].position, [0.1, 0.2, 0.0]);
        assert_eq!(v[1].color, [0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn vertex_stride_matches_attributes() {
        assert_eq!(std::mem::size_of::<PolylineVertex>(), 7 * 4);
    }
}
