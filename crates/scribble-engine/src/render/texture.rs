use std::fmt;

use wgpu::util::DeviceExt;

use crate::coords::Mat4;
use crate::overlay::{OverlayVertex, TextureOverlay};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{alpha_blend, create_transform_ubo, primitive, transform_layout_entry, TransformUniform};

/// Decoded 8-bit RGBA pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextureImage {
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    fn fits(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// Single magenta texel, drawn in place of an image the device cannot hold.
    fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255, 0, 255, 255],
        }
    }
}

/// Pixel buffer that cannot become a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    Empty { width: u32, height: u32 },
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Empty { width, height } => write!(f, "image has no pixels ({width}x{height})"),
            TextureError::SizeMismatch { expected, actual } => {
                write!(f, "expected {expected} bytes of RGBA8 data, got {actual}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

struct TextureSlot {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Draws the background quad with the overlay's active texture.
///
/// Images are uploaded on the first frame, one bind group per slot. Corner
/// positions are re-uploaded only when the overlay reports them dirty.
pub struct TextureQuadRenderer {
    pending: Vec<TextureImage>,
    slot_count: usize,
    slots: Vec<TextureSlot>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    transform_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    transform_bind_group: Option<wgpu::BindGroup>,
    transform_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    vbo: Option<wgpu::Buffer>,
}

impl TextureQuadRenderer {
    pub fn new(images: Vec<TextureImage>) -> Self {
        Self {
            slot_count: images.len(),
            pending: images,
            slots: Vec::new(),
            pipeline_format: None,
            pipeline: None,
            transform_bgl: None,
            texture_bgl: None,
            transform_bind_group: None,
            transform_ubo: None,
            sampler: None,
            vbo: None,
        }
    }

    /// Number of texture slots, uploaded or not.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        overlay: &mut TextureOverlay,
        rigid: Mat4,
    ) {
        if self.slot_count == 0 {
            return;
        }

        self.ensure_layouts(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_slots(ctx);

        let dirty = overlay.take_dirty();
        if let Some(vbo) = self.vbo.as_ref() {
            if dirty {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(overlay.corners()));
            }
        } else {
            self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scribble overlay vbo"),
                contents: bytemuck::cast_slice(overlay.corners()),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }));
        }

        let Some(ubo) = self.transform_ubo.as_ref() else { return };
        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&TransformUniform::from(rigid)));

        let Some(slot) = self.slots.get(overlay.active_slot()) else {
            log::warn!("overlay slot {} has no texture", overlay.active_slot());
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(transform_bg) = self.transform_bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        let mut rpass = target.load_pass("scribble overlay pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, transform_bg, &[]);
        rpass.set_bind_group(1, &slot.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..4, 0..1);
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.transform_bgl.is_some() && self.texture_bgl.is_some() {
            return;
        }

        let transform_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scribble overlay transform bgl"),
                entries: &[transform_layout_entry(0)],
            });

        let texture_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scribble overlay texture bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let ubo = create_transform_ubo(ctx.device, "scribble overlay transform ubo");
        let transform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scribble overlay transform bind group"),
            layout: &transform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scribble overlay sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
        self.transform_ubo = Some(ubo);
        self.transform_bind_group = Some(transform_bind_group);
        self.transform_bgl = Some(transform_bgl);
        self.texture_bgl = Some(texture_bgl);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let (Some(transform_bgl), Some(texture_bgl)) = (self.transform_bgl.as_ref(), self.texture_bgl.as_ref())
        else {
            return;
        };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scribble overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/texture.wgsl").into()),
        });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("scribble overlay pipeline layout"),
                bind_group_layouts: &[transform_bgl, texture_bgl],
                immediate_size: 0,
            });

        const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
            0 => Float32x2, // pos
            1 => Float32x2  // uv
        ];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scribble overlay pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<OverlayVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ATTRS,
                }],
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
            primitive: primitive(wgpu::PrimitiveTopology::TriangleStrip),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("overlay pipeline built for {:?}", ctx.surface_format);
        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_slots(&mut self, ctx: &RenderCtx<'_>) {
        if self.pending.is_empty() {
            return;
        }
        let (Some(bgl), Some(sampler)) = (self.texture_bgl.as_ref(), self.sampler.as_ref()) else {
            return;
        };

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        for (i, image) in std::mem::take(&mut self.pending).into_iter().enumerate() {
            let image = if image.fits(max_dimension) {
                image
            } else {
                log::warn!(
                    "texture {i} is {}x{}, over the device limit of {max_dimension}; using a placeholder",
                    image.width,
                    image.height
                );
                TextureImage::placeholder()
            };
            self.slots.push(upload(ctx, bgl, sampler, i, &image));
        }
        log::info!("{} background texture(s) uploaded", self.slots.len());
    }
}

fn upload(
    ctx: &RenderCtx<'_>,
    bgl: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    index: usize,
    image: &TextureImage,
) -> TextureSlot {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&format!("scribble overlay texture {index}")),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("scribble overlay bind group {index}")),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    TextureSlot {
        _texture: texture,
        bind_group,
    }
}
