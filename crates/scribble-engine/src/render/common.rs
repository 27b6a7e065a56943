//! GPU-side pieces shared by the renderers.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::Mat4;

// ── transform uniform ─────────────────────────────────────────────────────

/// A column-major 4x4 matrix, laid out as WGSL `mat4x4<f32>` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TransformUniform {
    pub matrix: [f32; 16],
}

impl From<Mat4> for TransformUniform {
    fn from(m: Mat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }
}

pub(super) const TRANSFORM_UBO_SIZE: NonZeroU64 =
    match NonZeroU64::new(std::mem::size_of::<TransformUniform>() as u64) {
        Some(n) => n,
        None => panic!("TransformUniform is zero-sized"),
    };

/// Layout entry for the transform uniform at `binding`, vertex stage only.
pub(super) fn transform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(TRANSFORM_UBO_SIZE),
        },
        count: None,
    }
}

pub(super) fn create_transform_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: TRANSFORM_UBO_SIZE.get(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha over.
pub(super) fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

/// Primitive state for `topology` with no culling.
pub(super) fn primitive(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}
