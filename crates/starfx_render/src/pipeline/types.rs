//! GPU-compatible data types for the compositing pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// Per-layer uniforms
///
/// Uniform buffers bind in 16-byte units, so the opacity is padded out.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LayerUniforms {
    /// Multiplier applied to the whole layer (premultiplied, so all channels)
    pub opacity: f32,
    pub _padding: [f32; 3],
}

impl LayerUniforms {
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            _padding: [0.0; 3],
        }
    }
}

impl Default for LayerUniforms {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Texel format of every layer texture
pub const LAYER_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Bytes per layer texel
pub const LAYER_BYTES_PER_PIXEL: u32 = 4;
