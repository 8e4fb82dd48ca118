//! Rendering for the starfx effects
//!
//! Effects paint into software canvases; this crate uploads those canvases as
//! textures and composites them onto the window with wgpu.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`canvas::PixelCanvas`] - Software rasterizer implementing `Surface`
//! - [`pipeline::CompositePipeline`] - Draws layer textures with alpha blending

pub mod context;
pub mod canvas;
pub mod pipeline;

pub use canvas::PixelCanvas;
pub use context::{ContextError, RenderContext};
pub use pipeline::{CompositePipeline, LayerTexture, LayerUniforms};

// Re-export core types for convenience
pub use starfx_core::{Color, Surface, Vec2};
