//! Rendering pipeline components
//!
//! This module contains the layer compositing pipeline.

pub mod types;
pub mod composite_pipeline;

pub use types::LayerUniforms;
pub use composite_pipeline::{CompositePipeline, LayerTexture};
