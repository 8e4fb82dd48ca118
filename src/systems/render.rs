//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - One software canvas and layer texture per effect
//! - Frame compositing, back to front: starfield, page, fireworks, cursor

use std::sync::Arc;
use winit::window::Window;
use starfx_core::{Color, Surface};
use starfx_input::HitRegion;
use starfx_render::{
    context::{ContextError, RenderContext},
    pipeline::{CompositePipeline, LayerTexture},
    PixelCanvas,
};
use crate::config::RenderingConfig;
use crate::systems::FrameSurfaces;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// No GPU adapter could drive the window
    AdapterNotFound,
    /// Device or surface setup failed
    DeviceRequest(String),
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::AdapterNotFound => write!(f, "No compatible GPU adapter"),
            RenderError::DeviceRequest(msg) => write!(f, "GPU setup failed: {}", msg),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        match e {
            ContextError::AdapterNotFound => RenderError::AdapterNotFound,
            other => RenderError::DeviceRequest(other.to_string()),
        }
    }
}

const BUTTON_IDLE: Color = Color::rgba(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0, 0.85);
const BUTTON_HOVER: Color = Color::rgba(80.0 / 255.0, 250.0 / 255.0, 123.0 / 255.0, 0.95);

/// A software canvas paired with the texture it is uploaded to
struct Layer {
    canvas: PixelCanvas,
    texture: LayerTexture,
    label: &'static str,
    opacity: f32,
}

impl Layer {
    fn new(ctx: &RenderContext, pipeline: &CompositePipeline, label: &'static str, opacity: f32) -> Self {
        let (w, h) = (ctx.config.width, ctx.config.height);
        Self {
            canvas: PixelCanvas::new(w, h),
            texture: pipeline.create_layer(&ctx.device, label, w, h, opacity),
            label,
            opacity,
        }
    }

    fn resize(&mut self, ctx: &RenderContext, pipeline: &CompositePipeline, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.texture = pipeline.create_layer(&ctx.device, self.label, width, height, self.opacity);
    }

    fn upload(&mut self, ctx: &RenderContext) {
        self.texture.upload(&ctx.queue, &self.canvas);
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: CompositePipeline,
    starfield: Layer,
    page: Layer,
    fireworks: Layer,
    cursor: Layer,
    config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        config: RenderingConfig,
        starfield_opacity: f32,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let pipeline = CompositePipeline::new(&context.device, context.format());

        let starfield = Layer::new(&context, &pipeline, "Starfield Layer", starfield_opacity);
        let page = Layer::new(&context, &pipeline, "Page Layer", 1.0);
        let fireworks = Layer::new(&context, &pipeline, "Fireworks Layer", 1.0);
        let cursor = Layer::new(&context, &pipeline, "Cursor Layer", 1.0);

        Ok(Self {
            context,
            pipeline,
            starfield,
            page,
            fireworks,
            cursor,
            config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
        for layer in [&mut self.starfield, &mut self.page, &mut self.fireworks, &mut self.cursor] {
            layer.resize(&self.context, &self.pipeline, width, height);
        }
        log::info!("Resized layers to {}x{}", width, height);
    }

    /// Canvases the effects paint into this frame
    pub fn surfaces(&mut self) -> FrameSurfaces<'_> {
        FrameSurfaces {
            starfield: Some(&mut self.starfield.canvas),
            fireworks: Some(&mut self.fireworks.canvas),
            cursor: Some(&mut self.cursor.canvas),
        }
    }

    /// Repaint the static page layer with its interactive regions
    pub fn paint_page(&mut self, regions: &[HitRegion], hovered: Option<&str>) {
        let canvas = &mut self.page.canvas;
        canvas.clear();
        for region in regions {
            let color = if hovered == Some(region.name.as_str()) {
                BUTTON_HOVER
            } else {
                BUTTON_IDLE
            };
            canvas.fill_rect(region.min, region.max, color);
        }
        self.page.upload(&self.context);
    }

    /// Upload the effect canvases and composite a frame
    ///
    /// The fireworks layer is only drawn while a show is active.
    pub fn render_frame(&mut self, fireworks_active: bool) -> Result<(), RenderError> {
        self.starfield.upload(&self.context);
        self.cursor.upload(&self.context);
        if fireworks_active {
            self.fireworks.upload(&self.context);
        }

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Composite Encoder"),
            });

        let mut layers = vec![&self.starfield.texture, &self.page.texture];
        if fireworks_active {
            layers.push(&self.fireworks.texture);
        }
        layers.push(&self.cursor.texture);

        let bg = &self.config.background_color;
        self.pipeline.render(
            &mut encoder,
            &view,
            &layers,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}
