//! starfx - particle effects demo
//!
//! Opens a window with a drifting starfield and a cursor trail. Clicking the
//! launch button (or pressing Enter/Space) plays the fireworks celebration.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use starfx::config::AppConfig;
use starfx::input::{InputAction, InputMapper, LAUNCH_REGION};
use starfx::systems::{EffectsSystem, FrameSurfaces, RenderError, RenderSystem, WindowSystem};
use starfx_input::{HitRegion, PointerController};
use starfx_math::Vec2;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    effects: Option<EffectsSystem>,
    pointer: PointerController,
    /// Hovered region the page layer was last painted with
    painted_hover: Option<String>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            render: None,
            effects: None,
            pointer: PointerController::new(),
            painted_hover: None,
        }
    }

    /// The launch button, centered in a `width` x `height` window
    fn launch_region(&self, width: u32, height: u32) -> HitRegion {
        let [bw, bh] = self.config.rendering.launch_button_size;
        HitRegion::centered(
            LAUNCH_REGION,
            Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            Vec2::new(bw, bh),
        )
    }

    fn layout(&mut self, width: u32, height: u32) {
        let region = self.launch_region(width, height);
        self.pointer.set_regions(vec![region]);
        self.repaint_page();
    }

    fn repaint_page(&mut self) {
        let hovered = self.pointer.hovered_region().map(str::to_owned);
        if let Some(render) = &mut self.render {
            render.paint_page(self.pointer.regions(), hovered.as_deref());
        }
        self.painted_hover = hovered;
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Launch => {
                if let Some(effects) = &mut self.effects {
                    if effects.launch() {
                        log::info!("Launching fireworks");
                    }
                }
            }
            InputAction::Dismiss => {
                if let Some(effects) = &mut self.effects {
                    effects.dismiss();
                }
            }
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(effects) = &mut self.effects else {
            return;
        };

        // 1. Feed pointer changes to the cursor trail
        self.pointer.update(effects.cursor_trail());

        // 2. Step and paint every effect
        let surfaces = match &mut self.render {
            Some(render) => render.surfaces(),
            None => FrameSurfaces::default(),
        };
        let report = effects.frame(surfaces);

        if report.show_completed {
            log::info!("Success animation finished");
        }
        if let Some(window) = &mut self.window {
            window.set_message_visible(report.message_visible);
        }

        // 3. Composite
        if let Some(render) = &mut self.render {
            match render.render_frame(report.fireworks_active) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => log::debug!("Surface lost, reconfigured"),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.starfield.layer_opacity,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render.size();
        let mut effects = EffectsSystem::new(
            self.config.starfield.clone(),
            self.config.cursor.clone(),
            self.config.fireworks.clone(),
            Box::new(window.native_cursor()),
            self.config.debug.seed,
            width,
            height,
        );
        effects.set_scale_factor(window.window().scale_factor());
        log::info!("Window ready at {}x{}", width, height);

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
        self.effects = Some(effects);
        self.layout(width, height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
                if let Some(effects) = &mut self.effects {
                    effects.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.layout(size.width, size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(effects) = &mut self.effects {
                    effects.set_scale_factor(scale_factor);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.process_cursor_moved(position.x, position.y);
                if self.pointer.hovered_region() != self.painted_hover.as_deref() {
                    self.repaint_page();
                }
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer.process_cursor_left();
                if self.painted_hover.is_some() {
                    self.repaint_page();
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.process_mouse_button(button, state);
                if let Some(action) = self.pointer.take_click().and_then(|r| InputMapper::map_click(&r)) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let showing = self.effects.as_ref().map_or(false, EffectsSystem::is_showing);
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, showing) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first so its log level can seed the filter
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting starfx");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
