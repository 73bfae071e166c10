use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycast_engine::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use raycast_engine::{Engine, LogicalKey, RayMarch, Texture};

// Speeds are per frame, so the frame rate is pinned
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// First-person raycaster over a fixed tile map.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Wall texture image; selects the textured 800x600 variant.
    #[arg(short, long, value_name = "PATH")]
    texture: Option<PathBuf>,

    /// Trace rays with exact grid traversal instead of the fixed-step march.
    #[arg(long)]
    exact: bool,
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    engine: Engine,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,
    next_frame: Instant,

    // Framebuffer -> window mapping, rebuilt when the window size changes
    scale_lut: ScaleLut,
    lut_size: (usize, usize),
}

impl App {
    fn new(engine: Engine) -> Self {
        Self {
            window: None,
            surface: None,
            engine,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            next_frame: Instant::now(),
            scale_lut: ScaleLut::empty(),
            lut_size: (0, 0),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let cfg = self.engine.config();
        let attributes = Window::default_attributes()
            .with_title("Raycaster")
            .with_inner_size(LogicalSize::new(
                cfg.screen_width as f64,
                cfg.screen_height as f64,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow::anyhow!("create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip the frame
        };
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow::anyhow!("resize surface: {e}"))?;

        let frame = self.engine.on_frame();

        let dst = (dw.get() as usize, dh.get() as usize);
        if dst != self.lut_size {
            log::debug!(
                "rebuilding scale table {}x{} -> {}x{}",
                frame.width(),
                frame.height(),
                dst.0,
                dst.1
            );
            self.scale_lut = build_scale_lut(dst.0, dst.1, frame.width(), frame.height());
            self.lut_size = dst;
        }

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("buffer_mut: {e}"))?;
        blit_nearest_stretch(&mut buf, dst.0, frame.pixels(), &self.scale_lut);
        buf.present()
            .map_err(|e| anyhow::anyhow!("present: {e}"))?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let pose = self.engine.pose();
            log::info!(
                "FPS: {:.1} pos=({:.2}, {:.2}) heading={:.2}",
                self.frame_counter as f32 / elapsed,
                pose.pos[0],
                pose.pos[1],
                pose.heading
            );
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("{e:#}");
            event_loop.exit();
            return;
        }
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    event_loop.exit();
                    return;
                }
                if let Some(key) = LogicalKey::from_key_code(code) {
                    self.engine
                        .set_key_state(key, state == ElementState::Pressed);
                }
            }

            WindowEvent::Focused(false) => self.engine.release_keys(),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    log::error!("{e:#}");
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("window resized to {}x{}", new_size.width, new_size.height);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame = now + FRAME_INTERVAL;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

fn build_engine(args: &CliArgs) -> Result<Engine> {
    let mut engine = match &args.texture {
        Some(path) => {
            let texture = Texture::from_file(path)
                .with_context(|| format!("failed to load wall texture {}", path.display()))?;
            log::info!(
                "textured variant, texture {} ({}x{})",
                path.display(),
                texture.width(),
                texture.height()
            );
            Engine::textured(texture)
        }
        None => {
            log::info!("flat-shaded variant");
            Engine::classic()
        }
    };

    if args.exact {
        engine.set_ray_march(RayMarch::Exact);
    }

    let cfg = engine.config();
    log::info!(
        "grid {}x{}, screen {}x{}, ray march {:?}",
        engine.grid().rows(),
        engine.grid().cols(),
        cfg.screen_width,
        cfg.screen_height,
        cfg.march
    );
    Ok(engine)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let engine = build_engine(&args)?;

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("create event loop: {e}"))?;
    let mut app = App::new(engine);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow::anyhow!("event loop: {e}"))?;
    Ok(())
}
