use anyhow::{Context, Result};
use clap::Parser;
use cubefall_common::SimConfig;
use cubefall_frame::{FrameLoop, FrameOutcome};
use cubefall_input::{Key, KeyEvent, KeyState};
use cubefall_render_wgpu::{OrthoCamera, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Cube Gravity Simulation";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

#[derive(Parser)]
#[command(name = "cubefall-desktop", about = "Falling cubes demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for cube placement (defaults to wall-clock time)
    #[arg(long)]
    seed: Option<u64>,

    /// YAML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Fatal failures while acquiring the window and GPU context.
#[derive(Debug, thiserror::Error)]
enum GpuInitError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Window and GPU resources, acquired once and dropped at shutdown.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self, GpuInitError> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(GpuInitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubefall_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;
        device.on_uncaptured_error(Box::new(|error: wgpu::Error| {
            tracing::error!("GPU error: {error}");
        }));

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuInitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn present(&mut self, camera: &OrthoCamera, draw_list: &cubefall_render::DrawList) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, camera, draw_list);
        output.present();
    }
}

struct DesktopApp {
    frames: FrameLoop,
    camera: OrthoCamera,
    gpu: Option<Gpu>,
    init_error: Option<GpuInitError>,
}

impl DesktopApp {
    fn new(frames: FrameLoop) -> Self {
        Self {
            frames,
            camera: OrthoCamera::default(),
            gpu: None,
            init_error: None,
        }
    }
}

/// Translate a winit key transition into the backend-neutral event.
fn translate_key(code: KeyCode, state: ElementState, repeat: bool) -> KeyEvent {
    let key = match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    };
    let state = match (state, repeat) {
        (ElementState::Released, _) => KeyState::Released,
        (ElementState::Pressed, true) => KeyState::Repeat,
        (ElementState::Pressed, false) => KeyState::Pressed,
    };
    KeyEvent::new(key, state)
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() || self.init_error.is_some() {
            return;
        }
        match Gpu::new(event_loop) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.camera.set_viewport(size.width, size.height);
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("{e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.frames.request_exit();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.camera.set_viewport(new_size.width, new_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.frames
                        .push_key(translate_key(code, event.state, event.repeat));
                }
            }
            WindowEvent::RedrawRequested => match self.frames.frame() {
                FrameOutcome::Exit => event_loop.exit(),
                FrameOutcome::Render(draw_list) => {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.present(&self.camera, &draw_list);
                    }
                }
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.frames.exit_requested() {
            return;
        }
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

/// Seed derived from the wall clock at startup.
fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(wall_clock_seed);
    tracing::info!(seed, cubes = config.cube_count, "cubefall-desktop starting");

    let event_loop = EventLoop::new().context("initializing windowing system")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(FrameLoop::from_config(config, seed));
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e.into());
    }
    tracing::info!(tick = app.frames.simulation().tick(), "closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubefall_input::{map_key, Action, Direction};

    #[test]
    fn arrows_translate_to_nudges() {
        let ev = translate_key(KeyCode::ArrowUp, ElementState::Pressed, false);
        assert_eq!(map_key(&ev), Action::Nudge(Direction::Up));
        let ev = translate_key(KeyCode::ArrowRight, ElementState::Pressed, true);
        assert_eq!(ev.state, KeyState::Repeat);
        assert_eq!(map_key(&ev), Action::Nudge(Direction::Right));
    }

    #[test]
    fn escape_press_translates_to_quit() {
        let ev = translate_key(KeyCode::Escape, ElementState::Pressed, false);
        assert_eq!(map_key(&ev), Action::Quit);
    }

    #[test]
    fn unbound_keys_are_other() {
        let ev = translate_key(KeyCode::KeyW, ElementState::Pressed, false);
        assert_eq!(ev.key, Key::Other);
        let ev = translate_key(KeyCode::ArrowLeft, ElementState::Released, false);
        assert_eq!(ev.state, KeyState::Released);
    }
}
