use glam::Vec2;
use melt_core::{InputEvent, MeltParams, ParticleRenderer, Session, SourceImage, ViewportState};
use std::path::Path;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::Key,
    window::{Window, WindowBuilder},
};

// Edge of the procedural picture used when no image path is given
const PLACEHOLDER_PICTURE_SIZE: u32 = 256;

struct GpuState<'w> {
    window: &'w Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: ParticleRenderer,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window, session: &Session, picture: &SourceImage) -> anyhow::Result<Self> {
        let (width, height) = session.viewport().physical_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = ParticleRenderer::new(
            &device,
            &queue,
            format,
            session.field(),
            session.heatmap(),
            picture,
        );
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, session: &mut Session) -> Result<(), wgpu::SurfaceError> {
        let out = session.tick();
        if let Some((w, h)) = out.resized {
            self.resize(w, h);
        }
        self.renderer
            .prepare(&self.device, &self.queue, session, &out);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            (self.config.width, self.config.height),
            out.overlay_visible,
        );
        frame.present();
        Ok(())
    }
}

fn load_picture(path: &Path) -> anyhow::Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    Ok(SourceImage::decode(&bytes)?)
}

fn viewport_of(window: &Window) -> ViewportState {
    let scale = window.scale_factor() as f32;
    let size = window.inner_size();
    ViewportState::new(
        size.width as f32 / scale,
        size.height as f32 / scale,
        scale,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let picture = match std::env::args().nth(1) {
        Some(arg) => match load_picture(Path::new(&arg)) {
            Ok(p) => {
                log::info!("[assets] picture {}x{} from {}", p.width(), p.height(), arg);
                p
            }
            Err(e) => {
                log::warn!("[assets] {}: {}; using placeholder", arg, e);
                SourceImage::placeholder(PLACEHOLDER_PICTURE_SIZE)
            }
        },
        None => SourceImage::placeholder(PLACEHOLDER_PICTURE_SIZE),
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("melt")
        .build(&event_loop)?;

    let mut session = Session::new(MeltParams::default(), viewport_of(&window));
    let mut state = pollster::block_on(GpuState::new(&window, &session, &picture))?;
    let mut cursor = Vec2::ZERO;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                let vp = viewport_of(state.window);
                session.push(InputEvent::Resize {
                    width: vp.width,
                    height: vp.height,
                    pixel_ratio: vp.pixel_ratio,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = state.window.scale_factor();
                let logical = position.to_logical::<f32>(scale);
                cursor = Vec2::new(logical.x, logical.y);
                session.push(InputEvent::PointerMove {
                    x: cursor.x,
                    y: cursor.y,
                });
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => session.push(InputEvent::DragStart {
                    x: cursor.x,
                    y: cursor.y,
                }),
                ElementState::Released => session.push(InputEvent::DragEnd),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                // Positive means "scroll down", as in DOM wheel events.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * 100.0,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                if delta_y != 0.0 {
                    session.push(InputEvent::Wheel { delta_y });
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(ref text),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => session.push(InputEvent::Key(text.to_string())),
            WindowEvent::DroppedFile(path) => match load_picture(&path) {
                Ok(p) => session.push(InputEvent::ImageLoaded(Box::new(p))),
                Err(e) => log::warn!("[file] {}: {}", path.display(), e),
            },
            _ => {}
        },
        Event::AboutToWait => match state.render(&mut session) {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[frame] out of GPU memory; exiting");
                elwt.exit();
            }
            Err(e) => log::warn!("[frame] skipped: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
