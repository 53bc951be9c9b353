//! Interactive 3D atom visualization
//!
//! A nucleus of protons and neutrons placed by random sampling, with
//! electrons orbiting on seven fixed shells. Rendered with wgpu; orbit
//! camera on the mouse; egui overlay for parameters and frame stats.
//!
//! Controls:
//! - Left mouse drag: Orbit camera
//! - Scroll: Zoom in/out
//! - 1/2: Load presets (tantalum, uranium)
//! - R: Reset camera
//!
//! An optional first CLI argument (`tantalum` | `uranium`) picks the
//! starting preset.

mod physics;
mod renderer;
mod ui;

use common::{GraphicsContext, OrbitCamera};
use physics::{AtomScene, KernelConfig, ScenePreset, TANTALUM, URANIUM};
use renderer::Renderer;
use std::time::Instant;
use ui::FrameStats;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const MAX_PARTICLES: usize = 512;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    scene: AtomScene,
    camera: OrbitCamera,
    config: KernelConfig,
    preset: ScenePreset,
    stats: FrameStats,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    start: Instant,
    last_redraw: Instant,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, preset: ScenePreset) -> Self {
        let renderer = Renderer::new(&ctx, MAX_PARTICLES);
        let camera = OrbitCamera::new(ctx.aspect_ratio());
        let config = KernelConfig::default();

        let mut scene = AtomScene::new();
        scene.load(&preset, config.kernel_radius, &mut rand::thread_rng());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        let now = Instant::now();

        Self {
            ctx,
            renderer,
            scene,
            camera,
            config,
            preset,
            stats: FrameStats::new(now),
            mouse_pressed: false,
            last_mouse_pos: None,
            start: now,
            last_redraw: now,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
        self.renderer
            .resize(&self.ctx.device, new_size.width, new_size.height);
    }

    fn load_preset(&mut self, preset: ScenePreset) {
        self.preset = preset;
        self.scene
            .load(&preset, self.config.kernel_radius, &mut rand::thread_rng());
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let num_instances = self.renderer.update_scene(&self.ctx.queue, &self.scene);

        // Build the overlay UI
        let mut kernel_changed = false;
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            ui::draw_stats(
                ctx,
                &self.stats,
                self.scene.nucleon_count(),
                self.scene.electron_count(),
            );
            kernel_changed = ui::draw_control_panel(
                ctx,
                &mut self.config,
                &mut self.camera,
                self.preset.kernel_editable,
            );
        });

        if kernel_changed {
            self.scene
                .resample_nucleus(self.config.kernel_radius, &mut rand::thread_rng());
        }

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, num_instances);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Digit1 => self.load_preset(TANTALUM),
            KeyCode::Digit2 => self.load_preset(URANIUM),
            KeyCode::KeyR => self.camera.reset(),
            _ => {}
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if self.mouse_pressed {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                let dx = (x - last_x) as f32 * 0.01;
                let dy = (y - last_y) as f32 * 0.01;
                self.camera.orbit(dx, dy);
            }
            self.last_mouse_pos = Some((x, y));
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom(delta * 10.0);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui
            .state
            .on_window_event(&self.ctx.window, event)
            .consumed
    }
}

fn preset_from_args() -> ScenePreset {
    match std::env::args().nth(1).as_deref() {
        Some("uranium") => URANIUM,
        Some("tantalum") | None => TANTALUM,
        Some(other) => {
            log::warn!("unknown preset {:?}, starting with tantalum", other);
            TANTALUM
        }
    }
}

fn main() {
    env_logger::init();

    println!("Atom Visualization");
    println!();
    println!("Controls:");
    println!("  Drag    - Orbit camera");
    println!("  Scroll  - Zoom");
    println!("  1/2     - Load presets (tantalum, uranium)");
    println!("  R       - Reset camera");
    println!();

    let preset = preset_from_args();

    let (ctx, event_loop) =
        pollster::block_on(GraphicsContext::new("Atom Visualization", 1280, 720));

    let mut app = App::new(ctx, preset);

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    if !consumed {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(size) => app.resize(*size),
                            WindowEvent::MouseInput { state, button, .. } => {
                                if *button == MouseButton::Left {
                                    app.mouse_pressed = *state == ElementState::Pressed;
                                    if !app.mouse_pressed {
                                        app.last_mouse_pos = None;
                                    }
                                }
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                app.handle_mouse_move(position.x, position.y);
                            }
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(key),
                                        state,
                                        ..
                                    },
                                ..
                            } => app.handle_key(*key, *state),
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => *y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                app.handle_scroll(scroll);
                            }
                            WindowEvent::RedrawRequested => {
                                match app.render() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                    Err(e) => log::error!("render error: {:?}", e),
                                }
                                app.stats.tick(Instant::now());
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    // Electron positions update on every pass through the
                    // loop; redraws fire on the preset's fixed cadence. The
                    // two are intentionally unsynchronized.
                    let t_ms = app.start.elapsed().as_secs_f64() * 1000.0;
                    app.scene.advance(t_ms as f32);

                    if app.last_redraw.elapsed() >= app.preset.redraw_interval {
                        app.last_redraw = Instant::now();
                        app.ctx.window.request_redraw();
                    }
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
