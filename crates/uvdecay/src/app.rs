//! Application state and event loop

use anyhow::Result;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::chart::HitTester;
use crate::config::AppConfig;
use crate::driver::AnimationDriver;
use crate::render::Renderer;
use crate::ui::{show_controls, show_hud, ChartView, ControlsState, DecayStats, TooltipState};

const WINDOW_TITLE: &str = "UV Decay";

/// Main application state
pub struct App {
    // Window and rendering
    window: Arc<Window>,
    renderer: Renderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Simulation
    driver: AnimationDriver,

    // UI state
    controls_state: ControlsState,
    chart_view: ChartView,

    /// Restart the run on the next frame (set at startup)
    reset_requested: bool,
}

impl App {
    /// Create a new app
    pub async fn new(config: AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoop::new()?;

        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let web_window =
                web_sys::window().ok_or_else(|| anyhow::anyhow!("Failed to get web window"))?;
            let document = web_window
                .document()
                .ok_or_else(|| anyhow::anyhow!("Failed to get document"))?;
            let canvas = document
                .get_element_by_id("graph")
                .ok_or_else(|| anyhow::anyhow!("Failed to find canvas element with id='graph'"))?
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .map_err(|_| anyhow::anyhow!("Element 'graph' is not an HTMLCanvasElement"))?;

            log::info!("Found canvas element, binding to window");

            WindowAttributes::default()
                .with_title(WINDOW_TITLE)
                .with_canvas(Some(canvas))
        };

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.ui.window_width,
                config.ui.window_height,
            ));

        #[allow(deprecated)]
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = Renderer::new(window.clone()).await?;

        let controls_state = ControlsState {
            material: config.ui.default_material,
            uv_intensity: config.ui.default_uv_intensity.min(100),
        };
        let driver = AnimationDriver::new(
            controls_state.material,
            controls_state.uv_intensity,
            config.simulation,
        );
        let chart_view = ChartView::new(
            HitTester::new(config.chart.hit_radius),
            TooltipState::new(config.chart.click_tooltip_duration()),
        );

        // Setup egui
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        Ok((
            Self {
                window,
                renderer,
                egui_ctx,
                egui_state,
                egui_renderer,
                driver,
                controls_state,
                chart_view,
                reset_requested: true,
            },
            event_loop,
        ))
    }

    /// Run the event loop
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Render frame
    fn render(&mut self) -> Result<()> {
        let output = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render_encoder"),
                });

        self.renderer.clear(&mut encoder, &view);

        // Handed to the chart at most once, even if egui runs several passes
        let mut scheduled = self.driver.take_scheduled();
        let mut reset = std::mem::take(&mut self.reset_requested);

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let controls = show_controls(ctx, &mut self.controls_state);
            if controls.uv_changed {
                self.driver
                    .set_uv_intensity(self.controls_state.uv_intensity);
            }
            if controls.material_changed {
                self.driver.set_material(self.controls_state.material);
            }
            reset |= controls.wants_reset();

            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(egui::Color32::WHITE))
                .show(ctx, |ui| {
                    self.chart_view.show(
                        ui,
                        &mut self.driver,
                        std::mem::take(&mut reset),
                        scheduled.take(),
                    );
                });

            let state = self.driver.state();
            show_hud(
                ctx,
                &DecayStats {
                    elapsed_time: state.elapsed_time(),
                    current_mass: state.current_mass(),
                    uv_intensity: self.driver.uv_intensity(),
                    phase: self.driver.phase(),
                },
            );
        });

        // Handle egui platform output
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.renderer.device,
                &self.renderer.queue,
                *id,
                delta,
            );
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.renderer.size().width, self.renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.renderer.device,
            &self.renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.renderer.submit(encoder);
        self.renderer.end_frame(output);

        // Keep frames coming while the loop runs or a click tooltip is counting down
        let egui_wants_repaint = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());
        if self.chart_view.wants_frame(&self.driver) || egui_wants_repaint {
            self.window.request_redraw();
        }

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle events first
        let egui_response = self.egui_state.on_window_event(&self.window, &event);
        if egui_response.repaint {
            self.window.request_redraw();
        }
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::debug!("Resized to {}x{}", size.width, size.height);
                self.renderer.resize(size);
                self.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                    // The failed frame never reached the end of render(); keep the loop alive
                    if self.chart_view.wants_frame(&self.driver) {
                        self.window.request_redraw();
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::KeyR) => {
                            self.reset_requested = true;
                            self.window.request_redraw();
                        }
                        PhysicalKey::Code(KeyCode::Escape) => {
                            event_loop.exit();
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}
