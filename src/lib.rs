// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod widget;

pub use animation::{AnimationGroup, AnimationState, Easing, GroupStatus, SweepAnimation};
pub use canvas::{Canvas, Color};
pub use config::{AttributeNames, AttributeSource, AttributeValue, Attributes, GraphConfig};
pub use error::AttributeError;
pub use widget::{
    AngleKind, ArcSpec, Circle, DrawCommand, GraphCommand, GraphWidget, Rect, Scene,
    StrokeWidthPolicy,
};

// External crate imports
use log::{debug, error};
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Log target for everything the widget reports.
pub const LOG_TARGET: &str = "circle_graph";

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// A window showing one [`GraphWidget`].
#[derive(Debug)]
pub struct CircleGraph {
    config: GraphConfig,
    widget: GraphWidget,
}

impl CircleGraph {
    /// Builds the widget from `attributes`; its sweep animation starts with the first frame.
    pub fn new(config: GraphConfig, attributes: &(impl AttributeSource + ?Sized)) -> Self {
        let widget = GraphWidget::with_config(attributes, &config);
        Self { config, widget }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn widget(&self) -> &GraphWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut GraphWidget {
        &mut self.widget
    }

    pub fn show(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    /// Like [`show`](Self::show), also applying commands sent from other threads.
    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<GraphCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        &mut self,
        receiver: Option<Receiver<GraphCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let config = &self.config;
        let widget = &mut self.widget;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(config.resizable)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let (mut fb_width, mut fb_height) = widget.measure(size.width, size.height);
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(fb_width, fb_height, surface_texture)?;
        widget.on_area_changed(fb_width, fb_height);

        let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    let (width, height) = widget.measure(new_size.width, new_size.height);
                    if let Err(err) = pixels.resize_buffer(width, height) {
                        error!(target: LOG_TARGET, "resize_buffer failed: {err}");
                        return;
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        error!(target: LOG_TARGET, "resize_surface failed: {err}");
                        return;
                    }
                    (fb_width, fb_height) = (width, height);
                    widget.on_area_changed(width, height);
                }
                WindowEvent::RedrawRequested => {
                    if let Some(ref receiver) = receiver {
                        while let Ok(command) = receiver.try_recv() {
                            debug!(target: LOG_TARGET, "command {command:?}");
                            widget.apply(command);
                        }
                    }
                    widget.advance(Instant::now());
                    widget.take_redraw_request();

                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width as usize, fb_height as usize);
                    render_frame(&mut canvas, widget, config);
                    if let Err(err) = pixels.render() {
                        error!(target: LOG_TARGET, "render failed: {err}");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Commands can arrive at any time, so keep polling while a receiver is attached.
                let wants_frame =
                    widget.is_animating() || widget.has_pending_redraw() || receiver.is_some();
                if !wants_frame {
                    window_target.set_control_flow(ControlFlow::Wait);
                    return;
                }
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
                window_target.set_control_flow(ControlFlow::WaitUntil(last_frame + frame_duration));
            }
            _ => {}
        })?;

        Ok(())
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Clears to the background color and paints the widget on top.
pub fn render_frame(canvas: &mut Canvas, widget: &GraphWidget, config: &GraphConfig) {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color));
    widget.paint_into(&mut scene);
    scene.render(canvas);
}
