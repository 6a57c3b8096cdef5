use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use forward_engine::input::platform::TouchTranslator;
use forward_engine::input::{TapQueue, TapRouter};
use forward_engine::logging::{init_logging, LoggingConfig};

const TAG: &str = "forward_studio";

/// Demo window configuration.
#[derive(Debug, Clone)]
struct StudioConfig {
    title: String,
    initial_size: LogicalSize<f64>,
    /// Sleep between render-loop iterations.
    frame_interval: Duration,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "forward studio".to_string(),
            initial_size: LogicalSize::new(720.0, 1280.0),
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// Event-loop side: owns the window and routes touches into the tap queue.
struct Studio {
    config: StudioConfig,
    window: Option<Window>,
    translator: TouchTranslator,
    router: TapRouter,
}

impl Studio {
    fn new(config: StudioConfig, router: TapRouter) -> Self {
        Self {
            config,
            window: None,
            translator: TouchTranslator::new(),
            router,
        }
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                log::error!(target: TAG, "failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.as_ref() else {
            return;
        };

        if let Some(touch) = self.translator.translate(window, &event) {
            let consumed = self.router.route_touch_event(&touch);
            log::trace!(
                target: TAG,
                "{} #{} at ({:.1}, {:.1}) consumed={consumed}",
                touch.phase,
                touch.pointer_id,
                touch.x,
                touch.y
            );
        }
    }
}

/// Render-thread side: drains taps once per iteration.
fn render_loop(queue: Arc<TapQueue>, stop: Arc<AtomicBool>, frame_interval: Duration) {
    let mut frame: u64 = 0;
    while !stop.load(Ordering::Acquire) {
        while let Some(tap) = queue.poll() {
            log::info!(
                target: TAG,
                "frame {frame}: tap at ({:.1}, {:.1})",
                tap.x,
                tap.y
            );
        }
        frame = frame.wrapping_add(1);
        thread::sleep(frame_interval);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::default();
    let router = TapRouter::new();
    let queue = router.queue();
    let stop = Arc::new(AtomicBool::new(false));

    let render = {
        let stop = Arc::clone(&stop);
        let interval = config.frame_interval;
        thread::Builder::new()
            .name("render".to_string())
            .spawn(move || render_loop(queue, stop, interval))
            .context("failed to spawn render thread")?
    };

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut studio = Studio::new(config, router);
    let run = event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error");

    stop.store(true, Ordering::Release);
    render
        .join()
        .map_err(|_| anyhow!("render thread panicked"))?;

    run
}
