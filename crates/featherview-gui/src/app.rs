use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use featherview_core::config::WindowConfig;
use featherview_core::controller::ViewController;
use featherview_core::deferred::Deferred;
use featherview_core::image_io::{load_image, LoadedImage};
use tracing::{error, info};

use crate::panels;
use crate::states::{ViewportState, WindowState};

pub struct FeatherViewApp {
    pub path: PathBuf,
    /// Sole owner of the decoded image; the controller only observes it.
    pub image: Option<Rc<LoadedImage>>,
    pub controller: ViewController,
    pub viewport: ViewportState,
    pub window: WindowState,
    pub load_error: Option<String>,
    startup: Deferred<FeatherViewApp>,
    frames_presented: u64,
}

impl FeatherViewApp {
    pub fn new(path: PathBuf, config: WindowConfig, config_path: Option<PathBuf>) -> Self {
        // Decode after the first frame so the window shows up immediately.
        let load_path = path.clone();
        let startup = Deferred::post(move |app: &mut FeatherViewApp| app.open_file(load_path));

        Self {
            path,
            image: None,
            controller: ViewController::new(),
            viewport: ViewportState::default(),
            window: WindowState::new(config, config_path),
            load_error: None,
            startup,
            frames_presented: 0,
        }
    }

    fn open_file(&mut self, path: PathBuf) {
        match load_image(&path) {
            Ok(image) => {
                info!(path = %path.display(), "opened");
                let image = Rc::new(image);
                self.viewport.set_image(&image);
                self.controller.attach(&image);
                self.image = Some(image);
                self.load_error = None;
            }
            Err(e) => {
                error!(path = %path.display(), "failed to open image: {e}");
                self.image = None;
                self.viewport.clear();
                self.controller.detach();
                self.load_error = Some(format!("Cannot display {}", path.display()));
            }
        }
    }

    fn run_startup(&mut self) {
        if self.frames_presented == 0 {
            return;
        }
        if let Some(task) = self.startup.take() {
            task(self);
        }
    }
}

impl eframe::App for FeatherViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_startup();

        let now = Instant::now();
        self.controller.tick(now);

        let (info, close_requested) =
            ctx.input(|i| (i.viewport().clone(), i.viewport().close_requested()));
        if let Some(fullscreen) = self.window.observe(&info) {
            self.controller.sync_fullscreen(fullscreen);
        }

        panels::viewport::show(ctx, self);

        if close_requested {
            self.window.persist();
            self.controller.shutdown();
            return;
        }

        if let Some(deadline) = self.controller.next_wakeup() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        if self.startup.is_pending() {
            ctx.request_repaint();
        }
        self.frames_presented += 1;
    }
}
