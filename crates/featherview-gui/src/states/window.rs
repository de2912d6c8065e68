use std::path::PathBuf;

use featherview_core::config::WindowConfig;
use tracing::warn;

/// Native window geometry, tracked for persistence at close.
pub struct WindowState {
    config: WindowConfig,
    config_path: Option<PathBuf>,
    /// Last inner size seen while neither maximized nor fullscreen.
    windowed_size: Option<[u32; 2]>,
    maximized: bool,
    fullscreen: Option<bool>,
    saved: bool,
}

impl WindowState {
    pub fn new(config: WindowConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            maximized: config.maximized,
            config,
            config_path,
            windowed_size: None,
            fullscreen: None,
            saved: false,
        }
    }

    /// Record the current viewport info. Returns the fullscreen flag when it
    /// changed since the previous frame.
    pub fn observe(&mut self, info: &egui::ViewportInfo) -> Option<bool> {
        if let Some(maximized) = info.maximized {
            self.maximized = maximized;
        }
        let fullscreen = info.fullscreen.unwrap_or(false);
        if !self.maximized && !fullscreen {
            if let Some(rect) = info.inner_rect {
                let size = rect.size();
                self.windowed_size = Some([size.x.round() as u32, size.y.round() as u32]);
            }
        }
        let changed = info.fullscreen.is_some() && self.fullscreen != info.fullscreen;
        self.fullscreen = info.fullscreen;
        changed.then_some(fullscreen)
    }

    /// Write size and maximized flag to the config file, once.
    pub fn persist(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        if let Some(size) = self.windowed_size {
            self.config.size = Some(size);
        }
        self.config.maximized = self.maximized;
        if let Err(e) = self.config.save(path) {
            warn!("could not save window geometry: {e}");
        }
    }
}
