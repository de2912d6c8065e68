mod app;
mod convert;
mod panels;
mod states;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use featherview_core::config::{config_path, WindowConfig};
use featherview_core::consts::MIN_WINDOW_SIZE;
use featherview_core::image_io::decode_image;
use tracing::warn;
use tracing_subscriber::EnvFilter;

static ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

#[derive(Parser)]
#[command(name = "featherview", about = "Minimal single-image viewer")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Image file to open
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(path) = cli.file else {
        println!("No file to open");
        return Ok(());
    };
    if !path.is_file() {
        println!("Cannot open file");
        return Ok(());
    }

    let config_path = match config_path() {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("window geometry will not be persisted: {e}");
            None
        }
    };
    let config = config_path
        .as_deref()
        .map(WindowConfig::load)
        .unwrap_or_default();

    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let [width, height] = config.initial_size();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_min_inner_size([MIN_WINDOW_SIZE[0] as f32, MIN_WINDOW_SIZE[1] as f32])
        .with_maximized(config.maximized)
        .with_title(title);
    if let Some(icon) = load_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "FeatherView",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(app::FeatherViewApp::new(
                path,
                config,
                config_path,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}

fn load_icon() -> Option<egui::IconData> {
    match decode_image(ICON_PNG) {
        Ok(icon) => {
            let (width, height) = (icon.width(), icon.height());
            Some(egui::IconData {
                rgba: icon.into_rgba(),
                width,
                height,
            })
        }
        Err(e) => {
            warn!("bundled icon could not be decoded: {e}");
            None
        }
    }
}
