use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
