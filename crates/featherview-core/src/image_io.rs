use std::path::Path;

use tracing::info;

use crate::error::{Result, ViewerError};
use crate::geometry::Size;

/// Decoded image as tightly packed, unmultiplied RGBA8 rows.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl LoadedImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return Err(ViewerError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}

impl From<image::RgbaImage> for LoadedImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba: img.into_raw(),
        }
    }
}

/// Decode any format the `image` crate understands.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)?.to_rgba8();
    let loaded = LoadedImage::from(img);
    if loaded.width == 0 || loaded.height == 0 {
        return Err(ViewerError::InvalidDimensions {
            width: loaded.width,
            height: loaded.height,
        });
    }
    info!(
        path = %path.display(),
        width = loaded.width,
        height = loaded.height,
        "image decoded"
    );
    Ok(loaded)
}

/// Decode an embedded asset such as the window icon.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    Ok(LoadedImage::from(img))
}
