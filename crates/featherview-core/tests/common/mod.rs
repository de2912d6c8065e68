#![allow(dead_code)]

use featherview_core::geometry::Size;
use featherview_core::image_io::LoadedImage;
use featherview_core::viewport::Viewport;

/// Viewport with a display of `display` points (1 px per point) and an
/// attached image of `image` pixels.
pub fn viewport(image: (f64, f64), display: (f64, f64)) -> Viewport {
    let mut vp = Viewport::new();
    vp.resize(Size::new(display.0, display.1), 1.0);
    vp.attach(Size::new(image.0, image.1));
    vp
}

/// Uniform mid-gray RGBA image.
pub fn solid_image(width: u32, height: u32) -> LoadedImage {
    LoadedImage::new(width, height, vec![128; width as usize * height as usize * 4])
        .expect("buffer size matches dimensions")
}

/// Deterministic pseudo-random sequence in [0, 1).
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}
