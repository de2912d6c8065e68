use featherview_core::image_io::LoadedImage;

use crate::convert::image_to_color_image;

/// GPU textures for the displayed image.
///
/// egui binds the sampling filter to the texture, so the nearest and linear
/// variants are uploaded lazily the first time each one is needed.
#[derive(Default)]
pub struct ViewportState {
    source: Option<egui::ColorImage>,
    nearest: Option<egui::TextureHandle>,
    linear: Option<egui::TextureHandle>,
}

impl ViewportState {
    pub fn set_image(&mut self, image: &LoadedImage) {
        self.source = Some(image_to_color_image(image));
        self.nearest = None;
        self.linear = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn texture(&mut self, ctx: &egui::Context, smooth: bool) -> Option<&egui::TextureHandle> {
        let (slot, options, name) = if smooth {
            (&mut self.linear, egui::TextureOptions::LINEAR, "viewport-linear")
        } else {
            (&mut self.nearest, egui::TextureOptions::NEAREST, "viewport-nearest")
        };
        if slot.is_none() {
            let source = self.source.as_ref()?;
            *slot = Some(ctx.load_texture(name, source.clone(), options));
        }
        slot.as_ref()
    }
}
