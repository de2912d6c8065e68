use featherview_core::image_io::LoadedImage;

/// Convert a decoded RGBA image to an egui ColorImage.
pub fn image_to_color_image(image: &LoadedImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.rgba(),
    )
}
