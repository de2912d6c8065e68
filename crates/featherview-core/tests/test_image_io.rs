use featherview_core::error::ViewerError;
use featherview_core::image_io::{decode_image, load_image, LoadedImage};

fn gradient(width: u32, height: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 10) as u8, (y * 10) as u8, 200, 255])
    })
}

#[test]
fn test_load_png_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");
    gradient(6, 4).save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.width(), 6);
    assert_eq!(loaded.height(), 4);
    assert_eq!(loaded.size().width, 6.0);
    assert_eq!(loaded.rgba().len(), 6 * 4 * 4);
    // Pixel (3, 2)
    let i = (2 * 6 + 3) * 4;
    assert_eq!(&loaded.rgba()[i..i + 4], &[30, 20, 200, 255]);
}

#[test]
fn test_load_grayscale_expands_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    image::GrayImage::from_pixel(3, 3, image::Luma([77])).save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(&loaded.rgba()[0..4], &[77, 77, 77, 255]);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("missing.png")).is_err());
}

#[test]
fn test_load_garbage_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(load_image(&path).is_err());
}

#[test]
fn test_decode_from_memory() {
    let mut bytes = Vec::new();
    gradient(2, 2)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2, 2));
    assert_eq!(decoded.into_rgba().len(), 16);
}

#[test]
fn test_new_rejects_bad_buffers() {
    assert!(matches!(
        LoadedImage::new(0, 4, Vec::new()),
        Err(ViewerError::InvalidDimensions { width: 0, height: 4 })
    ));
    assert!(LoadedImage::new(2, 2, vec![0; 15]).is_err());
    assert!(LoadedImage::new(2, 2, vec![0; 16]).is_ok());
}
