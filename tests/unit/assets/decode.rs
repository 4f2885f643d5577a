use super::*;

fn encode_png(pixels: &[u8], w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, pixels.to_vec()).unwrap();
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_premultiplies_pixels() {
    let png = encode_png(&[255, 0, 0, 128, 0, 255, 0, 255], 2, 1);
    let img = decode_image(&png).unwrap();
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(&img.rgba8_premul[..4], &[128, 0, 0, 128]);
    assert_eq!(&img.rgba8_premul[4..], &[0, 255, 0, 255]);
}

#[test]
fn garbage_bytes_fail() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn missing_file_reports_path() {
    let err = load_image(Path::new("/nonexistent/bg.png")).unwrap_err();
    assert!(format!("{err:#}").contains("bg.png"));
}
