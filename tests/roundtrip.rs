mod common;

use common::{checkerboard, noise_pattern, temp_path};
use imgconv::rgb::RGB8;
use imgconv::*;

#[test]
fn bmp_file_roundtrip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = noise_pattern(13, 7, 0xDEAD_BEEF);
    let path = temp_path("noise.bmp");

    save(&path, &image).unwrap();
    let on_disk = std::fs::metadata(&path).unwrap().len();
    assert_eq!(on_disk, 54 + bmp::stride(13) * 7);

    let loaded = load(&path).unwrap();
    assert_eq!(loaded.width(), 13);
    assert_eq!(loaded.height(), 7);
    assert_eq!(loaded, image);
}

#[test]
fn ppm_file_roundtrip() {
    let image = checkerboard(9, 4);
    let path = temp_path("checker.ppm");
    save(&path, &image).unwrap();
    assert_eq!(load(&path).unwrap(), image);
}

#[test]
fn ppm_to_bmp_is_lossless() {
    let image = noise_pattern(6, 5, 42);
    let ppm = temp_path("src.ppm");
    let bmp_path = temp_path("dst.bmp");
    ImageFormat::Ppm.save(&ppm, &image).unwrap();

    convert(&ppm, &bmp_path).unwrap();
    assert_eq!(bmp::load(&bmp_path).unwrap(), image);
}

#[test]
fn bmp_to_ppm_bytes() {
    let mut image = Image::new(2, 1, Image::BLACK);
    image.row_mut(0)[0] = RGB8::new(255, 0, 0);
    let src = temp_path("red.bmp");
    let dst = temp_path("red.ppm");
    bmp::save(&src, &image).unwrap();

    convert(&src, &dst).unwrap();
    let bytes = std::fs::read(&dst).unwrap();
    assert_eq!(bytes, b"P6\n2 1\n255\n\xff\x00\x00\x00\x00\x00");
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_file_roundtrip_is_close() {
    let color = RGB8::new(30, 160, 220);
    let image = Image::new(24, 16, color);
    let jpg = temp_path("flat.jpg");
    let bmp_path = temp_path("flat.bmp");
    save(&jpg, &image).unwrap();

    convert(&jpg, &bmp_path).unwrap();
    let loaded = load(&bmp_path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (24, 16));
    for px in loaded.pixels() {
        assert!(px.r.abs_diff(color.r) <= 8);
        assert!(px.g.abs_diff(color.g) <= 8);
        assert!(px.b.abs_diff(color.b) <= 8);
    }
}

#[test]
fn missing_file_is_io_error() {
    let path = temp_path("does-not-exist.bmp");
    assert!(matches!(load(&path), Err(BitmapError::Io(_))));
}

#[test]
fn wrong_content_for_extension() {
    // PPM bytes behind a .bmp extension
    let path = temp_path("lying.bmp");
    std::fs::write(&path, b"P6\n1 1\n255\n\x01\x02\x03").unwrap();
    assert!(matches!(load(&path), Err(BitmapError::UnrecognizedFormat)));
}

#[test]
fn truncated_file_fails_to_load() {
    let image = checkerboard(5, 5);
    let bytes = bmp::encode_bmp(&image, Unstoppable).unwrap();
    let path = temp_path("cut.bmp");
    std::fs::write(&path, &bytes[..bytes.len() - 2]).unwrap();
    assert!(matches!(load(&path), Err(BitmapError::UnexpectedEof)));
}

#[test]
fn save_to_missing_directory_fails() {
    let path = temp_path("no-such-dir").join("out.bmp");
    let err = save(&path, &checkerboard(2, 2)).unwrap_err();
    assert!(matches!(err, BitmapError::Io(_)));
}

#[test]
fn codec_table_covers_every_format() {
    let image = checkerboard(3, 3);
    for format in [ImageFormat::Bmp, ImageFormat::Ppm] {
        let path = temp_path(&format!("table.{}", format.extension()));
        (format.codec().save)(&path, &image).unwrap();
        assert_eq!((format.codec().load)(&path).unwrap(), image);
    }
}

#[test]
fn imgref_interop() {
    let image = noise_pattern(4, 4, 7);
    let view = image.as_imgref();
    assert_eq!(view.width(), 4);
    let sub = view.sub_image(1, 1, 2, 2);
    let cropped = Image::from(sub);
    assert_eq!(cropped.row(0), &image.row(1)[1..3]);
    assert_eq!(cropped.row(1), &image.row(2)[1..3]);

    let encoded = bmp::encode_bmp(&cropped, Unstoppable).unwrap();
    assert_eq!(bmp::decode_bmp(&encoded, Unstoppable).unwrap(), cropped);
}

#[test]
fn ppm_decode_limits() {
    let encoded = pnm::encode_ppm(&checkerboard(4, 4), Unstoppable).unwrap();
    let limits = Limits {
        max_pixels: Some(15),
        ..Default::default()
    };
    assert!(matches!(
        pnm::decode_ppm_with_limits(&encoded, &limits, Unstoppable),
        Err(BitmapError::LimitExceeded(_))
    ));
    assert!(pnm::decode_ppm(&encoded, Unstoppable).is_ok());
}
