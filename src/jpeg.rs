//! JPEG load/save through the `image` crate's baseline codec.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ::image::codecs::jpeg::JpegEncoder;
use ::image::{ExtendedColorType, ImageFormat as CodecFormat};
use rgb::RGB8;

use crate::error::BitmapError;
use crate::raster::Image;

/// Quality used by [`save`].
pub const DEFAULT_QUALITY: u8 = 90;

fn from_rgb_image(decoded: ::image::RgbImage) -> Result<Image, BitmapError> {
    let (width, height) = decoded.dimensions();
    let buf = decoded
        .as_raw()
        .chunks_exact(3)
        .map(|c| RGB8::new(c[0], c[1], c[2]))
        .collect();
    Image::from_buf(buf, width as usize, height as usize)
}

/// Decode in-memory JPEG data. Grayscale and CMYK sources are converted to RGB.
pub fn decode_jpeg(data: &[u8]) -> Result<Image, BitmapError> {
    let decoded = ::image::load_from_memory_with_format(data, CodecFormat::Jpeg)?;
    from_rgb_image(decoded.into_rgb8())
}

/// Encode `image` as baseline JPEG. `quality` is clamped to 1..=100 by the encoder.
pub fn write_jpeg<W: Write>(writer: W, image: &Image, quality: u8) -> Result<(), BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: image.width() as u64,
        height: image.height() as u64,
    };
    if image.is_empty() {
        return Err(BitmapError::UnsupportedVariant(format!(
            "cannot encode a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;
    let mut encoder = JpegEncoder::new_with_quality(writer, quality);
    encoder.encode(image.as_bytes(), width, height, ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Encode `image` to an in-memory JPEG file.
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, BitmapError> {
    let mut out = Vec::new();
    write_jpeg(&mut out, image, quality)?;
    Ok(out)
}

/// Load a JPEG file.
pub fn load(path: &Path) -> Result<Image, BitmapError> {
    let reader = BufReader::new(File::open(path)?);
    let decoded = ::image::load(reader, CodecFormat::Jpeg)?;
    let image = from_rgb_image(decoded.into_rgb8())?;
    log::debug!(
        "loaded {}x{} JPEG from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Save `image` as a JPEG file at [`DEFAULT_QUALITY`].
pub fn save(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_jpeg(&mut writer, image, DEFAULT_QUALITY)?;
    writer.flush()?;
    log::debug!(
        "saved {}x{} JPEG to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
