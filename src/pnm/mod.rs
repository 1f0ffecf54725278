//! Binary PPM (P6).
//!
//! Decoding accepts any maxval up to 65535 and header comments. Encoding
//! always writes maxval 255.

mod decode;
mod encode;

use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::raster::Image;

/// Decode in-memory P6 data.
pub fn decode_ppm(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    decode_ppm_with_limits(data, &Limits::default(), stop)
}

/// Decode in-memory P6 data, rejecting headers beyond `limits`.
pub fn decode_ppm_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<Image, BitmapError> {
    let header = decode::parse_header(data)?;
    limits.check_rgb8(header.width, header.height)?;
    stop.check()?;
    decode::decode_pixels(data, &header, &stop)
}

/// Encode `image` as P6 with maxval 255.
pub fn encode_ppm(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_ppm(image, &stop)
}

/// Load a PPM file.
pub fn load(path: &Path) -> Result<Image, BitmapError> {
    let data = std::fs::read(path)?;
    let image = decode_ppm(&data, Unstoppable)?;
    log::debug!(
        "loaded {}x{} PPM from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Save `image` as a PPM file.
pub fn save(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let data = encode_ppm(image, Unstoppable)?;
    std::fs::write(path, data)?;
    log::debug!(
        "saved {}x{} PPM to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
