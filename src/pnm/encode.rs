//! PPM encoder: binary P6, maxval 255.

use enough::Stop;

use crate::error::BitmapError;
use crate::raster::Image;

/// Encode `image` as binary PPM.
pub(crate) fn encode_ppm(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let w = image.width();
    let h = image.height();
    if image.is_empty() {
        return Err(BitmapError::UnsupportedVariant(format!(
            "cannot encode a {w}x{h} image"
        )));
    }
    let pixel_bytes = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(3))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: w as u64,
            height: h as u64,
        })?;

    stop.check()?;

    let header = format!("P6\n{w} {h}\n255\n");
    let mut out = Vec::with_capacity(header.len() + pixel_bytes);
    out.extend_from_slice(header.as_bytes());

    // Memory order is already R,G,B.
    for (y, row) in image.as_bytes().chunks_exact(w * 3).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
    }

    Ok(out)
}
