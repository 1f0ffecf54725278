//! BMP encoder: uncompressed 24-bit BMP.

use std::io::Write;

use enough::Stop;

use super::header::headers_for;
use super::stride;
use crate::error::BitmapError;
use crate::raster::Image;

/// Write headers then rows bottom-up, each padded to `stride(width)` with zeros.
pub(crate) fn encode_stream<W: Write>(
    writer: &mut W,
    image: &Image,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    if image.is_empty() {
        return Err(BitmapError::UnsupportedVariant(format!(
            "cannot encode a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    let (file, info) = headers_for(image.width(), image.height())?;
    writer.write_all(&file.to_bytes())?;
    writer.write_all(&info.to_bytes())?;

    stop.check()?;

    // headers_for bounds the width to i32, so the stride fits usize
    let row_stride = stride(info.width as u32) as usize;
    let mut scratch = vec![0u8; row_stride];
    for y in (0..image.height()).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (bgr, px) in scratch.chunks_exact_mut(3).zip(image.row(y)) {
            bgr[0] = px.b;
            bgr[1] = px.g;
            bgr[2] = px.r;
        }
        writer.write_all(&scratch)?;
    }
    writer.flush()?;
    Ok(())
}
