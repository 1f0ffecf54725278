//! BMP decoder: validated headers, then bottom-up BGR rows.

use std::io::Read;

use enough::Stop;
use rgb::RGB8;

use super::header::{FILE_HEADER_LEN, FileHeader, HEADER_LEN, INFO_HEADER_LEN, InfoHeader, Validation};
use super::stride;
use crate::error::{BitmapError, read_error};
use crate::limits::Limits;
use crate::raster::Image;

/// Read and validate both headers, returning `(width, height)`.
pub(crate) fn read_headers<R: Read>(
    reader: &mut R,
    validation: Validation,
) -> Result<(u32, u32), BitmapError> {
    let mut file_bytes = [0u8; FILE_HEADER_LEN];
    reader.read_exact(&mut file_bytes).map_err(read_error)?;
    let file = FileHeader::from_bytes(&file_bytes);
    file.validate()?;

    let mut info_bytes = [0u8; INFO_HEADER_LEN];
    reader.read_exact(&mut info_bytes).map_err(read_error)?;
    let info = InfoHeader::from_bytes(&info_bytes);
    log::trace!("BMP headers: {file:?} {info:?}");
    info.validate(validation)
}

/// Decode a complete BMP stream.
///
/// `available` is the total stream length when known. A stream shorter
/// than its headers claim fails before the pixel buffer is allocated.
pub(crate) fn decode_stream<R: Read>(
    reader: &mut R,
    available: Option<u64>,
    limits: &Limits,
    validation: Validation,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let (width, height) = read_headers(reader, validation)?;
    limits.check_rgb8(width, height)?;

    let needed = stride(width)
        .saturating_mul(u64::from(height))
        .saturating_add(HEADER_LEN as u64);
    if available.is_some_and(|len| len < needed) {
        return Err(BitmapError::UnexpectedEof);
    }

    stop.check()?;
    read_pixels(reader, width, height, available.is_some(), stop)
}

/// Pixels reserved up front when the stream length is unknown.
const PREALLOC_PIXELS: usize = 1 << 16;

/// Pixels converted per `read_exact` call.
const CHUNK_PIXELS: usize = 4096;

/// Read `height` rows of `stride(width)` bytes each, last image row first.
///
/// The pixel buffer grows with the data actually read, so a stream whose
/// header overstates its dimensions fails on the short read instead of on
/// the allocation. `length_checked` reserves the full buffer up front.
fn read_pixels<R: Read>(
    reader: &mut R,
    width: u32,
    height: u32,
    length_checked: bool,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(width),
        height: u64::from(height),
    };
    let w = width as usize;
    let h = height as usize;
    let pixels = w
        .checked_mul(h)
        .filter(|n| n.checked_mul(3).is_some_and(|bytes| bytes <= isize::MAX as usize))
        .ok_or_else(too_large)?;
    let pad = (stride(width) - u64::from(width) * 3) as usize;

    let mut buf: Vec<RGB8> = Vec::new();
    let reserve = if length_checked {
        pixels
    } else {
        pixels.min(PREALLOC_PIXELS)
    };
    buf.try_reserve_exact(reserve).map_err(|_| too_large())?;

    let mut scratch = [0u8; CHUNK_PIXELS * 3];
    let mut padding = [0u8; 3];
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let mut remaining = w;
        while remaining > 0 {
            let n = remaining.min(CHUNK_PIXELS);
            let chunk = &mut scratch[..n * 3];
            reader.read_exact(chunk).map_err(read_error)?;
            buf.extend(
                chunk
                    .chunks_exact(3)
                    .map(|bgr| RGB8::new(bgr[2], bgr[1], bgr[0])),
            );
            remaining -= n;
        }
        // Zero-length when the row is already 4-byte aligned.
        reader.read_exact(&mut padding[..pad]).map_err(read_error)?;
    }

    flip_rows(&mut buf, w);
    Image::from_buf(buf, w, h)
}

/// Reverse row order in place. `width` must be non-zero.
fn flip_rows(buf: &mut [RGB8], width: usize) {
    let mut rows = buf.chunks_exact_mut(width);
    while let (Some(top), Some(bottom)) = (rows.next(), rows.next_back()) {
        top.swap_with_slice(bottom);
    }
}
