//! PPM decoder: binary P6, maxval 1..=65535.
//!
//! Samples with maxval other than 255 are rescaled to 8 bits.

use enough::Stop;
use rgb::RGB8;

use crate::error::BitmapError;
use crate::raster::Image;

/// Parsed P6 header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PpmHeader {
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    /// Byte offset of the first sample.
    pub data_offset: usize,
}

impl PpmHeader {
    fn bytes_per_sample(&self) -> usize {
        if self.maxval > 255 { 2 } else { 1 }
    }
}

struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderCursor<'_> {
    /// Skip whitespace and `#` comments running to end of line.
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, field: &str) -> Result<u32, BitmapError> {
        self.skip_separators();
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(&b) = self.data.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| BitmapError::InvalidHeader(format!("{field} overflows")))?;
            self.pos += 1;
        }
        if self.pos == start {
            return if self.pos >= self.data.len() {
                Err(BitmapError::UnexpectedEof)
            } else {
                Err(BitmapError::InvalidHeader(format!("expected {field}")))
            };
        }
        Ok(value)
    }
}

/// Parse the P6 header.
pub(crate) fn parse_header(data: &[u8]) -> Result<PpmHeader, BitmapError> {
    if data.len() < 2 {
        return Err(BitmapError::UnexpectedEof);
    }
    if &data[..2] != b"P6" {
        return Err(BitmapError::UnrecognizedFormat);
    }
    let mut cursor = HeaderCursor { data, pos: 2 };
    match data.get(2) {
        Some(b) if b.is_ascii_whitespace() || *b == b'#' => {}
        Some(_) => return Err(BitmapError::UnrecognizedFormat),
        None => return Err(BitmapError::UnexpectedEof),
    }

    let width = cursor.read_number("width")?;
    let height = cursor.read_number("height")?;
    let maxval = cursor.read_number("maxval")?;

    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "PPM dimensions {width}x{height}"
        )));
    }
    if maxval == 0 || maxval > 65535 {
        return Err(BitmapError::InvalidHeader(format!("PPM maxval {maxval}")));
    }

    // Exactly one whitespace byte separates maxval from the samples.
    match data.get(cursor.pos) {
        Some(b) if b.is_ascii_whitespace() => {}
        Some(_) => {
            return Err(BitmapError::InvalidHeader(
                "missing whitespace after maxval".into(),
            ));
        }
        None => return Err(BitmapError::UnexpectedEof),
    }

    Ok(PpmHeader {
        width,
        height,
        maxval,
        data_offset: cursor.pos + 1,
    })
}

/// Decode the samples following `header`.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &PpmHeader,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(header.width),
        height: u64::from(header.height),
    };
    let w = header.width as usize;
    let h = header.height as usize;
    let bps = header.bytes_per_sample();
    let row_bytes = w
        .checked_mul(3)
        .and_then(|n| n.checked_mul(bps))
        .ok_or_else(too_large)?;
    let expected = row_bytes.checked_mul(h).ok_or_else(too_large)?;

    let samples = data
        .get(header.data_offset..)
        .and_then(|rest| rest.get(..expected))
        .ok_or(BitmapError::UnexpectedEof)?;

    let maxval = header.maxval;
    let scale = |v: u32| -> u8 {
        if maxval == 255 {
            v.min(255) as u8
        } else {
            ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
        }
    };

    let mut image = Image::new(w, h, Image::BLACK);
    for (y, src) in samples.chunks_exact(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = image.row_mut(y);
        if bps == 1 {
            for (px, rgb) in row.iter_mut().zip(src.chunks_exact(3)) {
                *px = RGB8::new(
                    scale(u32::from(rgb[0])),
                    scale(u32::from(rgb[1])),
                    scale(u32::from(rgb[2])),
                );
            }
        } else {
            let be = |s: &[u8]| u32::from(u16::from_be_bytes([s[0], s[1]]));
            for (px, rgb) in row.iter_mut().zip(src.chunks_exact(6)) {
                *px = RGB8::new(
                    scale(be(&rgb[0..2])),
                    scale(be(&rgb[2..4])),
                    scale(be(&rgb[4..6])),
                );
            }
        }
    }

    Ok(image)
}
