//! 24-bit uncompressed BMP codec.
//!
//! On disk: a 14-byte file header, a 40-byte `BITMAPINFOHEADER`, then rows
//! stored bottom-up as `B,G,R` triples, each row padded to a multiple of
//! four bytes (see [`stride`]). Palettes, compression, other bit depths and
//! top-down bitmaps are rejected.

mod decode;
mod encode;
mod header;

pub use header::{FileHeader, HEADER_LEN, InfoHeader, Validation};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::raster::Image;

/// Padded on-disk byte length of one row of `width` pixels.
///
/// The smallest multiple of 4 that is at least `width * 3`.
pub const fn stride(width: u32) -> u64 {
    (width as u64 * 3 + 3) & !3
}

/// Configurable BMP decoder.
///
/// ```no_run
/// use imgconv::bmp::{BmpDecoder, Validation};
/// use imgconv::Limits;
///
/// let image = BmpDecoder::new()
///     .with_validation(Validation::Standard)
///     .with_limits(Limits { max_pixels: Some(1 << 24), ..Default::default() })
///     .load("photo.bmp")?;
/// # Ok::<(), imgconv::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct BmpDecoder {
    limits: Limits,
    validation: Validation,
}

impl BmpDecoder {
    /// Strict validation, no limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Decode from any reader, checking `stop` between rows.
    ///
    /// The stream length is unknown here, so only [`Limits`] bound the
    /// allocation made from header dimensions.
    pub fn read<R: Read>(&self, mut reader: R, stop: impl Stop) -> Result<Image, BitmapError> {
        decode::decode_stream(&mut reader, None, &self.limits, self.validation, &stop)
    }

    /// Decode an in-memory BMP file.
    pub fn decode(&self, data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
        let mut reader = data;
        decode::decode_stream(
            &mut reader,
            Some(data.len() as u64),
            &self.limits,
            self.validation,
            &stop,
        )
    }

    /// Open and decode a BMP file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Image, BitmapError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let mut reader = BufReader::new(file);
        let image = decode::decode_stream(
            &mut reader,
            Some(len),
            &self.limits,
            self.validation,
            &Unstoppable,
        )?;
        log::debug!(
            "loaded {}x{} BMP from {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(image)
    }
}

/// Decode a BMP stream with strict validation and no limits.
pub fn read_bmp<R: Read>(reader: R, stop: impl Stop) -> Result<Image, BitmapError> {
    BmpDecoder::new().read(reader, stop)
}

/// Encode `image` to a writer. The writer is flushed before returning.
pub fn write_bmp<W: Write>(mut writer: W, image: &Image, stop: impl Stop) -> Result<(), BitmapError> {
    encode::encode_stream(&mut writer, image, &stop)
}

/// Decode in-memory BMP data with strict validation and no limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    BmpDecoder::new().decode(data, stop)
}

/// Encode `image` to an in-memory BMP file.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    let capacity = stride(image.width().min(u32::MAX as usize) as u32)
        .saturating_mul(image.height() as u64)
        .saturating_add(HEADER_LEN as u64);
    let mut out = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
    encode::encode_stream(&mut out, image, &stop)?;
    Ok(out)
}

/// Load a BMP file.
pub fn load(path: &Path) -> Result<Image, BitmapError> {
    BmpDecoder::new().load(path)
}

/// Save `image` as a BMP file.
///
/// A failed save may leave a partially written file behind.
pub fn save(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let file = File::create(path)?;
    write_bmp(BufWriter::new(file), image, Unstoppable)?;
    log::debug!(
        "saved {}x{} BMP to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_known_values() {
        assert_eq!(stride(0), 0);
        assert_eq!(stride(1), 4);
        assert_eq!(stride(2), 8);
        assert_eq!(stride(3), 12);
        assert_eq!(stride(4), 12);
        assert_eq!(stride(5), 16);
        assert_eq!(stride(u32::MAX), 12_884_901_888);
    }

    #[test]
    fn stride_is_aligned_and_minimal() {
        let widths = (0..10_000u32).chain([u32::MAX - 3, u32::MAX - 2, u32::MAX - 1, u32::MAX]);
        for w in widths {
            let s = stride(w);
            let raw = u64::from(w) * 3;
            assert_eq!(s % 4, 0, "w={w}");
            assert!(s >= raw, "w={w}");
            assert!(s < raw + 4, "w={w}");
        }
    }

    #[test]
    fn decoder_standard_accepts_72_dpi() {
        let image = Image::new(3, 3, rgb::RGB8::new(1, 2, 3));
        let mut data = encode_bmp(&image, Unstoppable).unwrap();
        data[38..42].copy_from_slice(&2835i32.to_le_bytes());
        data[42..46].copy_from_slice(&2835i32.to_le_bytes());
        data[50..54].copy_from_slice(&0u32.to_le_bytes());

        assert!(decode_bmp(&data, Unstoppable).is_err());
        let decoded = BmpDecoder::new()
            .with_validation(Validation::Standard)
            .decode(&data, Unstoppable)
            .unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn reader_path_matches_slice_path() {
        let mut image = Image::new(5, 3, Image::BLACK);
        for (i, px) in image.pixels_mut().iter_mut().enumerate() {
            *px = rgb::RGB8::new(i as u8, (i * 7) as u8, (i * 13) as u8);
        }
        let data = encode_bmp(&image, Unstoppable).unwrap();
        let from_reader = read_bmp(std::io::Cursor::new(&data), Unstoppable).unwrap();
        assert_eq!(from_reader, image);
    }
}
