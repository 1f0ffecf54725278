//! BITMAPFILEHEADER + BITMAPINFOHEADER encode and validation.
//!
//! Both records are serialized field by field, little endian. Nothing here
//! depends on in-memory struct layout.

use super::stride;
use crate::error::BitmapError;

pub(crate) const FILE_HEADER_LEN: usize = 14;
pub(crate) const INFO_HEADER_LEN: usize = 40;
/// Total header bytes before pixel data.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const MAGIC: [u8; 2] = *b"BM";
const RESERVED: u32 = 0;
const DATA_OFFSET: u32 = HEADER_LEN as u32;
const INFO_HEADER_SIZE: u32 = INFO_HEADER_LEN as u32;
const PLANES: u16 = 1;
const BIT_COUNT: u16 = 24;
const COMPRESSION_NONE: u32 = 0;
/// 11811 pixels per metre (300 DPI).
const RESOLUTION: i32 = 11811;
const COLORS_USED: u32 = 0;
const COLORS_IMPORTANT: u32 = 0x0100_0000;

/// How strictly [`InfoHeader`] fields are checked on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Every fixed field must hold exactly the value this codec writes.
    #[default]
    Strict,

    /// Resolution, colors-used and colors-important may hold any value.
    /// Structural fields (magic, reserved, offset, header size, planes,
    /// bit depth, compression, dimensions) are still checked.
    Standard,
}

/// 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

/// 40-byte info header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive means rows are stored bottom-up.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_metre: i32,
    pub y_pixels_per_metre: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl FileHeader {
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            magic: [b[0], b[1]],
            file_size: u32::from_le_bytes([b[2], b[3], b[4], b[5]]),
            reserved: u32::from_le_bytes([b[6], b[7], b[8], b[9]]),
            data_offset: u32::from_le_bytes([b[10], b[11], b[12], b[13]]),
        }
    }

    /// The file size field is informational and is not checked.
    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.magic != MAGIC {
            return Err(BitmapError::UnrecognizedFormat);
        }
        if self.reserved != RESERVED {
            return Err(BitmapError::InvalidHeader(format!(
                "reserved field is {:#x}, expected 0",
                self.reserved
            )));
        }
        if self.data_offset != DATA_OFFSET {
            return Err(BitmapError::UnsupportedVariant(format!(
                "pixel data offset {} (palettes and extended headers are not supported)",
                self.data_offset
            )));
        }
        Ok(())
    }
}

impl InfoHeader {
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_LEN] {
        let mut out = [0u8; INFO_HEADER_LEN];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_metre.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_metre.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; INFO_HEADER_LEN]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let i32_at = |i: usize| i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let u16_at = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        Self {
            header_size: u32_at(0),
            width: i32_at(4),
            height: i32_at(8),
            planes: u16_at(12),
            bit_count: u16_at(14),
            compression: u32_at(16),
            image_size: u32_at(20),
            x_pixels_per_metre: i32_at(24),
            y_pixels_per_metre: i32_at(28),
            colors_used: u32_at(32),
            colors_important: u32_at(36),
        }
    }

    /// Check every fixed field and return `(width, height)`.
    ///
    /// The image size field is informational and is not checked.
    pub fn validate(&self, validation: Validation) -> Result<(u32, u32), BitmapError> {
        if self.header_size != INFO_HEADER_SIZE {
            return Err(BitmapError::UnsupportedVariant(format!(
                "info header size {} (only BITMAPINFOHEADER is supported)",
                self.header_size
            )));
        }
        if self.planes != PLANES {
            return Err(BitmapError::InvalidHeader(format!(
                "plane count is {}, expected 1",
                self.planes
            )));
        }
        if self.bit_count != BIT_COUNT {
            return Err(BitmapError::UnsupportedVariant(format!(
                "{} bits per pixel (only 24 is supported)",
                self.bit_count
            )));
        }
        if self.compression != COMPRESSION_NONE {
            return Err(BitmapError::UnsupportedVariant(format!(
                "compression type {}",
                self.compression
            )));
        }
        if validation == Validation::Strict {
            if self.x_pixels_per_metre != RESOLUTION || self.y_pixels_per_metre != RESOLUTION {
                return Err(BitmapError::InvalidHeader(format!(
                    "resolution {}x{} pixels/metre, expected {RESOLUTION}x{RESOLUTION}",
                    self.x_pixels_per_metre, self.y_pixels_per_metre
                )));
            }
            if self.colors_used != COLORS_USED {
                return Err(BitmapError::InvalidHeader(format!(
                    "colors used is {}, expected 0",
                    self.colors_used
                )));
            }
            if self.colors_important != COLORS_IMPORTANT {
                return Err(BitmapError::InvalidHeader(format!(
                    "colors important is {:#x}, expected {COLORS_IMPORTANT:#x}",
                    self.colors_important
                )));
            }
        }
        if self.width <= 0 {
            return Err(BitmapError::UnsupportedVariant(format!(
                "width {}",
                self.width
            )));
        }
        if self.height <= 0 {
            // Negative height is a top-down bitmap.
            return Err(BitmapError::UnsupportedVariant(format!(
                "height {} (top-down and empty bitmaps are not supported)",
                self.height
            )));
        }
        Ok((self.width as u32, self.height as u32))
    }
}

/// Build both headers for a `width x height` 24-bit image.
pub(crate) fn headers_for(width: usize, height: usize) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: width as u64,
        height: height as u64,
    };
    let w = i32::try_from(width).map_err(|_| too_large())?;
    let h = i32::try_from(height).map_err(|_| too_large())?;
    let image_size = stride(w as u32)
        .checked_mul(h as u64)
        .and_then(|s| u32::try_from(s).ok())
        .ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(HEADER_LEN as u32)
        .ok_or_else(too_large)?;

    let file = FileHeader {
        magic: MAGIC,
        file_size,
        reserved: RESERVED,
        data_offset: DATA_OFFSET,
    };
    let info = InfoHeader {
        header_size: INFO_HEADER_SIZE,
        width: w,
        height: h,
        planes: PLANES,
        bit_count: BIT_COUNT,
        compression: COMPRESSION_NONE,
        image_size,
        x_pixels_per_metre: RESOLUTION,
        y_pixels_per_metre: RESOLUTION,
        colors_used: COLORS_USED,
        colors_important: COLORS_IMPORTANT,
    };
    Ok((file, info))
}
