//! # imgconv
//!
//! Raster image conversion between BMP, PPM and JPEG.
//!
//! Every format exposes the same pair of functions, `load(path)` and
//! `save(path, &image)`, over one in-memory [`Image`] (8-bit RGB, row-major).
//! [`ImageFormat`] picks the pair by file extension.
//!
//! ## Formats
//!
//! - **BMP** ([`bmp`]): uncompressed 24-bit `BITMAPINFOHEADER` bitmaps,
//!   decoded and encoded in-crate. Headers are validated strictly by default.
//! - **PPM** ([`pnm`]): binary P6, any maxval on decode, maxval 255 on encode.
//! - **JPEG** ([`jpeg`], `jpeg` feature): baseline JPEG via the `image` crate.
//!
//! ## Non-Goals
//!
//! - Palettized, RLE, bitfield, 16/32-bit or top-down BMP
//! - ASCII PNM, PGM, PAM, PFM
//! - Alpha channels
//!
//! ## Usage
//!
//! ```no_run
//! use imgconv::{Image, ImageFormat, Unstoppable};
//! use imgconv::rgb::RGB8;
//!
//! // Whole-file conversion, codecs chosen by extension
//! imgconv::convert("in.jpg", "out.bmp")?;
//!
//! // In-memory BMP
//! let mut image = Image::new(4, 3, Image::BLACK);
//! image.row_mut(0)[0] = RGB8::new(255, 0, 0);
//! let bytes = imgconv::bmp::encode_bmp(&image, Unstoppable)?;
//! let decoded = imgconv::bmp::decode_bmp(&bytes, Unstoppable)?;
//! assert_eq!(decoded, image);
//!
//! // Explicit format
//! ImageFormat::Ppm.save("out.ppm".as_ref(), &decoded)?;
//! # Ok::<(), imgconv::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod format;
mod limits;
mod raster;

pub mod bmp;
pub mod pnm;

#[cfg(feature = "jpeg")]
pub mod jpeg;

// Re-exports
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use format::{Codec, ImageFormat, convert, load, save};
pub use limits::Limits;
pub use raster::Image;
pub use {imgref, rgb};
