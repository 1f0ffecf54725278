//! In-memory RGB raster shared by every codec.

use imgref::{ImgRef, ImgVec};
use rgb::{ComponentBytes as _, RGB8};

use crate::error::BitmapError;

/// Owned 8-bit RGB image, row-major with no row padding.
///
/// The buffer always holds exactly `width * height` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    buf: Vec<RGB8>,
}

impl Image {
    /// Black.
    pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

    /// Create a `width x height` image with every pixel set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, fill: RGB8) -> Self {
        let len = width
            .checked_mul(height)
            .expect("image dimensions overflow usize");
        Self {
            width,
            height,
            buf: vec![fill; len],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Fails with [`BitmapError::InvalidHeader`] if `buf.len() != width * height`.
    pub fn from_buf(buf: Vec<RGB8>, width: usize, height: usize) -> Result<Self, BitmapError> {
        let expected = width
            .checked_mul(height)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: width as u64,
                height: height as u64,
            })?;
        if buf.len() != expected {
            return Err(BitmapError::InvalidHeader(format!(
                "buffer holds {} pixels, {width}x{height} needs {expected}",
                buf.len()
            )));
        }
        Ok(Self { width, height, buf })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the image has no pixels (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Pixels of row `y`, left to right.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    pub fn row(&self, y: usize) -> &[RGB8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y * self.width;
        &self.buf[start..start + self.width]
    }

    /// Mutable view of row `y`.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [RGB8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y * self.width;
        &mut self.buf[start..start + self.width]
    }

    pub fn pixels(&self) -> &[RGB8] {
        &self.buf
    }

    pub fn pixels_mut(&mut self) -> &mut [RGB8] {
        &mut self.buf
    }

    /// Raw bytes, `R,G,B` per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    pub fn into_buf(self) -> Vec<RGB8> {
        self.buf
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    pub fn as_imgref(&self) -> ImgRef<'_, RGB8> {
        ImgRef::new(&self.buf, self.width, self.height)
    }

    /// Convert into an [`imgref::ImgVec`] without copying.
    pub fn into_imgvec(self) -> ImgVec<RGB8> {
        ImgVec::new(self.buf, self.width, self.height)
    }
}

impl From<ImgRef<'_, RGB8>> for Image {
    /// Copies the view, dropping any stride padding.
    fn from(img: ImgRef<'_, RGB8>) -> Self {
        let width = img.width();
        let height = img.height();
        let mut buf = Vec::with_capacity(width * height);
        for row in img.rows() {
            buf.extend_from_slice(row);
        }
        Self { width, height, buf }
    }
}

impl From<ImgVec<RGB8>> for Image {
    fn from(img: ImgVec<RGB8>) -> Self {
        Image::from(img.as_ref())
    }
}
