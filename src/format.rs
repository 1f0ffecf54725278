//! Extension-based format dispatch.

use std::path::Path;

use crate::error::BitmapError;
use crate::raster::Image;

/// Image file format, chosen by file extension.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// 24-bit uncompressed Windows bitmap.
    Bmp,
    /// Binary portable pixmap (P6).
    Ppm,
    /// Baseline JPEG.
    Jpeg,
}

/// The `load`/`save` pair every format provides.
#[derive(Clone, Copy)]
pub struct Codec {
    pub load: fn(&Path) -> Result<Image, BitmapError>,
    pub save: fn(&Path, &Image) -> Result<(), BitmapError>,
}

impl core::fmt::Debug for Codec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

static BMP: Codec = Codec {
    load: crate::bmp::load,
    save: crate::bmp::save,
};

static PPM: Codec = Codec {
    load: crate::pnm::load,
    save: crate::pnm::save,
};

#[cfg(feature = "jpeg")]
static JPEG: Codec = Codec {
    load: crate::jpeg::load,
    save: crate::jpeg::save,
};

#[cfg(not(feature = "jpeg"))]
static JPEG: Codec = Codec {
    load: |_| Err(jpeg_disabled()),
    save: |_, _| Err(jpeg_disabled()),
};

#[cfg(not(feature = "jpeg"))]
fn jpeg_disabled() -> BitmapError {
    BitmapError::UnsupportedVariant("JPEG support requires the `jpeg` feature".into())
}

impl ImageFormat {
    /// All formats, in dispatch-table order.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Bmp, ImageFormat::Ppm, ImageFormat::Jpeg];

    /// Format for an extension without the dot, ASCII case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("bmp") {
            Some(Self::Bmp)
        } else if ext.eq_ignore_ascii_case("ppm") {
            Some(Self::Ppm)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    /// Format for `path`'s extension, or `None` if unrecognized or missing.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Ppm => "ppm",
            Self::Jpeg => "jpg",
        }
    }

    /// The codec table entry for this format.
    pub fn codec(self) -> &'static Codec {
        match self {
            Self::Bmp => &BMP,
            Self::Ppm => &PPM,
            Self::Jpeg => &JPEG,
        }
    }

    pub fn load(self, path: &Path) -> Result<Image, BitmapError> {
        (self.codec().load)(path)
    }

    pub fn save(self, path: &Path, image: &Image) -> Result<(), BitmapError> {
        (self.codec().save)(path, image)
    }
}

fn format_of(path: &Path) -> Result<ImageFormat, BitmapError> {
    ImageFormat::from_path(path).ok_or_else(|| BitmapError::UnknownExtension(path.to_path_buf()))
}

/// Load an image, choosing the codec by extension.
pub fn load(path: impl AsRef<Path>) -> Result<Image, BitmapError> {
    let path = path.as_ref();
    format_of(path)?.load(path)
}

/// Save an image, choosing the codec by extension.
pub fn save(path: impl AsRef<Path>, image: &Image) -> Result<(), BitmapError> {
    let path = path.as_ref();
    format_of(path)?.save(path, image)
}

/// Load `input` and save it to `output`, each codec chosen by extension.
///
/// Both extensions are resolved before anything is read.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), BitmapError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let in_format = format_of(input)?;
    let out_format = format_of(output)?;
    let image = in_format.load(input)?;
    out_format.save(output, &image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_case_insensitively() {
        assert_eq!(ImageFormat::from_path("a.bmp"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_path("a.BMP"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_path("dir/a.ppm"), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::from_path("a.jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path("a.JPEG"), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn unknown_extensions() {
        assert_eq!(ImageFormat::from_path("a.png"), None);
        assert_eq!(ImageFormat::from_path("a"), None);
        assert_eq!(ImageFormat::from_path("bmp"), None);
        assert_eq!(ImageFormat::from_path("a.bmp.gz"), None);
        assert_eq!(ImageFormat::from_path(".bmp"), None);
    }

    #[test]
    fn canonical_extension_maps_back() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn unknown_extension_error_names_path() {
        let err = load("picture.gif").unwrap_err();
        match err {
            BitmapError::UnknownExtension(p) => assert_eq!(p, Path::new("picture.gif")),
            other => panic!("expected UnknownExtension, got {other:?}"),
        }
    }

    #[test]
    fn convert_checks_output_before_reading() {
        // Input does not exist; the output extension is rejected first.
        let err = convert("missing.bmp", "out.tiff").unwrap_err();
        assert!(matches!(err, BitmapError::UnknownExtension(_)));
    }
}
