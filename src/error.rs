use std::path::PathBuf;

use enough::StopReason;

/// Errors from loading, saving, and converting images.
///
/// Every variant is terminal for the call that produced it. Nothing in this
/// crate retries.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unrecognized file extension: {}", .0.display())]
    UnknownExtension(PathBuf),

    #[cfg(feature = "jpeg")]
    #[error("JPEG codec error: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

/// Map a `read_exact` failure, keeping short reads distinct from other I/O faults.
pub(crate) fn read_error(err: std::io::Error) -> BitmapError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        BitmapError::UnexpectedEof
    } else {
        BitmapError::Io(err)
    }
}
