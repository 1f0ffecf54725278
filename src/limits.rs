use crate::error::BitmapError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BitmapError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BitmapError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BitmapError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(BitmapError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Dimension and memory checks for an RGB8 buffer of `width x height`.
    pub(crate) fn check_rgb8(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        self.check(width, height)?;
        self.check_memory(
            (u64::from(width) * u64::from(height)).saturating_mul(3),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check_rgb8(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn each_limit_rejects() {
        let limits = Limits {
            max_width: Some(10),
            ..Default::default()
        };
        assert!(limits.check(10, 1000).is_ok());
        assert!(matches!(
            limits.check(11, 1),
            Err(BitmapError::LimitExceeded(_))
        ));

        let limits = Limits {
            max_height: Some(10),
            ..Default::default()
        };
        assert!(limits.check(1, 11).is_err());

        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(limits.check(10, 11).is_err());

        let limits = Limits {
            max_memory_bytes: Some(300),
            ..Default::default()
        };
        assert!(limits.check_rgb8(10, 10).is_ok());
        assert!(limits.check_rgb8(10, 11).is_err());
    }
}
