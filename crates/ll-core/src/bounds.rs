use crate::error::{CoreError, CoreResult};
use crate::numeric::{ensure_finite, Real};

/// A validated closed interval `[min, max]` with `min < max`.
///
/// Construction is the only way to obtain one, so a held `Bounds` is always
/// well-formed: both endpoints finite and strictly ordered. Used for output
/// limiting and for bounding integral accumulators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    min: Real,
    max: Real,
}

impl Bounds {
    /// Create bounds from endpoints.
    ///
    /// # Errors
    ///
    /// Fails when either endpoint is non-finite or when `min >= max`.
    pub fn new(min: Real, max: Real) -> CoreResult<Self> {
        ensure_finite(min, "bounds min")?;
        ensure_finite(max, "bounds max")?;
        if min >= max {
            return Err(CoreError::DegenerateBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower endpoint.
    pub fn min(&self) -> Real {
        self.min
    }

    /// Upper endpoint.
    pub fn max(&self) -> Real {
        self.max
    }

    /// Clamp a value into the interval. NaN passes through as NaN.
    pub fn clamp(&self, value: Real) -> Real {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside the interval, endpoints included.
    pub fn contains(&self, value: Real) -> bool {
        self.min <= value && value <= self.max
    }
}
