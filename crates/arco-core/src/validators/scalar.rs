//! NaN/Inf policy for single values.

use crate::error::ArcoError;

/// Which non-finite values are acceptable.
///
/// The default rejects NaN and both infinities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleOptions {
    pub allow_positive_infinity: bool,
    pub allow_negative_infinity: bool,
    pub allow_nan: bool,
}

impl DoubleOptions {
    /// Only finite values.
    pub const FINITE: Self = Self {
        allow_positive_infinity: false,
        allow_negative_infinity: false,
        allow_nan: false,
    };

    /// Policy for lower bounds: `-inf` allowed, `+inf` and NaN rejected.
    pub const LOWER_BOUND: Self = Self {
        allow_positive_infinity: false,
        allow_negative_infinity: true,
        allow_nan: false,
    };

    /// Policy for upper bounds: `+inf` allowed, `-inf` and NaN rejected.
    pub const UPPER_BOUND: Self = Self {
        allow_positive_infinity: true,
        allow_negative_infinity: false,
        allow_nan: false,
    };

    /// Any value but NaN.
    pub const NOT_NAN: Self = Self {
        allow_positive_infinity: true,
        allow_negative_infinity: true,
        allow_nan: false,
    };
}

pub fn check_scalar(value: f64, options: DoubleOptions) -> Result<(), ArcoError> {
    if value.is_nan() && !options.allow_nan {
        return Err(ArcoError::invalid_argument("value is NaN"));
    }
    if value == f64::INFINITY && !options.allow_positive_infinity {
        return Err(ArcoError::invalid_argument("value is +inf"));
    }
    if value == f64::NEG_INFINITY && !options.allow_negative_infinity {
        return Err(ArcoError::invalid_argument("value is -inf"));
    }
    Ok(())
}

pub fn check_scalar_no_nan_no_inf(value: f64) -> Result<(), ArcoError> {
    check_scalar(value, DoubleOptions::FINITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_rejects_all_non_finite() {
        assert!(check_scalar_no_nan_no_inf(1.5).is_ok());
        assert!(check_scalar_no_nan_no_inf(f64::NAN).is_err());
        assert!(check_scalar_no_nan_no_inf(f64::INFINITY).is_err());
        assert!(check_scalar_no_nan_no_inf(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_bound_policies() {
        assert!(check_scalar(f64::NEG_INFINITY, DoubleOptions::LOWER_BOUND).is_ok());
        let err = check_scalar(f64::INFINITY, DoubleOptions::LOWER_BOUND).unwrap_err();
        assert!(err.message().contains("+inf"));

        assert!(check_scalar(f64::INFINITY, DoubleOptions::UPPER_BOUND).is_ok());
        let err = check_scalar(f64::NEG_INFINITY, DoubleOptions::UPPER_BOUND).unwrap_err();
        assert!(err.message().contains("-inf"));

        assert!(check_scalar(f64::NAN, DoubleOptions::NOT_NAN).is_err());
    }

    #[test]
    fn test_nan_allowed_when_requested() {
        let options = DoubleOptions {
            allow_nan: true,
            ..DoubleOptions::default()
        };
        assert!(check_scalar(f64::NAN, options).is_ok());
    }
}
