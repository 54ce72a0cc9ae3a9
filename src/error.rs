//! Error types for filter operations.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A parameter or source buffer is unusable (zero size, wrong length...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Direct pixel access outside the buffer.
    #[error("pixel ({x}, {y}) out of range for {width}x{height} buffer")]
    IndexOutOfRange {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Backing array could not be built with the requested shape.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

impl FilterError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FilterError::InvalidArgument(msg.into())
    }
}

/// Reject an aperture/kernel/block size of zero.
pub(crate) fn ensure_size(name: &str, size: u32) -> FilterResult<()> {
    if size == 0 {
        return Err(FilterError::invalid(format!("{name} must be at least 1")));
    }
    Ok(())
}

#[cfg(feature = "python")]
impl From<FilterError> for pyo3::PyErr {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::IndexOutOfRange { .. } => {
                pyo3::exceptions::PyIndexError::new_err(err.to_string())
            }
            _ => pyo3::exceptions::PyValueError::new_err(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            ensure_size("size", 0),
            Err(FilterError::InvalidArgument(_))
        ));
        assert!(ensure_size("size", 1).is_ok());
    }

    #[test]
    fn test_out_of_range_message() {
        let err = FilterError::IndexOutOfRange {
            x: -1,
            y: 3,
            width: 2,
            height: 2,
        };
        assert_eq!(err.to_string(), "pixel (-1, 3) out of range for 2x2 buffer");
    }
}
