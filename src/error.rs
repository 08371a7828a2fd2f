//! Error types for filter construction and scanning.

use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Color channel of an RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Error raised while building or running a filter.
///
/// Construction problems surface before any scanning begins. `Cancelled`
/// only appears where a [`Cancelled`] pass outcome is folded into a plain
/// error, as the bindings do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Zero-sized image, even kernel side, or mismatched data length.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Parameter outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Gray-world correction against an image whose average is zero in a channel.
    #[error("average {0} channel is zero, gray-world scale is undefined")]
    DivisionByZero(Channel),

    #[error("filter pass cancelled after {completed_columns} columns")]
    Cancelled { completed_columns: usize },
}

impl From<Cancelled> for FilterError {
    fn from(cancelled: Cancelled) -> Self {
        FilterError::Cancelled {
            completed_columns: cancelled.completed_columns,
        }
    }
}

/// Result type for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// Terminal outcome of a pass stopped through its cancel token.
///
/// Not a failure: columns already written stay written. The partially
/// filled buffer is only carried when the caller asked to keep it.
#[derive(Error, Debug)]
#[error("filter pass cancelled after {completed_columns} columns")]
pub struct Cancelled {
    /// Number of columns fully written before the stop.
    pub completed_columns: usize,
    /// Partial result, present when `ScanOptions::keep_partial` was set.
    pub partial: Option<PixelBuffer>,
}

impl Cancelled {
    /// Take the partial buffer, if one was kept.
    pub fn into_partial(self) -> Option<PixelBuffer> {
        self.partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FilterError::DivisionByZero(Channel::Green).to_string(),
            "average green channel is zero, gray-world scale is undefined"
        );
        let cancelled = Cancelled { completed_columns: 3, partial: None };
        assert_eq!(cancelled.to_string(), "filter pass cancelled after 3 columns");
        assert_eq!(
            FilterError::from(cancelled),
            FilterError::Cancelled { completed_columns: 3 }
        );
    }
}
