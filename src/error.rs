use core::fmt;

/// Result alias for `cardsort`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the analysis primitives.
///
/// The pipeline is designed to have no failure modes on well-formed input:
/// absent or unknown item ids inside a session are silently excluded from
/// counts, an empty session list yields an all-zero similarity matrix, and a
/// single selected item yields a one-leaf dendrogram and an origin embedding.
/// Only genuine precondition violations are reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty where at least one item is required.
    EmptyInput,

    /// The selected item list contains the same identifier twice.
    DuplicateItem {
        /// The offending identifier.
        id: String,
    },

    /// Matrix dimension mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DuplicateItem { id } => {
                write!(f, "duplicate item id '{id}' in selection")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for Error {}
