//! The error type shared by all containers of this crate.

use thiserror::Error;


/// Everything that can go wrong when calling into a compact container.
///
/// Note that "absent" results (e.g. `floor` finding nothing, `get` on a
/// missing key, `poll_first` on an empty set) are never errors: those
/// methods return `None`. Errors are reserved for calls that are malformed
/// or that cannot produce a value by contract. Every failing call returns
/// before the container is modified.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A slot index passed to the array mechanics is outside of `0..=len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `index + count` of a slot range passed to the array mechanics lies
    /// beyond the length.
    #[error("range of {count} slots at index {index} out of range for length {len}")]
    CountOutOfRange { index: usize, count: usize, len: usize },

    /// Tried to resize the backing array below the number of live entries.
    #[error("capacity {capacity} is smaller than the length {len}")]
    CapacityTooSmall { capacity: usize, len: usize },

    /// The lower bound of a range view is greater than its upper bound.
    #[error("lower bound of the range is greater than its upper bound")]
    InvertedBounds,

    /// A bound passed to a view lies outside of that view's window.
    #[error("bound lies outside of the view's range")]
    BoundOutOfRange,

    /// An entry inserted through a view lies outside of that view's window.
    #[error("entry lies outside of the view's range")]
    OutOfRange,

    /// `first`/`last` and friends were called on an empty container or an
    /// empty window.
    #[error("no such element")]
    NoSuchElement,

    /// The storage strategy does not support the requested operation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// The broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed arguments: bad indices or counts, inverted or out of range
    /// bounds, entries outside of a view.
    InvalidArgument,

    /// Asked for an element that does not exist.
    NoSuchElement,

    /// Called an operation the storage strategy does not have. This is a
    /// programming error rather than a runtime condition.
    UnsupportedOperation,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IndexOutOfRange { .. }
            | Error::CountOutOfRange { .. }
            | Error::CapacityTooSmall { .. }
            | Error::InvertedBounds
            | Error::BoundOutOfRange
            | Error::OutOfRange => ErrorKind::InvalidArgument,
            Error::NoSuchElement => ErrorKind::NoSuchElement,
            Error::Unsupported(_) => ErrorKind::UnsupportedOperation,
        }
    }
}

/// Result type with [`Error`] as default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;
