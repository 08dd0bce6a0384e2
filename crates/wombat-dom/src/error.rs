//! Errors raised by the node-construction API.
//!
//! Only constructors validate and fail. Structural mutation requests that
//! would break a tree invariant (cycles, duplicate singleton elements) are
//! refused silently instead, mirroring how browsers treat most of these
//! operations.

use thiserror::Error;

/// Validation failures from the `create_*` constructors on
/// [`crate::Document`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    /// A required argument was empty or of the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Node payload text contains a sequence that cannot be represented,
    /// such as `]]>` inside a CDATA section.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A name contains a character the XML `Name` production forbids.
    #[error("invalid character: {0}")]
    InvalidCharacter(String),
}
