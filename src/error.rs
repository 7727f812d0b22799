//! Error types for rig construction and pose updates.

use thiserror::Error;

/// Top-level error type for kinemark.
///
/// Every variant is a programmer-contract violation raised synchronously at
/// the violating call; there is no retry or recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KinemarkError {
    /// A position coordinate was NaN or infinite.
    #[error("{axis} coordinate must be finite, got {value}")]
    NonFiniteCoordinate { axis: char, value: f64 },

    /// An orientation component (quaternion or Euler angle) was NaN or infinite.
    #[error("orientation component must be finite, got {value}")]
    NonFiniteOrientation { value: f64 },

    /// An orientation quaternion had (near-)zero length and cannot be normalized.
    #[error("orientation quaternion has zero length")]
    ZeroLengthQuaternion,

    /// A link was constructed from the same marker instance twice.
    #[error("a link requires two distinct marker instances")]
    DegenerateLink,

    /// A link shares no endpoint with any link already in the skeleton.
    #[error("link cannot connect to any existing link in the skeleton")]
    DisconnectedLink,
}
