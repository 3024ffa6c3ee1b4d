//! Error taxonomy for the marshaling layer.
//!
//! Every failure is a distinct, named condition so callers can branch on
//! skinning-data problems vs. session-state problems vs. native-engine
//! failures instead of matching on message strings.

use thiserror::Error;

use crate::ffi::ReturnCode;

/// Result alias used across the crate.
pub type Result<T, E = RemixError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum RemixError {
    /// Malformed skinning arrays: empty, not a multiple of `bones_per_vertex`,
    /// or weight/index counts disagree.
    #[error("invalid skinning data: {0}")]
    InvalidSkinningData(String),

    /// Skinning data describes a different number of vertices than the
    /// surface it is attached to.
    #[error("skinning data covers {actual} vertices but the surface has {expected}")]
    WrongSkinningDataCount { expected: usize, actual: usize },

    /// A blend index points past the end of the skeleton bound to the
    /// instance. Raised by the explicit `MeshInstance::validate` pass.
    #[error("surface {surface} has skinning data outside the assigned skeleton bone range")]
    SkinningDataOutOfSkeletonRange { surface: usize },

    /// A mesh, material or light was used before the session registered it
    /// (or after it was destroyed).
    #[error("{0}")]
    ResourceNotInitialized(&'static str),

    /// A session operation was invoked before `init` or after `shutdown`.
    /// Also raised when the engine reports its device is not registered,
    /// which can diverge from the local session state.
    #[error("the Remix API has not been initialized")]
    ApiNotInitialized,

    /// The native engine could not be started.
    #[error("failed to initialize the Remix API: {code}")]
    FailedToInitializeApi { code: ReturnCode },

    /// A native entry point returned a non-success status.
    #[error("{call} failed: {code}")]
    NativeCall {
        call: &'static str,
        code: ReturnCode,
    },

    /// Light identity hashes must be non-zero.
    #[error("light hash must be a non-zero 64-bit value")]
    LightHashZero,

    /// Distant lights require a unit-length direction; normalization is the
    /// caller's responsibility.
    #[error("direction must be unit length, got a vector of length {length}")]
    DirectionNotUnit { length: f32 },
}
