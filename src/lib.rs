//! rtx-remix
//!
//! A safe wrapper around the RTX Remix path-tracing engine's C ABI. This
//! crate exposes descriptor types for cameras, meshes, materials and lights,
//! bakes them into the engine's extensible tagged-record wire format, and
//! drives the engine through a small session façade. The design keeps all
//! pointer-carrying records bracketed by owning `Raw*` values so the chains
//! the engine reads are valid for exactly the duration of each native call.
//!
//! High-level modules
//! - `ffi`: wire records, status codes and the engine call boundary
//! - `math`: plain-data vector, rect and transform types used in records
//! - `scene`: local descriptors for cameras, meshes, materials, lights and
//!   drawn instances
//! - `session`: the engine connection; registration, drawing, presentation
//! - `resources`: OBJ import into mesh descriptors
//! - `error`: the crate-wide error taxonomy

pub mod error;
pub mod ffi;
pub mod math;
pub mod resources;
pub mod scene;
pub mod session;

// Re-exports commonly used types for convenience in downstream code.
pub use error::{RemixError, Result};
pub use ffi::{Engine, FnTable, Handle, ReturnCode};
pub use scene::*;
pub use session::{Session, StartupConfig};

use rand::Rng;

/// Generates a random non-zero 64-bit identity hash for meshes, materials
/// and lights that don't derive one from their asset content.
pub fn hash64() -> u64 {
    let mut rng = rand::thread_rng();
    loop {
        let hash: u64 = rng.r#gen();
        if hash != 0 {
            return hash;
        }
    }
}
