//! The native Remix engine boundary: wire records, status codes and entry
//! points. Everything above this module works with the typed scene model;
//! only the session façade reaches through here.

pub mod codes;
pub mod interface;
pub mod records;

pub use codes::ReturnCode;
pub use interface::{Engine, FnTable};
pub use records::{Handle, StructType, WideString};
