//! # Bus Types Crate
//!
//! This crate contains the wire-level types that every other crate in the
//! workspace exchanges: variant values, object paths, interface names,
//! type signatures and the error reply shape.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Anything that crosses the bus boundary is
//!   defined here.
//! - **Validated Names**: `ObjectPath` and `InterfaceName` can only be built
//!   from valid input, so downstream code never re-checks them.
//! - **Opaque Signatures**: Signatures are carried as strings; this crate only
//!   knows how to split them into complete types.

pub mod errors;
pub mod names;
pub mod path;
pub mod signature;
pub mod value;

pub use errors::*;
pub use names::*;
pub use path::{mangle_object_path, ObjectPath};
pub use signature::{split_signature, SignatureError};
pub use value::{Value, ValueError};
