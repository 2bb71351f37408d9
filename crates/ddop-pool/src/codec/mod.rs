//! Binary encoding/decoding for the object pool.
//!
//! This module implements the ISO 11783-7 object table format and the
//! `.iop` file convention around it.

pub mod file;
pub mod pool;
pub mod primitives;

pub use file::{has_iop_extension, read_iop_file, write_iop_file};
pub use pool::{CompatibilityLevel, decode_pool, encode_pool};
pub use primitives::{Reader, Writer};
