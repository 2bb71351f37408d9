//! Object pool graph engine for ISOBUS device descriptors.
//!
//! This crate is the non-UI core of a DDOP editor: the in-memory graph of a
//! Device Descriptor Object Pool — the hierarchical description of an
//! implement's sensors, actuators, and process data exchanged with a Task
//! Controller — plus the invariants that keep that graph a valid input to
//! the binary `.iop` format across interactive edits.
//!
//! # Overview
//!
//! - **ID-referenced graph**: objects cross-reference each other by raw
//!   16-bit IDs resolved through an arena, never by pointers; `0xFFFF` is
//!   the reserved "no reference" sentinel
//! - **Integrity on mutation**: deletion scrubs parent and child references
//!   in the same operation; re-IDing is conflict-guarded
//! - **Cycle-safe projection**: the display tree is derived from
//!   user-editable reference fields and tolerates cycles, self-parents, and
//!   dangling IDs
//!
//! # Quick Start
//!
//! ```rust
//! use ddop_pool::codec::{decode_pool, encode_pool};
//! use ddop_pool::{
//!     CompatibilityLevel, DeviceElement, DeviceElementKind, DeviceProcessData, DiagnosticLog,
//!     ObjectBody, ObjectPool, PropertyFlags, TriggerFlags, ddi,
//! };
//!
//! // A new pool starts with its Device root.
//! let mut pool = ObjectPool::new("Sprayer", 0x00A0_1234_5678_9ABC);
//! let root = pool.root_id().unwrap();
//!
//! // Hang a boom element off the root and attach a rate measurement.
//! let boom = pool.add(
//!     "Boom",
//!     ObjectBody::Element(DeviceElement::new(DeviceElementKind::Function, 1, root)),
//! );
//! let rate = pool.add(
//!     "Actual rate",
//!     ObjectBody::ProcessData(DeviceProcessData::new(
//!         ddi::ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE,
//!         PropertyFlags::MEMBER_OF_DEFAULT_SET,
//!         TriggerFlags::ON_CHANGE,
//!     )),
//! );
//! if let ObjectBody::Element(element) = &mut pool.get_by_id_mut(boom).unwrap().body {
//!     element.children.push(rate);
//! }
//!
//! // Round-trip through the binary table.
//! let mut log = DiagnosticLog::new();
//! let bytes = encode_pool(&pool, CompatibilityLevel::Version4, &mut log).unwrap();
//! let decoded = decode_pool(&bytes, 0, CompatibilityLevel::Version4, &mut log).unwrap();
//! assert_eq!(decoded.len(), pool.len());
//! ```
//!
//! # Modules
//!
//! - [`model`]: object variants, the pool store, ID allocation, the
//!   localization label
//! - [`tree`]: cycle-safe hierarchical projection for display
//! - [`validate`]: structural validation ahead of serialization
//! - [`codec`]: the ISO 11783-7 binary object table and `.iop` file I/O
//! - [`session`]: the editor session owning pool, compatibility level, and
//!   diagnostics
//! - [`ddi`]: well-known Data Dictionary Identifiers
//! - [`error`]: error types
//! - [`limits`]: field and format bounds
//!
//! # Robustness
//!
//! The decoder treats its input as untrusted: truncation, unknown object
//! labels, and duplicate IDs are rejected with descriptive errors, while
//! reference faults decode into a pool the editor can repair, surfaced as
//! bounded diagnostics. A failed load never disturbs the pool the session
//! already had.

pub mod codec;
pub mod ddi;
pub mod diag;
pub mod error;
pub mod limits;
pub mod model;
pub mod session;
pub mod tree;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{CompatibilityLevel, decode_pool, encode_pool};
pub use diag::{DiagnosticLog, LogLevel, LogLine};
pub use error::{DecodeError, EncodeError, SessionError, ValidationError};
pub use model::{
    Device, DeviceElement, DeviceElementKind, DeviceProcessData, DeviceProperty, LanguageSettings,
    NO_OBJECT_ID, ObjectBody, ObjectId, ObjectPool, ObjectType, PoolObject, PropertyFlags,
    TriggerFlags, ValuePresentation, first_unused_id,
};
pub use session::EditorSession;
pub use tree::{DisplayNode, TreeProjection, project};
pub use validate::validate_pool;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
