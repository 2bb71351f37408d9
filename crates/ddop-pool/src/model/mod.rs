//! Data model for the device descriptor object pool.
//!
//! - Identifiers (16-bit object IDs and the null-reference sentinel)
//! - Object variants (Device, element, process data, property, presentation)
//! - The localization label and its bitfield codec
//! - The pool store and its referential-integrity maintenance

pub mod id;
pub mod integrity;
pub mod localization;
pub mod object;
pub mod pool;

pub use id::{NO_OBJECT_ID, ObjectId, first_unused_id};
pub use integrity::prune_references;
pub use localization::{
    DateFormat, DecimalSymbol, LanguageSettings, TimeFormat, UnitSystem,
};
pub use object::{
    Device, DeviceElement, DeviceElementKind, DeviceProcessData, DeviceProperty, ObjectBody,
    ObjectType, PoolObject, PropertyFlags, TriggerFlags, ValuePresentation,
};
pub use pool::ObjectPool;
