//! Size and range limits for the object pool and its wire format.
//!
//! The byte-level bounds come from the ISO 11783-7 object layouts; the
//! diagnostic-log bound matches the editor's log sink.

/// Maximum designator length in bytes at compatibility level 3.
pub const MAX_DESIGNATOR_LENGTH_V3: usize = 32;

/// Maximum designator length in bytes at compatibility level 4.
pub const MAX_DESIGNATOR_LENGTH_V4: usize = 128;

/// Fixed length of the Device structure label, space-padded on the wire.
pub const STRUCTURE_LABEL_LENGTH: usize = 7;

/// Maximum extended structure label length in bytes (level 4 only).
pub const MAX_EXTENDED_STRUCTURE_LABEL_LENGTH: usize = 128;

/// Fixed length of the Device localization label.
pub const LOCALIZATION_LABEL_LENGTH: usize = 7;

/// Device element numbers are a 12-bit quantity.
pub const MAX_ELEMENT_NUMBER: u16 = 4095;

/// Smallest valid value presentation scale.
pub const MIN_PRESENTATION_SCALE: f32 = 1e-9;

/// Largest valid value presentation scale.
pub const MAX_PRESENTATION_SCALE: f32 = 1e8;

/// Largest valid value presentation decimal count.
pub const MAX_PRESENTATION_DECIMALS: u8 = 7;

/// Capacity of the session diagnostic log; oldest lines are evicted first.
pub const MAX_LOG_LINES: usize = 50;
