//! The 7-byte localization label.
//!
//! The Device object carries its language and unit preferences as a packed
//! bitfield. This module gives that label a typed form and the codec between
//! the two. Bit positions follow ISO 11783-7; out-of-range ordinals are
//! clamped to a default on decode rather than rejected, since the label is
//! display preference data, not structure.
//!
//! Layout (bit 0 = LSB):
//! - bytes 0-1: two ASCII language-code characters, space-padded
//! - byte 2: bits 4-5 time format, bits 6-7 decimal symbol
//! - byte 3: date format
//! - byte 4: bits 0-1 mass, 2-3 volume, 4-5 area, 6-7 distance units
//! - byte 5: bits 0-1 generic system, 2-3 force, 4-5 pressure,
//!   6-7 temperature units
//! - byte 6: reserved, fixed 0xFF

use crate::limits::LOCALIZATION_LABEL_LENGTH;

/// Time-of-day display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TimeFormat {
    #[default]
    TwentyFourHour = 0,
    TwelveHourAmPm = 1,
    Reserved = 2,
    NoAction = 3,
}

impl TimeFormat {
    /// Creates a TimeFormat from its 2-bit wire ordinal.
    pub fn from_u8(v: u8) -> TimeFormat {
        match v {
            1 => TimeFormat::TwelveHourAmPm,
            2 => TimeFormat::Reserved,
            3 => TimeFormat::NoAction,
            _ => TimeFormat::TwentyFourHour,
        }
    }
}

/// Decimal separator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DecimalSymbol {
    #[default]
    Comma = 0,
    Point = 1,
    Reserved = 2,
    NoAction = 3,
}

impl DecimalSymbol {
    /// Creates a DecimalSymbol from its 2-bit wire ordinal.
    pub fn from_u8(v: u8) -> DecimalSymbol {
        match v {
            1 => DecimalSymbol::Point,
            2 => DecimalSymbol::Reserved,
            3 => DecimalSymbol::NoAction,
            _ => DecimalSymbol::Comma,
        }
    }
}

/// Calendar date display format; a full byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DateFormat {
    #[default]
    DayMonthYear = 0,
    DayMonthYearShort = 1,
    MonthDayYear = 2,
    MonthDayYearShort = 3,
    YearMonthDay = 4,
    YearMonthDayShort = 5,
}

impl DateFormat {
    /// Creates a DateFormat from its wire ordinal; 6..=255 clamp to
    /// [`DateFormat::DayMonthYear`].
    pub fn from_u8(v: u8) -> DateFormat {
        match v {
            1 => DateFormat::DayMonthYearShort,
            2 => DateFormat::MonthDayYear,
            3 => DateFormat::MonthDayYearShort,
            4 => DateFormat::YearMonthDay,
            5 => DateFormat::YearMonthDayShort,
            _ => DateFormat::DayMonthYear,
        }
    }
}

/// Unit system preference, shared by all eight 2-bit unit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum UnitSystem {
    #[default]
    Metric = 0,
    Imperial = 1,
    UsCustomary = 2,
    NoAction = 3,
}

impl UnitSystem {
    /// Creates a UnitSystem from its 2-bit wire ordinal.
    pub fn from_u8(v: u8) -> UnitSystem {
        match v {
            1 => UnitSystem::Imperial,
            2 => UnitSystem::UsCustomary,
            3 => UnitSystem::NoAction,
            _ => UnitSystem::Metric,
        }
    }
}

/// Decoded form of the localization label.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSettings {
    /// Two ASCII characters; shorter codes are space-padded on encode.
    pub language_code: String,
    pub time_format: TimeFormat,
    pub decimal_symbol: DecimalSymbol,
    pub date_format: DateFormat,
    pub mass_units: UnitSystem,
    pub volume_units: UnitSystem,
    pub area_units: UnitSystem,
    pub distance_units: UnitSystem,
    pub unit_system: UnitSystem,
    pub force_units: UnitSystem,
    pub pressure_units: UnitSystem,
    pub temperature_units: UnitSystem,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            language_code: "en".to_string(),
            time_format: TimeFormat::default(),
            decimal_symbol: DecimalSymbol::default(),
            date_format: DateFormat::default(),
            mass_units: UnitSystem::default(),
            volume_units: UnitSystem::default(),
            area_units: UnitSystem::default(),
            distance_units: UnitSystem::default(),
            unit_system: UnitSystem::default(),
            force_units: UnitSystem::default(),
            pressure_units: UnitSystem::default(),
            temperature_units: UnitSystem::default(),
        }
    }
}

impl LanguageSettings {
    /// Packs the settings into the 7-byte wire label.
    pub fn encode(&self) -> [u8; LOCALIZATION_LABEL_LENGTH] {
        let mut label = [0u8; LOCALIZATION_LABEL_LENGTH];

        let mut code = self.language_code.bytes();
        label[0] = code.next().unwrap_or(b' ');
        label[1] = code.next().unwrap_or(b' ');

        label[2] = ((self.time_format as u8) << 4) | ((self.decimal_symbol as u8) << 6);
        label[3] = self.date_format as u8;
        label[4] = (self.mass_units as u8)
            | ((self.volume_units as u8) << 2)
            | ((self.area_units as u8) << 4)
            | ((self.distance_units as u8) << 6);
        label[5] = (self.unit_system as u8)
            | ((self.force_units as u8) << 2)
            | ((self.pressure_units as u8) << 4)
            | ((self.temperature_units as u8) << 6);
        label[6] = 0xFF;

        label
    }

    /// Unpacks a 7-byte wire label. Reserved bits are ignored; out-of-range
    /// ordinals clamp to their defaults.
    pub fn decode(label: &[u8; LOCALIZATION_LABEL_LENGTH]) -> LanguageSettings {
        LanguageSettings {
            language_code: String::from_utf8_lossy(&label[0..2]).into_owned(),
            time_format: TimeFormat::from_u8((label[2] >> 4) & 0b11),
            decimal_symbol: DecimalSymbol::from_u8((label[2] >> 6) & 0b11),
            date_format: DateFormat::from_u8(label[3]),
            mass_units: UnitSystem::from_u8(label[4] & 0b11),
            volume_units: UnitSystem::from_u8((label[4] >> 2) & 0b11),
            area_units: UnitSystem::from_u8((label[4] >> 4) & 0b11),
            distance_units: UnitSystem::from_u8((label[4] >> 6) & 0b11),
            unit_system: UnitSystem::from_u8(label[5] & 0b11),
            force_units: UnitSystem::from_u8((label[5] >> 2) & 0b11),
            pressure_units: UnitSystem::from_u8((label[5] >> 4) & 0b11),
            temperature_units: UnitSystem::from_u8((label[5] >> 6) & 0b11),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_default_label_layout() {
        let label = LanguageSettings::default().encode();
        assert_eq!(&label[0..2], b"en");
        assert_eq!(label[2], 0);
        assert_eq!(label[3], 0);
        assert_eq!(label[4], 0);
        assert_eq!(label[5], 0);
        assert_eq!(label[6], 0xFF);
    }

    #[test]
    fn test_short_language_code_is_space_padded() {
        let settings = LanguageSettings {
            language_code: "d".to_string(),
            ..LanguageSettings::default()
        };
        let label = settings.encode();
        assert_eq!(&label[0..2], b"d ");
    }

    #[test]
    fn test_field_packing() {
        let settings = LanguageSettings {
            language_code: "de".to_string(),
            time_format: TimeFormat::TwelveHourAmPm,
            decimal_symbol: DecimalSymbol::Point,
            date_format: DateFormat::YearMonthDay,
            mass_units: UnitSystem::Imperial,
            volume_units: UnitSystem::UsCustomary,
            area_units: UnitSystem::NoAction,
            distance_units: UnitSystem::Metric,
            unit_system: UnitSystem::Metric,
            force_units: UnitSystem::Imperial,
            pressure_units: UnitSystem::UsCustomary,
            temperature_units: UnitSystem::NoAction,
        };
        let label = settings.encode();
        assert_eq!(label[2], 0b0101_0000);
        assert_eq!(label[3], 4);
        assert_eq!(label[4], 0b00_11_10_01);
        assert_eq!(label[5], 0b11_10_01_00);
    }

    #[test]
    fn test_out_of_range_date_format_clamps() {
        let mut label = LanguageSettings::default().encode();
        label[3] = 200;
        let decoded = LanguageSettings::decode(&label);
        assert_eq!(decoded.date_format, DateFormat::DayMonthYear);
    }

    fn unit_system_strategy() -> impl Strategy<Value = UnitSystem> {
        (0u8..4).prop_map(UnitSystem::from_u8)
    }

    proptest! {
        #[test]
        fn test_roundtrip_all_valid_combinations(
            code in "[a-z]{2}",
            time in 0u8..4,
            decimal in 0u8..4,
            date in 0u8..6,
            mass in unit_system_strategy(),
            volume in unit_system_strategy(),
            area in unit_system_strategy(),
            distance in unit_system_strategy(),
            system in unit_system_strategy(),
            force in unit_system_strategy(),
            pressure in unit_system_strategy(),
            temperature in unit_system_strategy(),
        ) {
            let settings = LanguageSettings {
                language_code: code,
                time_format: TimeFormat::from_u8(time),
                decimal_symbol: DecimalSymbol::from_u8(decimal),
                date_format: DateFormat::from_u8(date),
                mass_units: mass,
                volume_units: volume,
                area_units: area,
                distance_units: distance,
                unit_system: system,
                force_units: force,
                pressure_units: pressure,
                temperature_units: temperature,
            };
            let decoded = LanguageSettings::decode(&settings.encode());
            prop_assert_eq!(decoded, settings);
        }
    }
}
