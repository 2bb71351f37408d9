//! Well-known Data Dictionary Identifiers.
//!
//! A commonly used subset of the DDI registry, enough for building typical
//! sprayer/seeder pools and for labeling DDIs in diagnostics. The registry
//! itself is far larger; unknown values simply have no display name.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

pub const SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 1;
pub const ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 2;
pub const DEFAULT_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 3;
pub const MINIMUM_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 4;
pub const MAXIMUM_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 5;
pub const SETPOINT_MASS_PER_AREA_APPLICATION_RATE: u16 = 6;
pub const ACTUAL_MASS_PER_AREA_APPLICATION_RATE: u16 = 7;
pub const ACTUAL_WORKING_WIDTH: u16 = 67;
pub const TOTAL_AREA: u16 = 116;
pub const EFFECTIVE_TOTAL_DISTANCE: u16 = 117;
pub const EFFECTIVE_TOTAL_TIME: u16 = 119;
pub const DEVICE_ELEMENT_OFFSET_X: u16 = 134;
pub const DEVICE_ELEMENT_OFFSET_Y: u16 = 135;
pub const DEVICE_ELEMENT_OFFSET_Z: u16 = 136;
pub const SETPOINT_WORK_STATE: u16 = 140;
pub const ACTUAL_WORK_STATE: u16 = 141;
pub const REQUEST_DEFAULT_PROCESS_DATA: u16 = 0xDFFF;

lazy_static! {
    static ref DDI_NAMES: FxHashMap<u16, &'static str> = {
        let mut names = FxHashMap::default();
        names.insert(
            SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE,
            "Setpoint Volume Per Area Application Rate",
        );
        names.insert(
            ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE,
            "Actual Volume Per Area Application Rate",
        );
        names.insert(
            DEFAULT_VOLUME_PER_AREA_APPLICATION_RATE,
            "Default Volume Per Area Application Rate",
        );
        names.insert(
            MINIMUM_VOLUME_PER_AREA_APPLICATION_RATE,
            "Minimum Volume Per Area Application Rate",
        );
        names.insert(
            MAXIMUM_VOLUME_PER_AREA_APPLICATION_RATE,
            "Maximum Volume Per Area Application Rate",
        );
        names.insert(
            SETPOINT_MASS_PER_AREA_APPLICATION_RATE,
            "Setpoint Mass Per Area Application Rate",
        );
        names.insert(
            ACTUAL_MASS_PER_AREA_APPLICATION_RATE,
            "Actual Mass Per Area Application Rate",
        );
        names.insert(ACTUAL_WORKING_WIDTH, "Actual Working Width");
        names.insert(TOTAL_AREA, "Total Area");
        names.insert(EFFECTIVE_TOTAL_DISTANCE, "Effective Total Distance");
        names.insert(EFFECTIVE_TOTAL_TIME, "Effective Total Time");
        names.insert(DEVICE_ELEMENT_OFFSET_X, "Device Element Offset X");
        names.insert(DEVICE_ELEMENT_OFFSET_Y, "Device Element Offset Y");
        names.insert(DEVICE_ELEMENT_OFFSET_Z, "Device Element Offset Z");
        names.insert(SETPOINT_WORK_STATE, "Setpoint Work State");
        names.insert(ACTUAL_WORK_STATE, "Actual Work State");
        names.insert(REQUEST_DEFAULT_PROCESS_DATA, "Request Default Process Data");
        names
    };
}

/// Display name for a DDI, when it is in the well-known subset.
pub fn name(ddi: u16) -> Option<&'static str> {
    DDI_NAMES.get(&ddi).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ddi_has_a_name() {
        assert_eq!(name(ACTUAL_WORKING_WIDTH), Some("Actual Working Width"));
    }

    #[test]
    fn test_unknown_ddi_has_no_name() {
        assert_eq!(name(0x4242), None);
    }
}
