//! Whole-pool encoding/decoding.
//!
//! The wire format is the ISO 11783-7 object table: objects concatenated in
//! insertion order, each a 16-bit ID, a 3-character type label, and a typed
//! payload. Two compatibility levels exist: level 3 caps designators at 32
//! bytes and has no extended structure label or control-source property;
//! level 4 raises the cap to 128 and adds both.

use crate::codec::primitives::{Reader, Writer};
use crate::diag::DiagnosticLog;
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    LOCALIZATION_LABEL_LENGTH, MAX_DESIGNATOR_LENGTH_V3, MAX_DESIGNATOR_LENGTH_V4,
    MAX_ELEMENT_NUMBER, MAX_EXTENDED_STRUCTURE_LABEL_LENGTH, MAX_PRESENTATION_DECIMALS,
    MAX_PRESENTATION_SCALE, MIN_PRESENTATION_SCALE, STRUCTURE_LABEL_LENGTH,
};
use crate::model::{
    Device, DeviceElement, DeviceElementKind, DeviceProcessData, DeviceProperty, NO_OBJECT_ID,
    ObjectBody, ObjectId, ObjectPool, ObjectType, PoolObject, PropertyFlags, TriggerFlags,
    ValuePresentation,
};
use crate::validate::validate_pool;

/// Task Controller compatibility level; selects which format features the
/// codec accepts and emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompatibilityLevel {
    Version3 = 3,
    #[default]
    Version4 = 4,
}

impl CompatibilityLevel {
    /// Creates a CompatibilityLevel from its numeric form.
    pub fn from_u8(v: u8) -> Option<CompatibilityLevel> {
        match v {
            3 => Some(CompatibilityLevel::Version3),
            4 => Some(CompatibilityLevel::Version4),
            _ => None,
        }
    }

    /// Designator byte limit at this level.
    pub fn max_designator_length(&self) -> usize {
        match self {
            CompatibilityLevel::Version3 => MAX_DESIGNATOR_LENGTH_V3,
            CompatibilityLevel::Version4 => MAX_DESIGNATOR_LENGTH_V4,
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes the pool into its binary table.
///
/// Runs [`validate_pool`] first; a structurally invalid pool is rejected
/// before a single byte is produced. Non-fatal oddities (an extended
/// structure label at level 3) are reported through `log` and skipped.
pub fn encode_pool(
    pool: &ObjectPool,
    level: CompatibilityLevel,
    log: &mut DiagnosticLog,
) -> Result<Vec<u8>, EncodeError> {
    validate_pool(pool)?;

    let mut writer = Writer::with_capacity(pool.len() * 32);
    for object in pool.iter() {
        encode_object(object, level, log, &mut writer)?;
    }
    Ok(writer.into_bytes())
}

fn check_text(
    id: ObjectId,
    field: &'static str,
    text: &str,
    level: CompatibilityLevel,
) -> Result<(), EncodeError> {
    let max = level.max_designator_length();
    if text.len() > max {
        return Err(EncodeError::DesignatorTooLong {
            id,
            field,
            len: text.len(),
            max,
            level: level as u8,
        });
    }
    Ok(())
}

fn encode_object(
    object: &PoolObject,
    level: CompatibilityLevel,
    log: &mut DiagnosticLog,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    writer.write_u16_le(object.id);
    writer.write_bytes(object.object_type().label());
    check_text(object.id, "designator", &object.designator, level)?;

    match &object.body {
        ObjectBody::Device(device) => encode_device(object, device, level, log, writer),
        ObjectBody::Element(element) => {
            writer.write_u8(element.kind as u8);
            writer.write_string(&object.designator);
            writer.write_u16_le(element.element_number);
            writer.write_u16_le(element.parent);
            writer.write_u16_le(element.children.len() as u16);
            for child in &element.children {
                writer.write_u16_le(*child);
            }
            Ok(())
        }
        ObjectBody::ProcessData(data) => {
            if level == CompatibilityLevel::Version3
                && data.properties.contains(PropertyFlags::CONTROL_SOURCE)
            {
                return Err(EncodeError::ControlSourceRequiresVersion4 { id: object.id });
            }
            writer.write_u16_le(data.ddi);
            writer.write_u8(data.properties.bits());
            writer.write_u8(data.trigger_methods.bits());
            writer.write_string(&object.designator);
            writer.write_u16_le(data.presentation);
            Ok(())
        }
        ObjectBody::Property(property) => {
            writer.write_u16_le(property.ddi);
            writer.write_i32_le(property.value);
            writer.write_string(&object.designator);
            writer.write_u16_le(property.presentation);
            Ok(())
        }
        ObjectBody::Presentation(presentation) => {
            writer.write_i32_le(presentation.offset);
            writer.write_f32_le(presentation.scale);
            writer.write_u8(presentation.decimals);
            writer.write_string(&object.designator);
            Ok(())
        }
    }
}

fn encode_device(
    object: &PoolObject,
    device: &Device,
    level: CompatibilityLevel,
    log: &mut DiagnosticLog,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    check_text(object.id, "software version", &device.software_version, level)?;
    check_text(object.id, "serial number", &device.serial_number, level)?;
    if device.structure_label.len() > STRUCTURE_LABEL_LENGTH {
        return Err(EncodeError::StructureLabelTooLong {
            len: device.structure_label.len(),
            max: STRUCTURE_LABEL_LENGTH,
        });
    }

    writer.write_string(&object.designator);
    writer.write_string(&device.software_version);
    writer.write_u64_le(device.iso_name);
    writer.write_string(&device.serial_number);

    let mut label = [b' '; STRUCTURE_LABEL_LENGTH];
    label[..device.structure_label.len()].copy_from_slice(device.structure_label.as_bytes());
    writer.write_bytes(&label);
    writer.write_bytes(&device.localization_label);

    match level {
        CompatibilityLevel::Version3 => {
            if !device.extended_structure_label.is_empty() {
                log.warning(
                    "extended structure label is not representable at compatibility level 3 and was skipped",
                );
            }
        }
        CompatibilityLevel::Version4 => {
            if device.extended_structure_label.len() > MAX_EXTENDED_STRUCTURE_LABEL_LENGTH {
                return Err(EncodeError::ExtendedStructureLabelTooLong {
                    len: device.extended_structure_label.len(),
                    max: MAX_EXTENDED_STRUCTURE_LABEL_LENGTH,
                });
            }
            writer.write_string(&device.extended_structure_label);
        }
    }
    Ok(())
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a binary table into a fresh pool.
///
/// Structural faults (truncation, unknown labels, duplicate IDs, a missing
/// or repeated Device) are fatal and the partial pool is dropped. Reference
/// faults and out-of-range presentation fields are reported through `log`
/// as warnings — the editor exists to let the user repair them.
///
/// `client_name` is the expected ISO NAME; pass zero to skip the check.
pub fn decode_pool(
    bytes: &[u8],
    client_name: u64,
    level: CompatibilityLevel,
    log: &mut DiagnosticLog,
) -> Result<ObjectPool, DecodeError> {
    let mut reader = Reader::new(bytes);
    let mut pool = ObjectPool::empty();
    let mut device_seen = false;

    while !reader.is_empty() {
        let id = reader.read_u16_le("object id")?;
        if id == NO_OBJECT_ID {
            return Err(DecodeError::ReservedObjectId { id });
        }
        let label = reader.read_label("object type label")?;
        let object_type =
            ObjectType::from_label(&label).ok_or(DecodeError::UnknownObjectType { found: label })?;

        if object_type == ObjectType::Device {
            if device_seen {
                return Err(DecodeError::DuplicateDevice { id });
            }
            device_seen = true;
        }

        let object = decode_object(&mut reader, id, object_type, level, log)?;
        if !pool.insert_raw(object) {
            return Err(DecodeError::DuplicateObjectId { id });
        }
    }

    if !device_seen {
        return Err(DecodeError::MissingDevice);
    }

    if client_name != 0 {
        let decoded_name = pool.device().map(|d| d.iso_name).unwrap_or(0);
        if decoded_name != client_name {
            log.warning(format!(
                "pool NAME {decoded_name:#018x} does not match the client NAME {client_name:#018x}"
            ));
        }
    }

    audit_references(&pool, log);
    Ok(pool)
}

fn decode_object(
    reader: &mut Reader<'_>,
    id: ObjectId,
    object_type: ObjectType,
    level: CompatibilityLevel,
    log: &mut DiagnosticLog,
) -> Result<PoolObject, DecodeError> {
    let max_text = level.max_designator_length();
    match object_type {
        ObjectType::Device => {
            let designator = reader.read_string(max_text, "device designator")?;
            let software_version = reader.read_string(max_text, "software version")?;
            let iso_name = reader.read_u64_le("device NAME")?;
            let serial_number = reader.read_string(max_text, "serial number")?;

            let label_bytes = reader.read_bytes(STRUCTURE_LABEL_LENGTH, "structure label")?;
            let structure_label = std::str::from_utf8(label_bytes)
                .map_err(|_| DecodeError::InvalidUtf8 {
                    field: "structure label",
                })?
                .trim_end_matches(' ')
                .to_string();

            let localization = reader.read_bytes(LOCALIZATION_LABEL_LENGTH, "localization label")?;
            let mut localization_label = [0u8; LOCALIZATION_LABEL_LENGTH];
            localization_label.copy_from_slice(localization);

            let extended_structure_label = match level {
                CompatibilityLevel::Version3 => String::new(),
                CompatibilityLevel::Version4 => reader.read_string(
                    MAX_EXTENDED_STRUCTURE_LABEL_LENGTH,
                    "extended structure label",
                )?,
            };

            Ok(PoolObject {
                id,
                designator,
                body: ObjectBody::Device(Device {
                    iso_name,
                    serial_number,
                    software_version,
                    structure_label,
                    extended_structure_label,
                    localization_label,
                }),
            })
        }
        ObjectType::DeviceElement => {
            let kind_byte = reader.read_u8("element kind")?;
            let kind = DeviceElementKind::from_u8(kind_byte)
                .ok_or(DecodeError::InvalidElementKind { kind: kind_byte })?;
            let designator = reader.read_string(max_text, "element designator")?;
            let mut element_number = reader.read_u16_le("element number")?;
            if element_number > MAX_ELEMENT_NUMBER {
                log.warning(format!(
                    "element {id} number {element_number} exceeds 12 bits, masked"
                ));
                element_number &= MAX_ELEMENT_NUMBER;
            }
            let parent = reader.read_u16_le("element parent")?;
            let child_count = reader.read_u16_le("element child count")? as usize;
            let mut children = Vec::with_capacity(child_count);
            for _ in 0..child_count {
                children.push(reader.read_u16_le("element child")?);
            }
            Ok(PoolObject {
                id,
                designator,
                body: ObjectBody::Element(DeviceElement {
                    kind,
                    element_number,
                    parent,
                    children,
                }),
            })
        }
        ObjectType::DeviceProcessData => {
            let ddi = reader.read_u16_le("process data DDI")?;
            let properties = decode_flag_byte(
                reader.read_u8("process data properties")?,
                PropertyFlags::all().bits(),
                id,
                "property",
                log,
            );
            let triggers = decode_flag_byte(
                reader.read_u8("trigger methods")?,
                TriggerFlags::all().bits(),
                id,
                "trigger",
                log,
            );
            let designator = reader.read_string(max_text, "process data designator")?;
            let presentation = reader.read_u16_le("process data presentation")?;
            let mut data = DeviceProcessData::new(
                ddi,
                PropertyFlags::from_bits_truncate(properties),
                TriggerFlags::from_bits_truncate(triggers),
            );
            data.presentation = presentation;
            Ok(PoolObject {
                id,
                designator,
                body: ObjectBody::ProcessData(data),
            })
        }
        ObjectType::DeviceProperty => {
            let ddi = reader.read_u16_le("property DDI")?;
            let value = reader.read_i32_le("property value")?;
            let designator = reader.read_string(max_text, "property designator")?;
            let presentation = reader.read_u16_le("property presentation")?;
            let mut property = DeviceProperty::new(ddi, value);
            property.presentation = presentation;
            Ok(PoolObject {
                id,
                designator,
                body: ObjectBody::Property(property),
            })
        }
        ObjectType::DeviceValuePresentation => {
            let offset = reader.read_i32_le("presentation offset")?;
            let mut scale = reader.read_f32_le("presentation scale")?;
            if !(MIN_PRESENTATION_SCALE..=MAX_PRESENTATION_SCALE).contains(&scale) {
                log.warning(format!(
                    "presentation {id} scale {scale} is outside [1e-9, 1e8], clamped"
                ));
                scale = scale.clamp(MIN_PRESENTATION_SCALE, MAX_PRESENTATION_SCALE);
                if scale.is_nan() {
                    scale = 1.0;
                }
            }
            let mut decimals = reader.read_u8("presentation decimals")?;
            if decimals > MAX_PRESENTATION_DECIMALS {
                log.warning(format!(
                    "presentation {id} has {decimals} decimals, clamped to {MAX_PRESENTATION_DECIMALS}"
                ));
                decimals = MAX_PRESENTATION_DECIMALS;
            }
            let designator = reader.read_string(max_text, "unit designator")?;
            Ok(PoolObject {
                id,
                designator,
                body: ObjectBody::Presentation(ValuePresentation {
                    offset,
                    scale,
                    decimals,
                }),
            })
        }
    }
}

fn decode_flag_byte(
    raw: u8,
    known: u8,
    id: ObjectId,
    what: &str,
    log: &mut DiagnosticLog,
) -> u8 {
    if raw & !known != 0 {
        log.warning(format!(
            "process data {id} carries unknown {what} bits {:#04x}, ignored",
            raw & !known
        ));
    }
    raw & known
}

/// Reports unresolvable references as warnings. Decoded pools are allowed
/// to be structurally dirty; the projection and validation layers cope.
fn audit_references(pool: &ObjectPool, log: &mut DiagnosticLog) {
    for object in pool.iter() {
        match &object.body {
            ObjectBody::Element(element) => {
                if element.parent != NO_OBJECT_ID && pool.get_by_id(element.parent).is_none() {
                    log.warning(format!(
                        "element {} references missing parent {}",
                        object.id, element.parent
                    ));
                }
                for child in &element.children {
                    if pool.get_by_id(*child).is_none() {
                        log.warning(format!(
                            "element {} references missing child {child}",
                            object.id
                        ));
                    }
                }
            }
            ObjectBody::ProcessData(DeviceProcessData { presentation, .. })
            | ObjectBody::Property(DeviceProperty { presentation, .. }) => {
                if *presentation != NO_OBJECT_ID && pool.get_by_id(*presentation).is_none() {
                    log.warning(format!(
                        "object {} references missing presentation {presentation}",
                        object.id
                    ));
                }
            }
            _ => {}
        }
    }
}
