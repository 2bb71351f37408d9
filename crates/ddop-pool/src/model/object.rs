//! Pool object variants.
//!
//! Every entry in a device descriptor object pool is one of five variants,
//! modeled as a sum type and dispatched with exhaustive matching. The common
//! attributes (ID, designator) live on [`PoolObject`]; everything
//! variant-specific lives in the [`ObjectBody`] payloads.

use bitflags::bitflags;

use crate::limits::LOCALIZATION_LABEL_LENGTH;
use crate::model::id::{NO_OBJECT_ID, ObjectId};
use crate::model::localization::LanguageSettings;

/// A single object in the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolObject {
    /// Unique 16-bit identifier; never the [`NO_OBJECT_ID`] sentinel.
    pub id: ObjectId,
    /// Human-readable label. For value presentations this is the unit symbol
    /// shown next to scaled values.
    pub designator: String,
    /// Variant payload.
    pub body: ObjectBody,
}

impl PoolObject {
    /// Returns the kind tag for this object.
    pub fn object_type(&self) -> ObjectType {
        self.body.object_type()
    }
}

/// Variant payload of a pool object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectBody {
    Device(Device),
    Element(DeviceElement),
    ProcessData(DeviceProcessData),
    Property(DeviceProperty),
    Presentation(ValuePresentation),
}

impl ObjectBody {
    /// Returns the kind tag for this payload.
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBody::Device(_) => ObjectType::Device,
            ObjectBody::Element(_) => ObjectType::DeviceElement,
            ObjectBody::ProcessData(_) => ObjectType::DeviceProcessData,
            ObjectBody::Property(_) => ObjectType::DeviceProperty,
            ObjectBody::Presentation(_) => ObjectType::DeviceValuePresentation,
        }
    }
}

/// Kind tag for the five object variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Device,
    DeviceElement,
    DeviceProcessData,
    DeviceProperty,
    DeviceValuePresentation,
}

impl ObjectType {
    /// Returns the three-character table label used on the wire.
    pub fn label(&self) -> &'static [u8; 3] {
        match self {
            ObjectType::Device => b"DVC",
            ObjectType::DeviceElement => b"DET",
            ObjectType::DeviceProcessData => b"DPD",
            ObjectType::DeviceProperty => b"DPT",
            ObjectType::DeviceValuePresentation => b"DVP",
        }
    }

    /// Creates an ObjectType from its wire label.
    pub fn from_label(label: &[u8; 3]) -> Option<ObjectType> {
        match label {
            b"DVC" => Some(ObjectType::Device),
            b"DET" => Some(ObjectType::DeviceElement),
            b"DPD" => Some(ObjectType::DeviceProcessData),
            b"DPT" => Some(ObjectType::DeviceProperty),
            b"DVP" => Some(ObjectType::DeviceValuePresentation),
            _ => None,
        }
    }
}

/// The pool root. Exactly one exists per pool; it is created when the pool
/// is created and cannot be removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// 64-bit ISO NAME of the device on the bus.
    pub iso_name: u64,
    /// Serial number string.
    pub serial_number: String,
    /// Software version string.
    pub software_version: String,
    /// Structure label; at most 7 bytes, space-padded on the wire.
    pub structure_label: String,
    /// Extended structure label; at most 128 bytes, compatibility level 4 only.
    pub extended_structure_label: String,
    /// Encoded language and unit preferences.
    pub localization_label: [u8; LOCALIZATION_LABEL_LENGTH],
}

impl Device {
    /// Creates a device with the given NAME and default localization.
    pub fn new(iso_name: u64) -> Self {
        Self {
            iso_name,
            serial_number: String::new(),
            software_version: String::new(),
            structure_label: String::new(),
            extended_structure_label: String::new(),
            localization_label: LanguageSettings::default().encode(),
        }
    }
}

/// Device element kinds, with their ISO 11783-7 wire ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceElementKind {
    Device = 1,
    Function = 2,
    Bin = 3,
    Section = 4,
    Unit = 5,
    Connector = 6,
    NavigationReference = 7,
    Proprietary = 8,
}

impl DeviceElementKind {
    /// Creates a DeviceElementKind from its wire representation.
    pub fn from_u8(v: u8) -> Option<DeviceElementKind> {
        match v {
            1 => Some(DeviceElementKind::Device),
            2 => Some(DeviceElementKind::Function),
            3 => Some(DeviceElementKind::Bin),
            4 => Some(DeviceElementKind::Section),
            5 => Some(DeviceElementKind::Unit),
            6 => Some(DeviceElementKind::Connector),
            7 => Some(DeviceElementKind::NavigationReference),
            8 => Some(DeviceElementKind::Proprietary),
            _ => None,
        }
    }
}

/// A node in the element hierarchy.
///
/// Elements form a tree through their `parent` IDs; the `children` list
/// references the process data and property objects attached to the element,
/// never other elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceElement {
    pub kind: DeviceElementKind,
    /// 12-bit element number (0-4095).
    pub element_number: u16,
    /// ID of the device or parent element, or [`NO_OBJECT_ID`] for a
    /// detached element.
    pub parent: ObjectId,
    /// Attached process data and property object IDs, in display order.
    pub children: Vec<ObjectId>,
}

impl DeviceElement {
    /// Creates an element of the given kind under `parent`.
    pub fn new(kind: DeviceElementKind, element_number: u16, parent: ObjectId) -> Self {
        Self {
            kind,
            element_number,
            parent,
            children: Vec::new(),
        }
    }
}

bitflags! {
    /// Property bits of a process data object.
    ///
    /// `SETTABLE` and `CONTROL_SOURCE` are mutually exclusive;
    /// `CONTROL_SOURCE` additionally requires compatibility level 4.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PropertyFlags: u8 {
        const MEMBER_OF_DEFAULT_SET = 1 << 0;
        const SETTABLE = 1 << 1;
        const CONTROL_SOURCE = 1 << 2;
    }
}

bitflags! {
    /// Supported trigger methods of a process data object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TriggerFlags: u8 {
        const TIME_INTERVAL = 1 << 0;
        const DISTANCE_INTERVAL = 1 << 1;
        const THRESHOLD_LIMITS = 1 << 2;
        const ON_CHANGE = 1 << 3;
        const TOTAL = 1 << 4;
    }
}

/// A measurable or settable process value, identified by its DDI.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProcessData {
    /// Data Dictionary Identifier naming the quantity.
    pub ddi: u16,
    pub properties: PropertyFlags,
    pub trigger_methods: TriggerFlags,
    /// ID of a value presentation, or [`NO_OBJECT_ID`] for none.
    pub presentation: ObjectId,
}

impl DeviceProcessData {
    /// Creates process data for the given DDI with no presentation.
    pub fn new(ddi: u16, properties: PropertyFlags, trigger_methods: TriggerFlags) -> Self {
        Self {
            ddi,
            properties,
            trigger_methods,
            presentation: NO_OBJECT_ID,
        }
    }
}

/// A constant device property, identified by its DDI.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProperty {
    /// Data Dictionary Identifier naming the quantity.
    pub ddi: u16,
    pub value: i32,
    /// ID of a value presentation, or [`NO_OBJECT_ID`] for none.
    pub presentation: ObjectId,
}

impl DeviceProperty {
    /// Creates a property for the given DDI with no presentation.
    pub fn new(ddi: u16, value: i32) -> Self {
        Self {
            ddi,
            value,
            presentation: NO_OBJECT_ID,
        }
    }
}

/// Display formatting for process data and property values:
/// `displayed = (value + offset) * scale`, rendered with `decimals` digits
/// and the object's designator as the unit symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePresentation {
    pub offset: i32,
    /// Valid range [1e-9, 1e8].
    pub scale: f32,
    /// Valid range 0-7.
    pub decimals: u8,
}

impl ValuePresentation {
    pub fn new(offset: i32, scale: f32, decimals: u8) -> Self {
        Self {
            offset,
            scale,
            decimals,
        }
    }
}
