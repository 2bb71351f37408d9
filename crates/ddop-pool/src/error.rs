//! Error types for object pool encoding/decoding and validation.

use thiserror::Error;

use crate::model::ObjectId;

/// Error during binary decoding of an object pool.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("unknown object type label {found:?}")]
    UnknownObjectType { found: [u8; 3] },

    #[error("object ID {id} appears more than once in the pool")]
    DuplicateObjectId { id: ObjectId },

    #[error("object ID {id:#06x} is the reserved null reference and cannot identify an object")]
    ReservedObjectId { id: ObjectId },

    #[error("pool contains more than one Device object (second at ID {id})")]
    DuplicateDevice { id: ObjectId },

    #[error("pool contains no Device object")]
    MissingDevice,

    #[error("invalid device element kind: {kind}")]
    InvalidElementKind { kind: u8 },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },
}

/// Error during binary encoding of an object pool.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{field} of object {id} is {len} bytes, exceeding the level-{level} maximum {max}")]
    DesignatorTooLong {
        id: ObjectId,
        field: &'static str,
        len: usize,
        max: usize,
        level: u8,
    },

    #[error("structure label is {len} bytes, exceeding the fixed {max}-byte field")]
    StructureLabelTooLong { len: usize, max: usize },

    #[error("extended structure label is {len} bytes, exceeding maximum {max}")]
    ExtendedStructureLabelTooLong { len: usize, max: usize },

    #[error("process data {id} sets the control-source property, which requires compatibility level 4")]
    ControlSourceRequiresVersion4 { id: ObjectId },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error from structural validation of a pool prior to serialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("element {element} has parent {parent}, which resolves to no object")]
    ParentNotResolvable { element: ObjectId, parent: ObjectId },

    #[error("element {element} has parent {parent}, which is not the device or an element")]
    ParentWrongKind { element: ObjectId, parent: ObjectId },

    #[error("element {element} lists child {child}, which resolves to no object")]
    ChildNotResolvable { element: ObjectId, child: ObjectId },

    #[error("element {element} lists child {child}, which is not process data or a property")]
    ChildWrongKind { element: ObjectId, child: ObjectId },

    #[error("object {object} references presentation {presentation}, which resolves to no object")]
    PresentationNotResolvable {
        object: ObjectId,
        presentation: ObjectId,
    },

    #[error("object {object} references presentation {presentation}, which is not a value presentation")]
    PresentationWrongKind {
        object: ObjectId,
        presentation: ObjectId,
    },

    #[error("process data {id} sets both the settable and control-source properties")]
    ConflictingProperties { id: ObjectId },

    #[error("element {id} has element number {number}, exceeding the 12-bit maximum")]
    ElementNumberOutOfRange { id: ObjectId, number: u16 },

    #[error("presentation {id} has scale {scale}, outside [1e-9, 1e8]")]
    ScaleOutOfRange { id: ObjectId, scale: f32 },

    #[error("presentation {id} has {decimals} decimals, exceeding the maximum 7")]
    DecimalsOutOfRange { id: ObjectId, decimals: u8 },
}

/// Error from an editor session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no object pool is currently open")]
    NoPool,

    #[error("{path} does not have an .iop extension")]
    NotAnIopFile { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
