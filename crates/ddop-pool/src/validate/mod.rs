//! Structural validation of a pool prior to serialization.
//!
//! The store keeps IDs unique and prunes references on deletion; everything
//! a user can still get wrong by hand-editing fields is caught here before
//! the pool is handed to the encoder. This covers the one reference class
//! deletion does not scrub: presentation IDs on process data and property
//! objects.

use crate::error::ValidationError;
use crate::limits::{
    MAX_ELEMENT_NUMBER, MAX_PRESENTATION_DECIMALS, MAX_PRESENTATION_SCALE, MIN_PRESENTATION_SCALE,
};
use crate::model::{NO_OBJECT_ID, ObjectBody, ObjectId, ObjectPool, PropertyFlags};

/// Checks the pool's reference graph and field ranges.
///
/// Fails fast on the first violation:
/// - element parents resolve to the Device or another element (or are the
///   sentinel, meaning detached)
/// - element children resolve to process data or property objects
/// - presentation references resolve to value presentations
/// - the settable and control-source property bits are not both set
/// - element numbers fit 12 bits; presentation scale and decimals are in
///   range
pub fn validate_pool(pool: &ObjectPool) -> Result<(), ValidationError> {
    for object in pool.iter() {
        match &object.body {
            ObjectBody::Element(element) => {
                if element.parent != NO_OBJECT_ID {
                    match pool.get_by_id(element.parent) {
                        None => {
                            return Err(ValidationError::ParentNotResolvable {
                                element: object.id,
                                parent: element.parent,
                            });
                        }
                        Some(parent) => {
                            if !matches!(
                                parent.body,
                                ObjectBody::Device(_) | ObjectBody::Element(_)
                            ) {
                                return Err(ValidationError::ParentWrongKind {
                                    element: object.id,
                                    parent: element.parent,
                                });
                            }
                        }
                    }
                }
                for child in &element.children {
                    match pool.get_by_id(*child) {
                        None => {
                            return Err(ValidationError::ChildNotResolvable {
                                element: object.id,
                                child: *child,
                            });
                        }
                        Some(target) => {
                            if !matches!(
                                target.body,
                                ObjectBody::ProcessData(_) | ObjectBody::Property(_)
                            ) {
                                return Err(ValidationError::ChildWrongKind {
                                    element: object.id,
                                    child: *child,
                                });
                            }
                        }
                    }
                }
                if element.element_number > MAX_ELEMENT_NUMBER {
                    return Err(ValidationError::ElementNumberOutOfRange {
                        id: object.id,
                        number: element.element_number,
                    });
                }
            }
            ObjectBody::ProcessData(data) => {
                if data
                    .properties
                    .contains(PropertyFlags::SETTABLE | PropertyFlags::CONTROL_SOURCE)
                {
                    return Err(ValidationError::ConflictingProperties { id: object.id });
                }
                check_presentation(pool, object.id, data.presentation)?;
            }
            ObjectBody::Property(property) => {
                check_presentation(pool, object.id, property.presentation)?;
            }
            ObjectBody::Presentation(presentation) => {
                if !(MIN_PRESENTATION_SCALE..=MAX_PRESENTATION_SCALE).contains(&presentation.scale)
                {
                    return Err(ValidationError::ScaleOutOfRange {
                        id: object.id,
                        scale: presentation.scale,
                    });
                }
                if presentation.decimals > MAX_PRESENTATION_DECIMALS {
                    return Err(ValidationError::DecimalsOutOfRange {
                        id: object.id,
                        decimals: presentation.decimals,
                    });
                }
            }
            ObjectBody::Device(_) => {}
        }
    }
    Ok(())
}

fn check_presentation(
    pool: &ObjectPool,
    object: ObjectId,
    presentation: ObjectId,
) -> Result<(), ValidationError> {
    if presentation == NO_OBJECT_ID {
        return Ok(());
    }
    match pool.get_by_id(presentation) {
        None => Err(ValidationError::PresentationNotResolvable {
            object,
            presentation,
        }),
        Some(target) => {
            if matches!(target.body, ObjectBody::Presentation(_)) {
                Ok(())
            } else {
                Err(ValidationError::PresentationWrongKind {
                    object,
                    presentation,
                })
            }
        }
    }
}
