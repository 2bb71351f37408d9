//! 16-bit object identifiers.
//!
//! Object IDs are the cross-reference currency of the pool: element parents,
//! element children, and presentation references are all raw IDs resolved
//! through the pool's arena, never pointers.

use crate::model::ObjectPool;

/// A 16-bit object identifier.
pub type ObjectId = u16;

/// The reserved "no object referenced" sentinel.
///
/// Never assigned to a real object; assignable IDs span `0..=0xFFFE`.
pub const NO_OBJECT_ID: ObjectId = 0xFFFF;

/// Returns the first identifier in `0..0xFFFF` not used by any object in the
/// pool, or [`NO_OBJECT_ID`] when no pool is open.
///
/// Deterministic and stateless; the scan restarts from zero on every call,
/// so removed IDs are reused.
pub fn first_unused_id(pool: Option<&ObjectPool>) -> ObjectId {
    let Some(pool) = pool else {
        return NO_OBJECT_ID;
    };
    (0..NO_OBJECT_ID)
        .find(|id| pool.get_by_id(*id).is_none())
        .unwrap_or(NO_OBJECT_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceProperty, ObjectBody, ObjectPool};

    #[test]
    fn test_no_pool_yields_sentinel() {
        assert_eq!(first_unused_id(None), NO_OBJECT_ID);
    }

    #[test]
    fn test_first_gap_is_found() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        // Root device took ID 0; occupy 1 and 2, then free up 3 by skipping it.
        let a = pool.add("a", ObjectBody::Property(DeviceProperty::new(0, 0)));
        let b = pool.add("b", ObjectBody::Property(DeviceProperty::new(0, 0)));
        let c = pool.add("c", ObjectBody::Property(DeviceProperty::new(0, 0)));
        assert_eq!((a, b, c), (1, 2, 3));

        assert!(pool.remove_by_id(3));
        let d = pool.add("d", ObjectBody::Property(DeviceProperty::new(0, 0)));
        assert_eq!(d, 3);
    }

    #[test]
    fn test_ids_zero_one_two_four_yield_three() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        for _ in 0..4 {
            pool.add("p", ObjectBody::Property(DeviceProperty::new(0, 0)));
        }
        // IDs now {0, 1, 2, 3, 4}; free 3.
        assert!(pool.remove_by_id(3));
        assert_eq!(first_unused_id(Some(&pool)), 3);
    }
}
