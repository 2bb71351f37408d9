//! Referential integrity maintenance on deletion.
//!
//! Deleting an object must leave no element pointing at it: parents are
//! detached to the sentinel and child lists are rebuilt without the removed
//! ID. Presentation references on process data and property objects are
//! deliberately left alone here; they are caught by `validate_pool` at the
//! serialization boundary instead.

use crate::model::id::{NO_OBJECT_ID, ObjectId};
use crate::model::object::ObjectBody;
use crate::model::pool::ObjectPool;

/// Scrubs every structural reference to `removed_id` from the pool.
///
/// Elements whose parent was removed become detached orphans; they are not
/// silently re-parented to the root. Child lists are rebuilt by filtering,
/// so adjacent duplicates of the removed ID all go and no neighboring entry
/// is skipped.
pub fn prune_references(pool: &mut ObjectPool, removed_id: ObjectId) {
    for object in pool.iter_mut() {
        if let ObjectBody::Element(element) = &mut object.body {
            if element.parent == removed_id {
                element.parent = NO_OBJECT_ID;
            }
            element.children.retain(|child| *child != removed_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::object::{DeviceElement, DeviceElementKind, DeviceProperty};

    #[test]
    fn test_children_with_adjacent_duplicates_are_all_dropped() {
        let mut pool = ObjectPool::new("Harvester", 0);
        let root = pool.root_id().unwrap();
        let a = pool.add("a", ObjectBody::Property(DeviceProperty::new(1, 0)));
        let x = pool.add("x", ObjectBody::Property(DeviceProperty::new(2, 0)));
        let b = pool.add("b", ObjectBody::Property(DeviceProperty::new(3, 0)));
        let element = pool.add(
            "Header",
            ObjectBody::Element(DeviceElement::new(DeviceElementKind::Function, 1, root)),
        );
        if let ObjectBody::Element(el) = &mut pool.get_by_id_mut(element).unwrap().body {
            el.children = vec![a, x, x, b];
        }

        assert!(pool.remove_by_id(x));

        let ObjectBody::Element(el) = &pool.get_by_id(element).unwrap().body else {
            panic!("expected element");
        };
        assert_eq!(el.children, vec![a, b]);
    }

    #[test]
    fn test_unrelated_references_survive() {
        let mut pool = ObjectPool::new("Harvester", 0);
        let root = pool.root_id().unwrap();
        let keep = pool.add("keep", ObjectBody::Property(DeviceProperty::new(1, 0)));
        let drop = pool.add("drop", ObjectBody::Property(DeviceProperty::new(2, 0)));
        let element = pool.add(
            "Reel",
            ObjectBody::Element(DeviceElement::new(DeviceElementKind::Function, 1, root)),
        );
        if let ObjectBody::Element(el) = &mut pool.get_by_id_mut(element).unwrap().body {
            el.children = vec![keep, drop];
        }

        assert!(pool.remove_by_id(drop));

        let ObjectBody::Element(el) = &pool.get_by_id(element).unwrap().body else {
            panic!("expected element");
        };
        assert_eq!(el.children, vec![keep]);
        assert_eq!(el.parent, root);
    }

    #[test]
    fn test_orphaned_element_is_detached_not_reparented() {
        let mut pool = ObjectPool::new("Harvester", 0);
        let root = pool.root_id().unwrap();
        let mid = pool.add(
            "Boom",
            ObjectBody::Element(DeviceElement::new(DeviceElementKind::Function, 1, root)),
        );
        let leaf = pool.add(
            "Section",
            ObjectBody::Element(DeviceElement::new(DeviceElementKind::Section, 2, mid)),
        );

        assert!(pool.remove_by_id(mid));

        let ObjectBody::Element(el) = &pool.get_by_id(leaf).unwrap().body else {
            panic!("expected element");
        };
        assert_eq!(el.parent, NO_OBJECT_ID);
        assert_ne!(el.parent, root);
    }
}
