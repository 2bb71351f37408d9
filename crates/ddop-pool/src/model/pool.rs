//! The object pool store.
//!
//! Owns every object in the pool, indexed by ID through an arena map and by
//! insertion order through an order vector. Insertion order is load-bearing:
//! it determines the serialization table order and breaks ties in the tree
//! projection.

use rustc_hash::FxHashMap;

use crate::model::id::{NO_OBJECT_ID, ObjectId, first_unused_id};
use crate::model::integrity;
use crate::model::object::{Device, ObjectBody, PoolObject};

/// An ordered collection of pool objects with a single Device root.
///
/// All cross-references between objects are raw [`ObjectId`]s resolved
/// through [`ObjectPool::get_by_id`]; a lookup miss is an `Option::None`,
/// never a dangling pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPool {
    objects: FxHashMap<ObjectId, PoolObject>,
    order: Vec<ObjectId>,
}

impl ObjectPool {
    /// Creates a pool containing its root Device.
    ///
    /// The root is the only object created implicitly; everything else
    /// enters through [`ObjectPool::add`].
    pub fn new(designator: impl Into<String>, iso_name: u64) -> Self {
        let mut pool = Self::empty();
        pool.add(designator, ObjectBody::Device(Device::new(iso_name)));
        pool
    }

    /// Creates a pool with no objects at all, for the decoder to fill.
    /// Callers must ensure a Device ends up present.
    pub(crate) fn empty() -> Self {
        Self {
            objects: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Adds an object, allocating the first unused ID for it.
    ///
    /// Infallible: the ID space holds 65535 objects, far beyond any
    /// interactively built pool.
    pub fn add(&mut self, designator: impl Into<String>, body: ObjectBody) -> ObjectId {
        let id = first_unused_id(Some(self));
        self.objects.insert(
            id,
            PoolObject {
                id,
                designator: designator.into(),
                body,
            },
        );
        self.order.push(id);
        id
    }

    /// Inserts a fully formed object under its own ID, preserving call
    /// order. Returns false (no mutation) when the ID is taken or reserved.
    pub(crate) fn insert_raw(&mut self, object: PoolObject) -> bool {
        if object.id == NO_OBJECT_ID || self.objects.contains_key(&object.id) {
            return false;
        }
        self.order.push(object.id);
        self.objects.insert(object.id, object);
        true
    }

    /// Looks up an object by ID.
    pub fn get_by_id(&self, id: ObjectId) -> Option<&PoolObject> {
        self.objects.get(&id)
    }

    /// Looks up an object by ID for mutation.
    ///
    /// The object's `id` field itself must not be edited here; re-IDing goes
    /// through [`ObjectPool::set_id`] so the conflict guard applies.
    pub fn get_by_id_mut(&mut self, id: ObjectId) -> Option<&mut PoolObject> {
        self.objects.get_mut(&id)
    }

    /// Looks up an object by insertion index.
    pub fn get_by_index(&self, index: usize) -> Option<&PoolObject> {
        self.order.get(index).and_then(|id| self.objects.get(id))
    }

    /// Re-IDs the object currently holding `current`.
    ///
    /// Rejects (returns false, no mutation) when `new` is held by a
    /// different object, when `new` is the reserved sentinel, or when
    /// `current` resolves to nothing. References elsewhere in the pool keep
    /// pointing at `current`; the projector and validator treat them as
    /// dangling.
    pub fn set_id(&mut self, current: ObjectId, new: ObjectId) -> bool {
        if new == current {
            return self.objects.contains_key(&current);
        }
        if new == NO_OBJECT_ID || self.objects.contains_key(&new) {
            return false;
        }
        let Some(mut object) = self.objects.remove(&current) else {
            return false;
        };
        object.id = new;
        self.objects.insert(new, object);
        if let Some(slot) = self.order.iter_mut().find(|slot| **slot == current) {
            *slot = new;
        }
        true
    }

    /// Removes an object and prunes every structural reference to it.
    ///
    /// The Device root is non-removable. Returns whether a removal occurred.
    pub fn remove_by_id(&mut self, id: ObjectId) -> bool {
        match self.objects.get(&id) {
            None => return false,
            Some(object) => {
                if matches!(object.body, ObjectBody::Device(_)) {
                    return false;
                }
            }
        }
        self.objects.remove(&id);
        self.order.retain(|entry| *entry != id);
        integrity::prune_references(self, id);
        true
    }

    /// Number of objects in the pool, root included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PoolObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Iterates objects mutably, in arbitrary order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PoolObject> {
        self.objects.values_mut()
    }

    /// ID of the root Device.
    ///
    /// Resolved by scanning rather than cached so that re-IDing the root
    /// through [`ObjectPool::set_id`] cannot leave a stale value behind.
    pub fn root_id(&self) -> Option<ObjectId> {
        self.iter()
            .find(|object| matches!(object.body, ObjectBody::Device(_)))
            .map(|object| object.id)
    }

    /// The root Device payload.
    pub fn device(&self) -> Option<&Device> {
        self.iter().find_map(|object| match &object.body {
            ObjectBody::Device(device) => Some(device),
            _ => None,
        })
    }

    /// The root Device payload, mutable.
    pub fn device_mut(&mut self) -> Option<&mut Device> {
        self.objects.values_mut().find_map(|object| match &mut object.body {
            ObjectBody::Device(device) => Some(device),
            _ => None,
        })
    }
}
