//! Cycle-safe hierarchical projection of the pool.
//!
//! The tree shown to the user (and walked before serialization) is derived
//! entirely from the `parent` and `children` fields, both of which are
//! user-editable raw IDs. The projection therefore has to survive arbitrary
//! reference graphs: parent cycles, self-parents, dangling IDs, duplicate
//! child entries. It carries a visited set over the recursion nodes and
//! omits anything it cannot resolve, rather than failing.

use rustc_hash::FxHashSet;

use crate::model::{NO_OBJECT_ID, ObjectBody, ObjectId, ObjectPool, ObjectType};

/// One row of the projected tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayNode {
    pub id: ObjectId,
    pub object_type: ObjectType,
    /// Nesting depth; the Device root is 0.
    pub depth: usize,
}

/// Projects the pool into its display tree.
///
/// Yields the Device root, then depth-first under each element: its
/// process-data and property children in list order (each followed by its
/// resolvable value presentation as a nested leaf), then its child elements
/// in pool insertion order. Restartable; the same pool state always produces
/// the same sequence.
pub fn project(pool: &ObjectPool) -> TreeProjection<'_> {
    let mut stack = Vec::new();
    if let Some(root) = pool.root_id() {
        stack.push((root, 0));
    }
    TreeProjection {
        pool,
        stack,
        visited: FxHashSet::default(),
    }
}

/// Lazy iterator over [`DisplayNode`]s, driven by an explicit stack.
#[derive(Debug)]
pub struct TreeProjection<'a> {
    pool: &'a ObjectPool,
    stack: Vec<(ObjectId, usize)>,
    visited: FxHashSet<ObjectId>,
}

impl TreeProjection<'_> {
    /// Pushes the elements whose `parent` is `id`, reversed so the stack
    /// pops them in pool insertion order.
    fn push_child_elements(&mut self, id: ObjectId, depth: usize) {
        let child_elements: Vec<ObjectId> = self
            .pool
            .iter()
            .filter_map(|object| match &object.body {
                ObjectBody::Element(element) if element.parent == id => Some(object.id),
                _ => None,
            })
            .collect();
        for child in child_elements.into_iter().rev() {
            self.stack.push((child, depth + 1));
        }
    }

    fn resolves_to_recursion_node(&self, id: ObjectId) -> bool {
        matches!(
            self.pool.get_by_id(id).map(|object| &object.body),
            Some(ObjectBody::Device(_) | ObjectBody::Element(_))
        )
    }

    /// Queues a presentation reference as a nested leaf, when it actually
    /// resolves to one.
    fn push_presentation(&mut self, presentation: ObjectId, depth: usize) {
        if presentation == NO_OBJECT_ID {
            return;
        }
        if matches!(
            self.pool.get_by_id(presentation).map(|object| &object.body),
            Some(ObjectBody::Presentation(_))
        ) {
            self.stack.push((presentation, depth + 1));
        }
    }
}

impl Iterator for TreeProjection<'_> {
    type Item = DisplayNode;

    fn next(&mut self) -> Option<DisplayNode> {
        loop {
            let (id, depth) = self.stack.pop()?;
            // Dangling reference: omit the node and move on.
            let Some(object) = self.pool.get_by_id(id) else {
                continue;
            };

            match &object.body {
                ObjectBody::Device(_) | ObjectBody::Element(_) => {
                    // Recursion nodes enter the visited set; a repeat visit
                    // means the user wired a cycle, so skip instead of
                    // descending again.
                    if !self.visited.insert(id) {
                        continue;
                    }
                    self.push_child_elements(id, depth);
                    if let ObjectBody::Element(element) = &object.body {
                        // Children are supposed to be leaves; an element ID
                        // smuggled into the list is skipped here so elements
                        // only ever enter through their parent field.
                        for child in element.children.iter().rev() {
                            if !self.resolves_to_recursion_node(*child) {
                                self.stack.push((*child, depth + 1));
                            }
                        }
                    }
                }
                ObjectBody::ProcessData(data) => {
                    self.push_presentation(data.presentation, depth);
                }
                ObjectBody::Property(property) => {
                    self.push_presentation(property.presentation, depth);
                }
                ObjectBody::Presentation(_) => {}
            }

            return Some(DisplayNode {
                id,
                object_type: object.object_type(),
                depth,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DeviceElement, DeviceElementKind, DeviceProcessData, DeviceProperty, PropertyFlags,
        TriggerFlags, ValuePresentation,
    };

    fn element(pool: &mut ObjectPool, name: &str, number: u16, parent: ObjectId) -> ObjectId {
        pool.add(
            name,
            ObjectBody::Element(DeviceElement::new(
                DeviceElementKind::Function,
                number,
                parent,
            )),
        )
    }

    fn set_parent(pool: &mut ObjectPool, id: ObjectId, parent: ObjectId) {
        let ObjectBody::Element(el) = &mut pool.get_by_id_mut(id).unwrap().body else {
            panic!("expected element");
        };
        el.parent = parent;
    }

    #[test]
    fn test_projection_order_and_depth() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        let root = pool.root_id().unwrap();
        let boom = element(&mut pool, "Boom", 1, root);
        let section = element(&mut pool, "Section 1", 2, boom);

        let presentation = pool.add(
            "L/ha",
            ObjectBody::Presentation(ValuePresentation::new(0, 0.01, 1)),
        );
        let mut rate = DeviceProcessData::new(
            2,
            PropertyFlags::MEMBER_OF_DEFAULT_SET,
            TriggerFlags::ON_CHANGE,
        );
        rate.presentation = presentation;
        let rate = pool.add("Actual rate", ObjectBody::ProcessData(rate));
        let width = pool.add("Width", ObjectBody::Property(DeviceProperty::new(67, 3000)));
        {
            let ObjectBody::Element(el) = &mut pool.get_by_id_mut(boom).unwrap().body else {
                panic!("expected element");
            };
            el.children = vec![rate, width];
        }

        let nodes: Vec<DisplayNode> = project(&pool).collect();
        let ids: Vec<ObjectId> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![root, boom, rate, presentation, width, section]);

        let depths: Vec<usize> = nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 3, 2, 2]);
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        let root = pool.root_id().unwrap();
        let a = element(&mut pool, "a", 1, root);
        let b = element(&mut pool, "b", 2, a);
        // User wires a cycle: a's parent becomes b while b's parent is a.
        set_parent(&mut pool, a, b);

        let nodes: Vec<DisplayNode> = project(&pool).collect();
        assert!(nodes.iter().filter(|n| n.id == a).count() <= 1);
        assert!(nodes.iter().filter(|n| n.id == b).count() <= 1);
    }

    #[test]
    fn test_self_parent_terminates() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        let root = pool.root_id().unwrap();
        let a = element(&mut pool, "a", 1, root);
        set_parent(&mut pool, a, a);

        let nodes: Vec<DisplayNode> = project(&pool).collect();
        assert_eq!(nodes.iter().filter(|n| n.id == a).count(), 0);
    }

    #[test]
    fn test_dangling_references_are_omitted() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        let root = pool.root_id().unwrap();
        let boom = element(&mut pool, "Boom", 1, root);
        {
            let ObjectBody::Element(el) = &mut pool.get_by_id_mut(boom).unwrap().body else {
                panic!("expected element");
            };
            el.children = vec![9999];
        }
        let mut orphan_rate = DeviceProcessData::new(1, PropertyFlags::empty(), TriggerFlags::TOTAL);
        orphan_rate.presentation = 8888;
        let rate = pool.add("Rate", ObjectBody::ProcessData(orphan_rate));
        {
            let ObjectBody::Element(el) = &mut pool.get_by_id_mut(boom).unwrap().body else {
                panic!("expected element");
            };
            el.children.push(rate);
        }

        let ids: Vec<ObjectId> = project(&pool).map(|n| n.id).collect();
        assert_eq!(ids, vec![root, boom, rate]);
    }

    #[test]
    fn test_shared_presentation_appears_under_each_referrer() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        let root = pool.root_id().unwrap();
        let boom = element(&mut pool, "Boom", 1, root);
        let presentation = pool.add(
            "kg",
            ObjectBody::Presentation(ValuePresentation::new(0, 1.0, 0)),
        );
        let mut first = DeviceProcessData::new(6, PropertyFlags::empty(), TriggerFlags::TOTAL);
        first.presentation = presentation;
        let first = pool.add("Setpoint", ObjectBody::ProcessData(first));
        let mut second = DeviceProcessData::new(7, PropertyFlags::empty(), TriggerFlags::TOTAL);
        second.presentation = presentation;
        let second = pool.add("Actual", ObjectBody::ProcessData(second));
        {
            let ObjectBody::Element(el) = &mut pool.get_by_id_mut(boom).unwrap().body else {
                panic!("expected element");
            };
            el.children = vec![first, second];
        }

        let ids: Vec<ObjectId> = project(&pool).map(|n| n.id).collect();
        assert_eq!(
            ids,
            vec![root, boom, first, presentation, second, presentation]
        );
    }

    #[test]
    fn test_projection_is_restartable() {
        let mut pool = ObjectPool::new("Sprayer", 0);
        let root = pool.root_id().unwrap();
        element(&mut pool, "Boom", 1, root);

        let first: Vec<DisplayNode> = project(&pool).collect();
        let second: Vec<DisplayNode> = project(&pool).collect();
        assert_eq!(first, second);
    }
}
