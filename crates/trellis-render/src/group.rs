use std::collections::BTreeMap;

use tracing::trace;

use crate::element::{ElementId, Polyline};

/// Display group: exclusive owner of a set of polyline elements,
/// iterated in id order. Chart renderers register one element per data
/// row and hand the whole group to the embedding renderer each frame.
#[derive(Debug, Default)]
pub struct Group {
    elements: BTreeMap<ElementId, Polyline>,
    next_id: u64,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh element id.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add(&mut self, element: Polyline) {
        self.elements.insert(element.id(), element);
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Polyline> {
        self.elements.remove(&id)
    }

    pub fn remove_all(&mut self) {
        trace!(count = self.elements.len(), "clearing display group");
        self.elements.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&Polyline> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Polyline> {
        self.elements.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polyline> {
        self.elements.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Polyline> {
        self.elements.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut group = Group::new();
        let id = group.next_id();
        group.add(Polyline::new(id, Vec::new()));
        assert_eq!(group.len(), 1);
        assert!(group.get(id).is_some());
        assert!(group.remove(id).is_some());
        assert!(group.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut group = Group::new();
        let a = group.next_id();
        let b = group.next_id();
        assert_ne!(a, b);
    }
}
