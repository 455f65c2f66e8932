use std::collections::BTreeMap;

use crate::model::Building;

/// Reusable building instances, keyed by the kind's base game id.
///
/// Everything stored here has been through [`Building::reset`].
#[derive(Debug, Default)]
pub struct ObjectPool {
    slots: BTreeMap<u32, Vec<Building>>,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&mut self, kind: u32) -> Option<Building> {
        self.slots.get_mut(&kind).and_then(Vec::pop)
    }

    pub fn release(&mut self, kind: u32, mut building: Building) {
        building.reset();
        self.slots.entry(kind).or_default().push(building);
    }

    pub fn len(&self, kind: u32) -> usize {
        self.slots.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}
