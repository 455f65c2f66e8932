/// Base game id for buildings. Every building id is `BUILDING_BASE_ID + index`.
pub const BUILDING_BASE_ID: u32 = 500_000_000;

/// First catalog data id for building definitions.
pub const BUILDING_DATA_BASE_ID: i32 = 1_000_000;

/// Id assignment for one kind of village object.
///
/// Ids are `base + count of siblings already registered`, so they follow
/// insertion order and are stable for the lifetime of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindIds {
    base: u32,
}

impl KindIds {
    pub fn new(base: u32) -> Self {
        Self { base }
    }

    pub fn buildings() -> Self {
        Self::new(BUILDING_BASE_ID)
    }

    pub fn base(self) -> u32 {
        self.base
    }

    /// Id for the object registered after `existing` siblings.
    pub fn id_for(self, existing: usize) -> u32 {
        self.base + existing as u32
    }

    /// Position in the container for an id of this kind, if it belongs to it.
    pub fn index_of(self, id: u32) -> Option<usize> {
        id.checked_sub(self.base).map(|i| i as usize)
    }
}

impl Default for KindIds {
    fn default() -> Self {
        Self::buildings()
    }
}
