use super::timers::TimerQueue;
use crate::model::{BuildingEvent, Catalog, UnixTime};

/// The town hall as seen by upgrade checks: which building it is and its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TownHallSnapshot {
    pub building_id: u32,
    pub level: u32,
}

/// Everything a construction transition needs from outside the building.
///
/// Bundled so the village can lend out disjoint pieces of itself while one
/// of its buildings is borrowed mutably.
pub struct ConstructionContext<'a> {
    pub now: UnixTime,
    pub catalog: &'a dyn Catalog,
    pub timers: &'a mut TimerQueue,
    /// Transitions push notifications here.
    pub events: &'a mut Vec<BuildingEvent>,
    pub town_hall: Option<TownHallSnapshot>,
}
