use std::sync::Arc;

use super::catalog::{BuildingData, Catalog};
use super::event::{BuildingEvent, BuildingProperty};
use super::timestamp::UnixTime;
use crate::sim::TimerHandle;

/// Serialized level of a building placed but never finished.
pub const NOT_CONSTRUCTED_LEVEL: i32 = -1;

/// One placed building in a village.
///
/// Construction transitions live in `sim::construction`; the JSON contract
/// lives in `save::building`.
#[derive(Debug, Clone, Default)]
pub struct Building {
    pub(crate) id: u32,
    pub x: i32,
    pub y: i32,
    pub(crate) data: Option<Arc<BuildingData>>,
    /// Record the next construction moves to. The current record while the
    /// building has never been constructed, `None` at max level.
    pub(crate) next_upgrade: Option<Arc<BuildingData>>,
    pub(crate) is_constructed: bool,
    pub(crate) construction_end: Option<UnixTime>,
    pub(crate) timer: Option<TimerHandle>,
    pub(crate) is_locked: bool,
}

impl Building {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn data(&self) -> Option<&Arc<BuildingData>> {
        self.data.as_ref()
    }

    pub fn next_upgrade(&self) -> Option<&Arc<BuildingData>> {
        self.next_upgrade.as_ref()
    }

    pub fn data_id(&self) -> Option<i32> {
        self.data.as_ref().map(|d| d.id)
    }

    pub fn level(&self) -> Option<u32> {
        self.data.as_ref().map(|d| d.level)
    }

    pub fn is_town_hall(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.is_town_hall())
    }

    pub fn is_constructed(&self) -> bool {
        self.is_constructed
    }

    pub fn is_constructing(&self) -> bool {
        self.construction_end.is_some()
    }

    pub fn construction_end_time(&self) -> Option<UnixTime> {
        self.construction_end
    }

    /// Seconds left on the running construction, zero once due or if idle.
    pub fn remaining_secs(&self, now: UnixTime) -> i64 {
        self.construction_end
            .map_or(0, |end| now.secs_until(end).max(0))
    }

    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Set the locked flag, notifying only on an actual change.
    pub fn set_locked(&mut self, locked: bool, events: &mut Vec<BuildingEvent>) {
        if self.is_locked == locked {
            return;
        }
        self.is_locked = locked;
        events.push(BuildingEvent::PropertyChanged {
            building_id: self.id,
            property: BuildingProperty::IsLocked,
        });
    }

    /// Install stat data and recompute the upgrade target.
    pub(crate) fn populate(
        &mut self,
        data: Arc<BuildingData>,
        is_constructed: bool,
        catalog: &dyn Catalog,
    ) {
        self.data = Some(data);
        self.is_constructed = is_constructed;
        self.update_next_upgrade(catalog);
    }

    pub(crate) fn update_next_upgrade(&mut self, catalog: &dyn Catalog) {
        self.next_upgrade = match &self.data {
            None => None,
            Some(data) if !self.is_constructed => Some(Arc::clone(data)),
            Some(data) if data.is_max_level() => None,
            Some(data) => match catalog.resolve(data.id, data.level + 1) {
                Ok(next) => Some(next),
                Err(e) => {
                    tracing::warn!(
                        data_id = data.id,
                        level = data.level,
                        max_level = data.max_level,
                        error = %e,
                        "catalog has no record for the next level"
                    );
                    None
                }
            },
        };
    }

    /// Restore every field to its freshly-constructed value before reuse.
    pub fn reset(&mut self) {
        self.id = 0;
        self.x = 0;
        self.y = 0;
        self.data = None;
        self.next_upgrade = None;
        self.is_constructed = false;
        self.construction_end = None;
        self.timer = None;
        self.is_locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::testutil::{CANNON, sample_catalog};

    #[test]
    fn unconstructed_targets_current_record() {
        let catalog = sample_catalog();
        let mut b = Building::default();
        b.populate(catalog.resolve(CANNON, 0).unwrap(), false, &catalog);
        assert_eq!(b.next_upgrade().map(|d| d.level), Some(0));
    }

    #[test]
    fn constructed_targets_next_level() {
        let catalog = sample_catalog();
        let mut b = Building::default();
        b.populate(catalog.resolve(CANNON, 1).unwrap(), true, &catalog);
        assert_eq!(b.next_upgrade().map(|d| d.level), Some(2));
    }

    #[test]
    fn max_level_has_no_upgrade() {
        let catalog = sample_catalog();
        let max = catalog.resolve(CANNON, 0).unwrap().max_level;
        let mut b = Building::default();
        b.populate(catalog.resolve(CANNON, max).unwrap(), true, &catalog);
        assert!(b.next_upgrade().is_none());
    }

    /// Catalog that declares more levels than it can resolve.
    struct TruncatedCatalog(Arc<BuildingData>);

    impl Catalog for TruncatedCatalog {
        fn is_invalid_id(&self, data_id: i32) -> bool {
            data_id != self.0.id
        }

        fn out_of_range_message(&self, label: &str) -> String {
            format!("{label} must be {}.", self.0.id)
        }

        fn resolve(&self, data_id: i32, level: u32) -> Result<Arc<BuildingData>, CatalogError> {
            if data_id != self.0.id {
                return Err(CatalogError::InvalidId(data_id));
            }
            if level != self.0.level {
                return Err(CatalogError::InvalidLevel {
                    data_id,
                    level: level as i32,
                });
            }
            Ok(Arc::clone(&self.0))
        }
    }

    #[test]
    fn missing_next_level_leaves_no_upgrade() {
        let mut record = (*sample_catalog().resolve(CANNON, 1).unwrap()).clone();
        record.max_level = 5;
        let catalog = TruncatedCatalog(Arc::new(record));
        let mut b = Building::default();
        b.populate(catalog.resolve(CANNON, 1).unwrap(), true, &catalog);
        assert!(!b.data().unwrap().is_max_level());
        assert!(b.next_upgrade().is_none());
    }

    #[test]
    fn set_locked_notifies_on_change_only() {
        let mut events = Vec::new();
        let mut b = Building::default();
        b.set_locked(false, &mut events);
        assert!(events.is_empty());
        b.set_locked(true, &mut events);
        b.set_locked(true, &mut events);
        assert_eq!(events.len(), 1);
        assert!(b.is_locked());
    }

    #[test]
    fn reset_restores_defaults() {
        let catalog = sample_catalog();
        let mut b = Building::default();
        b.populate(catalog.resolve(CANNON, 2).unwrap(), true, &catalog);
        b.id = 500_000_004;
        b.x = 12;
        b.y = 30;
        b.is_locked = true;
        b.construction_end = Some(UnixTime::from_secs(99));
        b.reset();
        assert_eq!(b.id(), 0);
        assert_eq!((b.x, b.y), (0, 0));
        assert!(b.data().is_none());
        assert!(b.next_upgrade().is_none());
        assert!(!b.is_constructed());
        assert!(!b.is_constructing());
        assert!(!b.is_locked());
    }

    #[test]
    fn remaining_secs_clamps_at_zero() {
        let mut b = Building::default();
        assert_eq!(b.remaining_secs(UnixTime::from_secs(10)), 0);
        b.construction_end = Some(UnixTime::from_secs(100));
        assert_eq!(b.remaining_secs(UnixTime::from_secs(40)), 60);
        assert_eq!(b.remaining_secs(UnixTime::from_secs(140)), 0);
    }
}
