use std::sync::Arc;

use serde::Deserialize;

use super::clock::Clock;
use super::context::{ConstructionContext, TownHallSnapshot};
use super::pool::ObjectPool;
use super::timers::TimerQueue;
use crate::config::LogicConfig;
use crate::error::{FormatError, InvalidOperation, LogicError};
use crate::id::KindIds;
use crate::model::{Building, BuildingData, BuildingEvent, Catalog, UnixTime};
use crate::save::{PendingConstruction, RawBuilding};

/// Container for the buildings of one player's village.
///
/// Owns the construction timers and the event list. All mutation goes
/// through `&mut self`, so there is at most one transition in flight.
pub struct Village {
    pub config: LogicConfig,
    catalog: Arc<dyn Catalog>,
    clock: Arc<dyn Clock>,
    ids: KindIds,
    buildings: Vec<Building>,
    town_hall: Option<u32>,
    timers: TimerQueue,
    events: Vec<BuildingEvent>,
    pool: ObjectPool,
}

impl Village {
    pub fn new(catalog: Arc<dyn Catalog>, clock: Arc<dyn Clock>) -> Self {
        let config = LogicConfig::new();
        Self {
            ids: KindIds::new(config.building_base_id),
            config,
            catalog,
            clock,
            buildings: Vec::new(),
            town_hall: None,
            timers: TimerQueue::new(),
            events: Vec::new(),
            pool: ObjectPool::new(),
        }
    }

    /// Must be applied before any building is registered.
    pub fn with_config(mut self, config: LogicConfig) -> Self {
        self.ids = KindIds::new(config.building_base_id);
        self.config = config;
        self
    }

    /// Recycle instances from `pool` when placing or loading buildings.
    pub fn with_pool(mut self, pool: ObjectPool) -> Self {
        self.pool = pool;
        self
    }

    pub fn now(&self) -> UnixTime {
        self.clock.now()
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, id: u32) -> Option<&Building> {
        self.index_of(id).ok().map(|i| &self.buildings[i])
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn town_hall(&self) -> Option<&Building> {
        self.town_hall.and_then(|id| self.building(id))
    }

    pub fn town_hall_level(&self) -> Option<u32> {
        self.town_hall().and_then(Building::level)
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn events(&self) -> &[BuildingEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BuildingEvent> {
        std::mem::take(&mut self.events)
    }

    fn town_hall_snapshot(&self) -> Option<TownHallSnapshot> {
        let th = self.town_hall()?;
        Some(TownHallSnapshot {
            building_id: th.id(),
            level: th.level()?,
        })
    }

    fn index_of(&self, id: u32) -> Result<usize, InvalidOperation> {
        self.ids
            .index_of(id)
            .filter(|&i| self.buildings.get(i).is_some_and(|b| b.id() == id))
            .ok_or(InvalidOperation::UnknownBuilding(id))
    }

    // -----------------------------------------------------------------------
    // Placement and registration
    // -----------------------------------------------------------------------

    /// Place a new, not yet constructed building at level 0.
    pub fn place_building(&mut self, data_id: i32, x: i32, y: i32) -> Result<u32, LogicError> {
        let data = self.catalog.resolve(data_id, 0)?;
        Ok(self.place(data, false, x, y)?)
    }

    /// Place an already constructed building at `level`.
    pub fn place_constructed(
        &mut self,
        data_id: i32,
        level: u32,
        x: i32,
        y: i32,
    ) -> Result<u32, LogicError> {
        let data = self.catalog.resolve(data_id, level)?;
        Ok(self.place(data, true, x, y)?)
    }

    fn place(
        &mut self,
        data: Arc<BuildingData>,
        is_constructed: bool,
        x: i32,
        y: i32,
    ) -> Result<u32, InvalidOperation> {
        let mut building = self.acquire();
        building.x = x;
        building.y = y;
        building.populate(data, is_constructed, &*self.catalog);
        if let Err(e) = self.check_town_hall(&building, None) {
            self.pool.release(self.ids.base(), building);
            return Err(e);
        }
        Ok(self.register(building))
    }

    fn acquire(&mut self) -> Building {
        self.pool.try_acquire(self.ids.base()).unwrap_or_default()
    }

    fn register(&mut self, mut building: Building) -> u32 {
        let id = self.ids.id_for(self.buildings.len());
        building.id = id;
        let is_town_hall = building.is_town_hall();
        if let Some(data) = building.data() {
            tracing::debug!(
                building_id = id,
                data_id = data.id,
                name = %data.name,
                level = data.level,
                "building registered"
            );
        }
        self.buildings.push(building);
        if is_town_hall {
            self.town_hall = Some(id);
            tracing::info!(building_id = id, "town hall designated");
        }
        id
    }

    /// A village may hold only one town hall. `own_id` is the building's id
    /// when it is already registered.
    fn check_town_hall(
        &self,
        building: &Building,
        own_id: Option<u32>,
    ) -> Result<(), InvalidOperation> {
        if !building.is_town_hall() {
            return Ok(());
        }
        match self.town_hall {
            Some(existing) if Some(existing) != own_id => {
                Err(InvalidOperation::DuplicateTownHall { existing })
            }
            _ => Ok(()),
        }
    }

    /// Re-run town hall designation after a building's stat data changed.
    fn refresh_town_hall(&mut self, id: u32) -> Result<(), InvalidOperation> {
        let index = self.index_of(id)?;
        self.check_town_hall(&self.buildings[index], Some(id))?;
        if self.buildings[index].is_town_hall() && self.town_hall != Some(id) {
            self.town_hall = Some(id);
            tracing::info!(building_id = id, "town hall designated");
        }
        Ok(())
    }

    /// Tear the village down, returning every building to the pool.
    pub fn into_pool(mut self) -> ObjectPool {
        self.timers.clear();
        let kind = self.ids.base();
        for building in self.buildings.drain(..) {
            self.pool.release(kind, building);
        }
        self.pool
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    fn with_building<R>(
        &mut self,
        id: u32,
        f: impl FnOnce(&mut Building, &mut ConstructionContext<'_>) -> Result<R, InvalidOperation>,
    ) -> Result<R, InvalidOperation> {
        let index = self.index_of(id)?;
        let mut ctx = ConstructionContext {
            now: self.clock.now(),
            town_hall: self.town_hall_snapshot(),
            catalog: &*self.catalog,
            timers: &mut self.timers,
            events: &mut self.events,
        };
        let result = f(&mut self.buildings[index], &mut ctx)?;
        self.refresh_town_hall(id)?;
        Ok(result)
    }

    pub fn can_upgrade(&self, id: u32) -> Result<bool, InvalidOperation> {
        let index = self.index_of(id)?;
        self.buildings[index].can_upgrade(self.town_hall_snapshot())
    }

    pub fn begin_construction(&mut self, id: u32) -> Result<(), InvalidOperation> {
        self.with_building(id, |b, ctx| b.begin_construction(ctx))
    }

    pub fn cancel_construction(&mut self, id: u32) -> Result<(), InvalidOperation> {
        self.with_building(id, |b, ctx| b.cancel_construction(ctx))
    }

    pub fn speed_up_construction(&mut self, id: u32) -> Result<(), InvalidOperation> {
        self.with_building(id, |b, ctx| b.speed_up_construction(ctx))
    }

    pub fn set_locked(&mut self, id: u32, locked: bool) -> Result<(), InvalidOperation> {
        let index = self.index_of(id)?;
        self.buildings[index].set_locked(locked, &mut self.events);
        Ok(())
    }

    /// Complete every construction whose timer is due. Returns how many
    /// completed.
    pub fn run_due_timers(&mut self) -> usize {
        let due = self.timers.pop_due(self.clock.now());
        let mut completed = 0;
        for timer in due {
            let handle = timer.handle;
            let result = self.with_building(timer.building_id, |b, ctx| {
                if b.timer != Some(handle) {
                    return Ok(false);
                }
                b.timer = None;
                b.finish_construction(ctx);
                Ok(true)
            });
            match result {
                Ok(true) => completed += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        building_id = timer.building_id,
                        error = %e,
                        "timer fired for unknown building"
                    );
                }
            }
        }
        completed
    }

    // -----------------------------------------------------------------------
    // Save format
    // -----------------------------------------------------------------------

    pub fn encode_building(&self, id: u32) -> Result<serde_json::Value, LogicError> {
        let index = self.index_of(id)?;
        let json = self.buildings[index].encode(self.clock.now())?;
        Ok(serde_json::to_value(json).map_err(FormatError::Json)?)
    }

    pub fn decode_building_str(&mut self, json: &str) -> Result<u32, LogicError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(FormatError::Json)?;
        self.decode_building(&value)
    }

    /// Load one saved building and register it. On error nothing is
    /// registered.
    pub fn decode_building(&mut self, value: &serde_json::Value) -> Result<u32, LogicError> {
        if !value.is_object() {
            return Err(FormatError::NotAnObject.into());
        }
        let raw = RawBuilding::deserialize(value).map_err(FormatError::Json)?;
        let now = self.clock.now();
        let decoded = raw.decode(&*self.catalog, now, self.config.grace_window_secs)?;

        let mut building = self.acquire();
        building.install(&decoded, &*self.catalog);
        if let Err(e) = self.check_town_hall(&building, None) {
            self.pool.release(self.ids.base(), building);
            return Err(e.into());
        }
        let id = self.register(building);

        match decoded.pending {
            PendingConstruction::Idle => {}
            PendingConstruction::Arm(end) => {
                self.with_building(id, |b, ctx| {
                    b.construction_end = Some(end);
                    b.schedule(ctx);
                    Ok(())
                })?;
            }
            PendingConstruction::CompleteNow => {
                tracing::warn!(building_id = id, "saved construction already due, completing");
                self.with_building(id, |b, ctx| {
                    b.finish_construction(ctx);
                    Ok(())
                })?;
            }
        }
        Ok(id)
    }
}

impl std::fmt::Debug for Village {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Village")
            .field("config", &self.config)
            .field("buildings", &self.buildings)
            .field("town_hall", &self.town_hall)
            .field("timers", &self.timers)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
