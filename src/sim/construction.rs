use std::sync::Arc;

use super::context::{ConstructionContext, TownHallSnapshot};
use crate::error::InvalidOperation;
use crate::model::{Building, BuildingData, BuildingEvent};

impl Building {
    /// Whether a new construction may start.
    ///
    /// Fails with [`InvalidOperation::MissingTownHall`] when the answer
    /// depends on a town hall the village does not have.
    pub fn can_upgrade(
        &self,
        town_hall: Option<TownHallSnapshot>,
    ) -> Result<bool, InvalidOperation> {
        let data = self.data.as_ref().ok_or(InvalidOperation::Unpopulated)?;
        let Some(next) = self.next_upgrade.as_ref() else {
            return Ok(false);
        };
        if self.is_constructed && data.is_max_level() {
            return Ok(false);
        }
        // Town halls are never gated by themselves.
        if next.is_town_hall() {
            return Ok(true);
        }

        let build_data = self.build_data().ok_or(InvalidOperation::Unpopulated)?;
        let th = town_hall.ok_or(InvalidOperation::MissingTownHall)?;
        // town_hall_level is 1-based.
        Ok(build_data.town_hall_level.saturating_sub(1) <= th.level)
    }

    /// Record timing the next construction uses: the current one for the
    /// first placement, the next level afterwards.
    fn build_data(&self) -> Option<&Arc<BuildingData>> {
        if self.is_constructed {
            self.next_upgrade.as_ref()
        } else {
            self.data.as_ref()
        }
    }

    pub fn begin_construction(
        &mut self,
        ctx: &mut ConstructionContext<'_>,
    ) -> Result<(), InvalidOperation> {
        if self.is_constructing() {
            return Err(InvalidOperation::AlreadyConstructing(self.id));
        }
        if !self.can_upgrade(ctx.town_hall)? {
            let data = self.data.as_ref().ok_or(InvalidOperation::Unpopulated)?;
            return Err(InvalidOperation::CannotUpgrade {
                building_id: self.id,
                data_id: data.id,
                level: data.level,
            });
        }

        let build_time = self
            .build_data()
            .ok_or(InvalidOperation::Unpopulated)?
            .build_time;

        if build_time.is_instant() {
            self.finish_construction(ctx);
            return Ok(());
        }

        let end = ctx.now.plus_secs(i64::from(build_time.as_secs()));
        self.construction_end = Some(end);
        tracing::debug!(
            building_id = self.id,
            data_id = self.data_id(),
            level = self.level(),
            end = end.as_secs(),
            "construction started"
        );
        self.schedule(ctx);
        Ok(())
    }

    pub fn cancel_construction(
        &mut self,
        ctx: &mut ConstructionContext<'_>,
    ) -> Result<(), InvalidOperation> {
        if !self.is_constructing() {
            return Err(InvalidOperation::NotConstructing(self.id));
        }

        self.cancel_schedule(ctx);
        self.construction_end = None;
        tracing::debug!(building_id = self.id, "construction cancelled");
        ctx.events.push(BuildingEvent::ConstructionFinished {
            building_id: self.id,
            data_id: self.data_id().unwrap_or_default(),
            level: self.level().unwrap_or_default(),
            end_time: ctx.now,
            was_cancelled: true,
        });
        Ok(())
    }

    pub fn speed_up_construction(
        &mut self,
        ctx: &mut ConstructionContext<'_>,
    ) -> Result<(), InvalidOperation> {
        if !self.is_constructing() {
            return Err(InvalidOperation::NotConstructing(self.id));
        }

        self.cancel_schedule(ctx);
        self.finish_construction(ctx);
        Ok(())
    }

    /// Completion shared by timer expiry, speed-up, instant builds and
    /// expired saves. The first completion only marks the building as
    /// placed; later ones advance one level.
    pub(crate) fn finish_construction(&mut self, ctx: &mut ConstructionContext<'_>) {
        if !self.is_constructed {
            self.is_constructed = true;
        } else if let Some(next) = self.next_upgrade.take() {
            self.data = Some(next);
        }
        self.update_next_upgrade(ctx.catalog);

        self.construction_end = None;
        tracing::debug!(
            building_id = self.id,
            data_id = self.data_id(),
            level = self.level(),
            "construction finished"
        );
        ctx.events.push(BuildingEvent::ConstructionFinished {
            building_id: self.id,
            data_id: self.data_id().unwrap_or_default(),
            level: self.level().unwrap_or_default(),
            end_time: ctx.now,
            was_cancelled: false,
        });
        self.timer = None;
    }

    /// Arm the completion timer for the stored end time, replacing any
    /// previous one.
    pub(crate) fn schedule(&mut self, ctx: &mut ConstructionContext<'_>) {
        let Some(end) = self.construction_end else {
            return;
        };
        self.cancel_schedule(ctx);
        self.timer = Some(ctx.timers.arm(end, self.id));
    }

    pub(crate) fn cancel_schedule(&mut self, ctx: &mut ConstructionContext<'_>) {
        if let Some(handle) = self.timer.take() {
            ctx.timers.disarm(handle);
        }
    }
}
