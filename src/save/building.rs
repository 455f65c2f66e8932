use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, FormatError, InvalidOperation};
use crate::model::{Building, BuildingData, Catalog, NOT_CONSTRUCTED_LEVEL, UnixTime};

fn is_false(b: &bool) -> bool {
    !*b
}

/// One building as written to the save format.
///
/// Field order is the order the client expects. Optional fields are only
/// emitted when they carry something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingJson {
    pub data: i32,
    pub id: u32,
    pub lvl: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub const_t_end: Option<UnixTime>,
    /// Remaining seconds at encode time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub const_t: Option<i64>,
    pub x: i32,
    pub y: i32,
}

/// The keys read back from a saved building. `id` and unknown keys are
/// ignored; the village assigns ids itself.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawBuilding {
    data: Option<i32>,
    lvl: Option<i32>,
    #[serde(default)]
    locked: bool,
    const_t_end: Option<i64>,
    const_t: Option<i64>,
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}

/// What a loaded construction window asks the village to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConstruction {
    Idle,
    Arm(UnixTime),
    /// Saved end time has passed (or is within the grace window).
    CompleteNow,
}

/// Validated contents of a saved building, ready to install.
#[derive(Debug, Clone)]
pub(crate) struct DecodedBuilding {
    pub data: Arc<BuildingData>,
    pub is_constructed: bool,
    pub is_locked: bool,
    pub x: i32,
    pub y: i32,
    pub pending: PendingConstruction,
}

impl Building {
    pub fn encode(&self, now: UnixTime) -> Result<BuildingJson, InvalidOperation> {
        let data = self.data.as_ref().ok_or(InvalidOperation::Unpopulated)?;
        let lvl = if !self.is_constructed && data.level == 0 {
            NOT_CONSTRUCTED_LEVEL
        } else {
            data.level as i32
        };
        let remaining = self.remaining_secs(now);

        Ok(BuildingJson {
            data: data.id,
            id: self.id,
            lvl,
            locked: self.is_locked,
            const_t_end: self.construction_end.filter(|end| end.as_secs() != 0),
            const_t: (remaining > 0).then_some(remaining),
            x: self.x,
            y: self.y,
        })
    }

    pub(crate) fn install(&mut self, decoded: &DecodedBuilding, catalog: &dyn Catalog) {
        self.x = decoded.x;
        self.y = decoded.y;
        self.is_locked = decoded.is_locked;
        self.construction_end = None;
        self.timer = None;
        self.populate(Arc::clone(&decoded.data), decoded.is_constructed, catalog);
    }
}

impl RawBuilding {
    /// Check the required fields against the catalog and work out the
    /// construction window relative to `now`.
    pub(crate) fn decode(
        &self,
        catalog: &dyn Catalog,
        now: UnixTime,
        grace_window_secs: i64,
    ) -> Result<DecodedBuilding, FormatError> {
        let data_id = self.data.ok_or(FormatError::MissingField("data"))?;
        let lvl = self.lvl.ok_or(FormatError::MissingField("lvl"))?;
        if catalog.is_invalid_id(data_id) {
            return Err(FormatError::InvalidDataId(
                catalog.out_of_range_message("Data ID"),
            ));
        }

        let (is_constructed, level) = if lvl == NOT_CONSTRUCTED_LEVEL {
            (false, 0)
        } else {
            let level = u32::try_from(lvl)
                .map_err(|_| FormatError::InvalidLevel { data_id, level: lvl })?;
            (true, level)
        };
        let data = catalog.resolve(data_id, level).map_err(|e| match e {
            CatalogError::InvalidLevel { .. } => FormatError::InvalidLevel { data_id, level: lvl },
            _ => FormatError::InvalidDataId(catalog.out_of_range_message("Data ID")),
        })?;

        Ok(DecodedBuilding {
            data,
            is_constructed,
            is_locked: self.locked,
            x: self.x,
            y: self.y,
            pending: self.pending(now, grace_window_secs),
        })
    }

    /// `const_t_end` wins over `const_t` when both are present.
    fn pending(&self, now: UnixTime, grace_window_secs: i64) -> PendingConstruction {
        match (self.const_t_end, self.const_t) {
            (Some(end), _) => {
                if end > now.as_secs() + grace_window_secs {
                    PendingConstruction::Arm(UnixTime::from_secs(end))
                } else {
                    PendingConstruction::CompleteNow
                }
            }
            (None, Some(secs)) => PendingConstruction::Arm(now.plus_secs(secs)),
            (None, None) => PendingConstruction::Idle,
        }
    }
}
