use serde::{Deserialize, Serialize};

use super::timestamp::UnixTime;

/// Something observable that happened to a building.
///
/// Pushed in order onto the owning village's event list; callers drain it
/// after each operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildingEvent {
    ConstructionFinished {
        building_id: u32,
        data_id: i32,
        /// Level after the construction, unchanged when cancelled.
        level: u32,
        end_time: UnixTime,
        was_cancelled: bool,
    },
    PropertyChanged {
        building_id: u32,
        property: BuildingProperty,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingProperty {
    IsLocked,
}

impl BuildingEvent {
    pub fn building_id(&self) -> u32 {
        match self {
            BuildingEvent::ConstructionFinished { building_id, .. }
            | BuildingEvent::PropertyChanged { building_id, .. } => *building_id,
        }
    }

    pub fn was_cancelled(&self) -> bool {
        matches!(
            self,
            BuildingEvent::ConstructionFinished {
                was_cancelled: true,
                ..
            }
        )
    }
}
