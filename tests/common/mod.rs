use std::sync::Arc;

use village_logic::model::{LevelSpec, TOWN_HALL_TID, TableCatalog};
use village_logic::{ManualClock, UnixTime, Village};

pub const TOWN_HALL: i32 = 1_000_000;
pub const CANNON: i32 = 1_000_001;
pub const WALL: i32 = 1_000_002;
pub const T0: i64 = 1_700_000_000;

pub fn build_test_catalog() -> TableCatalog {
    TableCatalog::builder()
        .building(
            "Town Hall",
            TOWN_HALL_TID,
            &[
                LevelSpec::new(0, 1),
                LevelSpec::new(3600, 1),
                LevelSpec::new(7200, 1),
                LevelSpec::new(14_400, 1),
                LevelSpec::new(28_800, 1),
            ],
        )
        .building(
            "Cannon",
            "TID_BUILDING_CANNON",
            &[
                LevelSpec::new(60, 1),
                LevelSpec::new(900, 1),
                LevelSpec::new(3600, 2),
                LevelSpec::new(7200, 3),
                LevelSpec::new(14_400, 5),
            ],
        )
        .building(
            "Wall",
            "TID_BUILDING_WALL",
            &[LevelSpec::new(0, 2), LevelSpec::new(0, 2), LevelSpec::new(0, 3)],
        )
        .build()
        .expect("test catalog is well formed")
}

pub fn build_test_village() -> (Village, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(UnixTime::from_secs(T0)));
    let village = Village::new(Arc::new(build_test_catalog()), clock.clone());
    (village, clock)
}
