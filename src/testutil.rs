use std::sync::Arc;

use crate::model::{LevelSpec, TOWN_HALL_TID, TableCatalog, UnixTime};
use crate::sim::{ManualClock, Village};

pub const TOWN_HALL: i32 = 1_000_000;
pub const CANNON: i32 = 1_000_001;
pub const WALL: i32 = 1_000_002;

/// Fixed start time for deterministic tests.
pub const T0: i64 = 1_700_000_000;

// ---------------------------------------------------------------------------
// Catalog fixture
// ---------------------------------------------------------------------------

/// Town hall (levels 0-5), cannon (0-5, gated by town hall), wall (instant).
pub fn sample_catalog() -> TableCatalog {
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
                LevelSpec::new(43_200, 1),
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
                LevelSpec::new(28_800, 6),
            ],
        )
        .building(
            "Wall",
            "TID_BUILDING_WALL",
            &[
                LevelSpec::new(0, 2),
                LevelSpec::new(0, 2),
                LevelSpec::new(0, 3),
            ],
        )
        .build()
        .expect("sample catalog is well formed")
}

// ---------------------------------------------------------------------------
// Village helpers
// ---------------------------------------------------------------------------

/// Empty village on a manual clock at [`T0`]. Returns the clock handle too.
pub fn empty_village() -> (Village, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(UnixTime::from_secs(T0)));
    let village = Village::new(Arc::new(sample_catalog()), clock.clone());
    (village, clock)
}

/// Village with a constructed town hall at `level`. Returns (village, clock, town hall id).
pub fn village_with_town_hall(level: u32) -> (Village, Arc<ManualClock>, u32) {
    let (mut village, clock) = empty_village();
    let th = village
        .place_constructed(TOWN_HALL, level, 10, 10)
        .expect("town hall placement failed");
    (village, clock, th)
}
