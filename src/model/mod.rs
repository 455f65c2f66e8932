pub mod building;
pub mod catalog;
pub mod event;
pub mod timestamp;

pub use building::{Building, NOT_CONSTRUCTED_LEVEL};
pub use catalog::{
    BuildingData, Catalog, CatalogBuilder, LevelSpec, TOWN_HALL_TID, TableCatalog, TypeTag,
};
pub use event::{BuildingEvent, BuildingProperty};
pub use timestamp::{BuildTime, UnixTime};
