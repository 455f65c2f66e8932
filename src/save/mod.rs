mod building;
mod village;

pub use building::{BuildingJson, PendingConstruction};
pub(crate) use building::RawBuilding;
pub use village::{decode_buildings, encode_buildings};
