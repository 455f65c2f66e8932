pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod save;
pub mod sim;

#[cfg(test)]
mod testutil;

pub use config::LogicConfig;
pub use error::{CatalogError, FormatError, InvalidOperation, LogicError};
pub use model::{
    Building, BuildingData, BuildingEvent, Catalog, NOT_CONSTRUCTED_LEVEL, TableCatalog,
    UnixTime,
};
pub use sim::{Clock, ManualClock, ObjectPool, SystemClock, Village};
