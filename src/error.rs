use thiserror::Error;

/// A construction or registration request the current state does not allow.
///
/// Returned synchronously; the building and its village are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error("building {0} is already in construction")]
    AlreadyConstructing(u32),
    #[error("building {0} is not in construction")]
    NotConstructing(u32),
    #[error(
        "building {building_id} (data {data_id}, level {level}) is maxed or town hall level too low"
    )]
    CannotUpgrade {
        building_id: u32,
        data_id: i32,
        level: u32,
    },
    #[error("village does not contain a town hall")]
    MissingTownHall,
    #[error("village already contains a town hall (building {existing})")]
    DuplicateTownHall { existing: u32 },
    #[error("building has no stat data assigned")]
    Unpopulated,
    #[error("village has no building with id {0}")]
    UnknownBuilding(u32),
}

/// Lookup failure from the building catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown building data id {0}")]
    InvalidId(i32),
    #[error("building data {data_id} has no level {level}")]
    InvalidLevel { data_id: i32, level: i32 },
    #[error("building type tag cannot be empty")]
    EmptyTypeTag,
}

/// Malformed building JSON. Decoding stops and nothing is registered.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("building JSON does not contain a '{0}' field")]
    MissingField(&'static str),
    #[error("building JSON is not an object")]
    NotAnObject,
    #[error("buildings JSON is not an array")]
    NotAnArray,
    #[error("building JSON contained an invalid building data id. {0}")]
    InvalidDataId(String),
    #[error("building JSON contained an invalid level {level} for data {data_id}")]
    InvalidLevel { data_id: i32, level: i32 },
    #[error("malformed building JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LogicError {
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperation),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
