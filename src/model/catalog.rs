use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::timestamp::BuildTime;
use crate::error::CatalogError;
use crate::id::BUILDING_DATA_BASE_ID;

pub const TOWN_HALL_TID: &str = "TID_BUILDING_TOWN_HALL";

/// Text id of a building type. Only the town hall is interpreted by the
/// construction logic; every other tag is carried through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TypeTag {
    TownHall,
    Custom(String),
}

impl TypeTag {
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::TownHall => TOWN_HALL_TID,
            TypeTag::Custom(s) => s,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, TypeTag::Custom(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::TownHall => TOWN_HALL_TID.to_string(),
            TypeTag::Custom(s) => s,
        }
    }
}

/// Any non-empty tid is accepted; only the town hall tid is recognized.
impl TryFrom<String> for TypeTag {
    type Error = CatalogError;

    fn try_from(tid: String) -> Result<Self, Self::Error> {
        match tid.as_str() {
            "" => Err(CatalogError::EmptyTypeTag),
            TOWN_HALL_TID => Ok(TypeTag::TownHall),
            _ => Ok(TypeTag::Custom(tid)),
        }
    }
}

/// Immutable stats for one building type at one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    pub id: i32,
    pub name: String,
    pub tid: TypeTag,
    pub level: u32,
    /// Highest level defined for this building type.
    pub max_level: u32,
    pub build_time: BuildTime,
    /// Minimum town hall level, stored 1-based like the source tables.
    pub town_hall_level: u32,
}

impl BuildingData {
    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level
    }

    pub fn is_town_hall(&self) -> bool {
        self.tid == TypeTag::TownHall
    }
}

/// Read-only stat lookup keyed by (data id, level).
pub trait Catalog: Send + Sync {
    fn is_invalid_id(&self, data_id: i32) -> bool;

    /// Human-readable description of the valid id range, prefixed by `label`.
    fn out_of_range_message(&self, label: &str) -> String;

    fn resolve(&self, data_id: i32, level: u32) -> Result<Arc<BuildingData>, CatalogError>;
}

/// Stats for one building level, as supplied to [`CatalogBuilder::building`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub build_time: BuildTime,
    pub town_hall_level: u32,
}

impl LevelSpec {
    pub fn new(build_secs: u32, town_hall_level: u32) -> Self {
        Self {
            build_time: BuildTime::from_secs(build_secs),
            town_hall_level,
        }
    }
}

/// In-memory catalog. Building data ids are assigned contiguously from
/// [`BUILDING_DATA_BASE_ID`] in the order buildings are added.
#[derive(Debug, Default)]
pub struct TableCatalog {
    rows: Vec<Vec<Arc<BuildingData>>>,
    by_name: BTreeMap<String, i32>,
}

impl TableCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn id_of(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row(&self, data_id: i32) -> Option<&Vec<Arc<BuildingData>>> {
        let index = data_id.checked_sub(BUILDING_DATA_BASE_ID)?;
        usize::try_from(index).ok().and_then(|i| self.rows.get(i))
    }
}

impl Catalog for TableCatalog {
    fn is_invalid_id(&self, data_id: i32) -> bool {
        self.row(data_id).is_none()
    }

    fn out_of_range_message(&self, label: &str) -> String {
        let last = BUILDING_DATA_BASE_ID + self.rows.len() as i32 - 1;
        format!("{label} must be between {BUILDING_DATA_BASE_ID} and {last}.")
    }

    fn resolve(&self, data_id: i32, level: u32) -> Result<Arc<BuildingData>, CatalogError> {
        let row = self.row(data_id).ok_or(CatalogError::InvalidId(data_id))?;
        row.get(level as usize)
            .cloned()
            .ok_or(CatalogError::InvalidLevel {
                data_id,
                level: level as i32,
            })
    }
}

/// Collects level tables; the first bad building is reported by [`build`].
///
/// [`build`]: CatalogBuilder::build
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: TableCatalog,
    error: Option<CatalogError>,
}

impl CatalogBuilder {
    /// Add a building type with one entry per level, starting at level 0.
    pub fn building(mut self, name: &str, tid: &str, levels: &[LevelSpec]) -> Self {
        if self.error.is_some() {
            return self;
        }
        let tid = match TypeTag::try_from(tid.to_string()) {
            Ok(tid) => tid,
            Err(e) => {
                self.error = Some(e);
                return self;
            }
        };
        let id = BUILDING_DATA_BASE_ID + self.catalog.rows.len() as i32;
        let max_level = levels.len().saturating_sub(1) as u32;
        let row = levels
            .iter()
            .enumerate()
            .map(|(level, spec)| {
                Arc::new(BuildingData {
                    id,
                    name: name.to_string(),
                    tid: tid.clone(),
                    level: level as u32,
                    max_level,
                    build_time: spec.build_time,
                    town_hall_level: spec.town_hall_level,
                })
            })
            .collect();
        self.catalog.rows.push(row);
        self.catalog.by_name.insert(name.to_string(), id);
        self
    }

    pub fn build(self) -> Result<TableCatalog, CatalogError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.catalog),
        }
    }
}
