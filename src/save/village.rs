use serde_json::Value;

use crate::error::{FormatError, LogicError};
use crate::sim::Village;

/// Encode every building in registration order as a JSON array.
pub fn encode_buildings(village: &Village) -> Result<Value, LogicError> {
    let buildings = village
        .buildings()
        .iter()
        .map(|b| village.encode_building(b.id()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(buildings))
}

/// Load a JSON array of saved buildings into `village`, returning the new
/// ids in array order. Stops at the first bad entry; entries before it stay
/// registered.
pub fn decode_buildings(village: &mut Village, value: &Value) -> Result<Vec<u32>, LogicError> {
    let entries = value.as_array().ok_or(FormatError::NotAnArray)?;
    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        ids.push(village.decode_building(entry)?);
    }
    tracing::debug!(count = ids.len(), "buildings loaded");
    Ok(ids)
}
