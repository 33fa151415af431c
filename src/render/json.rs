use serde::Serialize;

use crate::error::DrugLabelError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, DrugLabelError> {
    Ok(serde_json::to_string_pretty(value)?)
}
