//! Body of a correction request for one alumni record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::alumni_record::AlumniRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub roll_number: String,
    pub old_data: AlumniRecord,
    /// Only the fields being corrected, keyed by their wire names.
    pub new_data: Map<String, Value>,
}

impl UpdateRequest {
    pub fn new(record: &AlumniRecord, new_data: Map<String, Value>) -> Self {
        Self { roll_number: record.roll_number.clone(), old_data: record.clone(), new_data }
    }

    /// Parses `key=value` pairs into a patch. Blank keys are rejected.
    pub fn patch_from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Map<String, Value>, String> {
        let mut patch = Map::new();
        for pair in pairs {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(format!("expected key=value, got {pair:?}"));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(format!("missing field name in {pair:?}"));
            }
            patch.insert(key.to_string(), Value::String(value.trim().to_string()));
        }
        Ok(patch)
    }
}
