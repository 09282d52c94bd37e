//! Lectura de reglas de prerequisitos (`prerequisite_rules.json`).
//!
//! Formato:
//! ```json
//! { "MII21-3601": { "prerequisites": [ { "code": "MII21-1201", "is_corequisite": false } ] } }
//! ```

use super::io::normalize_code;
use crate::models::{PrerequisiteEntry, PrerequisiteRule};
use serde_json::Value;
use std::collections::HashMap;

fn entry_from_value(v: &Value) -> Option<PrerequisiteEntry> {
    let obj = v.as_object()?;
    let code = obj.get("code")?.as_str().map(normalize_code)?;
    if code.is_empty() {
        return None;
    }
    let is_corequisite = obj
        .get("is_corequisite")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Some(PrerequisiteEntry { code, is_corequisite })
}

pub fn rules_from_value(v: &Value) -> HashMap<String, PrerequisiteRule> {
    let mut out = HashMap::new();
    let Some(obj) = v.as_object() else {
        log::warn!("[knowledge] prerequisite_rules: se esperaba un objeto");
        return out;
    };
    for (code, entry) in obj {
        let prerequisites: Vec<PrerequisiteEntry> = match entry.get("prerequisites") {
            Some(Value::Array(items)) => items.iter().filter_map(entry_from_value).collect(),
            _ => Vec::new(),
        };
        out.insert(normalize_code(code), PrerequisiteRule { prerequisites });
    }
    out
}
