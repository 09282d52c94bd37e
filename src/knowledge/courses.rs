//! Lectura del catálogo de ramos (`cs_courses.json`).

use super::io::{normalize_code, parse_credit, parse_term, value_as_string};
use crate::models::{Course, LocalizedNames};
use serde_json::Value;
use std::collections::BTreeSet;

/// Convierte un registro JSON en `Course`. Devuelve `None` si no trae código.
///
/// Campos malformados no invalidan el registro:
/// - `sks` inválido => `credits = None`
/// - cualquier entrada inválida en `semesters` => se dicta todos los semestres
pub fn course_from_value(v: &Value) -> Option<Course> {
    let obj = v.as_object()?;
    let code = value_as_string(obj.get("course_code")).map(|c| normalize_code(&c))?;

    let credits = match obj.get("sks") {
        None | Some(Value::Null) => None,
        Some(raw) => match parse_credit(raw) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("[knowledge] {}: sks ignorado ({})", code, e);
                None
            }
        },
    };

    let topics: Vec<String> = match obj.get("topics") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| t.as_str())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    let offered_terms = match obj.get("semesters") {
        Some(Value::Array(items)) => {
            let parsed: Result<BTreeSet<u32>, _> =
                items.iter().filter(|s| !s.is_null()).map(parse_term).collect();
            match parsed {
                Ok(set) => set,
                Err(e) => {
                    log::warn!("[knowledge] {}: semesters ignorado ({})", code, e);
                    BTreeSet::new()
                }
            }
        }
        _ => BTreeSet::new(),
    };

    Some(Course {
        code,
        names: LocalizedNames {
            id: value_as_string(obj.get("course_name_id")),
            en: value_as_string(obj.get("course_name_en")),
        },
        credits,
        kind: value_as_string(obj.get("type")).unwrap_or_default(),
        topics,
        offered_terms,
    })
}

/// Parsea el arreglo completo de ramos, descartando registros sin código.
pub fn courses_from_value(v: &Value) -> Vec<Course> {
    match v.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|item| {
                let c = course_from_value(item);
                if c.is_none() {
                    log::warn!("[knowledge] registro de ramo sin course_code descartado");
                }
                c
            })
            .collect(),
        None => {
            log::warn!("[knowledge] cs_courses: se esperaba un arreglo");
            Vec::new()
        }
    }
}
