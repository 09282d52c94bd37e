use crate::error::{KnowledgeError, ParseError};
use serde_json::Value;
use std::path::Path;

/// Normaliza un código de ramo: recorta espacios y pasa a mayúsculas.
pub fn normalize_code(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Lee un fichero JSON. `Ok(None)` cuando el fichero no existe.
pub fn read_json_file(path: &Path) -> Result<Option<Value>, KnowledgeError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&text).map_err(|source| KnowledgeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// Parsea un entero positivo desde un número JSON o un string numérico.
fn parse_positive(v: &Value) -> Result<u32, ParseError> {
    let n: i64 = match v {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            // 3.0 se acepta, 2.5 no
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 => f as i64,
                _ => return Err(ParseError::InvalidNumber(n.to_string())),
            },
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidNumber(s.clone()))?,
        other => return Err(ParseError::InvalidNumber(other.to_string())),
    };
    if n <= 0 {
        return Err(ParseError::NonPositive(n));
    }
    u32::try_from(n).map_err(|_| ParseError::InvalidNumber(n.to_string()))
}

/// Créditos (SKS) de un ramo.
pub fn parse_credit(v: &Value) -> Result<u32, ParseError> {
    parse_positive(v)
}

/// Número de semestre.
pub fn parse_term(v: &Value) -> Result<u32, ParseError> {
    parse_positive(v)
}

/// Parsea una lista separada por comas de enteros positivos, omitiendo los
/// elementos inválidos ("6, x, 8" -> [6, 8]).
pub fn parse_number_list(s: &str) -> Vec<u32> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(|p| parse_positive(&Value::String(p.to_string())).ok())
        .collect()
}

/// Divide "a, b ,c" en ["a", "b", "c"], descartando vacíos.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn value_as_string(v: Option<&Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_credit() {
        assert_eq!(parse_credit(&json!(3)), Ok(3));
        assert_eq!(parse_credit(&json!("2")), Ok(2));
        assert_eq!(parse_credit(&json!(4.0)), Ok(4));
        assert!(matches!(parse_credit(&json!("tiga")), Err(ParseError::InvalidNumber(_))));
        assert_eq!(parse_credit(&json!(0)), Err(ParseError::NonPositive(0)));
        assert!(parse_credit(&json!(null)).is_err());
        assert!(parse_credit(&json!(2.5)).is_err());
    }

    #[test]
    fn test_parse_number_list() {
        assert_eq!(parse_number_list("6, x, 8,,-2, 10"), vec![6, 8, 10]);
        assert!(parse_number_list("").is_empty());
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  mii21-1201 "), "MII21-1201");
    }
}
