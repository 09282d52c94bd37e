//! Tablas de carrera: palabras clave por carrera y prioridad de laboratorios.
//!
//! Ambas tablas se cargan una vez (desde JSON o los valores por defecto) y se
//! consultan por contención bidireccional de la etiqueta: "Data Scientist"
//! coincide con la etiqueta "data scientist", y "ai" coincide con
//! "ai engineer".

use crate::models::LabCategory;
use serde_json::Value;
use std::collections::BTreeMap;

fn label_matches(label: &str, career: &str) -> bool {
    !career.is_empty() && (label.contains(career) || career.contains(label))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerKeywordMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl CareerKeywordMap {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let entries = entries
            .into_iter()
            .map(|(label, kws)| {
                let kws = kws
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (label.trim().to_lowercase(), kws)
            })
            .filter(|(label, _)| !label.is_empty())
            .collect();
        CareerKeywordMap { entries }
    }

    pub fn builtin() -> Self {
        let table: [(&str, &[&str]); 8] = [
            ("data scientist", &["data", "machine learning", "statist", "data mining"]),
            ("machine learning engineer", &["machine learning", "deep learning", "ml"]),
            ("software engineer", &["program", "software", "object oriented", "oop"]),
            ("ai engineer", &["artificial", "intelligence", "ai", "deep learning"]),
            ("web developer", &["web", "html", "css", "javascript", "backend", "frontend"]),
            ("network engineer", &["network", "jaringan"]),
            ("cyber security", &["security", "keamanan", "kriptografi"]),
            ("researcher", &["research", "metodologi", "tesis", "skripsi"]),
        ];
        CareerKeywordMap::new(table.iter().map(|(label, kws)| {
            (label.to_string(), kws.iter().map(|k| k.to_string()).collect())
        }))
    }

    /// `{ "career": ["kw", ...] }`. Entradas con otra forma se ignoran.
    pub fn from_value(v: &Value) -> Self {
        let Some(obj) = v.as_object() else {
            log::warn!("[knowledge] career_keywords: se esperaba un objeto");
            return CareerKeywordMap::default();
        };
        CareerKeywordMap::new(obj.iter().filter_map(|(label, kws)| {
            let kws = kws.as_array()?;
            Some((
                label.clone(),
                kws.iter().filter_map(|k| k.as_str().map(str::to_string)).collect(),
            ))
        }))
    }

    /// Palabras clave de todas las etiquetas que coinciden con `career`.
    pub fn keywords_for<'a>(&'a self, career: &str) -> impl Iterator<Item = &'a str> + 'a {
        let career = career.trim().to_lowercase();
        self.entries
            .iter()
            .filter(move |(label, _)| label_matches(label, &career))
            .flat_map(|(_, kws)| kws.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabPreferenceMap {
    entries: BTreeMap<String, Vec<LabCategory>>,
}

impl LabPreferenceMap {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<LabCategory>)>,
    {
        let entries = entries
            .into_iter()
            .map(|(label, labs)| (label.trim().to_lowercase(), labs))
            .filter(|(label, _)| !label.is_empty())
            .collect();
        LabPreferenceMap { entries }
    }

    pub fn builtin() -> Self {
        use LabCategory::*;
        let table: [(&str, &[LabCategory]); 8] = [
            ("data scientist", &[IntelligentSystems, SoftwareEngineeringAndData, AlgorithmsAndComputation]),
            ("machine learning engineer", &[IntelligentSystems, AlgorithmsAndComputation, SoftwareEngineeringAndData]),
            ("software engineer", &[SoftwareEngineeringAndData, AlgorithmsAndComputation, ComputerSystemsAndNetworks]),
            ("ai engineer", &[IntelligentSystems, AlgorithmsAndComputation, SoftwareEngineeringAndData]),
            ("web developer", &[SoftwareEngineeringAndData, ComputerSystemsAndNetworks]),
            ("network engineer", &[ComputerSystemsAndNetworks, SoftwareEngineeringAndData]),
            ("cyber security", &[ComputerSystemsAndNetworks, AlgorithmsAndComputation]),
            ("researcher", &[AlgorithmsAndComputation, IntelligentSystems, SoftwareEngineeringAndData, ComputerSystemsAndNetworks]),
        ];
        LabPreferenceMap::new(table.iter().map(|(label, labs)| (label.to_string(), labs.to_vec())))
    }

    /// `{ "career": ["intelligent-systems", ...] }`. Códigos desconocidos se omiten.
    pub fn from_value(v: &Value) -> Self {
        let Some(obj) = v.as_object() else {
            log::warn!("[knowledge] lab_preferences: se esperaba un objeto");
            return LabPreferenceMap::default();
        };
        LabPreferenceMap::new(obj.iter().filter_map(|(label, labs)| {
            let labs = labs.as_array()?;
            let mut parsed: Vec<LabCategory> = Vec::new();
            for code in labs.iter().filter_map(Value::as_str) {
                match LabCategory::from_code(code) {
                    Some(l) if !parsed.contains(&l) => parsed.push(l),
                    Some(_) => {}
                    None => log::warn!("[knowledge] {}: laboratorio desconocido {:?}", label, code),
                }
            }
            Some((label.clone(), parsed))
        }))
    }

    /// Lista de laboratorios preferidos para `career`.
    ///
    /// Coincidencia exacta primero; si no, la etiqueta coincidente más larga.
    pub fn preferences_for(&self, career: &str) -> &[LabCategory] {
        let career = career.trim().to_lowercase();
        if career.is_empty() {
            return &[];
        }
        if let Some(labs) = self.entries.get(&career) {
            return labs;
        }
        let mut best: Option<(&String, &Vec<LabCategory>)> = None;
        for (label, labs) in &self.entries {
            if !label_matches(label, &career) {
                continue;
            }
            if best.is_none_or(|(b, _)| label.len() > b.len()) {
                best = Some((label, labs));
            }
        }
        best.map(|(_, labs)| labs.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keywords_bidirectional_label_match() {
        let map = CareerKeywordMap::builtin();
        let kws: Vec<&str> = map.keywords_for("Data Scientist").collect();
        assert!(kws.contains(&"machine learning"));
        // "scientist" está contenido en la etiqueta "data scientist"
        assert!(map.keywords_for("scientist").any(|k| k == "data"));
        assert_eq!(map.keywords_for("astronaut").count(), 0);
        assert_eq!(map.keywords_for("").count(), 0);
    }

    #[test]
    fn test_lab_preferences_exact_then_longest() {
        let map = LabPreferenceMap::builtin();
        assert_eq!(
            map.preferences_for("DATA SCIENTIST").first(),
            Some(&LabCategory::IntelligentSystems)
        );
        // "senior software engineer" contiene "software engineer"
        assert_eq!(
            map.preferences_for("senior software engineer").first(),
            Some(&LabCategory::SoftwareEngineeringAndData)
        );
        assert!(map.preferences_for("chef").is_empty());
    }

    #[test]
    fn test_lab_preferences_from_value_skips_unknown_codes() {
        let v = json!({ "Pilot": ["intelligent-systems", "quantum", "intelligent-systems"] });
        let map = LabPreferenceMap::from_value(&v);
        assert_eq!(map.preferences_for("pilot"), &[LabCategory::IntelligentSystems]);
    }
}
