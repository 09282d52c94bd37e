//! Base de conocimiento: ramos, prerequisitos y tablas de carrera.
//!
//! Submódulos:
//! - `io`: lectura de JSON y parseo de campos numéricos
//! - `courses`: catálogo de ramos (`cs_courses.json`)
//! - `prerequisites`: reglas de prerequisitos (`prerequisite_rules.json`)
//! - `careers`: palabras clave por carrera y prioridad de laboratorios
//!
//! El `KnowledgeStore` se construye una sola vez y después es de sólo lectura;
//! se comparte entre solicitudes como `Arc<KnowledgeStore>`.

mod io;
mod courses;
mod prerequisites;
pub mod careers;

pub use io::{normalize_code, parse_credit, parse_number_list, parse_term, read_json_file, split_list};
pub use courses::{course_from_value, courses_from_value};
pub use prerequisites::rules_from_value;
pub use careers::{CareerKeywordMap, LabPreferenceMap};

use crate::models::{Course, PrerequisiteRule};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const COURSES_FILE: &str = "cs_courses.json";
pub const PREREQUISITES_FILE: &str = "prerequisite_rules.json";
pub const CAREER_KEYWORDS_FILE: &str = "career_keywords.json";
pub const LAB_PREFERENCES_FILE: &str = "lab_preferences.json";

#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    prerequisites: HashMap<String, PrerequisiteRule>,
    careers: CareerKeywordMap,
    labs: LabPreferenceMap,
}

impl KnowledgeStore {
    /// Construye el store. Códigos duplicados: gana el primero.
    pub fn new(
        courses: Vec<Course>,
        prerequisites: HashMap<String, PrerequisiteRule>,
        careers: CareerKeywordMap,
        labs: LabPreferenceMap,
    ) -> Self {
        let mut unique: Vec<Course> = Vec::with_capacity(courses.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        for c in courses {
            if index.contains_key(&c.code) {
                log::warn!("[knowledge] código duplicado {} descartado", c.code);
                continue;
            }
            index.insert(c.code.clone(), unique.len());
            unique.push(c);
        }
        KnowledgeStore { courses: unique, index, prerequisites, careers, labs }
    }

    /// Carga desde JSON en memoria, con las tablas de carrera por defecto.
    pub fn from_json_str(courses_json: &str, rules_json: &str) -> Result<Self, serde_json::Error> {
        let courses = courses_from_value(&serde_json::from_str(courses_json)?);
        let rules = rules_from_value(&serde_json::from_str(rules_json)?);
        Ok(KnowledgeStore::new(
            courses,
            rules,
            CareerKeywordMap::builtin(),
            LabPreferenceMap::builtin(),
        ))
    }

    /// Carga todos los ficheros desde `dir`.
    ///
    /// Nunca falla: un fichero ausente o ilegible deja su tabla vacía (o con
    /// los valores por defecto en el caso de las tablas de carrera) y se
    /// registra un aviso.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        log::info!("[knowledge] cargando base de conocimiento desde {:?}", dir);

        let courses = match read_json_file(&dir.join(COURSES_FILE)) {
            Ok(Some(v)) => courses_from_value(&v),
            Ok(None) => {
                log::warn!("[knowledge] {} no encontrado; catálogo vacío", COURSES_FILE);
                Vec::new()
            }
            Err(e) => {
                log::warn!("[knowledge] {}; catálogo vacío", e);
                Vec::new()
            }
        };

        let rules = match read_json_file(&dir.join(PREREQUISITES_FILE)) {
            Ok(Some(v)) => rules_from_value(&v),
            Ok(None) => {
                log::warn!("[knowledge] {} no encontrado; sin reglas", PREREQUISITES_FILE);
                HashMap::new()
            }
            Err(e) => {
                log::warn!("[knowledge] {}; sin reglas", e);
                HashMap::new()
            }
        };

        let careers = match read_json_file(&dir.join(CAREER_KEYWORDS_FILE)) {
            Ok(Some(v)) => CareerKeywordMap::from_value(&v),
            Ok(None) => CareerKeywordMap::builtin(),
            Err(e) => {
                log::warn!("[knowledge] {}; usando tabla de carreras por defecto", e);
                CareerKeywordMap::builtin()
            }
        };

        let labs = match read_json_file(&dir.join(LAB_PREFERENCES_FILE)) {
            Ok(Some(v)) => LabPreferenceMap::from_value(&v),
            Ok(None) => LabPreferenceMap::builtin(),
            Err(e) => {
                log::warn!("[knowledge] {}; usando prioridades de laboratorio por defecto", e);
                LabPreferenceMap::builtin()
            }
        };

        let store = KnowledgeStore::new(courses, rules, careers, labs);
        log::info!(
            "[knowledge] {} ramos, {} reglas, {} carreras, {} preferencias de laboratorio",
            store.courses.len(),
            store.prerequisites.len(),
            store.careers.len(),
            store.labs.len()
        );
        store
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&i| &self.courses[i])
    }

    /// Índice estable del ramo dentro de `courses()`.
    pub fn course_index(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn rule(&self, code: &str) -> Option<&PrerequisiteRule> {
        self.prerequisites.get(code)
    }

    pub fn rules(&self) -> &HashMap<String, PrerequisiteRule> {
        &self.prerequisites
    }

    pub fn career_keywords(&self) -> &CareerKeywordMap {
        &self.careers
    }

    pub fn lab_preferences(&self) -> &LabPreferenceMap {
        &self.labs
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Resuelve el directorio de datos: `MATKUL_DATA_DIR` si existe, si no `data/`
/// relativo al CWD y, como último recurso, `data/` junto al manifest.
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    if let Some(p) = configured {
        let p = PathBuf::from(p);
        if p.exists() {
            return p;
        }
        log::warn!("[knowledge] directorio de datos {:?} no existe", p);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local = cwd.join("data");
    if local.exists() {
        return local;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_from_missing_dir_yields_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let store = KnowledgeStore::load_from_dir(dir.path().join("nope"));
        assert!(store.is_empty());
        assert!(store.rules().is_empty());
        // las tablas de carrera caen a los valores por defecto
        assert!(!store.career_keywords().is_empty());
        assert!(!store.lab_preferences().is_empty());
    }

    #[test]
    fn test_load_from_dir_with_broken_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(COURSES_FILE),
            r#"[{"course_code": "A1", "sks": 2, "type": "Pilihan"},
                {"course_code": "a1", "sks": 3, "type": "Pilihan"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join(PREREQUISITES_FILE), "{ not json").unwrap();

        let store = KnowledgeStore::load_from_dir(dir.path());
        assert_eq!(store.len(), 1);
        assert_eq!(store.course("A1").and_then(|c| c.credits), Some(2));
        assert!(store.rules().is_empty());
    }

    #[test]
    fn test_custom_career_tables_override_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(COURSES_FILE), "[]").unwrap();
        fs::write(dir.path().join(PREREQUISITES_FILE), "{}").unwrap();
        fs::write(dir.path().join(CAREER_KEYWORDS_FILE), r#"{"Game Developer": ["graphics"]}"#).unwrap();
        let store = KnowledgeStore::load_from_dir(dir.path());
        assert_eq!(store.career_keywords().len(), 1);
        assert_eq!(store.career_keywords().keywords_for("game developer").collect::<Vec<_>>(), vec!["graphics"]);
    }
}
