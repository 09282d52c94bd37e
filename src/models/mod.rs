// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Semestre de graduación. La búsqueda termina al llegar a este semestre.
pub const GRADUATION_TERM: u32 = 8;

/// Marcador (minúsculas) de ramo obligatorio dentro de la etiqueta `type`.
pub const MANDATORY_MARKER: &str = "wajib";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNames {
    /// Nombre en indonesio (`course_name_id`)
    pub id: Option<String>,
    /// Nombre en inglés (`course_name_en`)
    pub en: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub code: String,
    pub names: LocalizedNames,
    /// SKS. `None` si el dato venía ausente o malformado.
    pub credits: Option<u32>,
    /// Etiqueta libre: decide obligatorio/electivo y la categoría de laboratorio.
    pub kind: String,
    pub topics: Vec<String>,
    /// Semestres en que se dicta. Vacío => se dicta todos los semestres.
    pub offered_terms: BTreeSet<u32>,
}

impl Course {
    pub fn is_mandatory(&self) -> bool {
        self.kind.to_lowercase().contains(MANDATORY_MARKER)
    }

    pub fn is_offered_in(&self, term: u32) -> bool {
        self.offered_terms.is_empty() || self.offered_terms.contains(&term)
    }

    /// Créditos utilizables por el planificador (0 cuando no hay dato).
    pub fn credit_weight(&self) -> u32 {
        self.credits.unwrap_or(0)
    }

    /// Nombres + tipo, en minúsculas.
    pub fn name_text(&self) -> String {
        [
            self.names.en.as_deref().unwrap_or(""),
            self.names.id.as_deref().unwrap_or(""),
            self.kind.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn topic_text(&self) -> String {
        self.topics.join(" ").to_lowercase()
    }

    /// Nombres + tópicos (+ tipo si `with_kind`), en minúsculas.
    pub fn haystack(&self, with_kind: bool) -> String {
        let topics = self.topics.join(" ");
        let mut parts: Vec<&str> = vec![
            self.names.en.as_deref().unwrap_or(""),
            self.names.id.as_deref().unwrap_or(""),
            topics.as_str(),
        ];
        if with_kind {
            parts.push(&self.kind);
        }
        parts.join(" ").to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteEntry {
    pub code: String,
    #[serde(default)]
    pub is_corequisite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteRule {
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteEntry>,
}

impl PrerequisiteRule {
    /// Separa los códigos en (no-correquisitos, correquisitos) preservando el orden.
    pub fn split(&self) -> (Vec<&str>, Vec<&str>) {
        let mut strict = Vec::new();
        let mut coreq = Vec::new();
        for p in &self.prerequisites {
            if p.is_corequisite {
                coreq.push(p.code.as_str());
            } else {
                strict.push(p.code.as_str());
            }
        }
        (strict, coreq)
    }

    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }
}

/// Categoría de laboratorio (conjunto cerrado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabCategory {
    AlgorithmsAndComputation,
    SoftwareEngineeringAndData,
    IntelligentSystems,
    ComputerSystemsAndNetworks,
}

impl LabCategory {
    pub const ALL: [LabCategory; 4] = [
        LabCategory::AlgorithmsAndComputation,
        LabCategory::SoftwareEngineeringAndData,
        LabCategory::IntelligentSystems,
        LabCategory::ComputerSystemsAndNetworks,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LabCategory::AlgorithmsAndComputation => "algorithms-and-computation",
            LabCategory::SoftwareEngineeringAndData => "software-engineering-and-data",
            LabCategory::IntelligentSystems => "intelligent-systems",
            LabCategory::ComputerSystemsAndNetworks => "computer-systems-and-networks",
        }
    }

    pub fn from_code(code: &str) -> Option<LabCategory> {
        let c = code.trim().to_lowercase();
        LabCategory::ALL.into_iter().find(|l| l.code() == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

/// Preferencia explícita de semestres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermPreference {
    Terms(BTreeSet<u32>),
    Parity(Parity),
}

/// Semestre actual del estudiante: número o paridad ("gasal"/"genap").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentTerm {
    Number(u32),
    Parity(Parity),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditPreference(pub BTreeSet<u32>);

impl CreditPreference {
    pub fn single(value: u32) -> Self {
        CreditPreference(BTreeSet::from([value]))
    }

    pub fn contains(&self, credits: u32) -> bool {
        self.0.contains(&credits)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for CreditPreference {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        CreditPreference(iter.into_iter().collect())
    }
}

/// Perfil del estudiante, construido por solicitud.
#[derive(Debug, Clone, Default)]
pub struct StudentProfile {
    pub taken: HashSet<String>,
    pub interests: Vec<String>,
    pub career: Option<String>,
    pub credit_preference: Option<CreditPreference>,
    pub credit_must_match: bool,
    pub term_preference: Option<TermPreference>,
    pub current_term: Option<CurrentTerm>,
}

impl StudentProfile {
    /// Crea un perfil normalizando los códigos aprobados (trim + mayúsculas).
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let taken = taken
            .into_iter()
            .map(|c| crate::knowledge::normalize_code(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();
        StudentProfile { taken, ..Default::default() }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.trim().is_empty())
            .collect();
        self
    }

    pub fn with_career(mut self, career: impl Into<String>) -> Self {
        let career = career.into();
        self.career = if career.trim().is_empty() { None } else { Some(career) };
        self
    }

    pub fn with_credit_preference(mut self, pref: CreditPreference, must_match: bool) -> Self {
        self.credit_preference = if pref.is_empty() { None } else { Some(pref) };
        self.credit_must_match = must_match;
        self
    }

    pub fn with_term_preference(mut self, pref: TermPreference) -> Self {
        self.term_preference = Some(pref);
        self
    }

    pub fn with_current_term(mut self, current: CurrentTerm) -> Self {
        self.current_term = Some(current);
        self
    }

    pub fn has_taken(&self, code: &str) -> bool {
        self.taken.contains(code)
    }
}

/// Resultado del recomendador de un semestre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub code: String,
    pub names: LocalizedNames,
    pub credits: Option<u32>,
    pub score: u32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStrategy {
    /// Búsqueda de costo uniforme sobre el espacio de estados (canónica)
    #[default]
    Search,
    /// Un ramo por semestre vía caminos mínimos en el grafo de prerequisitos
    Graph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCourse {
    pub code: String,
    pub names: LocalizedNames,
    pub credits: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermPlan {
    pub term: u32,
    pub courses: Vec<PlannedCourse>,
    pub total_credits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub name: String,
    pub current_term: u32,
    pub start_term: u32,
    pub schedule: Vec<TermPlan>,
    /// Último semestre alcanzado por la búsqueda (>= GRADUATION_TERM si terminó).
    pub reached_term: u32,
    pub total_cost: u64,
    pub expansions: usize,
    pub complete: bool,
    pub strategy: PlanStrategy,
}

impl Plan {
    pub fn planned_codes(&self) -> impl Iterator<Item = &str> {
        self.schedule.iter().flat_map(|t| t.courses.iter().map(|c| c.code.as_str()))
    }
}

/// Entrada del planificador multi-semestre.
#[derive(Debug, Clone)]
pub struct PlanParams {
    pub name: String,
    pub profile: StudentProfile,
    /// Semestre actual (numérico); la planificación parte en `current_term + 1`.
    pub current_term: u32,
    /// Topes de SKS asignados en orden desde el semestre inicial.
    pub caps: Vec<u32>,
}

impl PlanParams {
    pub fn new(name: impl Into<String>, profile: StudentProfile, current_term: u32) -> Self {
        PlanParams { name: name.into(), profile, current_term, caps: Vec::new() }
    }

    pub fn with_caps(mut self, caps: Vec<u32>) -> Self {
        self.caps = caps;
        self
    }

    pub fn start_term(&self) -> u32 {
        self.current_term.saturating_add(1)
    }
}
