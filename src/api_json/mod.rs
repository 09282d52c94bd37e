use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::PlannerConfig;
use crate::error::ParseError;
use crate::knowledge::{parse_number_list, split_list};
use crate::models::{
    CreditPreference, CurrentTerm, GRADUATION_TERM, PlanParams, PlanStrategy, StudentProfile, TermPreference,
};

/// Lista de textos, como arreglo JSON o como string separado por comas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    Many(Vec<String>),
    Joined(String),
}

impl Default for TextList {
    fn default() -> Self {
        TextList::Many(Vec::new())
    }
}

impl TextList {
    pub fn items(&self) -> Vec<String> {
        match self {
            TextList::Many(v) => v.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
            TextList::Joined(s) => split_list(s),
        }
    }
}

/// Lista de enteros positivos: `3`, `[2, 3]` o `"2, 3"`. Los valores no
/// positivos o inválidos se omiten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberList {
    One(i64),
    Many(Vec<i64>),
    Joined(String),
}

impl NumberList {
    pub fn values(&self) -> Vec<u32> {
        let positive = |n: &i64| u32::try_from(*n).ok().filter(|v| *v > 0);
        match self {
            NumberList::One(n) => positive(n).into_iter().collect(),
            NumberList::Many(v) => v.iter().filter_map(positive).collect(),
            NumberList::Joined(s) => parse_number_list(s),
        }
    }
}

/// Semestre como número (`5`), lista (`[4, 6]`) o texto (`"5"`, `"gasal"`, `"4, 6"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermInput {
    Number(i64),
    Many(Vec<i64>),
    Text(String),
}

/// Solicitud de `/recommend`.
///
/// ```json
/// {
///   "courses_taken": ["MII21-1201", "MII21-1203"],
///   "interests": "AI, data science",
///   "target_career": "Data Scientist",
///   "sks_preference": [2, 3],
///   "sks_must_match": false,
///   "term_preference": "gasal",
///   "current_semester": 4,
///   "top_n": 5
/// }
/// ```
///
/// Todos los campos son opcionales. Preferencias de semestre ilegibles se
/// ignoran con un warning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendRequest {
    pub courses_taken: TextList,
    pub interests: TextList,
    pub target_career: Option<String>,
    pub sks_preference: Option<NumberList>,
    pub sks_must_match: bool,
    pub term_preference: Option<TermInput>,
    pub current_semester: Option<TermInput>,
    pub top_n: Option<usize>,
}

fn term_preference_from(input: &TermInput) -> Result<TermPreference, ParseError> {
    match input {
        TermInput::Number(n) => u32::try_from(*n)
            .ok()
            .filter(|t| *t > 0)
            .map(|t| TermPreference::Terms([t].into_iter().collect()))
            .ok_or_else(|| ParseError::UnknownTermToken(n.to_string())),
        TermInput::Many(items) => {
            let terms: BTreeSet<u32> = items
                .iter()
                .filter_map(|n| u32::try_from(*n).ok())
                .filter(|t| *t > 0)
                .collect();
            if terms.is_empty() {
                return Err(ParseError::UnknownTermToken(format!("{:?}", items)));
            }
            Ok(TermPreference::Terms(terms))
        }
        TermInput::Text(s) => s.parse(),
    }
}

fn current_term_from(input: &TermInput) -> Result<CurrentTerm, ParseError> {
    match input {
        TermInput::Number(n) => u32::try_from(*n)
            .map(CurrentTerm::Number)
            .map_err(|_| ParseError::InvalidNumber(n.to_string())),
        TermInput::Many(items) => Err(ParseError::UnknownTermToken(format!("{:?}", items))),
        TermInput::Text(s) => s.parse(),
    }
}

impl RecommendRequest {
    pub fn to_profile(&self) -> StudentProfile {
        let mut profile = StudentProfile::new(self.courses_taken.items())
            .with_interests(self.interests.items());
        if let Some(career) = &self.target_career {
            profile = profile.with_career(career.trim());
        }
        if let Some(pref) = &self.sks_preference {
            let pref: CreditPreference = pref.values().into_iter().collect();
            profile = profile.with_credit_preference(pref, self.sks_must_match);
        }
        if let Some(input) = &self.term_preference {
            match term_preference_from(input) {
                Ok(p) => profile = profile.with_term_preference(p),
                Err(e) => log::warn!("[api] term_preference ignorado: {}", e),
            }
        }
        if let Some(input) = &self.current_semester {
            match current_term_from(input) {
                Ok(c) => profile = profile.with_current_term(c),
                Err(e) => log::warn!("[api] current_semester ignorado: {}", e),
            }
        }
        profile
    }
}

/// Solicitud de `/plan`.
///
/// ```json
/// {
///   "name": "Rina",
///   "courses_taken": "MII21-1201, MII21-1203",
///   "interests": ["AI"],
///   "target_career": "Data Scientist",
///   "current_semester": 5,
///   "per_semester_caps": "9, 6",
///   "strategy": "search"
/// }
/// ```
///
/// `current_semester` es obligatorio y numérico. `top_candidates` y
/// `max_expansions` sobreescriben la configuración del proceso.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    pub name: Option<String>,
    pub courses_taken: TextList,
    pub interests: TextList,
    pub target_career: Option<String>,
    pub current_semester: Option<TermInput>,
    pub per_semester_caps: Option<NumberList>,
    pub strategy: PlanStrategy,
    pub top_candidates: Option<usize>,
    pub max_expansions: Option<usize>,
}

pub const DEFAULT_STUDENT_NAME: &str = "Student";

impl PlanRequest {
    pub fn to_params(&self) -> Result<PlanParams, ParseError> {
        let current = match &self.current_semester {
            None => return Err(ParseError::MissingCurrentTerm),
            Some(TermInput::Number(n)) => {
                u32::try_from(*n).map_err(|_| ParseError::InvalidNumber(n.to_string()))?
            }
            Some(TermInput::Text(s)) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| ParseError::UnknownTermToken(s.trim().to_string()))?,
            Some(TermInput::Many(items)) => {
                return Err(ParseError::UnknownTermToken(format!("{:?}", items)));
            }
        };
        if current > GRADUATION_TERM {
            return Err(ParseError::TermOutOfRange(current, GRADUATION_TERM));
        }

        let mut profile = StudentProfile::new(self.courses_taken.items())
            .with_interests(self.interests.items());
        if let Some(career) = &self.target_career {
            profile = profile.with_career(career.trim());
        }

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_STUDENT_NAME);
        let caps = self.per_semester_caps.as_ref().map(NumberList::values).unwrap_or_default();
        Ok(PlanParams::new(name, profile, current).with_caps(caps))
    }

    /// Los overrides de la solicitud nunca superan la configuración del proceso.
    pub fn planner_config(&self, base: &PlannerConfig) -> PlannerConfig {
        let top_candidates = match (self.top_candidates, base.top_candidates) {
            (None, b) => b,
            (Some(r), 0) => r,
            (Some(0), b) => b,
            (Some(r), b) => r.min(b),
        };
        PlannerConfig {
            top_candidates,
            max_expansions: self.max_expansions.map_or(base.max_expansions, |r| r.min(base.max_expansions)),
            ..base.clone()
        }
    }
}

pub fn parse_recommend_request(json_str: &str) -> Result<RecommendRequest, serde_json::Error> {
    serde_json::from_str(json_str)
}

pub fn parse_plan_request(json_str: &str) -> Result<PlanRequest, serde_json::Error> {
    serde_json::from_str(json_str)
}
