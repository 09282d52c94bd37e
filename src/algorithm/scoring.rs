//! Puntaje de relevancia de un ramo para un perfil.
//!
//! El puntaje es la suma de contribuciones independientes; el orden de
//! `reasons` sigue el orden de la tabla:
//!
//! | contribución                    | puntos                 |
//! |---------------------------------|------------------------|
//! | prerequisitos cumplidos         | +50                    |
//! | tiene correquisitos             | +20                    |
//! | correquisitos ya aprobados      | +10                    |
//! | intereses                       | +15 por coincidencia   |
//! | relevancia para la carrera      | +10                    |
//! | SKS preferido                   | +5                     |
//! | laboratorio de la carrera       | 20 / 12 / 6 / 3 / 2    |
//! | semestre preferido              | +15                    |
//! | electivo prioritario (prodi)    | +5                     |

use super::terms::resolve_preferred_terms;
use crate::knowledge::KnowledgeStore;
use crate::models::{Course, LabCategory, StudentProfile};

pub const PREREQS_SATISFIED_POINTS: u32 = 50;
pub const HAS_COREQ_POINTS: u32 = 20;
pub const COREQ_TAKEN_POINTS: u32 = 10;
pub const INTEREST_POINTS: u32 = 15;
pub const CAREER_POINTS: u32 = 10;
pub const CREDIT_MATCH_POINTS: u32 = 5;
pub const TERM_ALIGNMENT_POINTS: u32 = 15;
pub const PRIORITY_ELECTIVE_POINTS: u32 = 5;

/// Puntos por posición en la lista de laboratorios de la carrera; posiciones
/// posteriores reciben `LAB_RANK_TAIL_POINTS`.
pub const LAB_RANK_POINTS: [u32; 4] = [20, 12, 6, 3];
pub const LAB_RANK_TAIL_POINTS: u32 = 2;

/// Frases (minúsculas) que marcan un electivo prioritario del programa.
pub const PRIORITY_ELECTIVE_MARKERS: [&str; 2] = ["pilihan program studi", "pilihan prodi"];

// Orden de evaluación: gana la primera categoría con coincidencia.
const LAB_MARKERS: [(LabCategory, &[&str]); 4] = [
    (
        LabCategory::AlgorithmsAndComputation,
        &["algoritma", "komputasi", "algorithm", "computation"],
    ),
    (
        LabCategory::SoftwareEngineeringAndData,
        &["rekayasa perangkat lunak", "software engineering", "data"],
    ),
    (
        LabCategory::IntelligentSystems,
        &["sistem cerdas", "intelligent system"],
    ),
    (
        LabCategory::ComputerSystemsAndNetworks,
        &["sistem komputer", "jaringan", "network", "computer system"],
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl ScoreCard {
    fn add(&mut self, points: u32, reason: String) {
        self.score += points;
        self.reasons.push(reason);
    }
}

/// Categoría de laboratorio derivada de la etiqueta `type`.
pub fn lab_category(kind: &str) -> Option<LabCategory> {
    let k = kind.to_lowercase();
    LAB_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| k.contains(m)))
        .map(|(lab, _)| *lab)
}

/// Número de intereses presentes en nombres/tipo o en tópicos.
pub fn interest_matches(course: &Course, interests: &[String]) -> u32 {
    if interests.is_empty() {
        return 0;
    }
    let names = course.name_text();
    let topics = course.topic_text();
    interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty() && (names.contains(i.as_str()) || topics.contains(i.as_str())))
        .count() as u32
}

/// Relevancia para la carrera: palabras clave de las etiquetas coincidentes
/// presentes en el texto del ramo; si no, algún token de la carrera presente
/// literalmente en nombres/tópicos.
pub fn career_relevant(store: &KnowledgeStore, course: &Course, career: &str) -> bool {
    let career = career.trim().to_lowercase();
    if career.is_empty() {
        return false;
    }
    let hay = course.haystack(true);
    if store.career_keywords().keywords_for(&career).any(|kw| hay.contains(kw)) {
        return true;
    }
    let hay = course.haystack(false);
    career.split_whitespace().any(|token| hay.contains(token))
}

/// (categoría, posición, puntos) si el laboratorio del ramo está entre los
/// preferidos de la carrera.
pub fn lab_alignment(
    store: &KnowledgeStore,
    course: &Course,
    career: &str,
) -> Option<(LabCategory, usize, u32)> {
    let lab = lab_category(&course.kind)?;
    let rank = store
        .lab_preferences()
        .preferences_for(career)
        .iter()
        .position(|l| *l == lab)?;
    let points = LAB_RANK_POINTS.get(rank).copied().unwrap_or(LAB_RANK_TAIL_POINTS);
    Some((lab, rank, points))
}

fn is_priority_elective(course: &Course) -> bool {
    let k = course.kind.to_lowercase();
    PRIORITY_ELECTIVE_MARKERS.iter().any(|m| k.contains(m))
}

/// Puntaje completo con justificaciones, usado por el recomendador.
pub fn score_course(store: &KnowledgeStore, course: &Course, profile: &StudentProfile) -> ScoreCard {
    let mut card = ScoreCard::default();

    let (strict, coreq) = match store.rule(&course.code) {
        Some(rule) => rule.split(),
        None => (Vec::new(), Vec::new()),
    };

    if strict.iter().all(|c| profile.has_taken(c)) {
        let reason = if strict.is_empty() {
            "No strict (non-coreq) prerequisites".to_string()
        } else {
            format!("Prerequisite(s) satisfied: {}", strict.join(", "))
        };
        card.add(PREREQS_SATISFIED_POINTS, reason);
    }

    if !coreq.is_empty() {
        card.add(HAS_COREQ_POINTS, format!("Has corequisite(s): {}", coreq.join(", ")));
        if coreq.iter().all(|c| profile.has_taken(c)) {
            card.add(COREQ_TAKEN_POINTS, "Corequisite(s) already taken".to_string());
        }
    }

    let matches = interest_matches(course, &profile.interests);
    if matches > 0 {
        card.add(INTEREST_POINTS * matches, format!("Interest matches: {} match(es)", matches));
    }

    if let Some(career) = profile.career.as_deref() {
        if career_relevant(store, course, career) {
            card.add(CAREER_POINTS, format!("Relevant for career: {}", career));
        }
    }

    if let (Some(pref), Some(credits)) = (&profile.credit_preference, course.credits) {
        if pref.contains(credits) {
            card.add(CREDIT_MATCH_POINTS, format!("SKS matches preference: {}", credits));
        }
    }

    if let Some(career) = profile.career.as_deref() {
        if let Some((lab, rank, points)) = lab_alignment(store, course, career) {
            card.add(points, format!("Lab alignment: {} (priority #{})", lab.code(), rank + 1));
        }
    }

    let preferred = resolve_preferred_terms(profile);
    let overlap: Vec<String> = course
        .offered_terms
        .intersection(&preferred)
        .map(|t| t.to_string())
        .collect();
    if !overlap.is_empty() {
        card.add(
            TERM_ALIGNMENT_POINTS,
            format!("Offered in preferred term(s): {}", overlap.join(", ")),
        );
    }

    if is_priority_elective(course) {
        card.add(PRIORITY_ELECTIVE_POINTS, "Program-priority elective".to_string());
    }

    card
}

/// Puntaje de afinidad con el perfil (intereses + carrera + laboratorio) que
/// usan los planificadores multi-semestre.
pub fn planning_score(store: &KnowledgeStore, course: &Course, profile: &StudentProfile) -> u32 {
    let mut score = INTEREST_POINTS * interest_matches(course, &profile.interests);
    if let Some(career) = profile.career.as_deref() {
        if career_relevant(store, course, career) {
            score += CAREER_POINTS;
        }
        if let Some((_, _, points)) = lab_alignment(store, course, career) {
            score += points;
        }
    }
    score
}
