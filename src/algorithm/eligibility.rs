//! Filtro de elegibilidad: decide si un ramo es candidato legal.
//!
//! Reglas, en orden:
//! 1. no aprobado previamente
//! 2. electivo (la etiqueta no contiene "wajib")
//! 3. regla de prerequisitos presente y no vacía (sólo en `RuleMode::RequireRule`)
//! 4. todos los prerequisitos no-correquisito aprobados
//! 5. dictado en el semestre pedido (si el ramo declara semestres)

use crate::knowledge::KnowledgeStore;
use crate::models::Course;
use std::fmt;

/// Cómo tratar un ramo sin regla de prerequisitos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    /// Recomendador de un semestre: exige regla con al menos un prerequisito.
    RequireRule,
    /// Planificador: regla ausente o vacía => sin prerequisitos.
    AbsentMeansNone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    AlreadyTaken,
    Mandatory,
    NoPrerequisiteRule,
    EmptyPrerequisites,
    MissingPrerequisites(Vec<String>),
    NotOffered(u32),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::AlreadyTaken => write!(f, "already taken"),
            Rejection::Mandatory => write!(f, "mandatory (wajib) course"),
            Rejection::NoPrerequisiteRule => write!(f, "no prerequisite rules"),
            Rejection::EmptyPrerequisites => write!(f, "prerequisites is empty"),
            Rejection::MissingPrerequisites(codes) => {
                write!(f, "non-coreq prereq not satisfied ({})", codes.join(", "))
            }
            Rejection::NotOffered(term) => write!(f, "not offered in term {}", term),
        }
    }
}

/// Evalúa la elegibilidad de `course`. `is_taken` responde si un código ya
/// está cubierto (aprobado, o planificado en un semestre anterior).
pub fn check_eligibility<F>(
    store: &KnowledgeStore,
    course: &Course,
    is_taken: F,
    term: Option<u32>,
    mode: RuleMode,
) -> Result<(), Rejection>
where
    F: Fn(&str) -> bool,
{
    if is_taken(course.code.as_str()) {
        return Err(Rejection::AlreadyTaken);
    }
    if course.is_mandatory() {
        return Err(Rejection::Mandatory);
    }

    match (store.rule(&course.code), mode) {
        (None, RuleMode::RequireRule) => return Err(Rejection::NoPrerequisiteRule),
        (Some(rule), RuleMode::RequireRule) if rule.is_empty() => {
            return Err(Rejection::EmptyPrerequisites);
        }
        (Some(rule), _) => {
            let (strict, _coreq) = rule.split();
            let missing: Vec<String> = strict
                .into_iter()
                .filter(|code| !is_taken(*code))
                .map(str::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(Rejection::MissingPrerequisites(missing));
            }
        }
        (None, RuleMode::AbsentMeansNone) => {}
    }

    if let Some(t) = term {
        if !course.is_offered_in(t) {
            return Err(Rejection::NotOffered(t));
        }
    }
    Ok(())
}

pub fn is_eligible<F>(
    store: &KnowledgeStore,
    course: &Course,
    is_taken: F,
    term: Option<u32>,
    mode: RuleMode,
) -> bool
where
    F: Fn(&str) -> bool,
{
    match check_eligibility(store, course, is_taken, term, mode) {
        Ok(()) => true,
        Err(reason) => {
            log::debug!("Skip {}: {}", course.code, reason);
            false
        }
    }
}
