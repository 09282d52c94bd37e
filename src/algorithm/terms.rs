//! Resolución de preferencias de semestre.
//!
//! Tokens de paridad aceptados (case-insensitive):
//! - impar: `odd`, `ganjil`, `gasal`
//! - par: `even`, `genap`

use crate::error::ParseError;
use crate::knowledge::parse_number_list;
use crate::models::{CurrentTerm, Parity, StudentProfile, TermPreference, GRADUATION_TERM};
use std::collections::BTreeSet;
use std::str::FromStr;

impl Parity {
    /// Semestres de esta paridad en 1..=GRADUATION_TERM.
    pub fn terms(&self) -> BTreeSet<u32> {
        (1..=GRADUATION_TERM)
            .filter(|t| match self {
                Parity::Odd => t % 2 == 1,
                Parity::Even => t % 2 == 0,
            })
            .collect()
    }

    pub fn opposite(&self) -> Parity {
        match self {
            Parity::Odd => Parity::Even,
            Parity::Even => Parity::Odd,
        }
    }
}

impl FromStr for Parity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "odd" | "ganjil" | "gasal" => Ok(Parity::Odd),
            "even" | "genap" => Ok(Parity::Even),
            other => Err(ParseError::UnknownTermToken(other.to_string())),
        }
    }
}

impl FromStr for TermPreference {
    type Err = ParseError;

    /// "odd" / "genap" / "3, 5, 7"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(p) = s.parse::<Parity>() {
            return Ok(TermPreference::Parity(p));
        }
        let terms: BTreeSet<u32> = parse_number_list(s).into_iter().collect();
        if terms.is_empty() {
            return Err(ParseError::UnknownTermToken(s.trim().to_string()));
        }
        Ok(TermPreference::Terms(terms))
    }
}

impl FromStr for CurrentTerm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(p) = t.parse::<Parity>() {
            return Ok(CurrentTerm::Parity(p));
        }
        match t.parse::<u32>() {
            Ok(n) => Ok(CurrentTerm::Number(n)),
            Err(_) => Err(ParseError::UnknownTermToken(t.to_string())),
        }
    }
}

/// Conjunto de semestres preferidos para el bono de alineación.
///
/// - preferencia explícita => se usa tal cual (paridad expandida)
/// - sin preferencia y semestre actual `n` => `{n+1}` (vacío si `n` es el último)
/// - sin preferencia y semestre actual dado como paridad => la paridad opuesta
pub fn resolve_preferred_terms(profile: &StudentProfile) -> BTreeSet<u32> {
    match (&profile.term_preference, profile.current_term) {
        (Some(TermPreference::Terms(set)), _) => set.clone(),
        (Some(TermPreference::Parity(p)), _) => p.terms(),
        (None, Some(CurrentTerm::Number(n))) => {
            if n < GRADUATION_TERM {
                BTreeSet::from([n + 1])
            } else {
                BTreeSet::new()
            }
        }
        (None, Some(CurrentTerm::Parity(p))) => p.opposite().terms(),
        (None, None) => BTreeSet::new(),
    }
}
