//! Recomendador de un semestre: filtra, puntúa, ordena y trunca a top-N.

use super::eligibility::{is_eligible, RuleMode};
use super::scoring::score_course;
use crate::knowledge::KnowledgeStore;
use crate::models::{Course, Recommendation, StudentProfile};
use std::cmp::Ordering;

/// Con `credit_must_match`, sólo pasan ramos cuyo SKS está en la preferencia.
fn credit_filter(course: &Course, profile: &StudentProfile) -> bool {
    if !profile.credit_must_match {
        return true;
    }
    match (&profile.credit_preference, course.credits) {
        (None, _) => true,
        (Some(pref), Some(c)) => pref.contains(c),
        (Some(_), None) => false,
    }
}

/// Orden canónico: puntaje desc, SKS asc (sin dato = 0), código asc.
pub fn compare_recommendations(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.credits.unwrap_or(0).cmp(&b.credits.unwrap_or(0)))
        .then_with(|| a.code.cmp(&b.code))
}

pub fn recommend(store: &KnowledgeStore, profile: &StudentProfile, top_n: usize) -> Vec<Recommendation> {
    let mut evaluated: Vec<Recommendation> = Vec::new();

    for course in store.courses() {
        if !is_eligible(store, course, |c| profile.has_taken(c), None, RuleMode::RequireRule) {
            continue;
        }
        if !credit_filter(course, profile) {
            log::debug!("Skip {}: SKS {:?} does not match preference", course.code, course.credits);
            continue;
        }

        let card = score_course(store, course, profile);
        log::debug!("Evaluate {} -> score={}; reasons={:?}", course.code, card.score, card.reasons);

        evaluated.push(Recommendation {
            code: course.code.clone(),
            names: course.names.clone(),
            credits: course.credits,
            score: card.score,
            reasons: card.reasons,
        });
    }

    evaluated.sort_by(compare_recommendations);
    evaluated.truncate(top_n);
    log::info!(
        "[recommend] {} recomendaciones (top_n={}, catálogo={})",
        evaluated.len(),
        top_n,
        store.len()
    );
    evaluated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreditPreference;

    fn store() -> KnowledgeStore {
        KnowledgeStore::from_json_str(
            r#"[
                {"course_code": "B", "sks": 3, "type": "Pilihan"},
                {"course_code": "A", "sks": 3, "type": "Pilihan"},
                {"course_code": "C", "sks": 2, "type": "Pilihan"},
                {"course_code": "D", "type": "Pilihan"},
                {"course_code": "W", "sks": 2, "type": "Wajib"}
            ]"#,
            r#"{
                "A": {"prerequisites": [{"code": "X", "is_corequisite": false}]},
                "B": {"prerequisites": [{"code": "X", "is_corequisite": false}]},
                "C": {"prerequisites": [{"code": "X", "is_corequisite": false}]},
                "D": {"prerequisites": [{"code": "X", "is_corequisite": false}]},
                "W": {"prerequisites": [{"code": "X", "is_corequisite": false}]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_tie_break_by_credits_then_code() {
        let s = store();
        let out = recommend(&s, &StudentProfile::new(["X"]), 10);
        let codes: Vec<&str> = out.iter().map(|r| r.code.as_str()).collect();
        // todos con 50 puntos: D (sin SKS = 0), C (2), A (3), B (3)
        assert_eq!(codes, vec!["D", "C", "A", "B"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let s = store();
        assert_eq!(recommend(&s, &StudentProfile::new(["X"]), 2).len(), 2);
        assert!(recommend(&s, &StudentProfile::new(["X"]), 0).is_empty());
    }

    #[test]
    fn test_credit_must_match_filters() {
        let s = store();
        let profile = StudentProfile::new(["X"]).with_credit_preference(CreditPreference::single(2), true);
        let out = recommend(&s, &profile, 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, "C");
        assert_eq!(out[0].score, 55);
    }
}
