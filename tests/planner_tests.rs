mod common;

use matkulfinder::algorithm::{check_eligibility, plan_with_strategy, RuleMode};
use matkulfinder::config::PlannerConfig;
use matkulfinder::models::{PlanParams, PlanStrategy, StudentProfile, GRADUATION_TERM};
use matkulfinder::{plan_until_graduation, plan_with_prerequisite_graph};
use std::collections::HashSet;

fn fifth_term_student() -> PlanParams {
    let profile = StudentProfile::new(["MII21-1201", "MII21-1203", "MII21-2401"])
        .with_interests(["AI", "Data Science"])
        .with_career("Data Scientist");
    PlanParams::new("Rina", profile, 5).with_caps(vec![9, 6])
}

/// Verifica que cada ramo del plan sea legal en el semestre donde quedó.
fn assert_plan_is_legal(store: &matkulfinder::KnowledgeStore, params: &PlanParams, plan: &matkulfinder::models::Plan, caps: &[u32]) {
    let mut covered: HashSet<String> = params.profile.taken.clone();
    for (i, term) in plan.schedule.iter().enumerate() {
        if let Some(cap) = caps.get(i) {
            assert!(term.total_credits <= *cap, "semestre {} excede el tope", term.term);
        }
        assert_eq!(term.total_credits, term.courses.iter().map(|c| c.credits).sum::<u32>());
        for planned in &term.courses {
            let course = store.course(&planned.code).expect("Debe existir en el catálogo");
            assert!(!course.is_mandatory());
            assert!(planned.credits > 0);
            let res = check_eligibility(store, course, |c| covered.contains(c), Some(term.term), RuleMode::AbsentMeansNone);
            assert!(res.is_ok(), "{} ilegal en semestre {}: {:?}", planned.code, term.term, res);
        }
        for planned in &term.courses {
            covered.insert(planned.code.clone());
        }
    }
}

#[test]
fn test_search_plan_is_complete_and_legal() {
    let store = common::sample_store();
    let params = fifth_term_student();
    let plan = plan_until_graduation(&store, &params, &PlannerConfig::default());

    assert!(plan.complete, "Debe llegar a la graduación");
    assert_eq!(plan.reached_term, GRADUATION_TERM);
    assert_eq!(plan.start_term, 6);
    assert_eq!(plan.schedule.iter().map(|t| t.term).collect::<Vec<_>>(), vec![6, 7]);
    assert_plan_is_legal(&store, &params, &plan, &[9, 6]);

    let codes: Vec<&str> = plan.planned_codes().collect();
    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(unique.len(), codes.len(), "Ningún ramo se repite");
    assert!(!codes.is_empty());
}

#[test]
fn test_search_plan_unlocks_chains() {
    // con Pembelajaran Mesin aprobado, NLP y Deep Learning quedan disponibles en 6
    let store = common::sample_store();
    let profile = StudentProfile::new(["MII21-1201", "MII21-1203", "MII21-3601"])
        .with_interests(["nlp", "deep learning"]);
    let params = PlanParams::new("Budi", profile, 5).with_caps(vec![6]);
    let plan = plan_until_graduation(&store, &params, &PlannerConfig::default());

    assert!(plan.complete);
    let term6: HashSet<&str> = plan.schedule[0].courses.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(term6, HashSet::from(["MII21-3605", "MII21-3606"]));
    assert_plan_is_legal(&store, &params, &plan, &[6]);
}

#[test]
fn test_search_plan_is_deterministic() {
    let store = common::sample_store();
    let params = fifth_term_student();
    let config = PlannerConfig::default();
    let first = plan_until_graduation(&store, &params, &config);
    assert_eq!(plan_until_graduation(&store, &params, &config), first);
}

#[test]
fn test_final_term_student_gets_empty_schedule() {
    let store = common::sample_store();
    let params = PlanParams::new("Sari", StudentProfile::new(["MII21-1201"]), 7);
    let plan = plan_until_graduation(&store, &params, &PlannerConfig::default());
    assert!(plan.complete);
    assert!(plan.schedule.is_empty());
}

#[test]
fn test_graph_strategy_one_course_per_term() {
    let store = common::sample_store();
    let params = fifth_term_student();
    let plan = plan_with_prerequisite_graph(&store, &params, &PlannerConfig::default())
        .expect("El catálogo de ejemplo no tiene ciclos");

    assert_eq!(plan.strategy, PlanStrategy::Graph);
    assert_eq!(plan.schedule.len(), 2);
    assert!(plan.schedule.iter().all(|t| t.courses.len() <= 1));
    assert_plan_is_legal(&store, &params, &plan, &[9, 6]);
}

#[test]
fn test_strategy_dispatch() {
    let store = common::sample_store();
    let params = fifth_term_student();
    let config = PlannerConfig::default();
    let search = plan_with_strategy(&store, &params, &config, PlanStrategy::Search).expect("búsqueda no falla");
    let graph = plan_with_strategy(&store, &params, &config, PlanStrategy::Graph).expect("grafo sin ciclos");
    assert_eq!(search.strategy, PlanStrategy::Search);
    assert_eq!(graph.strategy, PlanStrategy::Graph);
}
