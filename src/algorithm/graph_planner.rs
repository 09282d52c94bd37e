//! Estrategia alternativa: un ramo por semestre, elegido por el camino de
//! menor costo en el grafo de prerequisitos ponderado.
//!
//! Peso de una arista `p -> v`: `(profundidad(v) + 1) * 1000 / (puntaje(v) + 1)`.
//! Ramos profundos cuestan más y ramos afines al perfil cuestan menos.

use super::eligibility::{RuleMode, is_eligible};
use super::planner::TermCaps;
use super::prereq_graph::PrerequisiteGraph;
use super::scoring::planning_score;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::knowledge::KnowledgeStore;
use crate::models::{Course, GRADUATION_TERM, Plan, PlanParams, PlanStrategy, PlannedCourse, TermPlan};
use std::collections::{HashMap, HashSet};

pub const EDGE_WEIGHT_SCALE: u64 = 1000;

pub fn plan_with_prerequisite_graph(
    store: &KnowledgeStore,
    params: &PlanParams,
    config: &PlannerConfig,
) -> Result<Plan, PlanError> {
    let profile = &params.profile;
    let start_term = params.start_term();
    let caps = TermCaps::sequential(start_term, &params.caps, config.default_term_cap);

    let mut graph = PrerequisiteGraph::build(store);
    let depths = graph.depths()?;
    let scores: HashMap<&str, u32> = store
        .courses()
        .iter()
        .map(|c| (c.code.as_str(), planning_score(store, c, profile)))
        .collect();

    let weight_of = |code: &str| -> u64 {
        let depth = u64::from(depths.get(code).copied().unwrap_or(0));
        let score = u64::from(scores.get(code).copied().unwrap_or(0));
        (depth + 1) * EDGE_WEIGHT_SCALE / (score + 1)
    };
    graph.reweight(weight_of);

    let mut chosen: HashSet<String> = HashSet::new();
    let mut schedule: Vec<TermPlan> = Vec::new();
    let mut total_cost = 0u64;
    let mut evaluated = 0usize;

    for term in start_term..GRADUATION_TERM {
        let cap = caps.cap_for(term);
        let covered = |code: &str| profile.has_taken(code) || chosen.contains(code);
        let mut best: Option<(u64, &Course)> = None;

        for course in store.courses() {
            let credits = course.credit_weight();
            if credits == 0 || credits > cap || chosen.contains(&course.code) {
                continue;
            }
            if !is_eligible(store, course, covered, Some(term), RuleMode::AbsentMeansNone) {
                continue;
            }
            evaluated += 1;

            let direct: Vec<&str> = store.rule(&course.code).map(|r| r.split().0).unwrap_or_default();
            let cost = direct
                .iter()
                .filter_map(|p| graph.cheapest_path(p, &course.code))
                .min()
                .unwrap_or_else(|| weight_of(&course.code));

            let better = match best {
                None => true,
                Some((c, b)) => (cost, course.code.as_str()) < (c, b.code.as_str()),
            };
            if better {
                best = Some((cost, course));
            }
        }

        let mut courses = Vec::new();
        if let Some((cost, course)) = best {
            log::debug!("[graph_planner] semestre {}: {} (costo {})", term, course.code, cost);
            total_cost += cost;
            courses.push(PlannedCourse {
                code: course.code.clone(),
                names: course.names.clone(),
                credits: course.credit_weight(),
                score: scores.get(course.code.as_str()).copied().unwrap_or(0),
            });
            chosen.insert(course.code.clone());
        }
        schedule.push(TermPlan { term, total_credits: courses.iter().map(|c| c.credits).sum(), courses });
    }

    log::info!(
        "[graph_planner] {}: {} ramos planificados, {} candidatos evaluados",
        params.name,
        chosen.len(),
        evaluated
    );

    Ok(Plan {
        name: params.name.clone(),
        current_term: params.current_term,
        start_term,
        schedule,
        reached_term: start_term.max(GRADUATION_TERM),
        total_cost,
        expansions: evaluated,
        complete: true,
        strategy: PlanStrategy::Graph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentProfile;

    fn store() -> KnowledgeStore {
        KnowledgeStore::from_json_str(
            r#"[
                {"course_code": "BASE", "sks": 3, "type": "Pilihan", "semesters": [5]},
                {"course_code": "NEXT", "sks": 3, "type": "Pilihan", "topics": ["ai"], "semesters": [6, 7]},
                {"course_code": "SIDE", "sks": 2, "type": "Pilihan", "topics": ["ai"], "semesters": [5, 6, 7]},
                {"course_code": "HEAVY", "sks": 9, "type": "Pilihan", "topics": ["ai"]}
            ]"#,
            r#"{"NEXT": {"prerequisites": [{"code": "BASE", "is_corequisite": false}]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_one_course_per_term() {
        let profile = StudentProfile::new(Vec::<String>::new()).with_interests(["ai"]);
        let params = PlanParams::new("tester", profile, 4).with_caps(vec![3, 3, 3]);
        let plan = plan_with_prerequisite_graph(&store(), &params, &PlannerConfig::default()).unwrap();

        assert_eq!(plan.strategy, PlanStrategy::Graph);
        let terms: Vec<(u32, Vec<&str>)> = plan
            .schedule
            .iter()
            .map(|t| (t.term, t.courses.iter().map(|c| c.code.as_str()).collect()))
            .collect();
        // 5: SIDE (1000/16 = 62) gana a BASE (1000). BASE sólo se dicta en 5, así que NEXT nunca se desbloquea
        assert_eq!(terms, vec![(5, vec!["SIDE"]), (6, vec![]), (7, vec![])]);
    }

    #[test]
    fn test_prerequisite_unlocks_next_term() {
        let params = PlanParams::new("tester", StudentProfile::new(["side"]), 4).with_caps(vec![3, 3, 3]);
        let plan = plan_with_prerequisite_graph(&store(), &params, &PlannerConfig::default()).unwrap();
        let codes: Vec<&str> = plan.planned_codes().collect();
        assert_eq!(codes, vec!["BASE", "NEXT"]);
        assert_eq!(plan.schedule[1].courses[0].code, "NEXT");
    }

    #[test]
    fn test_cycle_is_an_error() {
        let store = KnowledgeStore::from_json_str(
            r#"[{"course_code": "P", "sks": 2, "type": "Pilihan"}]"#,
            r#"{"P": {"prerequisites": [{"code": "P", "is_corequisite": false}]}}"#,
        )
        .unwrap();
        let params = PlanParams::new("tester", StudentProfile::new(Vec::<String>::new()), 5);
        let err = plan_with_prerequisite_graph(&store, &params, &PlannerConfig::default()).unwrap_err();
        assert_eq!(err, PlanError::PrerequisiteCycle("P".to_string()));
    }
}
