// Núcleo de recomendación y planificación.
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod course_set;
pub mod eligibility;
pub mod graph_planner;
pub mod planner;
pub mod prereq_graph;
pub mod recommend;
pub mod scoring;
pub mod terms;

// Reexportar la API pública que usan el servidor y los tests
pub use eligibility::{RuleMode, Rejection, check_eligibility, is_eligible};
pub use graph_planner::plan_with_prerequisite_graph;
pub use planner::{TermCaps, plan_until_graduation};
pub use prereq_graph::{PrerequisiteGraph, find_prerequisite_cycle};
pub use recommend::recommend;
pub use scoring::{ScoreCard, planning_score, score_course};
pub use terms::resolve_preferred_terms;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::knowledge::KnowledgeStore;
use crate::models::{Plan, PlanParams, PlanStrategy};

/// Ejecuta la estrategia pedida. Sólo la variante por grafo puede fallar (ciclos).
pub fn plan_with_strategy(
    store: &KnowledgeStore,
    params: &PlanParams,
    config: &PlannerConfig,
    strategy: PlanStrategy,
) -> Result<Plan, PlanError> {
    match strategy {
        PlanStrategy::Search => Ok(plan_until_graduation(store, params, config)),
        PlanStrategy::Graph => plan_with_prerequisite_graph(store, params, config),
    }
}
