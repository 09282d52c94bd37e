//! Planificador multi-semestre: búsqueda de costo uniforme sobre estados
//! `(semestre, SKS usados, ramos previos, ramos del semestre en curso)`.
//!
//! Transiciones desde un estado no terminal:
//! - `Add(i)`: agrega el candidato `i` al semestre en curso (costo 0)
//! - `Advance`: cierra el semestre y pasa al siguiente, con costo
//!   `max(0, base - (Σ puntaje + bono * Σ SKS))` sobre los ramos del semestre
//!
//! Un estado es terminal cuando su semestre alcanza `GRADUATION_TERM`. Los
//! costos nunca son negativos, así que el primer terminal extraído de la cola
//! es el más barato de los descubiertos.

use super::course_set::CourseSet;
use super::eligibility::{RuleMode, is_eligible};
use super::scoring::planning_score;
use crate::config::PlannerConfig;
use crate::knowledge::KnowledgeStore;
use crate::models::{GRADUATION_TERM, Plan, PlanParams, PlanStrategy, PlannedCourse, TermPlan};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

/// Topes de SKS por semestre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCaps {
    caps: BTreeMap<u32, u32>,
    default_cap: u32,
}

impl TermCaps {
    /// Asigna `caps` en orden a los semestres `start_term, start_term + 1, ..`
    /// hasta el semestre previo a la graduación. Valores 0 se descartan; los
    /// semestres sin valor usan `default_cap`.
    pub fn sequential(start_term: u32, caps: &[u32], default_cap: u32) -> Self {
        let caps = (start_term..GRADUATION_TERM)
            .zip(caps.iter().copied().filter(|c| *c > 0))
            .collect();
        TermCaps { caps, default_cap }
    }

    pub fn cap_for(&self, term: u32) -> u32 {
        self.caps.get(&term).copied().unwrap_or(self.default_cap)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StateKey {
    term: u32,
    used: u32,
    prior: CourseSet,
    current: CourseSet,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Add(usize),
    Advance,
}

#[derive(Debug)]
struct Node {
    key: StateKey,
    cost: u64,
    parent: Option<(usize, Action)>,
}

/// Arena de estados + cola de prioridad ordenada por (costo, orden de inserción).
#[derive(Default)]
struct Frontier {
    nodes: Vec<Node>,
    index: HashMap<StateKey, usize>,
    heap: BinaryHeap<Reverse<(u64, u64, usize)>>,
    seq: u64,
}

impl Frontier {
    /// Registra `key` con `cost` si es nuevo o mejora el costo conocido.
    fn relax(&mut self, key: StateKey, cost: u64, parent: Option<(usize, Action)>) {
        let existing = self.index.get(&key).copied();
        let id = match existing {
            Some(id) if self.nodes[id].cost <= cost => return,
            Some(id) => {
                self.nodes[id].cost = cost;
                self.nodes[id].parent = parent;
                id
            }
            None => {
                let id = self.nodes.len();
                self.index.insert(key.clone(), id);
                self.nodes.push(Node { key, cost, parent });
                id
            }
        };
        self.seq += 1;
        self.heap.push(Reverse((cost, self.seq, id)));
    }

    /// Terminal más barato; si no hay, el semestre más lejano y dentro de él
    /// el menor costo. Empates por orden de descubrimiento.
    fn best_node(&self) -> usize {
        let terminal = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.key.term >= GRADUATION_TERM)
            .min_by_key(|(id, n)| (n.cost, *id))
            .map(|(id, _)| id);
        terminal.unwrap_or_else(|| {
            self.nodes
                .iter()
                .enumerate()
                .min_by_key(|(id, n)| (Reverse(n.key.term), n.cost, *id))
                .map(|(id, _)| id)
                .unwrap_or(0)
        })
    }

    /// Acciones desde la raíz hasta `id`, con el semestre en que ocurrió cada una.
    fn actions_to(&self, id: usize) -> Vec<(Action, u32)> {
        let mut out = Vec::new();
        let mut cur = id;
        while let Some((parent, action)) = self.nodes[cur].parent {
            out.push((action, self.nodes[parent].key.term));
            cur = parent;
        }
        out.reverse();
        out
    }
}

/// Candidatos para agregar en el estado `key`: top-K por puntaje (empates por
/// código) entre los electivos elegibles y dictados en el semestre que no
/// estén aprobados ni ya planificados.
fn candidates(
    store: &KnowledgeStore,
    params: &PlanParams,
    key: &StateKey,
    scores: &[u32],
    config: &PlannerConfig,
) -> Vec<usize> {
    let profile = &params.profile;
    let covered = |code: &str| {
        profile.has_taken(code) || store.course_index(code).is_some_and(|i| key.prior.contains(i))
    };

    let mut out: Vec<usize> = store
        .courses()
        .iter()
        .enumerate()
        .filter(|(i, _)| !key.prior.contains(*i) && !key.current.contains(*i))
        .filter(|(i, _)| !config.require_positive_score || scores[*i] > 0)
        .filter(|(_, c)| is_eligible(store, c, covered, Some(key.term), RuleMode::AbsentMeansNone))
        .map(|(i, _)| i)
        .collect();

    let courses = store.courses();
    out.sort_by(|a, b| scores[*b].cmp(&scores[*a]).then_with(|| courses[*a].code.cmp(&courses[*b].code)));
    if config.top_candidates > 0 {
        out.truncate(config.top_candidates);
    }
    out
}

pub fn plan_until_graduation(store: &KnowledgeStore, params: &PlanParams, config: &PlannerConfig) -> Plan {
    let start_term = params.start_term();
    let caps = TermCaps::sequential(start_term, &params.caps, config.default_term_cap);
    let courses = store.courses();
    let n = courses.len();
    let scores: Vec<u32> = courses.iter().map(|c| planning_score(store, c, &params.profile)).collect();

    let mut frontier = Frontier::default();
    let root = StateKey { term: start_term, used: 0, prior: CourseSet::empty(n), current: CourseSet::empty(n) };
    frontier.relax(root, 0, None);

    let mut expansions = 0usize;
    while expansions < config.max_expansions {
        let Some(Reverse((cost, _, id))) = frontier.heap.pop() else {
            break;
        };
        if cost > frontier.nodes[id].cost {
            continue;
        }
        expansions += 1;

        let key = frontier.nodes[id].key.clone();
        if key.term >= GRADUATION_TERM {
            break;
        }

        let cap = caps.cap_for(key.term);
        for idx in candidates(store, params, &key, &scores, config) {
            let credits = courses[idx].credit_weight();
            if credits == 0 || key.used + credits > cap {
                continue;
            }
            let mut current = key.current.clone();
            current.insert(idx);
            let next = StateKey { term: key.term, used: key.used + credits, prior: key.prior.clone(), current };
            frontier.relax(next, cost, Some((id, Action::Add(idx))));
        }

        let (term_score, term_credits) = key.current.iter().fold((0u64, 0u64), |(s, c), i| {
            (s + u64::from(scores[i]), c + u64::from(courses[i].credit_weight()))
        });
        let step = config
            .advance_base_cost
            .saturating_sub(term_score + config.credit_bonus * term_credits);
        let next = StateKey {
            term: key.term + 1,
            used: 0,
            prior: key.prior.union(&key.current),
            current: CourseSet::empty(n),
        };
        frontier.relax(next, cost + step, Some((id, Action::Advance)));
    }

    let best = frontier.best_node();
    let best_node = &frontier.nodes[best];
    let complete = best_node.key.term >= GRADUATION_TERM;
    if !complete {
        log::warn!(
            "[planner] tope de {} expansiones alcanzado; plan parcial hasta el semestre {}",
            config.max_expansions,
            best_node.key.term
        );
    }

    let mut by_term: BTreeMap<u32, Vec<usize>> = (start_term..GRADUATION_TERM).map(|t| (t, Vec::new())).collect();
    let mut placed: HashSet<usize> = HashSet::new();
    for (action, term) in frontier.actions_to(best) {
        let Action::Add(idx) = action else { continue };
        if let Some(slot) = by_term.get_mut(&term) {
            if placed.insert(idx) {
                slot.push(idx);
            }
        }
    }

    let schedule = by_term
        .into_iter()
        .map(|(term, idxs)| {
            let planned: Vec<PlannedCourse> = idxs
                .into_iter()
                .map(|i| PlannedCourse {
                    code: courses[i].code.clone(),
                    names: courses[i].names.clone(),
                    credits: courses[i].credit_weight(),
                    score: scores[i],
                })
                .collect();
            TermPlan { term, total_credits: planned.iter().map(|c| c.credits).sum(), courses: planned }
        })
        .collect();

    log::info!(
        "[planner] {}: semestres {}..{} expansiones={} costo={} completo={}",
        params.name,
        start_term,
        GRADUATION_TERM,
        expansions,
        best_node.cost,
        complete
    );

    Plan {
        name: params.name.clone(),
        current_term: params.current_term,
        start_term,
        schedule,
        reached_term: best_node.key.term,
        total_cost: best_node.cost,
        expansions,
        complete,
        strategy: PlanStrategy::Search,
    }
}
