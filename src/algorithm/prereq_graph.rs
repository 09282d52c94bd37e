use petgraph::algo::{dijkstra, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use std::collections::HashMap;

use crate::error::PlanError;
use crate::knowledge::KnowledgeStore;

/// Grafo dirigido prerequisito -> dependiente, con un nodo por ramo del
/// catálogo y por cada código referenciado en las reglas aunque no esté en el
/// catálogo. Sólo los prerequisitos no-correquisito generan aristas.
pub struct PrerequisiteGraph {
    graph: DiGraph<String, u64>,
    node_map: HashMap<String, NodeIndex>,
}

impl PrerequisiteGraph {
    pub fn build(store: &KnowledgeStore) -> Self {
        let mut graph: DiGraph<String, u64> = DiGraph::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for course in store.courses() {
            let idx = graph.add_node(course.code.clone());
            node_map.insert(course.code.clone(), idx);
        }

        // reglas en orden de código para que los índices sean estables
        let mut codes: Vec<&String> = store.rules().keys().collect();
        codes.sort();
        for code in codes {
            let Some(rule) = store.rule(code) else { continue };
            let (strict, _) = rule.split();
            for prereq in strict {
                let from = *node_map
                    .entry(prereq.to_string())
                    .or_insert_with(|| graph.add_node(prereq.to_string()));
                let to = *node_map
                    .entry(code.clone())
                    .or_insert_with(|| graph.add_node(code.clone()));
                if graph.find_edge(from, to).is_none() {
                    graph.add_edge(from, to, 0);
                }
            }
        }

        PrerequisiteGraph { graph, node_map }
    }

    pub fn node(&self, code: &str) -> Option<NodeIndex> {
        self.node_map.get(code).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Orden topológico; un ciclo se reporta con el código de uno de sus nodos.
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>, PlanError> {
        toposort(&self.graph, None)
            .map_err(|cycle| PlanError::PrerequisiteCycle(self.graph[cycle.node_id()].clone()))
    }

    /// Profundidad de cada ramo: largo de la cadena de prerequisitos más larga
    /// que termina en él (0 sin prerequisitos).
    pub fn depths(&self) -> Result<HashMap<String, u32>, PlanError> {
        let order = self.topological_order()?;
        let mut depth: HashMap<NodeIndex, u32> = HashMap::with_capacity(order.len());
        for idx in order {
            let d = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .filter_map(|p| depth.get(&p))
                .map(|d| d + 1)
                .max()
                .unwrap_or(0);
            depth.insert(idx, d);
        }
        Ok(depth.into_iter().map(|(idx, d)| (self.graph[idx].clone(), d)).collect())
    }

    /// Asigna a cada arista el peso de su ramo dependiente.
    pub fn reweight<F>(&mut self, weight_of: F)
    where
        F: Fn(&str) -> u64,
    {
        let edges: Vec<_> = self.graph.edge_indices().collect();
        for e in edges {
            let Some((_, to)) = self.graph.edge_endpoints(e) else { continue };
            let w = weight_of(&self.graph[to]);
            if let Some(slot) = self.graph.edge_weight_mut(e) {
                *slot = w;
            }
        }
    }

    /// Costo del camino mínimo `from -> to`, si existe.
    pub fn cheapest_path(&self, from: &str, to: &str) -> Option<u64> {
        let (start, goal) = (self.node(from)?, self.node(to)?);
        let costs = dijkstra(&self.graph, start, Some(goal), |e| *e.weight());
        costs.get(&goal).copied()
    }
}

/// Primer ciclo de prerequisitos del catálogo, si existe.
pub fn find_prerequisite_cycle(store: &KnowledgeStore) -> Option<String> {
    match PrerequisiteGraph::build(store).topological_order() {
        Ok(_) => None,
        Err(PlanError::PrerequisiteCycle(code)) => Some(code),
        Err(_) => None,
    }
}
