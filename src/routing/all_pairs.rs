//! All-pairs shortest-path precomputation over a [`WeightedDigraph`].
//!
//! Precomputes, for every `(u, v)`, the minimum total weight and the id of
//! the final edge on a shortest `u -> v` path. This is the classic
//! Floyd–Warshall relaxation schema, expressed over edge ids rather than
//! intermediate vertices so that a path can be reconstructed as a sequence
//! of edges (and, through them, the human-meaningful route segments they
//! carry) instead of a bare list of vertices.

use serde::{Deserialize, Serialize};

use crate::graph::WeightedDigraph;

/// A reconstructible entry in the all-pairs table: the minimum total weight
/// known from some source to some destination, and the last edge on that
/// path (`None` when source and destination coincide).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub total_weight: f64,
    pub last_edge: Option<u32>,
}

/// A reconstructed shortest path: its total weight and the edges traveled,
/// in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub weight: f64,
    pub edges: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllPairsRouter {
    vertex_count: u32,
    /// Row-major `vertex_count * vertex_count` table; `table[u * n + v]`.
    table: Vec<Option<RouteRecord>>,
}

impl AllPairsRouter {
    /// Precomputes the all-pairs table from a graph with non-negative
    /// weights.
    pub fn precompute(graph: &WeightedDigraph) -> Self {
        let n = graph.vertex_count() as usize;
        let mut table: Vec<Option<RouteRecord>> = vec![None; n * n];

        for v in 0..n as u32 {
            table[Self::cell(n, v, v)] = Some(RouteRecord {
                total_weight: 0.0,
                last_edge: None,
            });
        }

        for edge_id in 0..graph.edge_count() as u32 {
            let edge = graph.edge(edge_id);
            let cell = Self::cell(n, edge.from, edge.to);
            let better = match table[cell] {
                Some(existing) => edge.weight < existing.total_weight,
                None => true,
            };
            if better {
                table[cell] = Some(RouteRecord {
                    total_weight: edge.weight,
                    last_edge: Some(edge_id),
                });
            }
        }

        for k in 0..n as u32 {
            for i in 0..n as u32 {
                let Some(via_k) = table[Self::cell(n, i, k)] else {
                    continue;
                };
                for j in 0..n as u32 {
                    let Some(from_k) = table[Self::cell(n, k, j)] else {
                        continue;
                    };
                    let candidate_weight = via_k.total_weight + from_k.total_weight;
                    let cell = Self::cell(n, i, j);
                    let better = match table[cell] {
                        Some(existing) => candidate_weight < existing.total_weight,
                        None => true,
                    };
                    if better {
                        table[cell] = Some(RouteRecord {
                            total_weight: candidate_weight,
                            last_edge: from_k.last_edge,
                        });
                    }
                }
            }
        }

        Self {
            vertex_count: n as u32,
            table,
        }
    }

    pub fn record(&self, from: u32, to: u32) -> Option<RouteRecord> {
        self.table[Self::cell(self.vertex_count as usize, from, to)]
    }

    /// Reconstructs the minimum-weight path from `from` to `to`, walking
    /// `last_edge` links backwards through `graph`. Requires only the
    /// graph this table was computed over (no re-relaxation).
    pub fn build_route(&self, graph: &WeightedDigraph, from: u32, to: u32) -> Option<Route> {
        let record = self.record(from, to)?;
        let mut edges = Vec::new();
        let mut current = to;
        while current != from {
            let record = self.record(from, current)?;
            let edge_id = record.last_edge?;
            edges.push(edge_id);
            current = graph.edge(edge_id).from;
        }
        edges.reverse();
        Some(Route {
            weight: record.total_weight,
            edges,
        })
    }

    fn cell(n: usize, u: u32, v: u32) -> usize {
        u as usize * n + v as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weight_path_from_vertex_to_itself() {
        let graph = WeightedDigraph::new(3);
        let router = AllPairsRouter::precompute(&graph);
        let route = router.build_route(&graph, 1, 1).unwrap();
        assert_eq!(route.weight, 0.0);
        assert!(route.edges.is_empty());
    }

    #[test]
    fn unreachable_pair_has_no_record() {
        let graph = WeightedDigraph::new(2);
        let router = AllPairsRouter::precompute(&graph);
        assert!(router.build_route(&graph, 0, 1).is_none());
    }

    #[test]
    fn picks_shortest_of_two_direct_edges() {
        let mut graph = WeightedDigraph::new(2);
        graph.add_edge(0, 1, 5.0);
        let cheap = graph.add_edge(0, 1, 2.0);
        let router = AllPairsRouter::precompute(&graph);
        let route = router.build_route(&graph, 0, 1).unwrap();
        assert_eq!(route.weight, 2.0);
        assert_eq!(route.edges, vec![cheap]);
    }

    #[test]
    fn combines_edges_across_an_intermediate_vertex() {
        let mut graph = WeightedDigraph::new(3);
        let e0 = graph.add_edge(0, 1, 1.0);
        let e1 = graph.add_edge(1, 2, 1.0);
        graph.add_edge(0, 2, 10.0);
        let router = AllPairsRouter::precompute(&graph);
        let route = router.build_route(&graph, 0, 2).unwrap();
        assert_eq!(route.weight, 2.0);
        assert_eq!(route.edges, vec![e0, e1]);
    }

    #[test]
    fn table_round_trips_through_serde() {
        let mut graph = WeightedDigraph::new(2);
        graph.add_edge(0, 1, 3.0);
        let router = AllPairsRouter::precompute(&graph);
        let encoded = serde_json::to_vec(&router).unwrap();
        let decoded: AllPairsRouter = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded.record(0, 1), router.record(0, 1));
    }
}
