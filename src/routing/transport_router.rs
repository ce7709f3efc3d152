//! Composition of the transport graph with the all-pairs router into a
//! single origin -> destination journey query.

use crate::{
    catalogue::Catalogue,
    routing::{
        all_pairs::AllPairsRouter,
        segment::RouteSegment,
        transport_graph::{Error as GraphError, RoutingSettings, TransportGraph},
    },
};

/// The result of a successful journey query.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey<'a> {
    pub total_time: f64,
    pub items: Vec<&'a RouteSegment>,
}

#[derive(Debug, Clone)]
pub struct TransportRouter {
    graph: TransportGraph,
    router: AllPairsRouter,
}

impl TransportRouter {
    pub fn build(catalogue: &Catalogue, settings: RoutingSettings) -> Result<Self, GraphError> {
        let graph = TransportGraph::build(catalogue, settings)?;
        let router = AllPairsRouter::precompute(graph.inner_graph());
        Ok(Self { graph, router })
    }

    pub fn from_parts(graph: TransportGraph, router: AllPairsRouter) -> Self {
        Self { graph, router }
    }

    pub fn transport_graph(&self) -> &TransportGraph {
        &self.graph
    }

    pub fn all_pairs(&self) -> &AllPairsRouter {
        &self.router
    }

    /// Returns the fastest `from -> to` journey, or `None` if either stop is
    /// unknown or no path exists. `from == to` always yields a zero-weight,
    /// empty-segment journey.
    pub fn shortest_route(&self, from: &str, to: &str) -> Option<Journey<'_>> {
        let from_id = self.graph.before_wait_id(from)?;
        let to_id = self.graph.before_wait_id(to)?;

        if from_id == to_id {
            return Some(Journey {
                total_time: 0.0,
                items: Vec::new(),
            });
        }

        let route = self
            .router
            .build_route(self.graph.inner_graph(), from_id, to_id)?;
        let items = route
            .edges
            .iter()
            .map(|&edge_id| self.graph.segment(edge_id))
            .collect();
        Some(Journey {
            total_time: route.weight,
            items,
        })
    }
}
