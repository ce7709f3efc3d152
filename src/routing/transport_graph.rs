//! Node-splitting construction of the transport graph from a [`Catalogue`].
//!
//! Every stop contributes two graph vertices: `before_wait` and
//! `after_wait`. A single Wait edge connects them, charging the boarding
//! time once per embark. Ride edges always run from one stop's
//! `after_wait` vertex to another's `before_wait` vertex, so continuing on
//! the same bus through an intermediate stop never pays a second wait.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{catalogue::Catalogue, graph::WeightedDigraph, routing::segment::RouteSegment};

/// Boarding wait (minutes) and bus speed (km/h) used to weight the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    pub bus_wait_time: u32,
    pub bus_velocity: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6,
            bus_velocity: 40.0,
        }
    }
}

/// Converts km/h to m/min: `meters / (velocity_kmh * FACTOR) = minutes`.
const FACTOR_KM_PER_H_TO_M_PER_MIN: f64 = 1000.0 / 60.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("missing distance from {from} to {to} while building the transport graph")]
    MissingDistance { from: String, to: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportGraph {
    settings: RoutingSettings,
    graph: WeightedDigraph,
    /// `stop name -> before_wait node id`, a `BTreeMap` so persisted
    /// encodings are deterministic across identical builds.
    id_by_stop: BTreeMap<Arc<str>, u32>,
    /// Parallel to `graph`'s edges: `segments[edge_id]` labels that edge.
    segments: Vec<RouteSegment>,
}

impl TransportGraph {
    pub fn build(catalogue: &Catalogue, settings: RoutingSettings) -> Result<Self, Error> {
        let n = catalogue.stops().len() as u32;
        let mut graph = WeightedDigraph::new(2 * n);
        let mut segments = Vec::new();
        let id_by_stop: BTreeMap<Arc<str>, u32> = catalogue
            .stops()
            .iter()
            .map(|stop| (stop.name.clone(), before_wait(stop.index)))
            .collect();

        for stop in catalogue.stops() {
            let edge_id = graph.add_edge(
                before_wait(stop.index),
                after_wait(stop.index),
                settings.bus_wait_time as f64,
            );
            debug_assert_eq!(edge_id as usize, segments.len());
            segments.push(RouteSegment::Wait {
                stop_name: stop.name.to_string(),
                minutes: settings.bus_wait_time as f64,
            });
        }

        for bus in catalogue.buses() {
            let directions: Vec<Vec<u32>> = if bus.is_circle {
                vec![bus.route.clone()]
            } else {
                vec![
                    bus.route.clone(),
                    bus.route.iter().rev().copied().collect(),
                ]
            };
            for direction in directions {
                add_bus_direction(
                    catalogue,
                    &bus.name,
                    &direction,
                    settings.bus_velocity,
                    &mut graph,
                    &mut segments,
                )?;
            }
        }

        Ok(Self {
            settings,
            graph,
            id_by_stop,
            segments,
        })
    }

    /// Reassembles a transport graph from its already-built parts, as
    /// restored from persistence. Performs no recomputation.
    pub fn from_parts(
        settings: RoutingSettings,
        graph: WeightedDigraph,
        id_by_stop: BTreeMap<Arc<str>, u32>,
        segments: Vec<RouteSegment>,
    ) -> Self {
        Self {
            settings,
            graph,
            id_by_stop,
            segments,
        }
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    pub fn inner_graph(&self) -> &WeightedDigraph {
        &self.graph
    }

    pub fn id_by_stop(&self) -> &BTreeMap<Arc<str>, u32> {
        &self.id_by_stop
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn segment(&self, edge_id: u32) -> &RouteSegment {
        &self.segments[edge_id as usize]
    }

    pub fn before_wait_id(&self, stop_name: &str) -> Option<u32> {
        self.id_by_stop.get(stop_name).copied()
    }
}

fn add_bus_direction(
    catalogue: &Catalogue,
    bus_name: &str,
    direction: &[u32],
    velocity_kmh: f64,
    graph: &mut WeightedDigraph,
    segments: &mut Vec<RouteSegment>,
) -> Result<(), Error> {
    for from_pos in 0..direction.len().saturating_sub(1) {
        let mut accumulated_meters = 0.0;
        let mut last_stop = direction[from_pos];
        for to_pos in (from_pos + 1)..direction.len() {
            let stop_to = direction[to_pos];
            let meters = catalogue
                .get_distance_by_index(last_stop, stop_to)
                .ok_or_else(|| Error::MissingDistance {
                    from: catalogue.stops()[last_stop as usize].name.to_string(),
                    to: catalogue.stops()[stop_to as usize].name.to_string(),
                })?;
            accumulated_meters += meters as f64;
            last_stop = stop_to;

            let minutes = accumulated_meters / (velocity_kmh * FACTOR_KM_PER_H_TO_M_PER_MIN);
            let edge_id = graph.add_edge(
                after_wait(direction[from_pos]),
                before_wait(stop_to),
                minutes,
            );
            debug_assert_eq!(edge_id as usize, segments.len());
            segments.push(RouteSegment::Ride {
                bus_name: bus_name.to_string(),
                span_count: (to_pos - from_pos) as u32,
                minutes,
            });
        }
    }
    Ok(())
}

pub const fn before_wait(stop_index: u32) -> u32 {
    2 * stop_index
}

pub const fn after_wait(stop_index: u32) -> u32 {
    2 * stop_index + 1
}
