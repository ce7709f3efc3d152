//! Stop, Bus and their derived statistics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A named geographic point on the network.
///
/// Stops are never mutated or removed once added; other entities (buses,
/// distances) refer to them by dense index rather than by pointer, so the
/// backing `Vec<Stop>` may grow freely without invalidating anyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub index: u32,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

/// A named, ordered sequence of stop references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bus {
    pub index: u32,
    pub name: Arc<str>,
    /// Stop indices as listed in the source data (not the full traversal).
    pub route: Vec<u32>,
    pub is_circle: bool,
}

impl Bus {
    /// The sequence of stop indices actually traversed: the listed route for
    /// a circular bus, or the listed route followed by its reverse (minus
    /// the turnaround duplicate) for a linear one.
    pub fn traversal(&self) -> Vec<u32> {
        if self.is_circle {
            self.route.clone()
        } else {
            let mut full = self.route.clone();
            full.extend(self.route.iter().rev().skip(1).copied());
            full
        }
    }

    /// Number of stops in the traversed sequence: `N` circular, `2N-1` linear.
    pub fn stop_count(&self) -> usize {
        if self.is_circle {
            self.route.len()
        } else {
            2 * self.route.len() - 1
        }
    }
}

/// Derived per-bus statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusInfo {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: u64,
    pub curvature: f64,
}
