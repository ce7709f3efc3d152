//! Human-meaningful labels attached to transport-graph edges.

use serde::{Deserialize, Serialize};

/// One label per edge of the transport graph; `edge_id` indexes directly
/// into the parallel segment table (see [`crate::routing::transport_graph`]).
///
/// Never reconstruct a segment's identity from its edge's endpoints alone:
/// two different buses can induce edges between the same pair of nodes
/// with different weights, and only the segment remembers which bus rode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteSegment {
    Wait { stop_name: String, minutes: f64 },
    Ride {
        bus_name: String,
        span_count: u32,
        minutes: f64,
    },
}

impl RouteSegment {
    pub fn minutes(&self) -> f64 {
        match self {
            RouteSegment::Wait { minutes, .. } => *minutes,
            RouteSegment::Ride { minutes, .. } => *minutes,
        }
    }
}
