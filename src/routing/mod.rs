//! Routing subsystem: all-pairs precomputation, node-splitting transport
//! graph construction, and the composed transport router.

pub mod all_pairs;
pub mod segment;
pub mod transport_graph;
pub mod transport_router;

pub use all_pairs::{AllPairsRouter, RouteRecord, Route};
pub use segment::RouteSegment;
pub use transport_graph::{RoutingSettings, TransportGraph};
pub use transport_router::{Journey, TransportRouter};
