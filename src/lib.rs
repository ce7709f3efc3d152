pub mod catalogue;
pub mod geo;
pub mod graph;
pub mod persistence;
pub mod render;
pub mod routing;

pub use catalogue::Catalogue;
pub use persistence::Database;
pub use render::{render_map, RenderSettings};
pub use routing::{RoutingSettings, TransportRouter};
