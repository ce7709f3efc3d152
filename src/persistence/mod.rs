//! Binary persistence of a built network: serializes the catalogue, render
//! settings, transport graph and its all-pairs table into a single
//! self-describing CBOR blob, and restores them losslessly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalogue::Catalogue,
    render::RenderSettings,
    routing::{AllPairsRouter, RoutingSettings, TransportGraph},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to encode database: {0}")]
    Encode(#[from] ciborium::ser::Error<std::io::Error>),
    #[error("failed to decode database: {0}")]
    Decode(#[from] ciborium::de::Error<std::io::Error>),
}

/// Everything needed to answer queries without rebuilding from source data:
/// the catalogue, the settings a map would be rendered with, and (if a
/// router was built) the transport graph plus its precomputed shortest-path
/// table.
#[derive(Debug, Serialize, Deserialize)]
pub struct Database {
    pub catalogue: Catalogue,
    pub render_settings: Option<RenderSettings>,
    pub routing: Option<RoutingSection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoutingSection {
    pub settings: RoutingSettings,
    pub graph: TransportGraph,
    pub all_pairs: AllPairsRouter,
}

impl Database {
    /// Serializes `self` to a CBOR byte string.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)?;
        Ok(buf)
    }

    /// Restores a `Database` previously written by [`Database::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let database = ciborium::from_reader(bytes)?;
        Ok(database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::TransportRouter;

    fn sample_catalogue() -> Catalogue {
        let mut cat = Catalogue::new();
        cat.add_stop("A", 55.0, 37.0).unwrap();
        cat.add_stop("B", 55.0, 37.01).unwrap();
        cat.set_distance("A", "B", 1000).unwrap();
        cat.set_distance("B", "A", 1000).unwrap();
        cat.add_bus("1", &["A".into(), "B".into()], false).unwrap();
        cat
    }

    #[test]
    fn round_trips_a_catalogue_only_database() {
        let database = Database {
            catalogue: sample_catalogue(),
            render_settings: None,
            routing: None,
        };
        let bytes = database.to_bytes().unwrap();
        let restored = Database::from_bytes(&bytes).unwrap();
        assert_eq!(restored.catalogue.stops().len(), 2);
        assert_eq!(restored.catalogue.buses().len(), 1);
        assert!(restored.routing.is_none());
    }

    #[test]
    fn round_trips_a_database_with_a_built_router() {
        let catalogue = sample_catalogue();
        let settings = RoutingSettings::default();
        let router = TransportRouter::build(&catalogue, settings).unwrap();
        let database = Database {
            catalogue,
            render_settings: None,
            routing: Some(RoutingSection {
                settings,
                graph: router.transport_graph().clone(),
                all_pairs: router.all_pairs().clone(),
            }),
        };
        let bytes = database.to_bytes().unwrap();
        let restored = Database::from_bytes(&bytes).unwrap();
        let restored_router = TransportRouter::from_parts(
            restored.routing.as_ref().unwrap().graph.clone(),
            restored.routing.as_ref().unwrap().all_pairs.clone(),
        );
        let journey = restored_router.shortest_route("A", "B").unwrap();
        assert!(journey.total_time > 0.0);
    }

    #[test]
    fn rejects_truncated_input() {
        let err = Database::from_bytes(&[0xff, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
