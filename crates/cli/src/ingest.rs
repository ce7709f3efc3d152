//! Reorders a batch of [`BaseRequest`] records and applies them to a
//! [`Catalogue`], satisfying the mandatory stops-before-buses-before-
//! distances build order.

use transit_catalogue::Catalogue;

use crate::{dto::BaseRequest, error::CliError};

pub fn ingest(catalogue: &mut Catalogue, records: &[BaseRequest]) -> Result<(), CliError> {
    for record in records {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = record
        {
            catalogue.add_stop(name, *latitude, *longitude)?;
        }
    }

    for record in records {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = record
        {
            for (neighbour, meters) in road_distances {
                catalogue.set_distance(name, neighbour, *meters)?;
            }
        }
    }

    for record in records {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = record
        {
            catalogue.add_bus(name, stops, *is_roundtrip)?;
        }
    }

    Ok(())
}
