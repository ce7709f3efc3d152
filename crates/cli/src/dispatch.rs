//! Answers a single [`StatRequest`] against a loaded network, producing the
//! structured response object for that query.

use serde_json::{json, Value};
use transit_catalogue::{
    render_map, routing::RouteSegment, Catalogue, RenderSettings, TransportRouter,
};

use crate::dto::StatRequest;

pub fn answer(
    request: &StatRequest,
    catalogue: &Catalogue,
    router: Option<&TransportRouter>,
    render_settings: Option<&RenderSettings>,
) -> Value {
    match request {
        StatRequest::Stop { id, name } => match catalogue.buses_through(name) {
            Some(buses) => json!({"request_id": id, "buses": buses}),
            None => not_found(*id),
        },
        StatRequest::Bus { id, name } => match catalogue.bus_info(name) {
            Ok(Some(info)) => json!({
                "request_id": id,
                "stop_count": info.stop_count,
                "unique_stop_count": info.unique_stop_count,
                "route_length": info.route_length,
                "curvature": info.curvature,
            }),
            Ok(None) | Err(_) => not_found(*id),
        },
        StatRequest::Map { id } => match render_settings {
            Some(settings) => json!({"request_id": id, "map": render_map(catalogue, settings)}),
            None => not_found(*id),
        },
        StatRequest::Route { id, from, to } => {
            // A query from a stop to itself is free and has no segments even
            // when no bus router exists (no buses in the catalogue): the
            // router is only needed to cross between two distinct stops.
            if from == to {
                return match catalogue.find_stop(from) {
                    Some(_) => json!({"request_id": id, "total_time": 0.0, "items": Vec::<Value>::new()}),
                    None => not_found(*id),
                };
            }
            match router.and_then(|router| router.shortest_route(from, to)) {
                Some(journey) => json!({
                    "request_id": id,
                    "total_time": journey.total_time,
                    "items": journey.items.iter().map(segment_json).collect::<Vec<_>>(),
                }),
                None => not_found(*id),
            }
        }
    }
}

fn segment_json(segment: &&RouteSegment) -> Value {
    match segment {
        RouteSegment::Wait { stop_name, minutes } => json!({
            "type": "Wait",
            "stop_name": stop_name,
            "time": minutes,
        }),
        RouteSegment::Ride {
            bus_name,
            span_count,
            minutes,
        } => json!({
            "type": "Bus",
            "bus": bus_name,
            "span_count": span_count,
            "time": minutes,
        }),
    }
}

fn not_found(id: i64) -> Value {
    json!({"request_id": id, "error_message": "not found"})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stop_answers_not_found() {
        let catalogue = Catalogue::new();
        let response = answer(
            &StatRequest::Stop {
                id: 1,
                name: "nope".into(),
            },
            &catalogue,
            None,
            None,
        );
        assert_eq!(response["error_message"], "not found");
    }

    #[test]
    fn map_request_without_settings_is_not_found() {
        let catalogue = Catalogue::new();
        let response = answer(&StatRequest::Map { id: 1 }, &catalogue, None, None);
        assert_eq!(response["error_message"], "not found");
    }

    #[test]
    fn same_stop_route_is_free_even_without_a_router() {
        let mut catalogue = Catalogue::new();
        catalogue.add_stop("A", 0.0, 0.0).unwrap();
        catalogue.add_stop("B", 0.0, 1.0).unwrap();
        let response = answer(
            &StatRequest::Route {
                id: 1,
                from: "A".into(),
                to: "A".into(),
            },
            &catalogue,
            None,
            None,
        );
        assert_eq!(response["total_time"], 0.0);
        assert_eq!(response["items"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn same_stop_route_on_unknown_stop_is_not_found() {
        let catalogue = Catalogue::new();
        let response = answer(
            &StatRequest::Route {
                id: 1,
                from: "Nowhere".into(),
                to: "Nowhere".into(),
            },
            &catalogue,
            None,
            None,
        );
        assert_eq!(response["error_message"], "not found");
    }
}
