//! Deserialization shapes for the structured request envelope read from
//! standard input.

use std::collections::HashMap;

use serde::Deserialize;
use transit_catalogue::{RenderSettings, RoutingSettings};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: HashMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: i64, name: String },
    Bus { id: i64, name: String },
    Map { id: i64 },
    Route { id: i64, from: String, to: String },
}

#[derive(Debug, Deserialize)]
pub struct SerializationSettings {
    pub file: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
    pub render_settings: Option<RenderSettings>,
    pub routing_settings: Option<RoutingSettings>,
    pub serialization_settings: Option<SerializationSettings>,
}
