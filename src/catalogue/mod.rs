//! The transport catalogue: owns stops, buses, and inter-stop road
//! distances, and answers lookups and derived statistics over them.

mod entities;

pub use entities::{Bus, BusInfo, Stop};

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("duplicate name: {0}")]
    DuplicateName(String),
    #[error("unknown stop: {0}")]
    UnknownStop(String),
    #[error("unknown bus: {0}")]
    UnknownBus(String),
    #[error("missing distance from {from} to {to}")]
    MissingDistance { from: String, to: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Owns every [`Stop`] and [`Bus`] in the network plus the directed,
/// asymmetric-with-fallback road-distance table between stops.
///
/// Stops and buses are addressed by dense `u32` index into their backing
/// `Vec`; this is the arena+index pattern recommended by the design notes
/// and keeps all references stable across growth without needing raw
/// pointers or `Rc`. Lookup tables are `BTreeMap`s rather than `HashMap`s so
/// that serialisation iterates in a stable key order: two `build` runs over
/// identical input must emit byte-identical blobs (spec §4.7).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Catalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_lookup: BTreeMap<Arc<str>, u32>,
    bus_lookup: BTreeMap<Arc<str>, u32>,
    /// `stop index -> bus indices that visit it`, in insertion order.
    buses_by_stop: Vec<Vec<u32>>,
    /// `(from stop index, to stop index) -> meters`.
    distances: BTreeMap<(u32, u32), u32>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn distances(&self) -> &BTreeMap<(u32, u32), u32> {
        &self.distances
    }

    /// Appends a stop. Fails with [`Error::DuplicateName`] if the name is
    /// already taken; the catalogue is left unchanged on failure.
    pub fn add_stop(&mut self, name: &str, latitude: f64, longitude: f64) -> Result<u32, Error> {
        if name.is_empty() {
            return Err(Error::InvalidInput("stop name must not be empty".into()));
        }
        if self.stop_lookup.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let index = self.stops.len() as u32;
        let name: Arc<str> = name.into();
        self.stops.push(Stop {
            index,
            name: name.clone(),
            coordinate: Coordinate::new(latitude, longitude),
        });
        self.stop_lookup.insert(name, index);
        self.buses_by_stop.push(Vec::new());
        Ok(index)
    }

    /// Resolves `stop_names` against already-added stops and records the
    /// bus. Fails with [`Error::UnknownStop`] if any name is unresolved,
    /// [`Error::DuplicateName`] if the bus name is taken, or
    /// [`Error::InvalidInput`] for a route shorter than two stops (a bus
    /// needs at least an origin and a destination).
    pub fn add_bus(
        &mut self,
        name: &str,
        stop_names: &[String],
        is_circle: bool,
    ) -> Result<u32, Error> {
        if name.is_empty() {
            return Err(Error::InvalidInput("bus name must not be empty".into()));
        }
        if self.bus_lookup.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        if stop_names.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "bus {name} must reference at least two stops"
            )));
        }
        let route = stop_names
            .iter()
            .map(|stop_name| {
                self.stop_lookup
                    .get(stop_name.as_str())
                    .copied()
                    .ok_or_else(|| Error::UnknownStop(stop_name.clone()))
            })
            .collect::<Result<Vec<u32>, Error>>()?;

        let index = self.buses.len() as u32;
        let name: Arc<str> = name.into();
        self.buses.push(Bus {
            index,
            name: name.clone(),
            route: route.clone(),
            is_circle,
        });
        self.bus_lookup.insert(name, index);

        let mut seen = route.clone();
        seen.sort_unstable();
        seen.dedup();
        for stop_index in seen {
            self.buses_by_stop[stop_index as usize].push(index);
        }
        Ok(index)
    }

    /// Records the directed distance `from -> to`; overwrites any prior
    /// value for the same ordered pair.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), Error> {
        let from_idx = self.stop_index(from)?;
        let to_idx = self.stop_index(to)?;
        self.distances.insert((from_idx, to_idx), meters);
        Ok(())
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_lookup
            .get(name)
            .map(|&idx| &self.stops[idx as usize])
    }

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_lookup
            .get(name)
            .map(|&idx| &self.buses[idx as usize])
    }

    /// Asymmetric-with-fallback distance lookup by name: returns the stored
    /// `d(from, to)` if present, else the stored `d(to, from)`, else `None`.
    pub fn get_distance(&self, from: &str, to: &str) -> Option<u32> {
        let from_idx = *self.stop_lookup.get(from)?;
        let to_idx = *self.stop_lookup.get(to)?;
        self.get_distance_by_index(from_idx, to_idx)
    }

    pub fn get_distance_by_index(&self, from: u32, to: u32) -> Option<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    /// Computes the derived [`BusInfo`] for a bus, or `Ok(None)` if it does
    /// not exist. Fails with [`Error::MissingDistance`] if a consecutive
    /// pair along the traversal has no resolvable distance (a catalogue
    /// invariant violation), or [`Error::InvalidInput`] if every stop on the
    /// route is geographically coincident (curvature would be undefined).
    pub fn bus_info(&self, name: &str) -> Result<Option<BusInfo>, Error> {
        let Some(bus) = self.find_bus(name) else {
            return Ok(None);
        };

        let traversal = bus.traversal();
        let mut unique = bus.route.clone();
        unique.sort_unstable();
        unique.dedup();

        let mut road_length: u64 = 0;
        let mut geo_length: f64 = 0.0;
        for window in traversal.windows(2) {
            let (from, to) = (window[0], window[1]);
            let meters = self.get_distance_by_index(from, to).ok_or_else(|| {
                Error::MissingDistance {
                    from: self.stops[from as usize].name.to_string(),
                    to: self.stops[to as usize].name.to_string(),
                }
            })?;
            road_length += meters as u64;
            geo_length += self.stops[from as usize]
                .coordinate
                .distance(&self.stops[to as usize].coordinate);
        }

        if geo_length == 0.0 {
            return Err(Error::InvalidInput(format!(
                "bus {name} has zero-length route; curvature is undefined"
            )));
        }

        Ok(Some(BusInfo {
            stop_count: bus.stop_count(),
            unique_stop_count: unique.len(),
            route_length: road_length,
            curvature: road_length as f64 / geo_length,
        }))
    }

    /// Bus names whose route visits `stop`, in ascending lexicographic
    /// order, or `None` if the stop does not exist.
    pub fn buses_through(&self, stop: &str) -> Option<Vec<String>> {
        let stop_idx = *self.stop_lookup.get(stop)?;
        let mut names: Vec<String> = self.buses_by_stop[stop_idx as usize]
            .iter()
            .map(|&bus_idx| self.buses[bus_idx as usize].name.to_string())
            .collect();
        names.sort_unstable();
        Some(names)
    }

    fn stop_index(&self, name: &str) -> Result<u32, Error> {
        self.stop_lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownStop(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalogue() -> Catalogue {
        let mut cat = Catalogue::new();
        cat.add_stop("A", 55.0, 37.0).unwrap();
        cat.add_stop("B", 55.0, 37.01).unwrap();
        cat.add_stop("C", 55.0, 37.02).unwrap();
        cat.set_distance("A", "B", 1000).unwrap();
        cat.set_distance("B", "A", 1000).unwrap();
        cat.set_distance("B", "C", 1000).unwrap();
        cat.set_distance("C", "B", 1000).unwrap();
        cat
    }

    #[test]
    fn add_stop_rejects_duplicate_name() {
        let mut cat = Catalogue::new();
        cat.add_stop("A", 0.0, 0.0).unwrap();
        let err = cat.add_stop("A", 1.0, 1.0).unwrap_err();
        assert_eq!(err, Error::DuplicateName("A".into()));
        assert_eq!(cat.stops().len(), 1);
    }

    #[test]
    fn find_stop_returns_added_stop() {
        let cat = small_catalogue();
        let stop = cat.find_stop("B").unwrap();
        assert_eq!(stop.name.as_ref(), "B");
    }

    #[test]
    fn distance_fallback_applies_when_reverse_unset() {
        let mut cat = Catalogue::new();
        cat.add_stop("A", 0.0, 0.0).unwrap();
        cat.add_stop("B", 0.0, 1.0).unwrap();
        cat.set_distance("A", "B", 1000).unwrap();
        assert_eq!(cat.get_distance("A", "B"), Some(1000));
        assert_eq!(cat.get_distance("B", "A"), Some(1000));
    }

    #[test]
    fn distance_does_not_fallback_when_both_set() {
        let mut cat = Catalogue::new();
        cat.add_stop("A", 0.0, 0.0).unwrap();
        cat.add_stop("B", 0.0, 1.0).unwrap();
        cat.set_distance("A", "B", 1000).unwrap();
        cat.set_distance("B", "A", 1200).unwrap();
        assert_eq!(cat.get_distance("A", "B"), Some(1000));
        assert_eq!(cat.get_distance("B", "A"), Some(1200));
    }

    #[test]
    fn bus_info_circular_route() {
        let mut cat = small_catalogue();
        cat.add_stop("D", 55.0, 37.0).unwrap();
        cat.set_distance("C", "D", 1000).unwrap();
        cat.set_distance("D", "A", 1000).unwrap();
        cat.add_bus(
            "1",
            &["A".into(), "B".into(), "C".into(), "D".into(), "A".into()],
            true,
        )
        .unwrap();
        let info = cat.bus_info("1").unwrap().unwrap();
        assert_eq!(info.stop_count, 5);
        assert_eq!(info.unique_stop_count, 4);
        assert_eq!(info.route_length, 4000);
    }

    #[test]
    fn bus_info_linear_route_doubles_back() {
        let mut cat = small_catalogue();
        cat.add_bus("1", &["A".into(), "B".into(), "C".into()], false)
            .unwrap();
        let info = cat.bus_info("1").unwrap().unwrap();
        assert_eq!(info.stop_count, 5);
        assert_eq!(info.unique_stop_count, 3);
        assert_eq!(info.route_length, 4000);
    }

    #[test]
    fn bus_info_missing_returns_none() {
        let cat = small_catalogue();
        assert!(cat.bus_info("nope").unwrap().is_none());
    }

    #[test]
    fn buses_through_is_lexicographically_ordered() {
        let mut cat = small_catalogue();
        cat.add_bus("2", &["A".into(), "B".into()], false).unwrap();
        cat.add_bus("1", &["B".into(), "C".into()], false).unwrap();
        assert_eq!(
            cat.buses_through("B").unwrap(),
            vec!["1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn single_stop_bus_is_rejected() {
        let mut cat = Catalogue::new();
        cat.add_stop("A", 0.0, 0.0).unwrap();
        let err = cat.add_bus("1", &["A".into()], true).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
