use std::{borrow::Borrow, collections::HashMap, fmt};

use chrono::TimeDelta;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::RouteError, network::station_index::StationIndex};

pub(crate) mod station_index;

pub use station_index::great_circle_meters;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub line: Option<String>,
    pub location: Option<geo_types::Point<f64>>,
}

impl Station {
    pub fn new(id: impl Into<StationId>) -> Self {
        let id = id.into();
        let name = id.to_string();
        Self {
            id,
            name,
            line: None,
            location: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(geo_types::Point::new(lon, lat));
        self
    }
}

/// One direction of a registered connection.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Link {
    pub to: usize,
    pub travel_time: TimeDelta,
}

/// Undirected transit graph keyed by station id.
///
/// Stations are stored densely and addressed internally by their
/// registration index; every connection is held in the adjacency list of
/// both endpoints.
#[derive(Debug, Default)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    links: Vec<Vec<Link>>,
    spatial: StationIndex,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a bare station. Does nothing if the id is already known.
    pub fn add_station(&mut self, id: impl Into<StationId>) {
        self.insert_station(Station::new(id));
    }

    /// Registers a station with its metadata. Returns `false` and keeps the
    /// existing entry if the id is already known.
    pub fn insert_station(&mut self, station: Station) -> bool {
        if self.index.contains_key(&station.id) {
            return false;
        }

        let idx = self.stations.len();
        if let Some(location) = station.location {
            self.spatial.add(location, idx);
        }
        self.index.insert(station.id.clone(), idx);
        self.stations.push(station);
        self.links.push(Vec::new());
        true
    }

    /// Connects two registered stations in both directions.
    pub fn add_connection(
        &mut self,
        a: &str,
        b: &str,
        travel_time: TimeDelta,
    ) -> Result<(), RouteError> {
        if travel_time <= TimeDelta::zero() {
            return Err(RouteError::InvalidWeight {
                from: a.into(),
                to: b.into(),
                minutes: travel_time.num_milliseconds() as f64 / 60_000.0,
            });
        }

        let from = self.resolve(a)?;
        let to = self.resolve(b)?;

        self.links[from].push(Link { to, travel_time });
        self.links[to].push(Link {
            to: from,
            travel_time,
        });
        debug!(from = a, to = b, minutes = travel_time.num_minutes(), "added connection");
        Ok(())
    }

    pub fn neighbors(
        &self,
        id: &str,
    ) -> Result<impl Iterator<Item = (&StationId, TimeDelta)> + '_, RouteError> {
        let idx = self.resolve(id)?;
        Ok(self.links[idx]
            .iter()
            .map(|link| (&self.stations[link.to].id, link.travel_time)))
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&idx| &self.stations[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Stations in registration order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected connections, parallel connections included.
    pub fn connection_count(&self) -> usize {
        self.links.iter().map(|l| l.len()).sum::<usize>() / 2
    }

    /// Stations grouped by their line, each group in registration order.
    /// Stations without a line are left out.
    pub fn lines(&self) -> HashMap<&str, Vec<&Station>> {
        self.stations
            .iter()
            .filter_map(|s| s.line.as_deref().map(|line| (line, s)))
            .into_group_map()
    }

    /// Closest located station to a point, with its distance in meters.
    pub fn nearest_station(&self, lat: f64, lon: f64) -> Option<(&Station, f64)> {
        self.spatial
            .nearest(lat, lon)
            .map(|(idx, distance)| (&self.stations[idx], distance))
    }

    /// Located stations within `radius_m` meters of a point, closest first.
    pub fn stations_within(&self, lat: f64, lon: f64, radius_m: f64) -> Vec<(&Station, f64)> {
        self.spatial
            .within_radius(lat, lon, radius_m)
            .map(|(idx, distance)| (&self.stations[idx], distance))
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
            .collect()
    }

    pub(crate) fn resolve(&self, id: &str) -> Result<usize, RouteError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| RouteError::UnknownStation(id.into()))
    }

    pub(crate) fn links_from(&self, idx: usize) -> &[Link] {
        &self.links[idx]
    }

    pub(crate) fn station_at(&self, idx: usize) -> &Station {
        &self.stations[idx]
    }

    /// Shortest travel time over the parallel connections between two
    /// stations, if any.
    pub(crate) fn travel_time_between(&self, from: usize, to: usize) -> Option<TimeDelta> {
        self.links[from]
            .iter()
            .filter(|link| link.to == to)
            .map(|link| link.travel_time)
            .min()
    }
}
