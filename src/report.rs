use std::fmt;

use chrono::TimeDelta;
use geojson::{Feature, FeatureCollection, ser::serialize_geometry};
use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::{
    error::RouteError,
    network::{Network, StationId},
};

/// Summary of a found route.
///
/// `transfers` counts every connection travelled, so it is always
/// `station_count - 1`. Without per-connection line data that is the only
/// recoverable definition; `line_changes` is the closer approximation when
/// stations carry a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReport {
    pub stations: Vec<StationId>,
    #[serde(rename = "totalMinutes", serialize_with = "serialize_minutes")]
    pub total_time: TimeDelta,
    pub transfers: usize,
    pub station_count: usize,
    pub line_changes: usize,
}

impl PathReport {
    /// Builds a report for a path produced by one of the searches, where
    /// every consecutive pair is known to be connected.
    pub(crate) fn from_indices(network: &Network, path: &[usize]) -> Result<Self, RouteError> {
        let mut total_time = TimeDelta::zero();
        for (&a, &b) in path.iter().tuple_windows() {
            if let Some(t) = network.travel_time_between(a, b) {
                total_time = total_time.checked_add(&t).ok_or_else(|| {
                    RouteError::TravelTimeOverflow {
                        at: network.station_at(b).id.clone(),
                    }
                })?;
            }
        }

        let line_changes = path
            .iter()
            .map(|&idx| network.station_at(idx).line.as_deref())
            .tuple_windows()
            .filter(|(a, b)| matches!((a, b), (Some(a), Some(b)) if a != b))
            .count();

        Ok(Self {
            stations: path
                .iter()
                .map(|&idx| network.station_at(idx).id.clone())
                .collect(),
            total_time,
            transfers: path.len().saturating_sub(1),
            station_count: path.len(),
            line_changes,
        })
    }

    /// Reports an arbitrary path through `network`.
    pub fn for_path<S: AsRef<str>>(network: &Network, path: &[S]) -> Result<Self, RouteError> {
        if path.is_empty() {
            return Err(RouteError::EmptyPath);
        }

        let indices = path
            .iter()
            .map(|id| network.resolve(id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for (&a, &b) in indices.iter().tuple_windows() {
            if network.travel_time_between(a, b).is_none() {
                return Err(RouteError::NotConnected {
                    from: network.station_at(a).id.clone(),
                    to: network.station_at(b).id.clone(),
                });
            }
        }

        Self::from_indices(network, &indices)
    }

    pub fn route(&self) -> String {
        self.stations.iter().join(" -> ")
    }

    /// Route spelled out with station names instead of ids.
    pub fn named_route(&self, network: &Network) -> String {
        self.stations
            .iter()
            .map(|id| {
                network
                    .station(id.as_str())
                    .map_or(id.as_str(), |s| s.name.as_str())
            })
            .join(" -> ")
    }

    /// Named route followed by the summary lines, without the id route.
    pub fn describe(&self, network: &Network) -> String {
        format!(
            "{}\nTotal time: {}\nNumber of transfers: {}\nTotal stations visited: {}",
            self.named_route(network),
            format_minutes(self.total_time),
            self.transfers,
            self.station_count
        )
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.route())?;
        writeln!(f, "Total time: {}", format_minutes(self.total_time))?;
        writeln!(f, "Number of transfers: {}", self.transfers)?;
        write!(f, "Total stations visited: {}", self.station_count)
    }
}

pub fn format_minutes(time: TimeDelta) -> String {
    let minutes = minutes(time);
    if minutes.fract() == 0.0 {
        format!("{minutes:.0} minutes")
    } else {
        format!("{minutes:.1} minutes")
    }
}

fn minutes(time: TimeDelta) -> f64 {
    time.num_milliseconds() as f64 / 60_000.0
}

fn serialize_minutes<S: Serializer>(time: &TimeDelta, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_f64(minutes(*time))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteFeature {
    route: String,
    total_minutes: f64,
    transfers: usize,
    station_count: usize,
    #[serde(serialize_with = "serialize_geometry")]
    geometry: geo_types::LineString<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StationFeature {
    id: String,
    name: String,
    position: usize,
    #[serde(serialize_with = "serialize_geometry")]
    geometry: geo_types::Point<f64>,
}

/// GeoJSON rendering of a route: one line through the located stations,
/// followed by a point per located station. Stations without a location
/// are left out of both.
pub fn to_feature_collection(
    network: &Network,
    report: &PathReport,
) -> Result<FeatureCollection, geojson::Error> {
    let located: Vec<_> = report
        .stations
        .iter()
        .enumerate()
        .filter_map(|(position, id)| {
            let station = network.station(id.as_str())?;
            station.location.map(|p| (position, station, p))
        })
        .collect();

    let mut features: Vec<Feature> = Vec::with_capacity(located.len() + 1);

    if located.len() >= 2 {
        let line = RouteFeature {
            route: report.route(),
            total_minutes: minutes(report.total_time),
            transfers: report.transfers,
            station_count: report.station_count,
            geometry: located.iter().map(|(_, _, p)| *p).collect(),
        };
        features.push(geojson::ser::to_feature(line)?);
    }

    for (position, station, point) in located {
        let feature = StationFeature {
            id: station.id.to_string(),
            name: station.name.clone(),
            position,
            geometry: point,
        };
        features.push(geojson::ser::to_feature(feature)?);
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
