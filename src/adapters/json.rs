use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::TimeDelta;
use serde::Deserialize;

use crate::{
    adapters::{ConnectionRecord, NetworkAdapter},
    error::RouteError,
    network::{Station, StationId},
};

const DEMO_NETWORK: &str = include_str!("../../data/ankara_metro.json");

#[derive(Deserialize, Clone)]
pub struct StationInfo {
    pub id: StationId,
    pub name: Option<String>,
    pub line: Option<String>,
    lat: Option<f64>,
    #[serde(alias = "long")]
    lon: Option<f64>,
}

#[derive(Deserialize, Clone)]
pub struct ConnectionInfo {
    pub from: StationId,
    pub to: StationId,
    pub minutes: f64,
}

impl ConnectionInfo {
    /// Minutes as a `TimeDelta`, rounded to the millisecond. Values that do
    /// not round to a positive, representable duration are rejected.
    fn travel_time(&self) -> Result<TimeDelta, RouteError> {
        let millis = (self.minutes * 60_000.0).round();
        if millis.is_finite() && millis > 0.0 && millis < i64::MAX as f64 {
            if let Some(time) = TimeDelta::try_milliseconds(millis as i64) {
                return Ok(time);
            }
        }

        Err(RouteError::InvalidWeight {
            from: self.from.clone(),
            to: self.to.clone(),
            minutes: self.minutes,
        })
    }
}

/// Network description read from JSON:
/// `{"stations": [{"id", "name", "line", "lat", "lon"}], "connections": [{"from", "to", "minutes"}]}`.
#[derive(Deserialize, Clone)]
pub struct JsonAdapter {
    stations: Vec<StationInfo>,
    #[serde(default)]
    connections: Vec<ConnectionInfo>,
}

impl JsonAdapter {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid network description")
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The Ankara metro sample network.
    pub fn demo() -> Result<Self> {
        Self::parse(DEMO_NETWORK)
    }
}

impl NetworkAdapter for JsonAdapter {
    type Error = anyhow::Error;

    fn stations(&self) -> Result<Vec<Station>> {
        let stations = self
            .stations
            .iter()
            .map(|info| {
                let mut station = Station::new(info.id.clone());
                if let Some(name) = &info.name {
                    station = station.with_name(name.clone());
                }
                if let Some(line) = &info.line {
                    station = station.with_line(line.clone());
                }
                match (info.lat, info.lon) {
                    (Some(lat), Some(lon)) => station.with_location(lat, lon),
                    _ => station,
                }
            })
            .collect();

        Ok(stations)
    }

    fn connections(&self) -> Result<Vec<ConnectionRecord>> {
        let connections = self
            .connections
            .iter()
            .map(|c| {
                Ok(ConnectionRecord {
                    from: c.from.clone(),
                    to: c.to.clone(),
                    travel_time: c.travel_time()?,
                })
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        Ok(connections)
    }
}
