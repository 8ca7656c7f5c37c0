pub mod json;

use chrono::TimeDelta;
use tracing::info;

use crate::{
    error::RouteError,
    network::{Network, Station, StationId},
};

pub use json::JsonAdapter;

pub struct ConnectionRecord {
    pub from: StationId,
    pub to: StationId,
    pub travel_time: TimeDelta,
}

pub trait NetworkAdapter {
    type Error: From<RouteError>;

    /// Returns every station, in the order they should be registered.
    fn stations(&self) -> Result<Vec<Station>, Self::Error>;

    /// Returns all connections; endpoints must be among `stations()`.
    fn connections(&self) -> Result<Vec<ConnectionRecord>, Self::Error>;
}

impl Network {
    pub fn from_adapter<A: NetworkAdapter>(adapter: &A) -> Result<Self, A::Error> {
        let mut network = Network::new();

        for station in adapter.stations()? {
            network.insert_station(station);
        }

        for c in adapter.connections()? {
            network.add_connection(c.from.as_str(), c.to.as_str(), c.travel_time)?;
        }

        info!(
            stations = network.station_count(),
            connections = network.connection_count(),
            "network loaded"
        );
        Ok(network)
    }
}
