use crate::network::StationId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("travel time between {from} and {to} must be a positive number of minutes, got {minutes}")]
    InvalidWeight {
        from: StationId,
        to: StationId,
        minutes: f64,
    },
    #[error("unknown station: {0}")]
    UnknownStation(StationId),
    #[error("no route found from {from} to {to}")]
    NoRouteFound { from: StationId, to: StationId },
    #[error("search gave up after expanding {limit} stations")]
    ExpansionLimit { limit: usize },
    #[error("total travel time through {at} exceeds the representable range")]
    TravelTimeOverflow { at: StationId },
    #[error("stations {from} and {to} are not directly connected")]
    NotConnected { from: StationId, to: StationId },
    #[error("a route needs at least one station")]
    EmptyPath,
}
