//! Route planning over a transit network.
//!
//! A [`Network`] holds stations and undirected, positively weighted
//! connections. Two queries run on it: the route with the fewest
//! connections (breadth-first search) and the route with the least total
//! travel time (A*, Dijkstra when no heuristic is given). Both return a
//! [`PathReport`].

pub mod adapters;
mod error;
pub mod network;
pub mod report;
pub mod search;

pub use adapters::{JsonAdapter, NetworkAdapter};
pub use error::RouteError;
pub use network::{Network, Station, StationId};
pub use report::PathReport;
pub use search::{Heuristic, NoHeuristic, SearchOptions, StraightLine};
