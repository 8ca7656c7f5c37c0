//! Route queries over a [`Network`].
//!
//! Both searches work on internal station indices and keep a parent
//! pointer per reached station; the route is rebuilt by walking those
//! pointers back from the destination once it is reached.

use crate::{error::RouteError, network::Network, report::PathReport};

mod fastest_route;
pub mod heuristic;
mod least_transfers;

pub use fastest_route::fastest_route;
pub use heuristic::{Heuristic, NoHeuristic, StraightLine};
pub use least_transfers::least_transfers;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Upper bound on stations expanded by a single query. `None` searches
    /// until the frontier is exhausted.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

impl Network {
    /// Route with the fewest connections between two stations.
    pub fn find_least_transfers(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<PathReport, RouteError> {
        least_transfers(self, source, destination, &SearchOptions::default())
    }

    /// Route with the least total travel time between two stations, searched
    /// without a heuristic.
    pub fn find_fastest_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<PathReport, RouteError> {
        fastest_route(
            self,
            source,
            destination,
            &NoHeuristic,
            &SearchOptions::default(),
        )
    }
}

struct ExpansionBudget {
    limit: Option<usize>,
    used: usize,
}

impl ExpansionBudget {
    fn new(options: &SearchOptions) -> Self {
        Self {
            limit: options.max_expansions,
            used: 0,
        }
    }

    fn spend(&mut self) -> Result<(), RouteError> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                return Err(RouteError::ExpansionLimit { limit });
            }
        }
        self.used += 1;
        Ok(())
    }
}

/// Walk parent pointers from `target` back to `start`.
///
/// `parents[start]` must point at `start` itself.
fn walk_back(parents: &[Option<usize>], start: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;

    while current != start {
        match parents[current] {
            Some(parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }

    debug_assert_eq!(current, start, "parent chain from {target} never reaches {start}");
    path.reverse();
    path
}

fn no_route(network: &Network, start: usize, target: usize) -> RouteError {
    RouteError::NoRouteFound {
        from: network.station_at(start).id.clone(),
        to: network.station_at(target).id.clone(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::TimeDelta;

    use crate::network::Network;

    pub fn network(stations: &[&str], connections: &[(&str, &str, i64)]) -> Network {
        let mut network = Network::new();
        for &id in stations {
            network.add_station(id);
        }
        for &(a, b, minutes) in connections {
            network
                .add_connection(a, b, TimeDelta::minutes(minutes))
                .unwrap();
        }
        network
    }

    /// A1 -> A3 -> A8 -> A7 is both the shortest and the fastest way to A7.
    pub fn line_with_branch() -> Network {
        network(
            &["A1", "A3", "A8", "A7", "A10"],
            &[
                ("A1", "A3", 3),
                ("A3", "A8", 7),
                ("A8", "A7", 6),
                ("A1", "A10", 2),
            ],
        )
    }

    /// Direct S-T is one hop but slow; S-M-T is two hops but quick.
    pub fn shortcut_triangle() -> Network {
        network(
            &["S", "M", "T", "X"],
            &[("S", "T", 20), ("S", "M", 4), ("M", "T", 5)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_back_rebuilds_start_to_end_order() {
        let parents = vec![Some(0), Some(0), Some(1), None, Some(2)];
        assert_eq!(walk_back(&parents, 0, 4), vec![0, 1, 2, 4]);
        assert_eq!(walk_back(&parents, 0, 0), vec![0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "never reaches")]
    fn walk_back_rejects_broken_parent_chain() {
        let parents = vec![Some(0), None, Some(1)];
        walk_back(&parents, 0, 2);
    }

    #[test]
    fn budget_without_limit_never_runs_out() {
        let mut budget = ExpansionBudget::new(&SearchOptions::default());
        for _ in 0..10_000 {
            budget.spend().unwrap();
        }
    }

    #[test]
    fn budget_stops_at_limit() {
        let mut budget = ExpansionBudget::new(&SearchOptions::with_max_expansions(2));
        budget.spend().unwrap();
        budget.spend().unwrap();
        assert_eq!(
            budget.spend(),
            Err(RouteError::ExpansionLimit { limit: 2 })
        );
    }

    #[test]
    fn network_queries_use_default_options() {
        let network = fixtures::line_with_branch();
        let transfers = network.find_least_transfers("A1", "A7").unwrap();
        let fastest = network.find_fastest_route("A1", "A7").unwrap();
        assert_eq!(transfers, fastest);
    }
}
