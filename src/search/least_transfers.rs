use std::collections::VecDeque;

use tracing::debug;

use crate::{
    error::RouteError,
    network::Network,
    report::PathReport,
    search::{ExpansionBudget, SearchOptions, no_route, walk_back},
};

/// Breadth-first search for the route with the fewest connections.
///
/// Stations are marked visited when they are enqueued, so each one is
/// expanded at most once and the first time `destination` is discovered
/// its path has the minimum number of edges. Which of several equally short
/// routes is returned follows adjacency order, i.e. the order connections
/// were registered in.
pub fn least_transfers(
    network: &Network,
    source: &str,
    destination: &str,
    options: &SearchOptions,
) -> Result<PathReport, RouteError> {
    let start = network.resolve(source)?;
    let target = network.resolve(destination)?;

    if start == target {
        return PathReport::from_indices(network, &[start]);
    }

    let mut budget = ExpansionBudget::new(options);
    let mut parents: Vec<Option<usize>> = vec![None; network.station_count()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    // Sentinel: start's parent is itself
    parents[start] = Some(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        budget.spend()?;

        for link in network.links_from(current) {
            if parents[link.to].is_some() {
                continue;
            }
            parents[link.to] = Some(current);

            if link.to == target {
                let path = walk_back(&parents, start, target);
                debug!(
                    source,
                    destination,
                    expanded = budget.used,
                    hops = path.len() - 1,
                    "least-transfers route found"
                );
                return PathReport::from_indices(network, &path);
            }

            queue.push_back(link.to);
        }
    }

    debug!(source, destination, expanded = budget.used, "no least-transfers route");
    Err(no_route(network, start, target))
}
