use std::{cmp::Reverse, collections::BinaryHeap};

use chrono::TimeDelta;
use tracing::debug;

use crate::{
    error::RouteError,
    network::Network,
    report::PathReport,
    search::{ExpansionBudget, Heuristic, SearchOptions, no_route, walk_back},
};

/// A* search for the route with the least total travel time.
///
/// The heap holds `(f, g, station)` with `f = g + h`. Improved stations get
/// a fresh entry instead of an in-place update, and entries whose `g` is
/// worse than the best known for their station are skipped when popped.
/// Ties on `f` fall back to `g` and then the station's registration index,
/// which only changes which optimal route is reported.
///
/// A travel time that no longer fits in a `TimeDelta` fails the query with
/// [`RouteError::TravelTimeOverflow`]; an estimate pushing `f` past that
/// range saturates instead.
pub fn fastest_route<H: Heuristic>(
    network: &Network,
    source: &str,
    destination: &str,
    heuristic: &H,
    options: &SearchOptions,
) -> Result<PathReport, RouteError> {
    let start = network.resolve(source)?;
    let target = network.resolve(destination)?;

    if start == target {
        return PathReport::from_indices(network, &[start]);
    }

    let goal = network.station_at(target);
    let estimate = |idx: usize| heuristic.estimate(network.station_at(idx), goal);

    let mut budget = ExpansionBudget::new(options);
    let mut best: Vec<Option<TimeDelta>> = vec![None; network.station_count()];
    let mut parents: Vec<Option<usize>> = vec![None; network.station_count()];
    let mut heap: BinaryHeap<Reverse<(TimeDelta, TimeDelta, usize)>> = BinaryHeap::new();

    best[start] = Some(TimeDelta::zero());
    parents[start] = Some(start);
    heap.push(Reverse((estimate(start), TimeDelta::zero(), start)));

    while let Some(Reverse((_, g, current))) = heap.pop() {
        // Lazy check
        if best[current].is_some_and(|known| g > known) {
            continue;
        }

        if current == target {
            let path = walk_back(&parents, start, target);
            debug!(
                source,
                destination,
                expanded = budget.used,
                minutes = g.num_minutes(),
                "fastest route found"
            );
            return PathReport::from_indices(network, &path);
        }

        budget.spend()?;

        for link in network.links_from(current) {
            let candidate =
                g.checked_add(&link.travel_time)
                    .ok_or_else(|| RouteError::TravelTimeOverflow {
                        at: network.station_at(link.to).id.clone(),
                    })?;
            if best[link.to].is_none_or(|known| candidate < known) {
                best[link.to] = Some(candidate);
                parents[link.to] = Some(current);
                let f = candidate
                    .checked_add(&estimate(link.to))
                    .unwrap_or(TimeDelta::MAX);
                heap.push(Reverse((f, candidate, link.to)));
            }
        }
    }

    debug!(source, destination, expanded = budget.used, "no fastest route");
    Err(no_route(network, start, target))
}
