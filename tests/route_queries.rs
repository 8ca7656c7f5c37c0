use std::collections::HashSet;

use chrono::TimeDelta;
use metro_router::{
    JsonAdapter, Network, NoHeuristic, PathReport, RouteError, SearchOptions, StraightLine,
    search,
};

/// Every simple path from `from` to `to`, as (edge count, total time).
fn all_simple_paths(network: &Network, from: &str, to: &str) -> Vec<(usize, TimeDelta)> {
    fn walk(
        network: &Network,
        current: &str,
        to: &str,
        visited: &mut Vec<String>,
        time: TimeDelta,
        out: &mut Vec<(usize, TimeDelta)>,
    ) {
        if current == to {
            out.push((visited.len() - 1, time));
            return;
        }
        let next: Vec<_> = network
            .neighbors(current)
            .unwrap()
            .map(|(id, t)| (id.to_string(), t))
            .collect();
        for (id, t) in next {
            if visited.contains(&id) {
                continue;
            }
            visited.push(id.clone());
            walk(network, &id, to, visited, time + t, out);
            visited.pop();
        }
    }

    let mut out = Vec::new();
    let mut visited = vec![from.to_string()];
    walk(network, from, to, &mut visited, TimeDelta::zero(), &mut out);
    out
}

fn assert_simple(report: &PathReport) {
    let unique: HashSet<_> = report.stations.iter().collect();
    assert_eq!(unique.len(), report.stations.len(), "{report}");
    assert_eq!(report.station_count, report.stations.len());
    assert_eq!(report.transfers, report.station_count - 1);
}

fn check_against_brute_force(network: &Network) {
    let ids: Vec<String> = network.stations().map(|s| s.id.to_string()).collect();
    let guided = StraightLine::new(100.0);
    let options = SearchOptions::default();

    for from in &ids {
        for to in &ids {
            let paths = all_simple_paths(network, from, to);
            let transfers = search::least_transfers(network, from, to, &options);
            let fastest = search::fastest_route(network, from, to, &NoHeuristic, &options);
            let fastest_guided = search::fastest_route(network, from, to, &guided, &options);

            if paths.is_empty() {
                for result in [transfers, fastest, fastest_guided] {
                    assert!(
                        matches!(result, Err(RouteError::NoRouteFound { .. })),
                        "{from} -> {to}"
                    );
                }
                continue;
            }

            let min_hops = paths.iter().map(|p| p.0).min().unwrap();
            let min_time = paths.iter().map(|p| p.1).min().unwrap();

            let transfers = transfers.unwrap();
            assert_simple(&transfers);
            assert_eq!(transfers.transfers, min_hops, "{from} -> {to}");

            for report in [fastest.unwrap(), fastest_guided.unwrap()] {
                assert_simple(&report);
                assert_eq!(report.total_time, min_time, "{from} -> {to}");
                assert_eq!(report.stations.first().map(|s| s.as_str()), Some(from.as_str()));
                assert_eq!(report.stations.last().map(|s| s.as_str()), Some(to.as_str()));
            }
        }
    }
}

fn network(stations: &[&str], connections: &[(&str, &str, i64)]) -> Network {
    let mut network = Network::new();
    for &id in stations {
        network.add_station(id);
    }
    for &(a, b, m) in connections {
        network.add_connection(a, b, TimeDelta::minutes(m)).unwrap();
    }
    network
}

#[test]
fn end_to_end_example() {
    let network = network(
        &["A1", "A3", "A8", "A7", "A10"],
        &[
            ("A1", "A3", 3),
            ("A3", "A8", 7),
            ("A8", "A7", 6),
            ("A1", "A10", 2),
        ],
    );

    for report in [
        network.find_least_transfers("A1", "A7").unwrap(),
        network.find_fastest_route("A1", "A7").unwrap(),
    ] {
        assert_eq!(report.route(), "A1 -> A3 -> A8 -> A7");
        assert_eq!(report.total_time, TimeDelta::minutes(16));
        assert_eq!(report.transfers, 3);
        assert_eq!(report.station_count, 4);
    }

    for report in [
        network.find_least_transfers("A1", "A10").unwrap(),
        network.find_fastest_route("A1", "A10").unwrap(),
    ] {
        assert_eq!(report.route(), "A1 -> A10");
        assert_eq!(report.total_time, TimeDelta::minutes(2));
        assert_eq!(report.transfers, 1);
        assert_eq!(report.station_count, 2);
    }
}

#[test]
fn demo_network_matches_brute_force() {
    let network = Network::from_adapter(&JsonAdapter::demo().unwrap()).unwrap();
    check_against_brute_force(&network);
}

#[test]
fn dense_network_matches_brute_force() {
    let network = network(
        &["a", "b", "c", "d", "e", "f", "g", "h"],
        &[
            ("a", "b", 7),
            ("a", "c", 2),
            ("a", "d", 9),
            ("b", "c", 3),
            ("b", "e", 1),
            ("c", "d", 4),
            ("c", "f", 8),
            ("d", "f", 2),
            ("e", "f", 6),
            ("e", "g", 5),
            ("f", "g", 1),
            ("f", "h", 12),
            ("g", "h", 3),
            ("a", "b", 4),
            ("d", "g", 11),
        ],
    );
    check_against_brute_force(&network);
}

#[test]
fn split_network_matches_brute_force() {
    let network = network(
        &["n1", "n2", "n3", "s1", "s2", "lonely"],
        &[
            ("n1", "n2", 1),
            ("n2", "n3", 1),
            ("n1", "n3", 3),
            ("s1", "s2", 2),
        ],
    );
    check_against_brute_force(&network);
}

#[test]
fn failed_queries_leave_the_network_usable() {
    let mut network = Network::from_adapter(&JsonAdapter::demo().unwrap()).unwrap();
    network.add_station("A11");

    assert!(matches!(
        network.find_fastest_route("A1", "A11"),
        Err(RouteError::NoRouteFound { .. })
    ));
    assert!(matches!(
        network.find_least_transfers("A11", "A1"),
        Err(RouteError::NoRouteFound { .. })
    ));
    assert!(matches!(
        network.find_least_transfers("A1", "Z9"),
        Err(RouteError::UnknownStation(_))
    ));
    assert!(matches!(
        network.add_connection("A1", "A11", TimeDelta::zero()),
        Err(RouteError::InvalidWeight { .. })
    ));
    assert_eq!(network.connection_count(), 9);

    network.add_connection("A1", "A11", TimeDelta::minutes(4)).unwrap();
    let report = network.find_fastest_route("A9", "A11").unwrap();
    assert_eq!(report.route(), "A9 -> A4 -> A3 -> A1 -> A11");
    assert_eq!(report.total_time, TimeDelta::minutes(24));
}
