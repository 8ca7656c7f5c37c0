mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use metro_router::{
    JsonAdapter, Network, NoHeuristic, PathReport, RouteError, SearchOptions, StraightLine,
    report::to_feature_collection,
    search,
};
use tracing::{Level, warn};

use crate::cli::{Cli, Command, Format, HeuristicKind, RouteArgs, Strategy};

const DEMO_QUERIES: [(&str, &str); 12] = [
    ("A1", "A7"),
    ("A1", "A10"),
    ("A2", "A6"),
    ("A3", "A9"),
    ("A5", "A7"),
    ("A8", "A10"),
    ("A1", "A1"),
    ("A1", "A4"),
    ("A3", "A2"),
    ("A5", "A8"),
    ("A6", "A9"),
    ("A10", "A1"),
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let adapter = match &cli.network {
        Some(path) => JsonAdapter::read(path)?,
        None => JsonAdapter::demo()?,
    };
    let network = Network::from_adapter(&adapter)?;

    match cli.command {
        Command::Route(args) => route(&network, &args),
        Command::Nearest { lat, lon } => {
            let (station, distance) = network
                .nearest_station(lat, lon)
                .context("no station in the network has a location")?;
            println!("{} ({}) is {:.0} m away", station.name, station.id, distance);
            Ok(())
        }
        Command::Lines => {
            for (line, stations) in network.lines().into_iter().sorted_by_key(|(l, _)| *l) {
                println!("{line}: {}", stations.iter().map(|s| &s.name).join(", "));
            }
            Ok(())
        }
        Command::Demo => {
            demo(&network);
            Ok(())
        }
    }
}

fn route(network: &Network, args: &RouteArgs) -> Result<()> {
    let options = SearchOptions {
        max_expansions: args.max_expansions,
    };

    let mut reports = Vec::new();
    if matches!(args.strategy, Strategy::Both | Strategy::Transfers) {
        let report = search::least_transfers(network, &args.from, &args.to, &options)?;
        reports.push(("Least transfer route", report));
    }
    if matches!(args.strategy, Strategy::Both | Strategy::Fastest) {
        let report = match args.heuristic {
            HeuristicKind::None => {
                search::fastest_route(network, &args.from, &args.to, &NoHeuristic, &options)?
            }
            HeuristicKind::StraightLine => search::fastest_route(
                network,
                &args.from,
                &args.to,
                &StraightLine::new(args.max_speed),
                &options,
            )?,
        };
        reports.push(("Fastest route", report));
    }

    match args.format {
        Format::Text => {
            for (title, report) in &reports {
                println!("{title} ({} -> {}):", args.from, args.to);
                print_route(network, report);
                println!();
            }
        }
        Format::Json => {
            let mut json = serde_json::Map::new();
            for (title, report) in &reports {
                json.insert(title.to_string(), serde_json::to_value(report)?);
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Geojson => {
            let features = reports
                .iter()
                .map(|(_, report)| to_feature_collection(network, report))
                .collect::<Result<Vec<_>, _>>()?;
            let collection = geojson::FeatureCollection {
                bbox: None,
                features: features.into_iter().flat_map(|c| c.features).collect(),
                foreign_members: None,
            };
            println!("{collection}");
        }
    }

    Ok(())
}

fn demo(network: &Network) {
    for (start, target) in DEMO_QUERIES {
        let transfer_route = network.find_least_transfers(start, target);
        let fastest_route = network.find_fastest_route(start, target);

        match (&transfer_route, &fastest_route) {
            (Ok(transfers), Ok(fastest)) if transfers.stations == fastest.stations => {
                println!("Least transfer route ({start} -> {target}):");
                print_route(network, transfers);
                println!("The fastest route and least transfer route are the same.\n");
            }
            _ => {
                println!("Least transfer route ({start} -> {target}):");
                print_outcome(network, &transfer_route);
                println!("\nFastest route ({start} -> {target}):");
                print_outcome(network, &fastest_route);
                println!();
            }
        }
    }
}

fn print_outcome(network: &Network, outcome: &Result<PathReport, RouteError>) {
    match outcome {
        Ok(report) => print_route(network, report),
        Err(RouteError::NoRouteFound { .. }) => println!("Route not found."),
        Err(err) => {
            warn!(%err, "route query failed");
            println!("Route not found.");
        }
    }
}

fn print_route(network: &Network, report: &PathReport) {
    println!("{}", report.describe(network));
}
