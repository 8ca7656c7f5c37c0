use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about = "Fewest-transfer and fastest routes through a transit network")]
pub struct Cli {
    /// JSON network description; the Ankara metro sample is used if omitted
    #[arg(long, global = true)]
    pub network: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find routes between two stations
    Route(RouteArgs),
    /// Find the station closest to a point
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// List stations grouped by line
    Lines,
    /// Run the sample queries against the network
    Demo,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    #[arg(long)]
    pub from: String,

    #[arg(long)]
    pub to: String,

    #[arg(long, value_enum, default_value_t = Strategy::Both)]
    pub strategy: Strategy,

    #[arg(long, value_enum, default_value_t = HeuristicKind::None)]
    pub heuristic: HeuristicKind,

    /// Fastest speed of any connection, in m/s, for the straight-line heuristic
    #[arg(long, default_value_t = 100.0, value_parser = parse_speed)]
    pub max_speed: f64,

    /// Give up after expanding this many stations
    #[arg(long)]
    pub max_expansions: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

const MIN_SPEED_M_S: f64 = 0.1;

fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if speed.is_finite() && speed >= MIN_SPEED_M_S {
        Ok(speed)
    } else {
        Err(format!("speed must be a finite number of at least {MIN_SPEED_M_S} m/s"))
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Both,
    Transfers,
    Fastest,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    None,
    StraightLine,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Geojson,
}
