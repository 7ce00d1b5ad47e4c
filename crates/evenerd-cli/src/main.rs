use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evenerd_cli::commands::batch::handle_batch_command;
use evenerd_cli::commands::distances::{handle_distances_command, DistancesCommandArgs};
use evenerd_cli::commands::parameters::handle_parameters_command;
use evenerd_cli::commands::route::{handle_route_command, RouteCommandArgs};
use evenerd_cli::commands::{
    parse_beacon, parse_bridge, BeaconSpec, BridgeSpec, DatasetArgs, ProfileArgs,
};
use evenerd_cli::output::OutputFormat;
use evenerd_lib::parameters::DEFAULT_THREADS;
use evenerd_lib::{FatigueModel, ShipPreset, SolverConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "New Eden travel-time router")]
struct Cli {
    /// Path to mapDenormalize.csv.
    denormalize: PathBuf,

    /// Path to mapJumps.csv.
    jumps: PathBuf,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Workers used for the jump relaxation phase.
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Static bridge between two bodies, as A:B. Repeatable.
    #[arg(long = "bridge", value_parser = parse_bridge)]
    bridges: Vec<BridgeSpec>,

    /// Local jump range attached to a body, as BODY:RANGE in light-years. Repeatable.
    #[arg(long = "beacon", value_parser = parse_beacon)]
    beacons: Vec<BeaconSpec>,

    #[command(flatten)]
    profile: ProfileOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ProfileOptions {
    /// Ship preset used as the base profile (e.g. frigate, carrier, jump-freighter).
    #[arg(long)]
    ship: Option<ShipPreset>,

    /// JSON traveler profile used instead of a preset.
    #[arg(long, conflicts_with = "ship")]
    params: Option<PathBuf>,

    /// Jump drive range in light-years (NaN disables the drive).
    #[arg(long)]
    jump: Option<f64>,

    /// Warp speed in AU/s.
    #[arg(long)]
    warp: Option<f64>,

    /// Align time in seconds.
    #[arg(long)]
    align: Option<f64>,

    /// Seconds per stargate; negative disables gates.
    #[arg(long, allow_negative_numbers = true)]
    gate: Option<f64>,

    /// Fraction by which jump distances are reduced.
    #[arg(long)]
    reduction: Option<f64>,

    /// Jump cost policy (ignore, reactivation-cost, fatigue-cost,
    /// reactivation-countdown, fatigue-countdown, full).
    #[arg(long)]
    fatigue_model: Option<FatigueModel>,
}

impl From<ProfileOptions> for ProfileArgs {
    fn from(options: ProfileOptions) -> Self {
        Self {
            ship: options.ship,
            params: options.params,
            jump: options.jump,
            warp: options.warp,
            align: options.align,
            gate: options.gate,
            reduction: options.reduction,
            fatigue_model: options.fatigue_model,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fastest route between two body or system ids.
    Route {
        /// Starting body or system id.
        #[arg(long = "from")]
        from: i64,
        /// Destination body or system id.
        #[arg(long = "to")]
        to: i64,
    },
    /// List the travel time to every reachable relevant body.
    Distances {
        /// Starting body or system id.
        #[arg(long = "from")]
        from: i64,
        /// Only show the closest N bodies.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Solve every `src dst` pair of a file and report timings.
    Batch {
        /// File with one `src dst` pair per line.
        file: PathBuf,
    },
    /// Print the effective traveler profile.
    Parameters,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let parameters = ProfileArgs::from(cli.profile).resolve()?;
    let format = cli.format;
    if let Command::Parameters = cli.command {
        return handle_parameters_command(&parameters, format);
    }

    let dataset = DatasetArgs {
        denormalize: cli.denormalize,
        jumps: cli.jumps,
        bridges: cli.bridges,
        beacons: cli.beacons,
    };
    let universe = dataset.load()?;
    let config = SolverConfig {
        threads: cli.threads,
    };

    match cli.command {
        Command::Route { from, to } => handle_route_command(
            &universe,
            &parameters,
            config,
            format,
            &RouteCommandArgs { from, to },
        ),
        Command::Distances { from, limit } => handle_distances_command(
            &universe,
            &parameters,
            config,
            format,
            &DistancesCommandArgs { from, limit },
        ),
        Command::Batch { file } => {
            handle_batch_command(&universe, &parameters, config, format, &file)
        }
        Command::Parameters => handle_parameters_command(&parameters, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
