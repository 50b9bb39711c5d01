mod app;
mod cmd;
mod output;
mod root;

use anyhow::Context;
use app::App;
use clap::{CommandFactory, Parser, Subcommand};
use mtg_core::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mtg",
    about = "Personal meeting reminders: add appointments in plain words, get nudged when they are near",
    version,
    propagate_version = true
)]
struct Cli {
    /// Appointment store (default: `blob` from the config file, then ~/.mtgrc.json)
    #[arg(long, global = true, env = "MTG_BLOB")]
    blob: Option<PathBuf>,

    /// Config file (default: ~/.mtgrc.yaml)
    #[arg(long, global = true, env = "MTG_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the appointment store if it does not exist
    Init,

    /// List every appointment
    All,

    /// List appointments from the start of today onwards
    Today,

    /// Print unacknowledged appointments around now as one line
    Nowish,

    /// Print unacknowledged appointments around now, one per line
    NowishDebug,

    /// Send a desktop notification for unacknowledged appointments around now
    NowishNotify,

    /// Acknowledge appointments around now so they stop notifying
    #[command(name = "ACK")]
    Ack,

    /// Add an appointment, e.g. `mtg add standup tomorrow at 9:30am`
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Remove appointments from before today
    Prune,

    /// Prune, then add today's appointments interactively until a blank line
    DailySetup,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // help, version and unknown commands all print and exit cleanly
            let _ = e.print();
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    let result = run(cli.blob, cli.config, cli.json, command);

    if let Err(e) = result {
        // failures are reported, the exit status stays 0
        eprintln!("error: {e:#}");
    }
}

fn run(
    blob: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
    command: Commands,
) -> anyhow::Result<()> {
    let config_path = root::resolve_config_path(config.as_deref())?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let blob_path = root::resolve_blob_path(blob.as_deref(), &config)?;

    let mut app = App::open(config, blob_path)?;
    match command {
        Commands::Init => cmd::init::run(&app, json),
        Commands::All => cmd::list::all(&app, json),
        Commands::Today => cmd::list::today(&app, json),
        Commands::Nowish => cmd::nowish::summary(&app, json),
        Commands::NowishDebug => cmd::nowish::debug(&app, json),
        Commands::NowishNotify => cmd::nowish::notify(&app, json),
        Commands::Ack => cmd::ack::run(&mut app, json),
        Commands::Add { text } => cmd::add::run(&mut app, &text.join(" "), json),
        Commands::Prune => cmd::prune::run(&mut app, json),
        Commands::DailySetup => cmd::daily_setup::run(&mut app, json),
    }
}
