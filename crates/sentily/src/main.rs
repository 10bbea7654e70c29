//! Sentily command-line feedback explorer
//!
//! Client for the Sentily sentiment dashboard backend: browse, search and
//! filter customer feedback, review urgent alerts and read the summary
//! counters from a terminal.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod cli;

use cli::alerts::AlertsArgs;
use cli::config::ConfigArgs;
use cli::facets::FacetsArgs;
use cli::feedback::FeedbackArgs;
use cli::health::HealthArgs;
use cli::session::{LoginArgs, WhoamiArgs};
use cli::summary::SummaryArgs;
use cli::GlobalOptions;

#[derive(Parser, Debug)]
#[command(name = "sentily", version, about = "Sentily feedback explorer")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Base URL of the feedback API (e.g. http://localhost:8000/api)
    #[arg(long, global = true, env = "SENTILY_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse feedback with search, filters and pagination
    Feedback(FeedbackArgs),

    /// Show urgent alerts and alert statistics
    Alerts(AlertsArgs),

    /// List the distinct sentiment, urgency and platform values
    Facets(FacetsArgs),

    /// Show dashboard summary counters and trends
    Summary(SummaryArgs),

    /// Check that the backend is reachable
    Health(HealthArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),

    /// Sign in (mock: any non-empty email and password)
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami(WhoamiArgs),
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Feedback(args) => args.json,
        Commands::Alerts(args) => args.json,
        Commands::Facets(args) => args.json,
        Commands::Summary(args) => args.json,
        Commands::Health(args) => args.json,
        Commands::Config(args) => args.json,
        Commands::Login(args) => args.json,
        Commands::Whoami(args) => args.json,
        Commands::Logout => false,
    }
}

fn run_command(command: Commands, options: &GlobalOptions) -> anyhow::Result<()> {
    match command {
        Commands::Feedback(args) => cli::feedback::run(args, options),
        Commands::Alerts(args) => cli::alerts::run(args, options),
        Commands::Facets(args) => cli::facets::run(args, options),
        Commands::Summary(args) => cli::summary::run(args, options),
        Commands::Health(args) => cli::health::run(args, options),
        Commands::Config(args) => cli::config::run(args, options),
        Commands::Login(args) => cli::session::run_login(args),
        Commands::Logout => cli::session::run_logout(),
        Commands::Whoami(args) => cli::session::run_whoami(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = command_wants_json(&cli.command);

    let _log_guard = match sentily_logging::init_logging(sentily_logging::LogConfig {
        app_name: "sentily",
        verbose: cli.verbose,
        log_dir: None,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize file logging: {:#}", err);
            sentily_logging::init_console_only(cli.verbose);
            None
        }
    };

    let options = GlobalOptions {
        api_base: cli.api_base,
    };

    match run_command(cli.command, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {:#}", err);
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}
