use crate::demo::{run_demo, run_estimate, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sale_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Home Sale Advisor",
    about = "Estimate home values and compare sale strategies from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate a single property and compare its sale options
    Estimate(EstimateArgs),
    /// Run a sample property end to end with delivery disabled
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Demo => run_demo().await,
    }
}
