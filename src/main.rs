use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;

mod error;
mod listing;
mod output;
mod telemetry;

use error::ScrapeError;
use listing::ScrapeCmd;

#[derive(Parser)]
#[command(name = "arxiv-scrape", about = "Scrape an arXiv listing page into CSV")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(flatten)]
    scrape: ScrapeCmd,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and ARXIV_LOG_FORMAT
    telemetry::config::init_tracing();

    match listing::run(cli.scrape).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ScrapeError>() {
            Some(se) => {
                eprintln!("arxiv-scrape: {}", se);
                ExitCode::from(se.exit_code())
            }
            None => {
                eprintln!("arxiv-scrape: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}
