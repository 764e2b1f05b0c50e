use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use pwned_passwords::{API_URL_ENV, Client, Config, DEFAULT_API_URL};
use pwned_passwords_cli::{
    CheckOptions, Error, Tally, check_lines, check_one, log_filter, spawn_line_reader,
};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pwnedpasswords")]
#[command(
    about = "Checks the Pwned Passwords API to see if a password was found in a data breach"
)]
struct Args {
    /// The password or hashed password to search for
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    password: Option<String>,

    /// Read passwords from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Hash the input even if it looks like a SHA-1 hash (default)
    #[arg(long, overrides_with = "no_plain_text")]
    plain_text: bool,

    /// Treat 40-character hex input as an existing SHA-1 hash
    #[arg(long, overrides_with = "plain_text")]
    no_plain_text: bool,

    /// Send the full hash instead of a 5-character range prefix
    #[arg(long)]
    no_anonymous: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Base URL of the Pwned Passwords API
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Ask the service to pad range responses
    #[arg(long)]
    add_padding: bool,

    /// Display verbose output
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> CheckOptions {
        CheckOptions { plain_text: !self.no_plain_text, anonymous: !self.no_anonymous }
    }

    fn config(&self) -> Config {
        Config::default()
            .with_base_url(&self.api_url)
            .with_timeout(self.timeout.map(Duration::from_secs))
            .with_padding(self.add_padding)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(args.verbose))),
        )
        .init();

    match run(&args).await {
        Ok(tally) => {
            debug!(%tally, "done");
            ExitCode::from(tally.exit_code())
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<Tally, Error> {
    let client = Client::new(args.config())?;
    let options = args.options();
    let mut out = std::io::stdout();
    let mut tally = Tally::default();

    if let Some(password) = &args.password {
        tally.record(check_one(&client, options, password, &mut out).await?);
        return Ok(tally);
    }

    let mut lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    tokio::select! {
        result = check_lines(&client, options, &mut lines, &mut out, &mut tally) => result?,
        () = interrupted() => println!("Quitting"),
    }

    Ok(tally)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
