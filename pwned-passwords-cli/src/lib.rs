//! Support code for the `pwnedpasswords` binary.

use std::fmt;
use std::io::{self, BufRead, Write};

use pwned_passwords::Client;
use tokio::sync::mpsc;
use tracing::instrument;

/// Printed instead of a count when a password is absent from the corpus.
pub const NOT_FOUND_MESSAGE: &str = "Password not found.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Check(#[from] pwned_passwords::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Process exit status for a breach count: 0 when absent, otherwise
/// `1 + floor(log10(count))`.
///
/// Most systems require exit status to be in the range 0-127, so this encodes
/// the order of magnitude rather than the count itself. A `u64` tops out at 20.
pub fn exit_code(count: u64) -> u8 {
    match count {
        0 => 0,
        n => 1 + n.ilog10() as u8,
    }
}

/// Line printed for one checked password.
pub fn report_line(count: u64) -> String {
    if count == 0 {
        NOT_FOUND_MESSAGE.to_string()
    } else {
        count.to_string()
    }
}

/// Running summary of the passwords checked in one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    checked: usize,
    max_count: u64,
}

impl Tally {
    pub fn record(&mut self, count: u64) {
        self.checked += 1;
        self.max_count = self.max_count.max(count);
    }

    pub fn checked(&self) -> usize {
        self.checked
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    pub fn exit_code(&self) -> u8 {
        exit_code(self.max_count)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} checked, highest count {}", self.checked, self.max_count)
    }
}

/// How each input line is interpreted and looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub plain_text: bool,
    pub anonymous: bool,
}

/// Checks one password and writes its report line to `out`.
///
/// A password the service does not know is reported as not found, never as
/// an error.
pub async fn check_one<W: Write>(
    client: &Client,
    options: CheckOptions,
    password: &str,
    out: &mut W,
) -> Result<u64, Error> {
    let count = match client
        .check_password(password, options.plain_text, options.anonymous)
        .await
    {
        Ok(count) => count,
        Err(pwned_passwords::Error::PasswordNotFound) => 0,
        Err(e) => return Err(e.into()),
    };
    writeln!(out, "{}", report_line(count))?;
    Ok(count)
}

/// Checks every non-blank line from `lines` until the channel closes.
///
/// Results are recorded in `tally` as they arrive, so a caller that stops
/// early still sees what was checked so far.
#[instrument(skip_all)]
pub async fn check_lines<W: Write>(
    client: &Client,
    options: CheckOptions,
    lines: &mut mpsc::Receiver<io::Result<String>>,
    out: &mut W,
    tally: &mut Tally,
) -> Result<(), Error> {
    while let Some(line) = lines.recv().await {
        let line = line?;
        let password = line.trim();
        if password.is_empty() {
            continue;
        }
        let count = check_one(client, options, password, out).await?;
        tally.record(count);
    }
    Ok(())
}

/// Reads `reader` line by line on a dedicated thread.
///
/// Blocking reads cannot be cancelled, so the thread is detached; the channel
/// closes at end of input or after the first read error.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Default `tracing` filter for the given verbosity.
pub fn log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}
