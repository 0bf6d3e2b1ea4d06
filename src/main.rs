//! debian-feed — scrapes Debian installer directory listings and
//! maintains an RSS feed of every torrent file discovered across runs.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  urls   ┌──────────┐  page   ┌─────────┐
//! │  urls.rs  │ ──────► │ fetch.rs │ ──────► │ scan.rs │
//! └───────────┘         └──────────┘         └─────────┘
//!       ▲                                        │ filenames
//!       │ config.rs                              ▼
//!                  ┌─────────┐  load/save  ┌──────────────┐
//!                  │ feed.rs │ ◄─────────► │ reconcile.rs │
//!                  └─────────┘             └──────────────┘
//! ```
//!
//! * **`config`** — the JSON run configuration.
//! * **`urls`** — expands archs × source templates into page URLs.
//! * **`fetch`** — one GET per page, one retry on connection failure.
//! * **`scan`** — pulls matching filenames out of listing tables.
//! * **`feed`** — loads and rewrites the persistent RSS document.
//! * **`reconcile`** — drives the whole pass, appending only files
//!   whose link is not already in the feed.
//! * **`main`** — wires everything together: argument handling,
//!   logging, the up-front storage check, exit codes.
//!
//! The job runs to completion once per invocation; scheduling is left
//! to cron or a systemd timer.

mod config;
mod error;
mod feed;
mod fetch;
mod reconcile;
mod scan;
mod urls;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Error;
use fetch::HttpFetcher;

/// Default to errors only, as a quiet cron job should; `RUST_LOG`
/// overrides when debugging a misbehaving mirror.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Create the feed's parent directory before any network work, so a
/// permission problem aborts the run while it is still cheap.
fn ensure_output_dir(config: &Config) -> Result<(), Error> {
    match config.rss_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| Error::StorageUnavailable {
                path: parent.to_path_buf(),
                source,
            })
        }
        // A bare filename writes to the working directory.
        _ => Ok(()),
    }
}

fn run() -> Result<()> {
    init_logging();

    let config_path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            let program = std::env::args()
                .next()
                .unwrap_or_else(|| "debian-feed".into());
            bail!("Usage: {program} /path/to/config.json");
        }
    };

    let config = Config::load(&config_path)?;
    ensure_output_dir(&config)?;

    let fetcher = HttpFetcher::new().context("couldn't build the HTTP client")?;
    reconcile::run(&config, &fetcher)?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
