//! # fetch-win-deps CLI Entry Point
//!
//! `fetch-win-deps <channel> <triple>` downloads the matching Rust installer
//! into `<program dir>/../build` (or `--build-dir`).
//!
//! Exit status is 0 on success and on a wrong argument count (usage is
//! printed), 1 when the manifest has no installer for the triple.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::env;
use std::path::PathBuf;

use fetch_win_deps::cli::{self, Cli};
use fetch_win_deps::config::{DIST_SERVER_ENV, FetchConfig};
use fetch_win_deps::error::FetchError;
use fetch_win_deps::fsutil;
use fetch_win_deps::install;
use fetch_win_deps::transport::HttpTransport;

fn main() -> Result<()> {
    let program = env::args_os()
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fetch-win-deps"));

    let cli = Cli::parse();

    let Some((channel, triple)) = cli.release() else {
        println!("{}", cli::usage(&program.display().to_string()));
        return Ok(());
    };

    let config = FetchConfig::resolve(
        cli.overrides(env::var(DIST_SERVER_ENV).ok()),
        fsutil::default_build_dir(&program),
    )?;

    fsutil::create_path(&config.build_dir, config.quiet)?;

    let transport = HttpTransport::new();
    match install::install_rust(&transport, &config, &channel, &triple) {
        Ok(_) => Ok(()),
        Err(e) => match e.downcast_ref::<FetchError>() {
            Some(FetchError::InvalidRelease { .. }) => {
                eprintln!("{}", e.to_string().red());
                std::process::exit(1);
            }
            _ => Err(e),
        },
    }
}
