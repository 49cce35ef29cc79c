//! Installer resolution.
//!
//! Reads the channel manifest, picks the installer for the requested
//! triple, and downloads it into the build directory.

use crate::config::FetchConfig;
use crate::download::{self, DownloadOutcome};
use crate::error::FetchError;
use crate::manifest;
use crate::transport::Transport;
use anyhow::Result;
use colored::*;
use std::io::BufReader;
use std::path::PathBuf;

/// What [`install_rust`] resolved and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub channel: String,
    pub triple: String,
    /// Manifest entry that matched
    pub installer: String,
    pub url: String,
    pub path: PathBuf,
    pub outcome: DownloadOutcome,
}

/// Fetch the installer for `channel`/`triple` into `config.build_dir`.
///
/// Both names are used as given; lower-casing is the caller's job.
/// Returns [`FetchError::InvalidRelease`] when the manifest has no match.
pub fn install_rust(
    transport: &dyn Transport,
    config: &FetchConfig,
    channel: &str,
    triple: &str,
) -> Result<Installed> {
    let channel_url = manifest::manifest_url(&config.base_url, channel);
    if !config.quiet {
        println!("{} reading: {}", "📄".cyan(), channel_url);
    }

    let installer = {
        let fetched = transport.get(&channel_url)?;
        manifest::find_installer(BufReader::new(fetched.reader), triple)?
    };

    let Some(installer) = installer else {
        return Err(FetchError::InvalidRelease {
            channel: channel.to_string(),
            triple: triple.to_string(),
        }
        .into());
    };

    let url = manifest::installer_url(&config.base_url, &installer);
    let path = config
        .build_dir
        .join(manifest::target_name(channel, triple));
    let outcome = download::download(transport, &url, &path, config.quiet)?;

    if !config.quiet && outcome != DownloadOutcome::Skipped {
        println!("{} {} ready at {}", "✓".green(), installer.bold(), path.display());
    }

    Ok(Installed {
        channel: channel.to_string(),
        triple: triple.to_string(),
        installer,
        url,
        path,
        outcome,
    })
}
