//! Release manifest scanning.
//!
//! A channel manifest (`channel-rust-<channel>`) is a plain-text list of
//! filenames, one per line. The installer for a triple is the first line
//! ending in [`INSTALLER_SUFFIX`] that contains the triple.

use anyhow::{Context, Result};
use std::io::BufRead;

/// Public distribution server.
pub const DEFAULT_BASE_URL: &str = "https://static.rust-lang.org/dist";

/// Suffix of installer filenames.
pub const INSTALLER_SUFFIX: &str = ".exe";

pub fn manifest_url(base_url: &str, channel: &str) -> String {
    format!("{}/channel-rust-{}", base_url, channel)
}

pub fn installer_url(base_url: &str, installer: &str) -> String {
    format!("{}/{}", base_url, installer)
}

/// Local filename for the downloaded installer.
pub fn target_name(channel: &str, triple: &str) -> String {
    format!("rust-{}-{}{}", channel, triple, INSTALLER_SUFFIX)
}

pub fn is_installer_for(line: &str, triple: &str) -> bool {
    line.ends_with(INSTALLER_SUFFIX) && line.contains(triple)
}

/// Scan `reader` line by line and return the first installer entry for
/// `triple`. Stops reading at the first match.
///
/// Lines are decoded as UTF-8; a line that fails to decode is an error.
pub fn find_installer<R: BufRead>(reader: R, triple: &str) -> Result<Option<String>> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read manifest line {}", idx + 1))?;
        let line = line.trim();
        if is_installer_for(line, triple) {
            return Ok(Some(line.to_string()));
        }
    }
    Ok(None)
}
