use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fetch-win-deps")]
#[command(about = "Download the Rust installer for a channel and target triple", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// <channel> <triple>, e.g. `nightly x86_64-pc-windows-msvc`.
    /// Options must come first; everything from the first positional on is
    /// counted as a positional, including dash-leading values.
    #[arg(num_args = 0.., value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Distribution server to read manifests and installers from
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory the installer is written to [default: <program dir>/../build]
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// TOML file providing base_url and/or build_dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Lower-cased `(channel, triple)` when exactly two positionals were given.
    pub fn release(&self) -> Option<(String, String)> {
        match self.args.as_slice() {
            [channel, triple] => Some((channel.to_lowercase(), triple.to_lowercase())),
            _ => None,
        }
    }

    pub fn overrides(&self, env_base_url: Option<String>) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            build_dir: self.build_dir.clone(),
            config_file: self.config.clone(),
            env_base_url,
            quiet: self.quiet,
        }
    }
}

pub fn usage(program: &str) -> String {
    format!("Usage: {} <channel> <triple>", program)
}
