use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Create `path` (and any missing parents) if it does not exist yet.
pub fn create_path(path: &Path, quiet: bool) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if !quiet {
        println!("{} creating: {}", "📁".blue(), path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

/// `<dir of program>/../build`, where `program` is the invoked path (argv[0]).
///
/// A bare program name has an empty parent, which resolves against the
/// current directory.
pub fn default_build_dir(program: &Path) -> PathBuf {
    program
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("..")
        .join("build")
}
