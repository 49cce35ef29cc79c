//! External command runner.
//!
//! Spawns a command, captures its output and fails on a non-zero exit.
//! The fetch path does not use it.

use crate::error::FetchError;
use anyhow::{Context, Result};
use colored::*;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Run `args[0]` with the remaining arguments and wait for it.
///
/// Unless `quiet`, prints the command line first. On a non-zero exit the
/// captured stdout and stderr are printed and [`FetchError::CommandFailed`]
/// is returned.
pub fn run(args: &[String], quiet: bool) -> Result<Output> {
    run_with_console(args, quiet, &mut std::io::stdout())
}

/// [`run`], writing the command line and any failure dump to `console`.
pub fn run_with_console(args: &[String], quiet: bool, console: &mut dyn Write) -> Result<Output> {
    let (program, rest) = args.split_first().ok_or(FetchError::EmptyCommand)?;

    if !quiet {
        writeln!(console, "{} running: {}", "▶".cyan(), args.join(" "))?;
    }
    console.flush().ok();

    // stdin is piped and closed once output() starts waiting
    let output = Command::new(program)
        .args(rest)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("Failed to spawn {}", program))?;

    if !output.status.success() {
        writeln!(console, "stdout: \n\n{}", String::from_utf8_lossy(&output.stdout))?;
        writeln!(console, "stderr: \n\n{}", String::from_utf8_lossy(&output.stderr))?;
        return Err(FetchError::CommandFailed.into());
    }

    Ok(output)
}
