//! # fetch-win-deps - Rust installer fetcher
//!
//! A build-time helper that downloads the Rust installer for a given
//! release channel and target triple from the distribution server.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch the nightly MSVC installer into ../build
//! fetch-win-deps nightly x86_64-pc-windows-msvc
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Base URL and build directory layering
//! - [`manifest`] - Channel manifest scanning and URL/name derivation
//! - [`download`] - Conditional downloads over a [`transport::Transport`]
//! - [`install`] - Resolve a channel + triple and fetch the installer
//! - [`process`] - External command runner

/// Command-line surface and argument validation.
pub mod cli;

/// Configuration (`--config` TOML, environment, defaults).
pub mod config;

/// Conditional file download.
pub mod download;

/// Error types.
pub mod error;

/// Filesystem helpers.
pub mod fsutil;

/// Installer resolution and fetch.
pub mod install;

/// Release manifest scanning.
pub mod manifest;

/// External process runner.
pub mod process;

/// HTTP transport abstraction.
pub mod transport;
