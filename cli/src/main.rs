// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Cluster Identity Tool
//!
//! Entry point for the `cluster-identity` binary. Parses CLI arguments,
//! initializes logging, and runs one identity operation.
//!
//! The binary supports five subcommands:
//!
//! - `init`    - generate and save a fresh identity
//! - `show`    - print the identity (summary or full JSON)
//! - `check`   - validate the identity and its key/ID consistency
//! - `clean`   - remove the identity file (best-effort)
//! - `version` - print build version information

mod cli;
mod logging;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cluster_identity::crypto::key_type_name;
use cluster_identity::Identity;

use cli::{ClusterIdentityCli, Commands};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = ClusterIdentityCli::parse();

    logging::init_logging(
        &cli.global.log_level,
        LogFormat::from_str_lossy(&cli.global.log_format),
    );

    let path = cli.global.path.as_path();
    match cli.command {
        Commands::Init(args) => init_identity(path, args),
        Commands::Show(args) => show_identity(path, args),
        Commands::Check => check_identity(path),
        Commands::Clean => {
            cluster_identity::clean(path);
            tracing::info!(path = %path.display(), "removed identity file (if present)");
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Generates a new identity, applies environment overrides, and saves it.
fn init_identity(path: &Path, args: cli::InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        bail!(
            "identity file {} already exists (use --force to overwrite it)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let mut identity =
        Identity::generate_with(args.key_type).context("failed to generate identity")?;
    identity
        .apply_env_vars()
        .context("failed to apply CLUSTER_* environment overrides")?;
    identity
        .save_json(path)
        .with_context(|| format!("failed to save identity to {}", path.display()))?;

    println!("Identity initialized successfully.");
    print_summary(path, &identity)
}

/// Prints the identity at `path`, with environment overrides applied.
fn show_identity(path: &Path, args: cli::ShowArgs) -> Result<()> {
    let identity = load(path)?;

    if args.json {
        let raw = identity.to_json().context("failed to encode identity")?;
        println!("{}", String::from_utf8_lossy(&raw));
        return Ok(());
    }

    print_summary(path, &identity)
}

/// Loads the identity and fails if its key does not derive its peer ID.
fn check_identity(path: &Path) -> Result<()> {
    let identity = load(path)?;
    let peer_id = identity.peer_id()?;

    if !identity.key_matches_id() {
        bail!(
            "private_key does not belong to peer {} (check the file and CLUSTER_ID / CLUSTER_PRIVATE_KEY)",
            peer_id
        );
    }
    if !identity.is_protected() {
        tracing::warn!("identity has no cluster secret; peers will join an unprotected network");
    }

    println!("OK {}", peer_id);
    Ok(())
}

fn load(path: &Path) -> Result<Identity> {
    Identity::load_json_file_and_env(path)
        .with_context(|| format!("failed to load identity from {}", path.display()))
}

fn print_summary(path: &Path, identity: &Identity) -> Result<()> {
    let peer_id = identity.peer_id()?;
    let key_type = key_type_name(identity.keypair()?);
    let secret = match &identity.secret {
        Some(secret) => format!("fingerprint {}", secret.fingerprint()),
        None => "none (unprotected network)".to_string(),
    };

    println!("  Identity file : {}", path.display());
    println!("  Peer ID       : {}", peer_id);
    println!("  Peername      : {}", identity.peername);
    println!("  Key type      : {}", key_type);
    println!("  Cluster secret: {}", secret);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("cluster-identity {}", env!("CARGO_PKG_VERSION"));
    println!("rustc            {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
