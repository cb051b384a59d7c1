//! # CLI Interface
//!
//! Defines the command-line argument structure for `cluster-identity` using
//! `clap` derive. Supports five subcommands: `init`, `show`, `check`,
//! `clean`, and `version`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cluster_identity::config::{DEFAULT_IDENTITY_FILE, DEFAULT_KEY_ALGORITHM};
use cluster_identity::KeyAlgorithm;

/// Cluster peer identity tool.
///
/// Creates, inspects and removes the `identity.json` file that holds a
/// cluster peer's ID, private key, peername and private-network secret.
/// Any field can be overridden with `CLUSTER_ID`, `CLUSTER_PEERNAME`,
/// `CLUSTER_PRIVATE_KEY` or `CLUSTER_SECRET`.
#[derive(Parser, Debug)]
#[command(
    name = "cluster-identity",
    about = "Cluster peer identity tool",
    version,
    propagate_version = true
)]
pub struct ClusterIdentityCli {
    /// Global options.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to the identity file.
    #[arg(
        long,
        short = 'p',
        global = true,
        env = "CLUSTER_IDENTITY_PATH",
        default_value = DEFAULT_IDENTITY_FILE
    )]
    pub path: PathBuf,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "cluster_identity=info,cluster_identity_cli=info")]
    pub log_level: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: String,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new identity (plus any environment overrides) and save it.
    Init(InitArgs),
    /// Print the identity at the configured path, with overrides applied.
    Show(ShowArgs),
    /// Load and validate the identity; fail if the key does not match the ID.
    Check,
    /// Remove the identity file. Never fails.
    Clean,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing identity file.
    #[arg(long)]
    pub force: bool,

    /// Key algorithm: ed25519, secp256k1 or ecdsa.
    #[arg(long, default_value_t = DEFAULT_KEY_ALGORITHM)]
    pub key_type: KeyAlgorithm,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the full JSON document (including the private key) instead of
    /// a summary.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        ClusterIdentityCli::command().debug_assert();
    }

    #[test]
    fn test_init_parses_key_type() {
        let cli = ClusterIdentityCli::try_parse_from([
            "cluster-identity",
            "init",
            "--key-type",
            "secp256k1",
            "--force",
        ])
        .unwrap();

        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.key_type, KeyAlgorithm::Secp256k1);
            }
            other => panic!("expected init, got {:?}", other),
        }
    }

    #[test]
    fn test_init_defaults_to_library_key_algorithm() {
        let cli = ClusterIdentityCli::try_parse_from(["cluster-identity", "init"]).unwrap();
        match cli.command {
            Commands::Init(args) => {
                assert!(!args.force);
                assert_eq!(args.key_type, DEFAULT_KEY_ALGORITHM);
            }
            other => panic!("expected init, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_key_type_rejected() {
        let result =
            ClusterIdentityCli::try_parse_from(["cluster-identity", "init", "--key-type", "rsa"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_path_after_subcommand() {
        let cli = ClusterIdentityCli::try_parse_from([
            "cluster-identity",
            "show",
            "--path",
            "/etc/cluster/identity.json",
        ])
        .unwrap();
        assert_eq!(
            cli.global.path,
            PathBuf::from("/etc/cluster/identity.json")
        );
    }
}
