// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use namespace_provisioner::config::Config;
use namespace_provisioner::constants::dirs;
use namespace_provisioner::provision::generate_namespaces;

/// Validate namespace specifications and generate per-cluster manifests
#[derive(Parser, Debug)]
#[command(name = "namespace-provisioner", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate kubernetes manifests
    Generate {
        #[command(subcommand)]
        target: Option<GenerateTarget>,
    },
}

#[derive(Subcommand, Debug)]
enum GenerateTarget {
    /// Generate namespace kubernetes manifests
    Namespace(NamespaceArgs),
}

#[derive(Args, Debug)]
struct NamespaceArgs {
    /// Path to the cluster registry directory
    #[arg(short = 'c', long, env = "CLUSTERS_DIR", default_value = dirs::CLUSTERS)]
    clusters_dir: PathBuf,

    /// Path to the directory containing namespace specifications
    #[arg(short = 'i', long, env = "INPUT_DIR", default_value = dirs::INPUT)]
    input_dir: PathBuf,

    /// Path to the directory where generated manifests are written
    #[arg(short = 'o', long, env = "OUTPUT_DIR", default_value = dirs::OUTPUT)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { target: None } => {
            println!("Generate kubernetes manifests");
        }
        Commands::Generate {
            target: Some(GenerateTarget::Namespace(args)),
        } => {
            let config = Config::from_env()?.with_dirs(
                args.clusters_dir,
                args.input_dir,
                args.output_dir,
            );
            info!(
                "Generating namespace manifests: clusters={} input={} output={}",
                config.clusters_dir.display(),
                config.input_dir.display(),
                config.output_dir.display()
            );

            let report = generate_namespaces(&config)
                .context("failed to reconcile namespace configuration")?;
            info!(
                "Done: {} namespaces reconciled, {} disabled",
                report.reconciled.len(),
                report.skipped.len()
            );
        }
    }

    Ok(())
}
