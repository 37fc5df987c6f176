// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::constants::{dirs, DEFAULT_RESTRICTED_NAMESPACES};

/// Provisioner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one file per registered cluster
    pub clusters_dir: PathBuf,
    /// Directory walked for namespace specifications
    pub input_dir: PathBuf,
    /// Directory receiving generated manifests
    pub output_dir: PathBuf,
    /// Namespace names that specifications may not claim
    pub restricted_namespaces: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clusters_dir: PathBuf::from(dirs::CLUSTERS),
            input_dir: PathBuf::from(dirs::INPUT),
            output_dir: PathBuf::from(dirs::OUTPUT),
            restricted_namespaces: DEFAULT_RESTRICTED_NAMESPACES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration, overriding the restricted namespaces from
    /// `RESTRICTED_NAMESPACES` (comma-separated) when it is set
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Some(raw) = env::var_os("RESTRICTED_NAMESPACES") {
            let raw = raw
                .into_string()
                .ok()
                .context("RESTRICTED_NAMESPACES is not valid UTF-8")?;
            config.restricted_namespaces = parse_name_list(&raw);
        }

        Ok(config)
    }

    pub fn with_dirs(
        mut self,
        clusters_dir: impl Into<PathBuf>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        self.clusters_dir = clusters_dir.into();
        self.input_dir = input_dir.into();
        self.output_dir = output_dir.into();
        self
    }
}

fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
