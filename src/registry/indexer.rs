// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Loads cluster records from the registry directory and caches them.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument};

use crate::error::{ProvisionerError, Result};
use crate::types::Cluster;

/// Source of the full cluster list
pub trait ClusterIndexer: Send + Sync {
    /// All known clusters. Returned clusters must be treated as read-only.
    fn list(&self) -> Result<Arc<Vec<Cluster>>>;
}

/// Reads every file in a directory once and serves the cached result afterwards
#[derive(Debug)]
pub struct DirectoryIndexer {
    directory: PathBuf,
    clusters: Mutex<Option<Arc<Vec<Cluster>>>>,
}

impl DirectoryIndexer {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            clusters: Mutex::new(None),
        }
    }

    #[instrument(skip(self), fields(directory = %self.directory.display()))]
    fn load(&self) -> Result<Vec<Cluster>> {
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| ProvisionerError::io(&self.directory, e))?;

        let mut clusters = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ProvisionerError::io(&self.directory, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ProvisionerError::io(&path, e))?;
            if file_type.is_dir() {
                continue;
            }

            debug!("Loading cluster from {}", path.display());
            clusters.push(Cluster::load(&path)?);
        }

        info!("Loaded {} clusters", clusters.len());
        Ok(clusters)
    }
}

impl ClusterIndexer for DirectoryIndexer {
    fn list(&self) -> Result<Arc<Vec<Cluster>>> {
        // Held across the load so concurrent first callers read the directory once
        let mut cached = self.clusters.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(clusters) = cached.as_ref() {
            return Ok(Arc::clone(clusters));
        }

        let clusters = Arc::new(self.load()?);
        *cached = Some(Arc::clone(&clusters));
        Ok(clusters)
    }
}
