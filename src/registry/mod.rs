// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster registry: directory-backed indexer and selector-based lister.

pub mod indexer;
pub mod lister;

pub use indexer::{ClusterIndexer, DirectoryIndexer};
pub use lister::ClusterLister;

use std::path::Path;
use tracing::{info, instrument};

use crate::error::{ProvisionerError, Result};
use crate::selector::Selector;

/// Build a lister over `clusters_dir` and load it eagerly.
///
/// Fails with [`ProvisionerError::NoMatchingClusters`] when the registry is
/// empty. A later per-namespace selector matching nothing is not an error.
#[instrument(skip(clusters_dir), fields(directory = %clusters_dir.display()))]
pub fn load_cluster_registry(clusters_dir: &Path) -> Result<ClusterLister> {
    let lister = ClusterLister::new(DirectoryIndexer::new(clusters_dir));
    let clusters = lister.list_matching(&Selector::everything())?;
    if clusters.is_empty() {
        return Err(ProvisionerError::NoMatchingClusters);
    }

    info!("Cluster registry ready with {} clusters", clusters.len());
    Ok(lister)
}
