// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Filters the indexed cluster list by label selector.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::ResourceExt;
use tracing::debug;

use crate::error::Result;
use crate::registry::indexer::{ClusterIndexer, DirectoryIndexer};
use crate::selector::Selector;
use crate::types::Cluster;

#[derive(Debug)]
pub struct ClusterLister<I = DirectoryIndexer> {
    indexer: I,
}

impl<I: ClusterIndexer> ClusterLister<I> {
    pub fn new(indexer: I) -> Self {
        Self { indexer }
    }

    /// Clusters whose labels satisfy `selector`, in indexer order.
    /// An empty selector returns every cluster.
    pub fn list(&self, selector: &LabelSelector) -> Result<Vec<Cluster>> {
        let selector = Selector::try_from(selector)?;
        self.list_matching(&selector)
    }

    pub fn list_matching(&self, selector: &Selector) -> Result<Vec<Cluster>> {
        let clusters = self.indexer.list()?;

        if selector.is_empty() {
            return Ok(clusters.to_vec());
        }

        let matched: Vec<Cluster> = clusters
            .iter()
            .filter(|c| selector.matches(c.labels()))
            .cloned()
            .collect();

        debug!("Selector matched {} of {} clusters", matched.len(), clusters.len());
        Ok(matched)
    }
}
