// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Drives namespace specifications from the input directory through
//! validation, target resolution and reconciliation.

pub mod manifests;

pub use manifests::{ManifestWriter, Reconciler};

use kube::ResourceExt;
use std::path::Path;
use tracing::{error, info, instrument, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{ProvisionerError, Result};
use crate::registry::{load_cluster_registry, ClusterIndexer, ClusterLister, DirectoryIndexer};
use crate::types::{Cluster, FileFormat, Namespace};
use crate::validation::Validator;

/// Outcome of a provisioning run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Namespaces handed to the reconciler, with their target cluster names
    pub reconciled: Vec<(String, Vec<String>)>,
    /// Namespaces skipped because they are disabled
    pub skipped: Vec<String>,
}

pub struct Provisioner<R, I = DirectoryIndexer> {
    lister: ClusterLister<I>,
    validator: Validator,
    reconciler: R,
}

impl<R: Reconciler, I: ClusterIndexer> Provisioner<R, I> {
    pub fn new(lister: ClusterLister<I>, validator: Validator, reconciler: R) -> Self {
        Self {
            lister,
            validator,
            reconciler,
        }
    }

    /// Provision every YAML specification under `input_dir`, in file name order.
    /// The first failing file aborts the run.
    #[instrument(skip(self, input_dir), fields(input = %input_dir.display()))]
    pub fn run(&self, input_dir: &Path) -> Result<ProvisionReport> {
        let mut report = ProvisionReport::default();

        for entry in WalkDir::new(input_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(input_dir).to_path_buf();
                ProvisionerError::io(path, e.into())
            })?;
            let is_yaml = FileFormat::from_path(entry.path()) == Some(FileFormat::Yaml);
            if !entry.file_type().is_file() || !is_yaml {
                continue;
            }
            self.provision_file(entry.path(), &mut report)?;
        }

        info!(
            "Provisioned {} namespaces, skipped {} disabled",
            report.reconciled.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn provision_file(&self, path: &Path, report: &mut ProvisionReport) -> Result<()> {
        let ns = Namespace::load(path)?;
        let name = ns.name_any();

        if let Err(source) = self.validator.validate(&ns) {
            error!("Validation failed for {} ({}): {}", name, path.display(), source);
            return Err(ProvisionerError::Validation { name, source });
        }

        if !ns.is_enabled() {
            info!("Enabled: false for config {}, skipping", path.display());
            report.skipped.push(name);
            return Ok(());
        }

        let targets = self.resolve_targets(&ns)?;
        if targets.is_empty() {
            warn!("Namespace {} selects no clusters", name);
        }
        self.reconciler.reconcile(&ns, &targets)?;

        report
            .reconciled
            .push((name, targets.iter().map(|c| c.name_any()).collect()));
        Ok(())
    }

    /// Clusters selected by the namespace's cluster selector
    pub fn resolve_targets(&self, ns: &Namespace) -> Result<Vec<Cluster>> {
        let selector = ns.spec.cluster_selector.as_ref().ok_or_else(|| {
            ProvisionerError::InvalidSelector(format!(
                "namespace {} has no clusterSelector",
                ns.name_any()
            ))
        })?;
        self.lister.list(selector)
    }
}

/// Load the registry from `config.clusters_dir` and write manifests for every
/// specification in `config.input_dir` to `config.output_dir`
pub fn generate_namespaces(config: &Config) -> Result<ProvisionReport> {
    let lister = load_cluster_registry(&config.clusters_dir)?;
    let provisioner = Provisioner::new(
        lister,
        Validator::from_config(config),
        ManifestWriter::new(&config.output_dir),
    );
    provisioner.run(&config.input_dir)
}
