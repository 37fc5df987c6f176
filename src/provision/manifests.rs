// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Renders per-cluster manifests for a validated namespace specification.

use k8s_openapi::api::core::v1::{Namespace as CoreNamespace, ResourceQuota, ResourceQuotaSpec};
use k8s_openapi::api::rbac::v1::{RoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::constants::{manifests, ENVIRONMENT_LABEL};
use crate::error::{ProvisionerError, Result};
use crate::types::{Cluster, Namespace};

/// Hand-off point for a validated, enabled namespace and its target clusters
pub trait Reconciler {
    fn reconcile(&self, namespace: &Namespace, targets: &[Cluster]) -> Result<()>;
}

/// Writes `namespace.yaml`, `rolebinding.yaml` and `resourcequota.yaml`
/// under `<output>/<cluster>/<namespace>/`
pub struct ManifestWriter {
    output_dir: PathBuf,
}

impl ManifestWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_for_cluster(&self, ns: &Namespace, cluster: &Cluster) -> Result<()> {
        let name = ns.name_any();
        let dir = self.output_dir.join(cluster.name_any()).join(&name);
        std::fs::create_dir_all(&dir).map_err(|e| ProvisionerError::io(&dir, e))?;

        write_yaml(&dir.join("namespace.yaml"), &namespace_manifest(ns))?;
        write_yaml(&dir.join("rolebinding.yaml"), &role_binding_manifest(ns))?;
        match resource_quota_manifest(ns, cluster) {
            Some(quota) => write_yaml(&dir.join("resourcequota.yaml"), &quota)?,
            None => debug!("No quota applies to {} on {}", name, cluster.name_any()),
        }

        Ok(())
    }
}

impl Reconciler for ManifestWriter {
    #[instrument(skip(self, ns, targets), fields(namespace = %ns.name_any()))]
    fn reconcile(&self, ns: &Namespace, targets: &[Cluster]) -> Result<()> {
        for cluster in targets {
            self.write_for_cluster(ns, cluster)?;
        }
        info!("Wrote manifests for {} clusters", targets.len());
        Ok(())
    }
}

fn managed_labels(ns: &Namespace) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            manifests::MANAGED_BY_LABEL.to_string(),
            manifests::OPERATOR_NAME.to_string(),
        ),
        (manifests::OWNER_LABEL.to_string(), ns.spec.owner.clone()),
    ])
}

pub fn namespace_manifest(ns: &Namespace) -> CoreNamespace {
    CoreNamespace {
        metadata: ObjectMeta {
            name: Some(ns.name_any()),
            labels: Some(managed_labels(ns)),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Binds the `admin` cluster role to every admin team, owner included
pub fn role_binding_manifest(ns: &Namespace) -> RoleBinding {
    let subjects = ns
        .admin_teams()
        .into_iter()
        .map(|team| Subject {
            api_group: Some("rbac.authorization.k8s.io".to_string()),
            kind: "Group".to_string(),
            name: team,
            namespace: None,
        })
        .collect();

    RoleBinding {
        metadata: ObjectMeta {
            name: Some(format!("{}-admins", ns.name_any())),
            namespace: Some(ns.name_any()),
            labels: Some(managed_labels(ns)),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "ClusterRole".to_string(),
            name: manifests::ADMIN_CLUSTER_ROLE.to_string(),
        },
        subjects: Some(subjects),
    }
}

/// Quota from the block matching the cluster's environment label, else `default`
pub fn resource_quota_manifest(ns: &Namespace, cluster: &Cluster) -> Option<ResourceQuota> {
    let environment = cluster.labels().get(ENVIRONMENT_LABEL).map(String::as_str);
    let hard = ns.spec.quotas.for_environment(environment)?.clone();

    Some(ResourceQuota {
        metadata: ObjectMeta {
            name: Some(format!("{}-quota", ns.name_any())),
            namespace: Some(ns.name_any()),
            labels: Some(managed_labels(ns)),
            ..Default::default()
        },
        spec: Some(ResourceQuotaSpec {
            hard: Some(hard),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn write_yaml<T: Serialize>(path: &Path, manifest: &T) -> Result<()> {
    let rendered = serde_yaml::to_string(manifest)
        .map_err(|e| ProvisionerError::Render(format!("{}: {}", path.display(), e)))?;
    std::fs::write(path, rendered).map_err(|e| ProvisionerError::io(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}
