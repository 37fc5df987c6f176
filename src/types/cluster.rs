// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ClusterResourceScope;
use kube::Resource;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

use crate::error::{BoxError, ProvisionerError, Result};
use crate::types::FileFormat;

/// A registered target cluster, loaded from one file in the registry directory
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ClusterSpec,
    #[serde(default)]
    pub status: ClusterStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k8s_version: Option<String>,
    #[serde(default)]
    pub auth: ClusterAuthSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioner: Option<String>,
    #[serde(default, rename = "k8s-distro", skip_serializing_if = "Option::is_none")]
    pub k8s_distribution: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterAuthSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_ca_data: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl Resource for Cluster {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "Cluster".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        crate::types::namespace::API_GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        crate::types::namespace::API_VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "clusters".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Cluster {
    /// Parse a cluster record, picking YAML or JSON from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = FileFormat::from_path(path)
            .ok_or_else(|| ProvisionerError::UnknownFileType(path.to_path_buf()))?;
        let contents = std::fs::read_to_string(path).map_err(|e| ProvisionerError::io(path, e))?;
        Self::parse(&contents, format)
            .map_err(|e| ProvisionerError::parse(path, format.name(), e))
    }

    fn parse(contents: &str, format: FileFormat) -> std::result::Result<Self, BoxError> {
        Ok(match format {
            FileFormat::Yaml => serde_yaml::from_str(contents)?,
            FileFormat::Json => serde_json::from_str(contents)?,
        })
    }

    /// Lifecycle phase reported in the record's status, if any
    pub fn phase(&self) -> Option<&str> {
        self.status.phase.as_deref()
    }
}
