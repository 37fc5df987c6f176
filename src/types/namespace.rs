// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::ClusterResourceScope;
use kube::Resource;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{ProvisionerError, Result};

pub const API_GROUP: &str = "provisioner.io";
pub const API_VERSION: &str = "v1alpha1";

/// Resource name to quantity, e.g. `pods: "10"`
pub type QuotaBlock = BTreeMap<String, Quantity>;

/// A declarative request for a namespace, scoped to clusters by a label selector
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: NamespaceSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSpec {
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_selector: Option<LabelSelector>,
    /// Must be set explicitly; absence fails validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub quotas: Quotas,
}

/// Per-environment quota blocks. A block is "set" when present and non-empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Quotas {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<QuotaBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<QuotaBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<QuotaBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prod: Option<QuotaBlock>,
}

impl Quotas {
    /// True when no block is present at all
    pub fn is_empty(&self) -> bool {
        self == &Quotas::default()
    }

    /// Every present block, labelled with its name, in declaration order
    pub fn blocks(&self) -> impl Iterator<Item = (&'static str, &QuotaBlock)> {
        [
            ("default", self.default.as_ref()),
            ("dev", self.dev.as_ref()),
            ("stage", self.stage.as_ref()),
            ("prod", self.prod.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, block)| block.map(|b| (name, b)))
    }

    /// Quota for an environment name, falling back to `default`
    pub fn for_environment(&self, environment: Option<&str>) -> Option<&QuotaBlock> {
        let specific = match environment {
            Some("dev") => self.dev.as_ref(),
            Some("stage") => self.stage.as_ref(),
            Some("prod") => self.prod.as_ref(),
            _ => None,
        };
        specific
            .filter(|b| !b.is_empty())
            .or_else(|| self.default.as_ref().filter(|b| !b.is_empty()))
    }
}

pub fn is_set(block: Option<&QuotaBlock>) -> bool {
    block.is_some_and(|b| !b.is_empty())
}

impl Resource for Namespace {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "Namespace".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        API_GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        API_VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "namespaces".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Namespace {
    /// Parse a namespace specification from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ProvisionerError::io(path, e))?;
        serde_yaml::from_str(&contents).map_err(|e| ProvisionerError::parse(path, "yaml", e))
    }

    /// De-duplicated, sorted union of the admins and the owner
    pub fn admin_teams(&self) -> Vec<String> {
        self.spec
            .admins
            .iter()
            .chain(std::iter::once(&self.spec.owner))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_enabled(&self) -> bool {
        self.spec.enabled.unwrap_or(false)
    }
}
