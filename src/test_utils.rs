// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures for building records and populating registry directories.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, LabelSelectorRequirement, ObjectMeta,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Cluster, Namespace, NamespaceSpec, QuotaBlock, Quotas};

pub fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn expression(key: &str, operator: &str, values: &[&str]) -> LabelSelectorRequirement {
    LabelSelectorRequirement {
        key: key.to_string(),
        operator: operator.to_string(),
        values: Some(values.iter().map(|v| v.to_string()).collect()),
    }
}

pub fn selector(
    match_labels: &[(&str, &str)],
    match_expressions: Vec<LabelSelectorRequirement>,
) -> LabelSelector {
    LabelSelector {
        match_labels: (!match_labels.is_empty()).then(|| labels(match_labels)),
        match_expressions: (!match_expressions.is_empty()).then_some(match_expressions),
    }
}

pub fn quota(pairs: &[(&str, &str)]) -> QuotaBlock {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
        .collect()
}

pub fn make_cluster(name: &str, cluster_labels: &[(&str, &str)]) -> Cluster {
    Cluster {
        kind: Some("Cluster".to_string()),
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels(cluster_labels)),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A namespace that passes every validation check
pub fn make_namespace(name: &str) -> Namespace {
    Namespace {
        api_version: Some("provisioner.io/v1alpha1".to_string()),
        kind: "Namespace".to_string(),
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: NamespaceSpec {
            admins: vec!["team-bar".to_string()],
            cluster_selector: Some(selector(&[("infra-boundary", "staging")], vec![])),
            enabled: Some(true),
            owner: "team-foo".to_string(),
            quotas: Quotas {
                default: Some(quota(&[("pods", "10")])),
                ..Default::default()
            },
        },
    }
}

/// Write a cluster record as YAML into `dir`
pub fn write_cluster_yaml(dir: &Path, cluster: &Cluster) -> PathBuf {
    let path = dir.join(format!("{}.yaml", cluster.metadata.name.as_deref().unwrap_or("cluster")));
    fs::write(&path, serde_yaml::to_string(cluster).unwrap()).unwrap();
    path
}

/// Write a cluster record as JSON into `dir`
pub fn write_cluster_json(dir: &Path, cluster: &Cluster) -> PathBuf {
    let path = dir.join(format!("{}.json", cluster.metadata.name.as_deref().unwrap_or("cluster")));
    fs::write(&path, serde_json::to_string_pretty(cluster).unwrap()).unwrap();
    path
}

/// Write a namespace specification as YAML into `dir`
pub fn write_namespace_yaml(dir: &Path, file_name: &str, namespace: &Namespace) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, serde_yaml::to_string(namespace).unwrap()).unwrap();
    path
}
