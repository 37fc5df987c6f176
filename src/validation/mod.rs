// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace specification validation.
//!
//! Checks run in a fixed order and stop at the first failure. Only the
//! structural check reports more than one problem at a time.

mod name;
mod quotas;
mod selector;

use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::constants::{DEFAULT_RESTRICTED_NAMESPACES, NAMESPACE_KIND};
use crate::selector::is_empty_selector;
use crate::types::Namespace;

pub use name::{validate_name, validate_not_restricted};
pub use quotas::{validate_default_quota, validate_quota_keys};
pub use selector::{validate_infra_boundary, validate_selector_keys};

/// A required field that is missing or empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required fields failed validation: {}", join(.0, "; "))]
    MissingFields(Vec<FieldError>),

    #[error("the kind for the yaml should be Namespace, got '{0}'")]
    InvalidKind(String),

    #[error("clusterSelector is required")]
    EmptyClusterSelector,

    #[error("quotas are required")]
    EmptyQuotas,

    #[error("at least the default quota must be set")]
    EmptyDefaultQuota,

    #[error("the default quota block must be set or define quotas for all three dev, stage and prod environments")]
    DefaultQuotaRequired,

    #[error("{block} resource quota: {} is/are not supported key(s) in the quota block", .keys.join(","))]
    UnsupportedQuotaKeys { block: &'static str, keys: Vec<String> },

    #[error("must select at least one infra-boundary")]
    MissingInfraBoundary,

    #[error("cannot have '{}' as both label and key in match expressions", .0.join(", "))]
    DuplicateSelectorKeys(Vec<String>),

    #[error("namespace '{name}' is restricted; the namespaces `{}` can't be used for the service", .restricted.join(", "))]
    RestrictedNamespace { name: String, restricted: Vec<String> },

    #[error("namespace name length must be between 1 and 63 characters, got {0}")]
    NameLength(usize),

    #[error("invalid namespace name '{0}'")]
    InvalidName(String),

    #[error("namespace name '{0}' cannot have consecutive hyphens or periods")]
    ConsecutiveSeparators(String),
}

fn join(errors: &[FieldError], sep: &str) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Validates namespace specifications against a restricted-name policy
#[derive(Debug, Clone)]
pub struct Validator {
    restricted_namespaces: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_RESTRICTED_NAMESPACES.iter().map(|s| s.to_string()))
    }
}

impl Validator {
    pub fn new(restricted_namespaces: impl IntoIterator<Item = String>) -> Self {
        Self {
            restricted_namespaces: restricted_namespaces.into_iter().collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.restricted_namespaces.iter().cloned())
    }

    pub fn restricted_namespaces(&self) -> &[String] {
        &self.restricted_namespaces
    }

    /// Run every check in order and return the first failure
    pub fn validate(&self, ns: &Namespace) -> Result<(), ValidationError> {
        let name = ns.metadata.name.as_deref().unwrap_or_default();
        debug!("Validating namespace '{}'", name);

        validate_required_fields(ns)?;
        validate_kind(ns)?;

        let selector = ns.spec.cluster_selector.as_ref().filter(|s| !is_empty_selector(s));
        let Some(selector) = selector else {
            return Err(ValidationError::EmptyClusterSelector);
        };
        if ns.spec.quotas.is_empty() {
            return Err(ValidationError::EmptyQuotas);
        }

        validate_default_quota(&ns.spec.quotas)?;
        for (block, quota) in ns.spec.quotas.blocks() {
            validate_quota_keys(block, quota)?;
        }

        validate_infra_boundary(selector)?;
        validate_selector_keys(selector)?;

        validate_not_restricted(name, &self.restricted_namespaces)?;
        validate_name(name)?;

        Ok(())
    }
}

/// Presence checks for the fields every specification must carry
pub fn validate_required_fields(ns: &Namespace) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if ns.spec.admins.is_empty() {
        errors.push(FieldError {
            field: "spec.admins",
            reason: "must list at least one team",
        });
    }
    if ns.spec.cluster_selector.is_none() {
        errors.push(FieldError {
            field: "spec.clusterSelector",
            reason: "is required",
        });
    }
    if ns.spec.enabled.is_none() {
        errors.push(FieldError {
            field: "spec.enabled",
            reason: "must be set explicitly",
        });
    }
    if ns.spec.owner.is_empty() {
        errors.push(FieldError {
            field: "spec.owner",
            reason: "is required",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(errors))
    }
}

pub fn validate_kind(ns: &Namespace) -> Result<(), ValidationError> {
    if ns.kind == NAMESPACE_KIND {
        Ok(())
    } else {
        Err(ValidationError::InvalidKind(ns.kind.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expression, make_namespace, quota, selector};
    use crate::types::Quotas;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

    #[test]
    fn test_valid_namespace_passes() {
        let ns = make_namespace("team-foo");
        assert_eq!(Validator::default().validate(&ns), Ok(()));
    }

    #[test]
    fn test_missing_fields_are_aggregated() {
        let mut ns = make_namespace("team-foo");
        ns.spec.admins.clear();
        ns.spec.enabled = None;
        ns.spec.owner.clear();

        let err = Validator::default().validate(&ns).unwrap_err();
        let ValidationError::MissingFields(fields) = &err else {
            panic!("expected MissingFields, got {err:?}");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field).collect();
        assert_eq!(names, vec!["spec.admins", "spec.enabled", "spec.owner"]);
        assert!(err.to_string().contains("spec.enabled must be set explicitly"));
    }

    #[test]
    fn test_missing_selector_is_structural() {
        let mut ns = make_namespace("team-foo");
        ns.spec.cluster_selector = None;

        let err = Validator::default().validate(&ns).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![FieldError {
                field: "spec.clusterSelector",
                reason: "is required",
            }])
        );
    }

    #[test]
    fn test_wrong_kind() {
        let mut ns = make_namespace("team-foo");
        ns.kind = "Deployment".to_string();

        let err = Validator::default().validate(&ns).unwrap_err();
        assert_eq!(err, ValidationError::InvalidKind("Deployment".to_string()));
        assert!(err.to_string().contains("should be Namespace"));
    }

    #[test]
    fn test_empty_selector_rejected() {
        let mut ns = make_namespace("team-foo");
        ns.spec.cluster_selector = Some(LabelSelector::default());

        assert_eq!(
            Validator::default().validate(&ns),
            Err(ValidationError::EmptyClusterSelector)
        );
    }

    #[test]
    fn test_empty_quotas_rejected() {
        let mut ns = make_namespace("team-foo");
        ns.spec.quotas = Quotas::default();

        assert_eq!(
            Validator::default().validate(&ns),
            Err(ValidationError::EmptyQuotas)
        );
    }

    #[test]
    fn test_quota_key_errors_name_the_block() {
        let mut ns = make_namespace("team-foo");
        ns.spec.quotas.stage = Some(quota(&[("pods", "5"), ("gpus", "1")]));

        let err = Validator::default().validate(&ns).unwrap_err();
        assert_eq!(
            err.to_string(),
            "stage resource quota: gpus is/are not supported key(s) in the quota block"
        );
    }

    #[test]
    fn test_infra_boundary_checked_after_quotas() {
        let mut ns = make_namespace("team-foo");
        ns.spec.cluster_selector = Some(selector(&[("region", "eu")], vec![]));

        assert_eq!(
            Validator::default().validate(&ns),
            Err(ValidationError::MissingInfraBoundary)
        );
    }

    #[test]
    fn test_selector_key_collision() {
        let mut ns = make_namespace("team-foo");
        ns.spec.cluster_selector = Some(selector(
            &[("infra-boundary", "staging"), ("region", "eu")],
            vec![expression("region", "In", &["eu"])],
        ));

        let err = Validator::default().validate(&ns).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateSelectorKeys(vec!["region".to_string()]));
        assert!(err.to_string().contains("'region'"));
    }

    #[test]
    fn test_restricted_name_uses_injected_list() {
        let ns = make_namespace("team-foo");
        let validator = Validator::new(vec!["team-foo".to_string()]);

        let err = validator.validate(&ns).unwrap_err();
        assert!(matches!(err, ValidationError::RestrictedNamespace { .. }));

        assert!(validator.validate(&make_namespace("kube-system")).is_ok());
        assert!(Validator::default().validate(&make_namespace("kube-system")).is_err());
    }

    #[test]
    fn test_invalid_name() {
        let ns = make_namespace("Team-Foo");
        assert_eq!(
            Validator::default().validate(&ns),
            Err(ValidationError::InvalidName("Team-Foo".to_string()))
        );
    }

    #[test]
    fn test_missing_name_fails_length() {
        let mut ns = make_namespace("x");
        ns.metadata.name = None;

        assert_eq!(
            Validator::default().validate(&ns),
            Err(ValidationError::NameLength(0))
        );
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            restricted_namespaces: vec!["reserved".to_string()],
            ..Config::default()
        };
        let validator = Validator::from_config(&config);

        assert_eq!(validator.restricted_namespaces(), ["reserved".to_string()]);
    }

    #[test]
    fn test_invalid_default_quota_key_is_named() {
        let mut ns = make_namespace("team-foo");
        ns.spec.quotas.default = Some(quota(&[("invalid-key", "10")]));

        let err = Validator::default().validate(&ns).unwrap_err();
        assert!(err.to_string().contains("invalid-key"));
    }
}
