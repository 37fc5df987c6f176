// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label selector evaluation over cluster labels.
//!
//! Selectors arrive already parsed as k8s-openapi `LabelSelector` values and
//! are converted into a flat list of [`Requirement`]s that are ANDed together.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::error::ProvisionerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

impl FromStr for Operator {
    type Err = ProvisionerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In" => Ok(Operator::In),
            "NotIn" => Ok(Operator::NotIn),
            "Exists" => Ok(Operator::Exists),
            "DoesNotExist" => Ok(Operator::DoesNotExist),
            other => Err(ProvisionerError::InvalidSelector(format!(
                "unsupported operator '{}'",
                other
            ))),
        }
    }
}

/// A single constraint on a label set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Equals { key: String, value: String },
    In { key: String, values: BTreeSet<String> },
    NotIn { key: String, values: BTreeSet<String> },
    Exists { key: String },
    DoesNotExist { key: String },
}

impl Requirement {
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Requirement::Equals { key, value } => labels.get(key) == Some(value),
            Requirement::In { key, values } => labels.get(key).is_some_and(|v| values.contains(v)),
            // An absent key is not a member of any value set
            Requirement::NotIn { key, values } => {
                !labels.get(key).is_some_and(|v| values.contains(v))
            }
            Requirement::Exists { key } => labels.contains_key(key),
            Requirement::DoesNotExist { key } => !labels.contains_key(key),
        }
    }

    fn from_expression(expr: &LabelSelectorRequirement) -> Result<Self, ProvisionerError> {
        let key = expr.key.clone();
        let values = || expr.values.iter().flatten().cloned().collect::<BTreeSet<_>>();

        Ok(match expr.operator.parse::<Operator>()? {
            Operator::In => Requirement::In { key, values: values() },
            Operator::NotIn => Requirement::NotIn { key, values: values() },
            Operator::Exists => Requirement::Exists { key },
            Operator::DoesNotExist => Requirement::DoesNotExist { key },
        })
    }
}

/// Conjunction of requirements. The empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    requirements: Vec<Requirement>,
}

impl Selector {
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl TryFrom<&LabelSelector> for Selector {
    type Error = ProvisionerError;

    fn try_from(selector: &LabelSelector) -> Result<Self, Self::Error> {
        let equality = selector
            .match_labels
            .iter()
            .flatten()
            .map(|(key, value)| {
                Ok::<_, ProvisionerError>(Requirement::Equals {
                    key: key.clone(),
                    value: value.clone(),
                })
            });
        let expressions = selector
            .match_expressions
            .iter()
            .flatten()
            .map(Requirement::from_expression);

        Ok(Selector {
            requirements: equality.chain(expressions).collect::<Result<_, _>>()?,
        })
    }
}

/// True when the selector carries no matchLabels entry and no matchExpressions entry
pub fn is_empty_selector(selector: &LabelSelector) -> bool {
    selector.match_labels.as_ref().map_or(true, |l| l.is_empty())
        && selector.match_expressions.as_ref().map_or(true, |e| e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expression, labels, selector};

    #[test]
    fn test_empty_selector_matches_everything() {
        let sel = Selector::try_from(&LabelSelector::default()).unwrap();
        assert!(sel.is_empty());
        assert!(sel.matches(&BTreeMap::new()));
        assert!(sel.matches(&labels(&[("infra-boundary", "prod")])));
        assert!(Selector::everything().matches(&labels(&[("a", "b")])));
    }

    #[test]
    fn test_match_labels_equality() {
        let sel = Selector::try_from(&selector(&[("infra-boundary", "staging")], vec![])).unwrap();

        assert!(sel.matches(&labels(&[("infra-boundary", "staging"), ("region", "eu")])));
        assert!(!sel.matches(&labels(&[("infra-boundary", "prod")])));
        assert!(!sel.matches(&labels(&[("region", "eu")])));
    }

    #[test]
    fn test_in_operator() {
        let sel = Selector::try_from(&selector(
            &[],
            vec![expression("region", "In", &["eu", "us"])],
        ))
        .unwrap();

        assert!(sel.matches(&labels(&[("region", "eu")])));
        assert!(!sel.matches(&labels(&[("region", "ap")])));
        assert!(!sel.matches(&BTreeMap::new()));
    }

    #[test]
    fn test_not_in_operator() {
        let sel = Selector::try_from(&selector(
            &[],
            vec![expression("region", "NotIn", &["eu"])],
        ))
        .unwrap();

        assert!(!sel.matches(&labels(&[("region", "eu")])));
        assert!(sel.matches(&labels(&[("region", "us")])));
        assert!(sel.matches(&BTreeMap::new()));
    }

    #[test]
    fn test_exists_and_does_not_exist_ignore_values() {
        let exists = Selector::try_from(&selector(
            &[],
            vec![expression("gpu", "Exists", &["ignored"])],
        ))
        .unwrap();
        let absent = Selector::try_from(&selector(
            &[],
            vec![expression("gpu", "DoesNotExist", &["ignored"])],
        ))
        .unwrap();

        let with_gpu = labels(&[("gpu", "nvidia")]);
        assert!(exists.matches(&with_gpu));
        assert!(!absent.matches(&with_gpu));
        assert!(!exists.matches(&BTreeMap::new()));
        assert!(absent.matches(&BTreeMap::new()));
    }

    #[test]
    fn test_labels_and_expressions_are_anded() {
        let sel = Selector::try_from(&selector(
            &[("infra-boundary", "prod")],
            vec![expression("region", "In", &["eu"])],
        ))
        .unwrap();

        assert_eq!(sel.requirements().len(), 2);
        assert!(sel.matches(&labels(&[("infra-boundary", "prod"), ("region", "eu")])));
        assert!(!sel.matches(&labels(&[("infra-boundary", "prod"), ("region", "us")])));
        assert!(!sel.matches(&labels(&[("infra-boundary", "dev"), ("region", "eu")])));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = Selector::try_from(&selector(
            &[],
            vec![expression("region", "Gt", &["1"])],
        ))
        .unwrap_err();

        assert!(matches!(err, ProvisionerError::InvalidSelector(_)));
        assert!(err.to_string().contains("Gt"));
    }

    #[test]
    fn test_is_empty_selector() {
        assert!(is_empty_selector(&LabelSelector::default()));
        assert!(is_empty_selector(&LabelSelector {
            match_labels: Some(BTreeMap::new()),
            match_expressions: Some(vec![]),
        }));
        assert!(!is_empty_selector(&selector(&[("a", "b")], vec![])));
        assert!(!is_empty_selector(&selector(
            &[],
            vec![expression("a", "Exists", &[])]
        )));
    }
}
