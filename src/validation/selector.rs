// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use crate::constants::INFRA_BOUNDARY_LABEL;
use crate::selector::Operator;

use super::ValidationError;

/// The selector must pin the infra boundary, by label or by a non-empty `In` expression
pub fn validate_infra_boundary(selector: &LabelSelector) -> Result<(), ValidationError> {
    let in_labels = selector
        .match_labels
        .as_ref()
        .is_some_and(|labels| labels.contains_key(INFRA_BOUNDARY_LABEL));

    let in_expressions = || {
        selector.match_expressions.iter().flatten().any(|expr| {
            expr.key == INFRA_BOUNDARY_LABEL
                && expr.operator.parse::<Operator>().ok() == Some(Operator::In)
                && expr.values.as_ref().is_some_and(|v| !v.is_empty())
        })
    };

    if in_labels || in_expressions() {
        Ok(())
    } else {
        Err(ValidationError::MissingInfraBoundary)
    }
}

/// No key may appear both in matchLabels and in matchExpressions
pub fn validate_selector_keys(selector: &LabelSelector) -> Result<(), ValidationError> {
    let Some(labels) = selector.match_labels.as_ref() else {
        return Ok(());
    };

    let duplicates: Vec<String> = selector
        .match_expressions
        .iter()
        .flatten()
        .filter(|expr| labels.contains_key(&expr.key))
        .map(|expr| expr.key.clone())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::DuplicateSelectorKeys(duplicates))
    }
}
