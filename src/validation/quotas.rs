// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::SUPPORTED_QUOTA_KEYS;
use crate::types::namespace::is_set;
use crate::types::{QuotaBlock, Quotas};

use super::ValidationError;

/// Either `default` is set, or each of `dev`, `stage` and `prod` is
pub fn validate_default_quota(quotas: &Quotas) -> Result<(), ValidationError> {
    if quotas.default.as_ref().is_some_and(|b| b.is_empty()) {
        return Err(ValidationError::EmptyDefaultQuota);
    }

    let all_environments = is_set(quotas.dev.as_ref())
        && is_set(quotas.stage.as_ref())
        && is_set(quotas.prod.as_ref());
    if !is_set(quotas.default.as_ref()) && !all_environments {
        return Err(ValidationError::DefaultQuotaRequired);
    }

    Ok(())
}

/// Reject any key outside the supported resource quota keys, naming all of them
pub fn validate_quota_keys(block: &'static str, quota: &QuotaBlock) -> Result<(), ValidationError> {
    let keys: Vec<String> = quota
        .keys()
        .filter(|key| !SUPPORTED_QUOTA_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();

    if keys.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedQuotaKeys { block, keys })
    }
}
