// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use regex::Regex;
use std::sync::OnceLock;

use super::ValidationError;

const MAX_NAME_LENGTH: usize = 63;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("namespace name regex must compile")
    })
}

fn separator_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"--|\.\.").expect("separator regex must compile"))
}

pub fn validate_not_restricted(name: &str, restricted: &[String]) -> Result<(), ValidationError> {
    if restricted.iter().any(|r| r == name) {
        return Err(ValidationError::RestrictedNamespace {
            name: name.to_string(),
            restricted: restricted.to_vec(),
        });
    }
    Ok(())
}

/// Lowercase alphanumerics and hyphens, alphanumeric at both ends, 1 to 63 long
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameLength(name.len()));
    }
    if !name_re().is_match(name) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    // Periods can't pass the pattern above; kept for the hyphen case
    if separator_run_re().is_match(name) {
        return Err(ValidationError::ConsecutiveSeparators(name.to_string()));
    }
    Ok(())
}
