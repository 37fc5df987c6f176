// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod provision;
pub mod registry;
pub mod selector;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;
