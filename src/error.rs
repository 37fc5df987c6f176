// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as {format}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("unknown file type for {}", .0.display())]
    UnknownFileType(PathBuf),

    #[error("invalid label selector: {0}")]
    InvalidSelector(String),

    #[error("namespace {name} failed validation: {source}")]
    Validation {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("no matching clusters found")]
    NoMatchingClusters,

    #[error("failed to render manifest {0}")]
    Render(String),
}

impl ProvisionerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        path: impl Into<PathBuf>,
        format: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            format,
            source: source.into(),
        }
    }
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, ProvisionerError>;
