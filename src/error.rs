/*
 * Error Module
 *
 * Typed errors for loading and validating simulation parameters.
 * The simulation core itself has no failure path: degenerate numeric
 * cases resolve to zero vectors and removal from an empty flock is a no-op.
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("failed to read params file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse params: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid parameter `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ParamsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ParamsError::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

pub type ParamsResult<T> = Result<T, ParamsError>;
