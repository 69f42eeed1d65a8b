//! Errors surfaced by the library.
//!
//! Parsing itself never fails; the only fatal condition is an input file that
//! cannot be read.

use std::path::PathBuf;
use thiserror::Error;

pub mod error_codes {
    pub const INPUT_NOT_FOUND: &str = "INIDIFF_IO_001";
    pub const CONFIG_EMPTY_GENERAL_BUCKET: &str = "INIDIFF_CFG_001";
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IniDiffError {
    #[error("[INIDIFF_IO_001] cannot read configuration file '{}': {source}. Suggestion: check the path and file permissions.", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IniDiffError {
    pub fn code(&self) -> &'static str {
        match self {
            IniDiffError::NotFound { .. } => error_codes::INPUT_NOT_FOUND,
        }
    }
}
