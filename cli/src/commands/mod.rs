pub mod diff;
pub mod info;

use std::path::PathBuf;
use thiserror::Error;

/// Invocation problems detected before any comparison work starts.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("output directory '{}' does not exist", dir.display())]
    OutputDirMissing { dir: PathBuf },
}
