use std::path::PathBuf;

use crate::input::KeywordFileError;
use crate::lookup::InputError;
use crate::report::ExportError;
use crate::semrush::SemrushError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    KeywordFile(#[from] KeywordFileError),

    #[error("{0}")]
    Client(#[from] SemrushError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cannot export to {}: {source}", path.display())]
    Export { path: PathBuf, source: ExportError },
}

impl CliError {
    /// 2 for input the user must fix before anything is attempted, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::Input(_) => 2,
            _ => 1,
        }
    }
}
