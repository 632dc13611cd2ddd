use thiserror::Error;

/// All errors that can occur in papercard-core.
#[derive(Debug, Error)]
pub enum PaperCardError {
    #[error("Paper file not found: {0}")]
    PaperFileNotFound(String),

    #[error("Unsupported paper file format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Paper file contains no papers: {0}")]
    EmptyPaperFile(String),

    #[error("Failed to open {url}: {source}")]
    OpenLink {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Process exit codes used by the CLI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

pub type Result<T> = std::result::Result<T, PaperCardError>;
