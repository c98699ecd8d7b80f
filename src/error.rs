use std::path::PathBuf;

/// Errors produced while loading, validating, comparing or writing snapshots.
///
/// `Io` and `NotJson` are load failures: the file could not be turned into
/// structured data at all. `MissingKey` and `Malformed` are validation
/// failures: the file parsed but does not have the snapshot shape. Callers
/// that show messages to a user can tell the two apart with
/// [`Error::is_validation`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("{} is not a valid JSON file: {source}", path.display())]
    NotJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is a JSON object but lacks one of the required keys.
    #[error("{} does not have the expected structure, missing key `{key}`", path.display())]
    MissingKey { path: PathBuf, key: &'static str },

    /// All required keys are present but a value has the wrong shape.
    #[error("{} does not have the expected structure: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The two snapshots being compared belong to different accounts.
    #[error("snapshots belong to different accounts: `{from}` and `{to}`")]
    AccountMismatch { from: String, to: String },

    /// A snapshot could not be written to disk.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is unreadable or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures where the file parsed but is not a snapshot.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingKey { .. } | Error::Malformed { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
