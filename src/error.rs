use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid name regex {pattern:?}: {source}")]
    InvalidNameRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid short name length: {0:?} (expected a whole number above zero)")]
    InvalidShortNameLength(String),

    #[error("Invalid value for {key}: {value:?} (expected true or false)")]
    InvalidBoolean { key: String, value: String },

    #[error("Configuration form must be an object, got: {0}")]
    InvalidForm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
