//! Diagnostic error types for restaurant data loading.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from reading the restaurant data directory.
#[derive(Debug, Error, Diagnostic)]
pub enum DataError {
    #[error("no restaurant data directory found (tried: {tried})")]
    #[diagnostic(
        code(dinebot::data::no_data_dir),
        help(
            "Pass --data-dir, set DINEBOT_DATA_DIR, or run from a directory \
             containing `data/` with menu.json and faq.json."
        )
    )]
    NoDataDir { tried: String },

    #[error("failed to read {path}")]
    #[diagnostic(
        code(dinebot::data::io),
        help("Check that the file exists and is readable. menu.json and faq.json are required.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    #[diagnostic(
        code(dinebot::data::json),
        help(
            "The file is not valid JSON. Individual malformed records are skipped, \
             but the document as a whole must parse."
        )
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type DataResult<T> = std::result::Result<T, DataError>;
