//! Error types for mdrtf operations.
//!
//! Transcoding itself never fails: malformed Markdown is passed through as
//! literal text. Errors only arise at the file boundary.

use thiserror::Error;

/// Errors that can occur while reading or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
