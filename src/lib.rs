//! # mdrtf
//!
//! A fast, lightweight Markdown → RTF transcoder for clipboard payloads
//! and document export.
//!
//! ## Features
//!
//! - Headings, horizontal rules, fenced and inline code, bold/italic,
//!   links, ordered and unordered lists
//! - Output accepted by Word and Google Docs, ASCII-clean via `\uN?`
//!   escapes
//! - Staged rewriting over a typed token stream: code is never touched by
//!   inline rules, escaping is applied exactly once
//! - Lenient by construction: malformed input stays literal text, the
//!   converter never rejects a document
//!
//! ## Quick Start
//!
//! ```
//! use mdrtf::markdown_to_rtf;
//!
//! let rtf = markdown_to_rtf("# Notes\n\nSome **bold** text.");
//! assert!(rtf.starts_with("{\\rtf1"));
//! assert!(rtf.contains("{\\b bold}"));
//! ```
//!
//! The returned string is a complete, self-contained RTF document, ready
//! to be placed on a clipboard under an RTF MIME type or written out as a
//! `.rtf` file. Treat it as opaque: post-processing it with further
//! string replacement reintroduces exactly the corruption hazards the
//! staged pipeline exists to rule out.

pub mod error;
mod pipeline;
pub mod rtf;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};

/// Transcode a Markdown string into a complete RTF document.
///
/// Pure and infallible: any input produces a valid document, with
/// unrecognized syntax carried through as literal text. Calls share no
/// state, so concurrent use needs no coordination.
pub fn markdown_to_rtf(markdown: &str) -> String {
    pipeline::encode(markdown)
}

/// Read a Markdown file and write the converted RTF document.
///
/// # Examples
///
/// ```no_run
/// mdrtf::convert_file("notes.md", "notes.rtf").unwrap();
/// ```
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let markdown = String::from_utf8(fs::read(input)?)?;
    fs::write(output, markdown_to_rtf(&markdown))?;
    Ok(())
}
