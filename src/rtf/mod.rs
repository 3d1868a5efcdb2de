//! Pure RTF generation building blocks.
//!
//! This module owns everything about the output format and nothing about
//! Markdown. The design separates pure string transformation from the
//! pipeline that drives it:
//!
//! - [`escape`]: metacharacter and unicode escaping for body text, code
//!   and hyperlink targets
//! - [`document`]: the document preamble (font table, color table,
//!   defaults) and block-level constants
//!
//! ## Design Notes
//!
//! Escaping is applied exactly once, at the moment text is finalized into
//! an RTF fragment. Nothing in this module re-scans its own output; the
//! pipeline's typed token stream guarantees already-escaped fragments are
//! never fed back through.

pub mod document;
mod escape;

pub use escape::{escape_code, escape_text, escape_url};
