//! The Markdown → RTF transcoding pipeline.
//!
//! Five stages, each consuming the previous stage's output. Ordering is
//! the whole design: every transformation must touch exactly the right
//! slice of text, exactly once.
//!
//! 1. [`blocks::extract_code_blocks`]: fenced code leaves the rewritable
//!    text before any other rule can see it
//! 2. [`blocks::rewrite_block_lines`]: heading and horizontal-rule lines
//! 3. [`inline::rewrite_spans`]: links, bold-italic, bold, italic, inline
//!    code, in priority order
//! 4. [`assemble::assemble_lines`]: the line walk that emits paragraph
//!    structure, bullets and ordered counters, escaping remaining text
//! 5. [`resolve`]: fragment expansion and document wrapping
//!
//! ## Design Notes
//!
//! Stages 1–3 move finalized RTF into a per-call [`stream::FragmentArena`]
//! and leave typed tokens behind instead of splicing sentinel strings into
//! a working buffer. Later stages cannot re-process a fragment because
//! they cannot see into it; the classic failure modes of substitution
//! pipelines (a bold pass rewriting code, an escape pass mangling control
//! words) are unrepresentable. The resolver still counts expansions
//! against the arena and treats any mismatch as a converter bug, never as
//! a user-input error: user input is handled leniently, broken pipeline
//! bookkeeping is not.

mod assemble;
mod blocks;
mod inline;
mod stream;

use std::borrow::Cow;

use crate::rtf::document;

use self::stream::{FragmentArena, Piece};

/// Transcode a Markdown string into a complete RTF document.
pub fn encode(markdown: &str) -> String {
    let source = normalize_newlines(markdown);
    let mut arena = FragmentArena::new();

    let stream = blocks::extract_code_blocks(&source, &mut arena);
    let stream = blocks::rewrite_block_lines(stream, &mut arena);
    let stream = inline::rewrite_spans(stream, &mut arena);
    let body = assemble::assemble_lines(stream, &arena);
    resolve(body, &arena)
}

fn normalize_newlines(markdown: &str) -> Cow<'_, str> {
    if markdown.contains('\r') {
        Cow::Owned(markdown.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(markdown)
    }
}

/// Stage 5: expand every fragment exactly once and wrap the document.
///
/// # Panics
///
/// Panics if the number of expanded fragments differs from the number the
/// arena registered. That means a stage minted a fragment and then lost
/// it, which is a pipeline defect, not recoverable input trouble.
fn resolve(body: Vec<Piece>, arena: &FragmentArena) -> String {
    let mut content = String::new();
    let mut expanded = 0usize;
    for piece in &body {
        match piece {
            Piece::Text(text) => content.push_str(text),
            Piece::Fragment(id) => {
                content.push_str(arena.resolve(*id));
                expanded += 1;
            }
        }
    }
    assert_eq!(
        expanded,
        arena.len(),
        "{} fragments registered but {} expanded; a pipeline stage dropped a token",
        arena.len(),
        expanded
    );
    document::wrap_document(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_smoke() {
        let rtf = encode("# Title\n\nHello **world**.");
        assert!(rtf.starts_with("{\\rtf1"));
        assert!(rtf.ends_with('}'));
        assert!(rtf.contains("{\\b\\fs48 Title}\\par "));
        assert!(rtf.contains("{\\b world}"));
    }

    #[test]
    fn test_encode_empty_input() {
        let rtf = encode("");
        assert!(rtf.starts_with("{\\rtf1"));
        assert!(rtf.ends_with('}'));
    }

    #[test]
    fn test_crlf_input_matches_lf_input() {
        assert_eq!(encode("# A\r\n- b\r\n"), encode("# A\n- b\n"));
    }

    #[test]
    #[should_panic(expected = "dropped a token")]
    fn test_resolver_panics_on_dropped_fragment() {
        let mut arena = FragmentArena::new();
        let _orphan = arena.insert_inline("{\\b x}".to_string());
        resolve(vec![Piece::Text("no fragment here".to_string())], &arena);
    }
}
