//! Block-level stages: fenced code extraction and line rewriting.
//!
//! Fenced code must leave the rewritable text before anything else runs,
//! because nothing inside a fence may ever be seen by the inline or
//! escaping rules. Heading and horizontal-rule lines go next; both are
//! anchored to whole lines so a stray `#` or `-` mid-sentence cannot
//! misfire.

use memchr::memmem;

use crate::rtf::document::{HEADING_SIZES, HORIZONTAL_RULE};
use crate::rtf::{escape_code, escape_text};

use super::stream::{FragmentArena, Piece};

const FENCE: &str = "```";

/// Stage 1: replace each fenced code block with a block fragment.
///
/// Fences are paired in document order; a dangling opening fence has no
/// pair, so everything from it onward stays plain text and flows through
/// the later stages untouched.
pub fn extract_code_blocks(source: &str, arena: &mut FragmentArena) -> Vec<Piece> {
    let finder = memmem::Finder::new(FENCE);
    let bytes = source.as_bytes();
    let mut pieces = Vec::new();
    let mut pos = 0;

    loop {
        let Some(open_rel) = finder.find(&bytes[pos..]) else {
            break;
        };
        let open = pos + open_rel;
        let Some(close_rel) = finder.find(&bytes[open + FENCE.len()..]) else {
            break;
        };
        let close = open + FENCE.len() + close_rel;

        if open > pos {
            pieces.push(Piece::Text(source[pos..open].to_string()));
        }
        let body = fence_body(&source[open + FENCE.len()..close]);
        let rtf = format!("{{\\f1 {}}}\\par ", escape_code(body));
        pieces.push(Piece::Fragment(arena.insert_block(rtf)));
        pos = close + FENCE.len();
    }

    if pos < source.len() {
        pieces.push(Piece::Text(source[pos..].to_string()));
    }
    pieces
}

/// Text on the opening fence line is an info string (`` ```rust ``), not
/// code. Single-line fences have no info string; the whole content is the
/// body.
fn fence_body(content: &str) -> &str {
    match content.find('\n') {
        Some(newline) => {
            let body = &content[newline + 1..];
            body.strip_suffix('\n').unwrap_or(body)
        }
        None => content,
    }
}

/// Stage 2: convert heading and horizontal-rule lines to block fragments.
///
/// Line anchoring survives the piece structure: a text piece that follows
/// a fragment starts mid-line, and an unterminated final segment may
/// continue into a following piece, so neither end counts as a line
/// boundary unless it really is one.
pub fn rewrite_block_lines(stream: Vec<Piece>, arena: &mut FragmentArena) -> Vec<Piece> {
    let mut out = Vec::new();
    let mut at_line_start = true;
    let last_index = stream.len().saturating_sub(1);

    for (index, piece) in stream.into_iter().enumerate() {
        match piece {
            Piece::Fragment(id) => {
                out.push(Piece::Fragment(id));
                at_line_start = false;
            }
            Piece::Text(text) => {
                rewrite_text_lines(&text, at_line_start, index == last_index, arena, &mut out);
                at_line_start = text.ends_with('\n');
            }
        }
    }
    out
}

fn rewrite_text_lines(
    text: &str,
    piece_starts_line: bool,
    piece_is_last: bool,
    arena: &mut FragmentArena,
    out: &mut Vec<Piece>,
) {
    let segments: Vec<&str> = text.split('\n').collect();
    let last = segments.len() - 1;
    let mut buf = String::new();

    for (i, line) in segments.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        let anchored = (piece_starts_line || i > 0) && (i < last || piece_is_last);
        if anchored {
            if let Some(rtf) = block_line_rtf(line) {
                flush(&mut buf, out);
                out.push(Piece::Fragment(arena.insert_block(rtf)));
                continue;
            }
        }
        buf.push_str(line);
    }
    flush(&mut buf, out);
}

fn flush(buf: &mut String, out: &mut Vec<Piece>) {
    if !buf.is_empty() {
        out.push(Piece::Text(std::mem::take(buf)));
    }
}

fn block_line_rtf(line: &str) -> Option<String> {
    if let Some((level, text)) = heading(line) {
        let size = HEADING_SIZES[level - 1];
        return Some(format!("{{\\b\\fs{} {}}}\\par ", size, escape_text(text)));
    }
    if is_horizontal_rule(line) {
        return Some(HORIZONTAL_RULE.to_string());
    }
    None
}

/// Longest prefix wins: `####` is checked by counting, so `#### H4` can
/// never fall into the `#` bucket. Five or more hashes is not a heading.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=HEADING_SIZES.len()).contains(&level) {
        return None;
    }
    let text = line[level..].strip_prefix(' ')?;
    if text.trim().is_empty() {
        return None;
    }
    Some((level, text))
}

fn is_horizontal_rule(line: &str) -> bool {
    matches!(line.trim(), "---" | "***")
}
