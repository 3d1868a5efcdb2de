//! Stage 4: list and paragraph assembly.
//!
//! A line-oriented walk, not a block tree: each line is classified on its
//! own, with a three-state list context threaded through the fold. This
//! deliberately does not support nested lists or multi-paragraph list
//! items. A sentence that merely starts with `-` or `1.` is taken as a
//! list item; the dialect has no escape for that.
//!
//! Raw text is RTF-escaped here, at emission time. Fragments produced by
//! the earlier stages are already final and pass through as opaque
//! tokens.

use std::mem;

use crate::rtf::escape_text;

use super::stream::{FragmentArena, FragmentId, Piece};

/// List context carried across consecutive lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    None,
    Unordered,
    Ordered(u32),
}

enum LineKind {
    Blank,
    /// A block construct resolved by an earlier stage; it owns its own
    /// paragraph break and passes through untouched.
    BlockFragment(FragmentId),
    Unordered(Vec<Piece>),
    Ordered(Vec<Piece>),
    Paragraph(Vec<Piece>),
}

enum Marker {
    Unordered,
    Ordered,
}

pub fn assemble_lines(stream: Vec<Piece>, arena: &FragmentArena) -> Vec<Piece> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut state = ListState::None;

    for line in split_lines(stream) {
        match classify(line, arena) {
            LineKind::Blank => {
                // A paragraph break, but no effect on list state: only a
                // real non-list line ends a run.
                buf.push_str("\\par ");
            }
            LineKind::BlockFragment(id) => {
                flush(&mut buf, &mut out);
                out.push(Piece::Fragment(id));
                state = ListState::None;
            }
            LineKind::Unordered(parts) => {
                if state == ListState::None {
                    buf.push_str("\\par ");
                }
                buf.push_str("\\bullet  ");
                emit_parts(parts, &mut buf, &mut out);
                buf.push_str("\\par ");
                state = ListState::Unordered;
            }
            LineKind::Ordered(parts) => {
                let n = match state {
                    ListState::Ordered(count) => count + 1,
                    _ => 1,
                };
                buf.push_str(&format!("{n}. "));
                emit_parts(parts, &mut buf, &mut out);
                buf.push_str("\\par ");
                state = ListState::Ordered(n);
            }
            LineKind::Paragraph(parts) => {
                emit_parts(parts, &mut buf, &mut out);
                buf.push_str("\\par ");
                state = ListState::None;
            }
        }
    }
    flush(&mut buf, &mut out);
    out
}

/// Group the stream into lines. Fragments join the current line; text
/// pieces split on `\n`, so a line may interleave text and fragments.
fn split_lines(stream: Vec<Piece>) -> Vec<Vec<Piece>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    for piece in stream {
        match piece {
            Piece::Fragment(id) => current.push(Piece::Fragment(id)),
            Piece::Text(text) => {
                let mut segments = text.split('\n');
                if let Some(first) = segments.next() {
                    if !first.is_empty() {
                        current.push(Piece::Text(first.to_string()));
                    }
                }
                for segment in segments {
                    lines.push(mem::take(&mut current));
                    if !segment.is_empty() {
                        current.push(Piece::Text(segment.to_string()));
                    }
                }
            }
        }
    }
    lines.push(current);
    lines
}

fn classify(mut line: Vec<Piece>, arena: &FragmentArena) -> LineKind {
    if is_blank(&line) {
        return LineKind::Blank;
    }
    if let Some(id) = lone_block_fragment(&line, arena) {
        return LineKind::BlockFragment(id);
    }

    let stripped = match line.first() {
        Some(Piece::Text(first)) => {
            strip_item_marker(first).map(|(marker, rest)| (marker, rest.to_string()))
        }
        _ => None,
    };
    if let Some((marker, rest)) = stripped {
        // The item pattern wants content after the marker.
        if !rest.is_empty() || line.len() > 1 {
            line[0] = Piece::Text(rest);
            return match marker {
                Marker::Unordered => LineKind::Unordered(line),
                Marker::Ordered => LineKind::Ordered(line),
            };
        }
    }
    LineKind::Paragraph(line)
}

fn is_blank(line: &[Piece]) -> bool {
    line.iter().all(|piece| match piece {
        Piece::Text(text) => text.trim().is_empty(),
        Piece::Fragment(_) => false,
    })
}

fn lone_block_fragment(line: &[Piece], arena: &FragmentArena) -> Option<FragmentId> {
    let mut found = None;
    for piece in line {
        match piece {
            Piece::Text(text) if text.trim().is_empty() => {}
            Piece::Fragment(id) if found.is_none() && arena.is_block(*id) => found = Some(*id),
            _ => return None,
        }
    }
    found
}

/// `[*+-] ` or `digits. ` at the start of a line, exactly one marker.
fn strip_item_marker(first: &str) -> Option<(Marker, &str)> {
    if let Some(rest) = first
        .strip_prefix(['*', '+', '-'])
        .and_then(|rest| rest.strip_prefix(' '))
    {
        return Some((Marker::Unordered, rest));
    }
    let digits = first.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = first[digits..].strip_prefix(". ") {
            return Some((Marker::Ordered, rest));
        }
    }
    None
}

fn emit_parts(parts: Vec<Piece>, buf: &mut String, out: &mut Vec<Piece>) {
    for piece in parts {
        match piece {
            Piece::Text(text) => buf.push_str(&escape_text(&text)),
            Piece::Fragment(id) => {
                flush(buf, out);
                out.push(Piece::Fragment(id));
            }
        }
    }
}

fn flush(buf: &mut String, out: &mut Vec<Piece>) {
    if !buf.is_empty() {
        out.push(Piece::Text(mem::take(buf)));
    }
}
