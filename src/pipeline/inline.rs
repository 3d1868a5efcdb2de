//! Stage 3: inline span rewriting.
//!
//! Five passes in priority order: links, bold-italic, bold, italic,
//! inline code. Each pass walks only [`Piece::Text`] pieces, so text
//! claimed by an earlier pass is invisible to every later one. The order
//! matters twice over: links first so emphasis markers inside a label
//! stay literal, and `***` before `**` before `*` so the triple marker is
//! never mis-split by a shorter one.
//!
//! Matching is lenient on purpose. An unterminated marker has no pair and
//! stays literal text; nothing here ever rejects input. Spans do not
//! cross line breaks.

use crate::rtf::{escape_code, escape_text, escape_url};

use super::stream::{FragmentArena, Piece};

/// A matched span within a text piece: the half-open byte range it
/// occupies and the finalized RTF that replaces it.
struct SpanMatch {
    start: usize,
    end: usize,
    rtf: String,
}

pub fn rewrite_spans(stream: Vec<Piece>, arena: &mut FragmentArena) -> Vec<Piece> {
    let stream = rewrite_pass(stream, arena, find_link);
    let stream = rewrite_pass(stream, arena, |text| {
        find_delimited(text, "***", |inner| format!("{{\\b\\i {}}}", escape_text(inner)))
    });
    let stream = rewrite_pass(stream, arena, |text| {
        find_delimited(text, "**", |inner| format!("{{\\b {}}}", escape_text(inner)))
    });
    let stream = rewrite_pass(stream, arena, |text| {
        find_delimited(text, "*", |inner| format!("{{\\i {}}}", escape_text(inner)))
    });
    rewrite_pass(stream, arena, |text| {
        find_delimited(text, "`", |inner| format!("{{\\f1 {}}}", escape_code(inner)))
    })
}

/// Run one pass over the stream, splitting text pieces around each match.
fn rewrite_pass(
    stream: Vec<Piece>,
    arena: &mut FragmentArena,
    find: impl Fn(&str) -> Option<SpanMatch>,
) -> Vec<Piece> {
    let mut out = Vec::new();
    for piece in stream {
        match piece {
            Piece::Fragment(id) => out.push(Piece::Fragment(id)),
            Piece::Text(text) => {
                let mut rest = text.as_str();
                while let Some(span) = find(rest) {
                    if span.start > 0 {
                        out.push(Piece::Text(rest[..span.start].to_string()));
                    }
                    out.push(Piece::Fragment(arena.insert_inline(span.rtf)));
                    rest = &rest[span.end..];
                }
                if !rest.is_empty() {
                    out.push(Piece::Text(rest.to_string()));
                }
            }
        }
    }
    out
}

/// Find the earliest `<delim>inner<delim>` pair with a non-empty,
/// single-line inner. An empty inner extends to the next closing
/// candidate (lazy-match behavior); an inner crossing a newline abandons
/// this opener.
fn find_delimited(
    text: &str,
    delim: &str,
    render: impl Fn(&str) -> String,
) -> Option<SpanMatch> {
    let len = delim.len();
    let mut open_from = 0;
    while let Some(open_rel) = text[open_from..].find(delim) {
        let open = open_from + open_rel;
        let mut close_from = open + len;
        while let Some(close_rel) = text[close_from..].find(delim) {
            let close = close_from + close_rel;
            let inner = &text[open + len..close];
            if inner.is_empty() {
                close_from = close + len;
                continue;
            }
            if inner.contains('\n') {
                break;
            }
            return Some(SpanMatch {
                start: open,
                end: close + len,
                rtf: render(inner),
            });
        }
        open_from = open + len;
    }
    None
}

/// Find the earliest `[label](url)` occurrence.
///
/// The URL runs to the parenthesis that balances the opener, so targets
/// like `https://example.com/s1(2)` survive whole. The label gets body
/// escaping; the URL gets its own quoting rules for the field
/// instruction.
fn find_link(text: &str) -> Option<SpanMatch> {
    let mut from = 0;
    while let Some(bracket_rel) = text[from..].find('[') {
        let open = from + bracket_rel;
        if let Some(span) = match_link_at(text, open) {
            return Some(span);
        }
        from = open + 1;
    }
    None
}

fn match_link_at(text: &str, open: usize) -> Option<SpanMatch> {
    let rest = &text[open + 1..];
    let close_rel = rest.find(']')?;
    let label = &rest[..close_rel];
    if label.is_empty() || label.contains('\n') {
        return None;
    }
    let url_body = rest[close_rel + 1..].strip_prefix('(')?;

    let mut depth = 1usize;
    for (i, c) in url_body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let url = &url_body[..i];
                    if url.is_empty() {
                        return None;
                    }
                    return Some(SpanMatch {
                        start: open,
                        end: open + close_rel + i + 4,
                        rtf: link_rtf(label, url),
                    });
                }
            }
            '\n' => return None,
            _ => {}
        }
    }
    None
}

fn link_rtf(label: &str, url: &str) -> String {
    format!(
        "{{\\field{{\\*\\fldinst{{HYPERLINK \"{}\"}}}}{{\\fldrslt{{\\ul\\cf2 {}}}}}}}",
        escape_url(url),
        escape_text(label)
    )
}
