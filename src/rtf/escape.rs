//! Pure RTF escaping utilities.
//!
//! RTF reserves three metacharacters: `\` introduces control words, and
//! `{`/`}` delimit groups. Any of them occurring in user text must be
//! backslash-escaped exactly once, and non-ASCII characters must be
//! emitted as `\uN?` escapes for Word and Google Docs to read them
//! reliably. Escaping happens when text is finalized into a fragment or
//! emitted by the line assembler, never again afterwards.

use std::fmt::Write;

/// Escape body text for embedding in an RTF document.
///
/// Backslashes and braces are escaped with a backslash; characters outside
/// ASCII become `\uN?` escapes (signed 16-bit decimal, one escape per
/// UTF-16 code unit, so astral characters emit a surrogate pair). ASCII
/// text passes through verbatim.
///
/// # Examples
///
/// ```
/// use mdrtf::rtf::escape_text;
///
/// assert_eq!(escape_text("a{b}c"), "a\\{b\\}c");
/// assert_eq!(escape_text("caf\u{e9}"), "caf\\u233?");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        push_escaped(&mut result, c);
    }
    result
}

/// Escape code text (fenced blocks and inline code).
///
/// Same as [`escape_text`], plus newlines become `\line` and tabs become
/// `\tab` so multi-line code renders with its layout intact. Carriage
/// returns are dropped.
///
/// # Examples
///
/// ```
/// use mdrtf::rtf::escape_code;
///
/// assert_eq!(escape_code("a\nb"), "a\\line b");
/// ```
pub fn escape_code(code: &str) -> String {
    let mut result = String::with_capacity(code.len() + code.len() / 8);
    for c in code.chars() {
        match c {
            '\n' => result.push_str("\\line "),
            '\t' => result.push_str("\\tab "),
            '\r' => {}
            _ => push_escaped(&mut result, c),
        }
    }
    result
}

/// Escape a URL for embedding in a quoted `HYPERLINK` field instruction.
///
/// The field target lives inside double quotes, so `"` needs escaping on
/// top of the RTF metacharacters. The URL is otherwise preserved
/// literally, parentheses included.
pub fn escape_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len() + url.len() / 8);
    for c in url.chars() {
        match c {
            '\\' | '{' | '}' | '"' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '{' => out.push_str("\\{"),
        '}' => out.push_str("\\}"),
        _ if c.is_ascii() => out.push(c),
        _ => {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                // RTF wants signed 16-bit decimal; the trailing `?` is the
                // fallback character for readers without unicode support.
                write!(out, "\\u{}?", *unit as i16).expect("writing to String cannot fail");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_text("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_braces() {
        assert_eq!(escape_text("{x}"), "\\{x\\}");
    }

    #[test]
    fn test_escape_each_metachar_exactly_once() {
        assert_eq!(escape_text("\\{}"), "\\\\\\{\\}");
    }

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(escape_text("plain text 123!"), "plain text 123!");
    }

    #[test]
    fn test_escape_latin1() {
        assert_eq!(escape_text("caf\u{e9}"), "caf\\u233?");
    }

    #[test]
    fn test_escape_bmp_above_i16_wraps_negative() {
        // U+4E2D is 20013, within i16 range; U+FF01 (65281) wraps.
        assert_eq!(escape_text("\u{4e2d}"), "\\u20013?");
        assert_eq!(escape_text("\u{ff01}"), "\\u-255?");
    }

    #[test]
    fn test_escape_astral_emits_surrogate_pair() {
        assert_eq!(escape_text("\u{1f600}"), "\\u-10179?\\u-8704?");
    }

    #[test]
    fn test_escape_code_newline_and_tab() {
        assert_eq!(escape_code("a\nb\tc"), "a\\line b\\tab c");
    }

    #[test]
    fn test_escape_code_drops_carriage_return() {
        assert_eq!(escape_code("a\r\nb"), "a\\line b");
    }

    #[test]
    fn test_escape_code_metachars() {
        assert_eq!(escape_code("x{\\}"), "x\\{\\\\\\}");
    }

    #[test]
    fn test_escape_url_quote() {
        assert_eq!(escape_url("http://x/\"y\""), "http://x/\\\"y\\\"");
    }

    #[test]
    fn test_escape_url_preserves_parens() {
        assert_eq!(
            escape_url("https://example.com/s1(2)"),
            "https://example.com/s1(2)"
        );
    }
}
