//! Structural invariants over arbitrary input.
//!
//! Whatever the input, the transcoder must return a well-formed document:
//! wrapped, brace-balanced, pure ASCII, and with every fragment expanded.
//! A panic or an unbalanced group here means a pipeline-ordering bug, not
//! bad input.

use mdrtf::markdown_to_rtf;
use proptest::prelude::*;

/// Group-brace balance counting only unescaped braces. Characters after a
/// backslash are skipped: that covers `\{`, `\}`, `\\` and the first
/// letter of control words, none of which may open or close a group.
fn unescaped_brace_balance(rtf: &str) -> Option<i64> {
    let mut depth = 0i64;
    let mut chars = rtf.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(depth)
}

proptest! {
    #[test]
    fn output_is_wrapped(input in ".*") {
        let rtf = markdown_to_rtf(&input);
        prop_assert!(rtf.starts_with("{\\rtf1"), "output not wrapped in rtf1 header");
        prop_assert!(rtf.ends_with('}'), "output not closed with a brace");
    }

    #[test]
    fn output_braces_are_balanced(input in ".*") {
        let rtf = markdown_to_rtf(&input);
        prop_assert_eq!(unescaped_brace_balance(&rtf), Some(0));
    }

    #[test]
    fn output_is_pure_ascii(input in ".*") {
        prop_assert!(markdown_to_rtf(&input).is_ascii());
    }

    #[test]
    fn markdownish_documents_stay_balanced(
        input in "(?s)([-*+#`\\[\\]()\\\\{}a-z0-9 \n]|\\*\\*|```){0,200}"
    ) {
        let rtf = markdown_to_rtf(&input);
        prop_assert_eq!(unescaped_brace_balance(&rtf), Some(0));
    }
}
