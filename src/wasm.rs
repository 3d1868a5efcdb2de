//! WASM bindings for browser-based Markdown to RTF conversion.
//!
//! This module exposes the transcoder to JavaScript via wasm-bindgen, for
//! callers assembling multi-format clipboard payloads in the browser.

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert a Markdown string to a complete RTF document.
///
/// Never throws: malformed Markdown is carried through as literal text.
#[wasm_bindgen]
pub fn markdown_to_rtf(markdown: &str) -> String {
    crate::markdown_to_rtf(markdown)
}
