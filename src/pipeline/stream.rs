//! Typed working buffer for the transcoding pipeline.
//!
//! Earlier revisions of this kind of converter splice sentinel substrings
//! into one big working string and hope no user input ever collides with
//! them. Here the working buffer is a sequence of typed [`Piece`]s instead:
//! text that later stages may still rewrite stays [`Piece::Text`], while
//! finalized RTF is moved into a per-call [`FragmentArena`] and referenced
//! by an opaque [`FragmentId`]. A fragment is terminal: no stage can see
//! into it, so collision and double-processing are impossible by
//! construction.
//!
//! The arena is a plain per-call `Vec`; ids are indices minted by insertion.
//! Nothing is shared between calls, so concurrent conversions need no
//! coordination.

/// Handle to a finalized RTF fragment stored in a [`FragmentArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentId(usize);

/// Whether a fragment stands for a whole source line or a span within one.
///
/// Block fragments (fenced code, headings, rules) carry their own trailing
/// `\par`, so the line assembler passes a line holding only a block
/// fragment through untouched. Inline fragments (emphasis, links, inline
/// code) are embedded in whatever paragraph their line becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Block,
    Inline,
}

/// One piece of the working buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Source text still subject to rewriting by later stages.
    Text(String),
    /// A finalized RTF fragment, opaque to every later stage.
    Fragment(FragmentId),
}

/// Per-call store of finalized RTF fragments.
#[derive(Debug, Default)]
pub struct FragmentArena {
    fragments: Vec<(FragmentKind, String)>,
}

impl FragmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a block-level fragment (owns its paragraph break).
    pub fn insert_block(&mut self, rtf: String) -> FragmentId {
        self.insert(FragmentKind::Block, rtf)
    }

    /// Store an inline fragment (embedded in the surrounding paragraph).
    pub fn insert_inline(&mut self, rtf: String) -> FragmentId {
        self.insert(FragmentKind::Inline, rtf)
    }

    fn insert(&mut self, kind: FragmentKind, rtf: String) -> FragmentId {
        self.fragments.push((kind, rtf));
        FragmentId(self.fragments.len() - 1)
    }

    pub fn is_block(&self, id: FragmentId) -> bool {
        self.entry(id).0 == FragmentKind::Block
    }

    /// Look up the RTF stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not minted by this arena. Ids only come from
    /// `insert`, so a miss means a pipeline stage leaked a token across
    /// calls; that is a bug in the converter, not bad user input.
    pub fn resolve(&self, id: FragmentId) -> &str {
        &self.entry(id).1
    }

    fn entry(&self, id: FragmentId) -> &(FragmentKind, String) {
        self.fragments.get(id.0).unwrap_or_else(|| {
            panic!(
                "fragment id {} out of range ({} registered); a pipeline stage emitted an unregistered token",
                id.0,
                self.fragments.len()
            )
        })
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut arena = FragmentArena::new();
        let a = arena.insert_block("{\\b a}\\par ".to_string());
        let b = arena.insert_inline("{\\i b}".to_string());
        assert_eq!(arena.resolve(a), "{\\b a}\\par ");
        assert_eq!(arena.resolve(b), "{\\i b}");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_fragment_kinds() {
        let mut arena = FragmentArena::new();
        let block = arena.insert_block(String::new());
        let inline = arena.insert_inline(String::new());
        assert!(arena.is_block(block));
        assert!(!arena.is_block(inline));
    }

    #[test]
    #[should_panic(expected = "unregistered token")]
    fn test_resolving_a_foreign_id_panics() {
        let mut minted = FragmentArena::new();
        minted.insert_inline("a".to_string());
        let id = minted.insert_inline("b".to_string());
        FragmentArena::new().resolve(id);
    }

    #[test]
    fn test_ids_are_insertion_ordered() {
        let mut arena = FragmentArena::new();
        let first = arena.insert_inline("first".to_string());
        let second = arena.insert_inline("second".to_string());
        assert_ne!(first, second);
        assert_eq!(arena.resolve(first), "first");
        assert_eq!(arena.resolve(second), "second");
    }
}
