//! Phrase sets and case-insensitive substring matching.
//!
//! A run supplies up to three search phrases. Empty or whitespace-only
//! entries are dropped at construction and the rest are lowercased once, so
//! matching a slide costs one lowercase of the slide text plus a substring
//! scan per phrase.

/// Maximum number of phrases a single run accepts.
pub const MAX_PHRASES: usize = 3;

/// The user-supplied search phrases for one run, normalized for matching.
#[derive(Debug, Clone, Default)]
pub struct PhraseSet {
    /// Lowercased, non-empty needles.
    needles: Vec<String>,
}

impl PhraseSet {
    /// Build a phrase set from raw user input.
    ///
    /// Empty and whitespace-only phrases are silently discarded, mirroring
    /// the optional second and third input fields of a run. Retained
    /// phrases are kept verbatim (lowercased only): surrounding whitespace
    /// in a phrase is significant for matching. The caller is responsible
    /// for rejecting a fully empty set before starting a search.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let needles = phrases
            .into_iter()
            .filter_map(|p| {
                let p = p.as_ref();
                if p.trim().is_empty() {
                    None
                } else {
                    Some(p.to_lowercase())
                }
            })
            .collect();

        Self { needles }
    }

    /// True if no usable phrase survived construction.
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Number of usable phrases.
    pub fn len(&self) -> usize {
        self.needles.len()
    }

    /// Test whether any phrase occurs in `text`, case-insensitively.
    ///
    /// An empty set matches nothing.
    pub fn matches(&self, text: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }

        let haystack = text.to_lowercase();
        self.needles.iter().any(|needle| haystack.contains(needle))
    }
}
