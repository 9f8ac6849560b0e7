//! Stopword and existing-term sets
//!
//! Both sets are plain immutable values handed to the extractor per run.
//! There is no process-wide mutable list.

use std::collections::HashSet;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// Built-in stopwords for video titles.
/// Generic words that show up everywhere and never make a useful trend term.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "入門", "解説", "方法", "動画", "について", "まとめ", "初心者", "完全", "基礎",
    "講座", "紹介", "説明", "最新", "簡単", "徹底", "比較", "実況", "配信",
    "チャンネル", "シリーズ", "ライブ", "公式", "予告", "ダイジェスト",
    "こと", "もの", "ため", "よう", "これ", "それ", "ここ", "今日", "今回",
];

macro_rules! term_set {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
        #[serde(transparent)]
        pub struct $name {
            terms: HashSet<String, RandomState>,
        }

        impl $name {
            /// Create an empty set
            pub fn empty() -> Self {
                Self { terms: HashSet::with_hasher(RandomState::new()) }
            }

            /// Check if `term` is in the set
            #[inline]
            pub fn contains(&self, term: &str) -> bool {
                self.terms.contains(term)
            }

            #[inline]
            pub fn len(&self) -> usize {
                self.terms.len()
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.terms.is_empty()
            }

            pub fn iter(&self) -> impl Iterator<Item = &str> {
                self.terms.iter().map(|s| s.as_str())
            }
        }

        impl<T> FromIterator<T> for $name
        where
            T: Into<String>,
        {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut terms = HashSet::with_hasher(RandomState::new());
                terms.extend(iter.into_iter().map(Into::into));
                Self { terms }
            }
        }

        impl<T> From<&[T]> for $name
        where
            T: AsRef<str>,
        {
            fn from(terms: &[T]) -> Self {
                terms.iter().map(|t| t.as_ref().to_string()).collect()
            }
        }
    };
}

term_set! {
    /// Words excluded from candidacy regardless of frequency.
    /// `StopwordSet::default()` is [`DEFAULT_STOPWORDS`].
    StopwordSet
}

term_set! {
    /// Terms that are already known / curated and must not be extracted again.
    /// `ExistingTermSet::default()` is empty.
    ExistingTermSet
}

impl Default for StopwordSet {
    fn default() -> Self {
        DEFAULT_STOPWORDS.iter().copied().collect()
    }
}

impl Default for ExistingTermSet {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stopwords_contain_builtin_list() {
        let stopwords = StopwordSet::default();
        assert_eq!(stopwords.len(), DEFAULT_STOPWORDS.len());
        assert!(stopwords.contains("入門"));
        assert!(stopwords.contains("解説"));
        assert!(!stopwords.contains("Python"));
    }

    #[test]
    fn existing_terms_default_to_empty() {
        let existing = ExistingTermSet::default();
        assert!(existing.is_empty());
        assert!(!existing.contains("Python"));
    }

    #[test]
    fn build_from_slices_and_iterators() {
        let existing = ExistingTermSet::from(&["Python", "Rust", "Python"][..]);
        assert_eq!(existing.len(), 2);
        assert!(existing.contains("Rust"));

        let stopwords: StopwordSet = vec!["foo".to_string()].into_iter().collect();
        assert_eq!(stopwords.iter().collect::<Vec<_>>(), vec!["foo"]);
    }

    #[test]
    fn deserializes_from_json_array() {
        let stopwords: StopwordSet = serde_json::from_str(r#"["動画", "配信"]"#).unwrap();
        assert!(stopwords.contains("動画"));
        assert_eq!(stopwords.len(), 2);
    }
}
