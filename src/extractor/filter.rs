use serde::{Deserialize, Serialize};

use crate::extractor::{
    morpheme::Morpheme,
    stopwords::{ExistingTermSet, StopwordSet},
};

/// Default minimum term length, in characters
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Part-of-speech marker that identifies nouns (IPADIC / UniDic style)
pub const NOUN_TAG: &str = "名詞";

/// How a part-of-speech tag is matched against the noun marker.
/// Configured once per run, never per call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "match", content = "tag", rename_all = "snake_case")]
pub enum PosMarker {
    /// Tag starts with the marker (`名詞` matches `名詞,固有名詞,組織`)
    Prefix(String),
    /// Tag equals the marker
    Exact(String),
}

impl Default for PosMarker {
    fn default() -> Self {
        PosMarker::Prefix(NOUN_TAG.to_string())
    }
}

impl PosMarker {
    pub fn prefix(tag: impl Into<String>) -> Self {
        PosMarker::Prefix(tag.into())
    }

    pub fn exact(tag: impl Into<String>) -> Self {
        PosMarker::Exact(tag.into())
    }

    /// Check whether `tag` denotes the marked category
    #[inline]
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            PosMarker::Prefix(marker) => tag.starts_with(marker.as_str()),
            PosMarker::Exact(marker) => tag == marker,
        }
    }
}

/// Term filter
/// Decides per morpheme whether it is a candidate term.
///
/// A morpheme qualifies iff all of:
/// - its base form has at least `min_length` characters
/// - its part-of-speech tag matches the noun marker
/// - its base form is not a stopword
/// - its base form is not an existing term
///
/// No state is shared between calls.
#[derive(Debug, Clone)]
pub struct TermFilter<'a> {
    pub min_length: usize,
    pub noun_marker: &'a PosMarker,
    pub stopwords: &'a StopwordSet,
    pub existing_terms: &'a ExistingTermSet,
}

impl<'a> TermFilter<'a> {
    pub fn new(
        min_length: usize,
        noun_marker: &'a PosMarker,
        stopwords: &'a StopwordSet,
        existing_terms: &'a ExistingTermSet,
    ) -> Self {
        Self {
            min_length,
            noun_marker,
            stopwords,
            existing_terms,
        }
    }

    /// Check if `unit` is a candidate term
    #[inline]
    pub fn is_candidate(&self, unit: &Morpheme) -> bool {
        unit.base_len() >= self.min_length
            && self.noun_marker.matches(&unit.part_of_speech)
            && !self.stopwords.contains(&unit.base_form)
            && !self.existing_terms.contains(&unit.base_form)
    }
}

/// Check if `unit` is a candidate term, using the default noun marker
///
/// # Arguments
/// * `unit` - morpheme to check
/// * `min_length` - minimum base form length in characters
/// * `stopwords` - words never extracted
/// * `existing_terms` - already known terms
pub fn is_candidate(
    unit: &Morpheme,
    min_length: usize,
    stopwords: &StopwordSet,
    existing_terms: &ExistingTermSet,
) -> bool {
    let marker = PosMarker::default();
    TermFilter::new(min_length, &marker, stopwords, existing_terms).is_candidate(unit)
}
