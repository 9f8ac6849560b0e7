use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extractor::record::{TermRecord, MISSING_READING};

/// Per-term statistics kept by [`TermOccurrences`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TermStat {
    /// Reading seen at the first occurrence
    pub reading: Option<String>,
    /// Number of occurrences
    pub count: u64,
}

/// TermOccurrences struct
/// Accumulates candidate terms across a whole corpus.
///
/// Backed by an `IndexMap`, so iteration order is the order in which each
/// term first appeared. That order is the tie-break for equal counts, and
/// the first recorded reading is never overwritten.
///
/// # Examples
/// ```
/// use trend_term_extractor::extractor::frequency::TermOccurrences;
/// let mut occ = TermOccurrences::new();
/// occ.record("Python", Some("パイソン"));
/// occ.record("Rust", None);
/// occ.record("Python", Some("ピュトン"));
///
/// assert_eq!(occ.term_count("Python"), 2);
/// assert_eq!(occ.reading("Python"), Some("パイソン"));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TermOccurrences {
    #[serde(with = "indexmap::map::serde_seq")]
    terms: IndexMap<String, TermStat>,
    total: u64,
}

/// Recording occurrences
impl TermOccurrences {
    /// Create an empty TermOccurrences
    pub fn new() -> Self {
        Self {
            terms: IndexMap::new(),
            total: 0,
        }
    }

    /// Record one occurrence of `term`
    ///
    /// # Arguments
    /// * `term` - base form of the term
    /// * `reading` - reading observed at this occurrence
    #[inline]
    pub fn record(&mut self, term: &str, reading: Option<&str>) -> &mut Self {
        match self.terms.get_mut(term) {
            Some(stat) => stat.count += 1,
            None => {
                self.terms.insert(
                    term.to_string(),
                    TermStat {
                        reading: reading.map(str::to_string),
                        count: 1,
                    },
                );
            }
        }
        self.total += 1;
        self
    }

    /// Merge occurrences recorded after this one
    ///
    /// `other` must describe input that comes later in the corpus: its new
    /// terms are appended after the existing ones and its readings only fill
    /// terms not seen yet.
    ///
    /// # Arguments
    /// * `other` - occurrences of a later part of the corpus
    pub fn extend(&mut self, other: TermOccurrences) -> &mut Self {
        for (term, stat) in other.terms {
            match self.terms.get_mut(&term) {
                Some(existing) => existing.count += stat.count,
                None => {
                    self.terms.insert(term, stat);
                }
            }
        }
        self.total += other.total;
        self
    }
}

/// Retrieving information
impl TermOccurrences {
    /// Get the occurrence count for `term`
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.terms.get(term).map_or(0, |stat| stat.count)
    }

    /// Get the first-occurrence reading for `term`
    #[inline]
    pub fn reading(&self, term: &str) -> Option<&str> {
        self.terms.get(term).and_then(|stat| stat.reading.as_deref())
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.terms.len()
    }

    /// Total number of recorded occurrences
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate terms in first-appearance order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermStat)> {
        self.terms.iter().map(|(term, stat)| (term.as_str(), stat))
    }

    /// Build the ranked result list
    ///
    /// Keeps terms with `count >= min_count`, sorted by count descending.
    /// Equal counts keep first-appearance order (stable sort over an
    /// insertion-ordered map).
    ///
    /// # Arguments
    /// * `min_count` - minimum occurrence count, values below 1 act as 1
    ///
    /// # Returns
    /// * `Vec<TermRecord>` - ranked terms
    pub fn ranked(&self, min_count: u64) -> Vec<TermRecord> {
        let min_count = min_count.max(1);
        let mut ranked: Vec<(&String, &TermStat)> = self
            .terms
            .iter()
            .filter(|(_, stat)| stat.count >= min_count)
            .collect();

        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));

        ranked
            .into_iter()
            .map(|(term, stat)| TermRecord {
                term: term.clone(),
                reading: stat
                    .reading
                    .clone()
                    .unwrap_or_else(|| MISSING_READING.to_string()),
                count: stat.count,
            })
            .collect()
    }
}
