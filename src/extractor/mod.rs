pub mod filter;
pub mod frequency;
pub mod morpheme;
pub mod normalizer;
pub mod record;
pub mod stopwords;

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ExtractError, ExtractResult},
    extractor::{
        filter::{PosMarker, TermFilter, DEFAULT_MIN_LENGTH},
        frequency::TermOccurrences,
        morpheme::Tokenizer,
        normalizer::Normalizer,
        record::TermRecord,
        stopwords::{ExistingTermSet, StopwordSet},
    },
};

/// Default minimum occurrence count
pub const DEFAULT_MIN_COUNT: i64 = 2;

/// Titles handed to the tokenizer per batch
pub const TITLE_BATCH: usize = 512;

/// Extraction settings for one run
///
/// Deserializable from JSON; missing fields take their defaults.
/// `stopwords: None` means [`StopwordSet::default`], `existing_terms: None`
/// means no existing terms.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Minimum occurrence count, values below 1 act as 1
    pub min_count: i64,
    /// Minimum term length in characters
    pub min_length: usize,
    /// Marker identifying noun tags
    pub noun_marker: PosMarker,
    pub stopwords: Option<StopwordSet>,
    pub existing_terms: Option<ExistingTermSet>,
    /// Tokenize titles on the rayon pool
    pub parallel: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            min_length: DEFAULT_MIN_LENGTH,
            noun_marker: PosMarker::default(),
            stopwords: None,
            existing_terms: None,
            parallel: false,
        }
    }
}

impl ExtractConfig {
    pub fn min_count(mut self, min_count: i64) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn noun_marker(mut self, marker: PosMarker) -> Self {
        self.noun_marker = marker;
        self
    }

    pub fn stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn existing_terms(mut self, existing_terms: ExistingTermSet) -> Self {
        self.existing_terms = Some(existing_terms);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Threshold actually applied (`min_count` clamped to at least 1)
    #[inline]
    pub fn effective_min_count(&self) -> u64 {
        clamp_min_count(self.min_count)
    }
}

#[inline]
fn clamp_min_count(min_count: i64) -> u64 {
    min_count.max(1) as u64
}

/// Result of a run with the corpus statistics around it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of input titles
    pub titles: usize,
    /// Number of candidate occurrences that passed the filter
    pub candidates: u64,
    /// Number of distinct candidate terms before thresholding
    pub distinct_terms: usize,
    /// Ranked terms
    pub terms: Vec<TermRecord>,
}

impl ExtractionReport {
    pub fn message(&self) -> String {
        if self.titles == 0 {
            "No titles found.".to_string()
        } else {
            format!(
                "{} terms were extracted from {} titles.",
                self.terms.len(),
                self.titles
            )
        }
    }
}

/// Term extractor
/// Runs normalize → tokenize → filter over every title and aggregates the
/// candidates into a ranked list of [`TermRecord`]s.
///
/// Holds no state between runs; `extract` takes `&self` and can be called
/// concurrently.
///
/// # Examples
/// ```
/// use trend_term_extractor::{ExtractConfig, LexiconTokenizer, TermExtractor};
///
/// let extractor = TermExtractor::new(LexiconTokenizer::new(), ExtractConfig::default());
/// let terms = extractor
///     .extract(&["Pythonプログラミング入門", "Pythonプログラミング応用", "JavaScript開発"])
///     .unwrap();
///
/// assert_eq!(terms[0].term, "Python");
/// assert_eq!(terms[1].term, "プログラミング");
/// assert_eq!(terms.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TermExtractor<T: Tokenizer> {
    tokenizer: T,
    config: ExtractConfig,
    normalizer: Normalizer,
}

impl<T: Tokenizer> TermExtractor<T> {
    pub fn new(tokenizer: T, config: ExtractConfig) -> Self {
        Self {
            tokenizer,
            config,
            normalizer: Normalizer::default(),
        }
    }

    /// Replace the title normalizer
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Extract ranked terms from `titles`
    ///
    /// # Arguments
    /// * `titles` - titles in corpus order
    ///
    /// # Returns
    /// * `Vec<TermRecord>` - terms with `count >= min_count`, by count
    ///   descending then first appearance
    pub fn extract<S>(&self, titles: &[S]) -> ExtractResult<Vec<TermRecord>>
    where
        S: AsRef<str> + Sync,
    {
        Ok(self.extract_report(titles)?.terms)
    }

    /// Same as [`TermExtractor::extract`], keeping the corpus statistics
    pub fn extract_report<S>(&self, titles: &[S]) -> ExtractResult<ExtractionReport>
    where
        S: AsRef<str> + Sync,
    {
        let default_stopwords;
        let stopwords = match &self.config.stopwords {
            Some(stopwords) => stopwords,
            None => {
                default_stopwords = StopwordSet::default();
                &default_stopwords
            }
        };
        let no_existing_terms;
        let existing_terms = match &self.config.existing_terms {
            Some(existing) => existing,
            None => {
                no_existing_terms = ExistingTermSet::empty();
                &no_existing_terms
            }
        };
        let filter = TermFilter::new(
            self.config.min_length,
            &self.config.noun_marker,
            stopwords,
            existing_terms,
        );
        run(
            &self.tokenizer,
            &self.normalizer,
            &filter,
            titles,
            self.config.effective_min_count(),
            self.config.parallel,
        )
    }
}

/// Aggregate frequent terms over `titles`
///
/// # Arguments
/// * `titles` - titles in corpus order
/// * `min_count` - minimum occurrence count, values below 1 act as 1
/// * `min_length` - minimum term length in characters
/// * `stopwords` - words never extracted, `None` for the built-in list
/// * `existing_terms` - already known terms, `None` for none
/// * `tokenizer` - morphological tokenizer
pub fn aggregate<S, T>(
    titles: &[S],
    min_count: i64,
    min_length: usize,
    stopwords: Option<&StopwordSet>,
    existing_terms: Option<&ExistingTermSet>,
    tokenizer: &T,
) -> ExtractResult<Vec<TermRecord>>
where
    S: AsRef<str> + Sync,
    T: Tokenizer + ?Sized,
{
    let default_stopwords;
    let stopwords = match stopwords {
        Some(stopwords) => stopwords,
        None => {
            default_stopwords = StopwordSet::default();
            &default_stopwords
        }
    };
    let no_existing_terms;
    let existing_terms = match existing_terms {
        Some(existing) => existing,
        None => {
            no_existing_terms = ExistingTermSet::empty();
            &no_existing_terms
        }
    };
    let marker = PosMarker::default();
    let filter = TermFilter::new(min_length, &marker, stopwords, existing_terms);
    let report = run(
        tokenizer,
        &Normalizer::default(),
        &filter,
        titles,
        clamp_min_count(min_count),
        false,
    )?;
    Ok(report.terms)
}

fn run<S, T>(
    tokenizer: &T,
    normalizer: &Normalizer,
    filter: &TermFilter<'_>,
    titles: &[S],
    min_count: u64,
    parallel: bool,
) -> ExtractResult<ExtractionReport>
where
    S: AsRef<str> + Sync,
    T: Tokenizer + ?Sized,
{
    if titles.is_empty() {
        tracing::debug!("no titles, skipping tokenization");
        return Ok(ExtractionReport {
            titles: 0,
            candidates: 0,
            distinct_terms: 0,
            terms: Vec::new(),
        });
    }

    let start = Instant::now();
    let prepared: Vec<(usize, String)> = titles
        .iter()
        .enumerate()
        .filter_map(|(index, title)| {
            let cleaned = normalizer.normalize(title.as_ref());
            if cleaned.is_empty() {
                tracing::trace!(index, "title is empty after normalization");
                return None;
            }
            Some((index, cleaned))
        })
        .collect();

    let occurrences = if parallel {
        // one batch per worker at most, so small corpora still spread out
        let batch = prepared
            .len()
            .div_ceil(rayon::current_num_threads())
            .clamp(1, TITLE_BATCH);
        // indexed collect keeps title order regardless of completion order
        let partials = prepared
            .par_chunks(batch)
            .map(|chunk| collect_batch(tokenizer, filter, chunk))
            .collect::<ExtractResult<Vec<TermOccurrences>>>()?;
        partials
            .into_iter()
            .fold(TermOccurrences::new(), |mut acc, part| {
                acc.extend(part);
                acc
            })
    } else {
        let mut occurrences = TermOccurrences::new();
        for chunk in prepared.chunks(TITLE_BATCH) {
            occurrences.extend(collect_batch(tokenizer, filter, chunk)?);
        }
        occurrences
    };

    let terms = occurrences.ranked(min_count);
    tracing::info!(
        tokenizer = tokenizer.name(),
        titles = titles.len(),
        candidates = occurrences.total(),
        distinct = occurrences.term_num(),
        extracted = terms.len(),
        min_count,
        parallel,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "term extraction finished"
    );

    Ok(ExtractionReport {
        titles: titles.len(),
        candidates: occurrences.total(),
        distinct_terms: occurrences.term_num(),
        terms,
    })
}

/// Tokenize one batch of normalized `(title index, text)` pairs and count its candidates
fn collect_batch<T>(
    tokenizer: &T,
    filter: &TermFilter<'_>,
    batch: &[(usize, String)],
) -> ExtractResult<TermOccurrences>
where
    T: Tokenizer + ?Sized,
{
    let texts: Vec<&str> = batch.iter().map(|(_, text)| text.as_str()).collect();
    let analyses = tokenizer.tokenize_batch(&texts).map_err(|err| ExtractError::Tokenize {
        index: batch.get(err.index).map_or(err.index, |(index, _)| *index),
        source: err.source,
    })?;
    let mut occurrences = TermOccurrences::new();
    for unit in analyses.iter().flatten().filter(|unit| filter.is_candidate(unit)) {
        occurrences.record(&unit.base_form, Some(unit.reading_or_base()));
    }
    Ok(occurrences)
}
