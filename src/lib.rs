/// This crate extracts recurring vocabulary from short Japanese titles
/// (e.g. video titles) to surface candidate trending terms.
pub mod engine;
pub mod error;
pub mod extractor;
pub mod source;

/// Term Extractor
/// The top-level struct of this crate.
/// It runs every title through normalize → tokenize → filter and aggregates
/// the candidates into a ranked term list.
///
/// `TermExtractor<T>` is generic over the tokenizer `T`, so any analyzer
/// implementing [`Tokenizer`] can be plugged in.
///
/// Output ordering:
/// - count descending
/// - equal counts: the term that appeared first in the corpus comes first
///
/// The reading of each term is the one seen at its first occurrence.
///
/// # Parallelism
/// With `ExtractConfig::parallel`, titles are tokenized on the rayon pool and
/// merged back in title order, so the output is identical to a sequential run.
pub use extractor::{aggregate, ExtractConfig, ExtractionReport, TermExtractor};

/// Tokenizer Adapter
/// `Tokenizer` is the capability the pipeline needs from a morphological
/// analyzer: text in, `Morpheme`s (base form, part-of-speech tag, reading)
/// out, in left-to-right order.
pub use extractor::morpheme::{Morpheme, Tokenizer};

/// Term Filter
/// Decides per morpheme whether it is a candidate term:
/// long enough (in characters), a noun, not a stopword, not an existing term.
pub use extractor::filter::{is_candidate, PosMarker, TermFilter};

/// Stopword / existing term sets
/// Immutable per-run configuration values.
/// `StopwordSet::default()` is the built-in list, `ExistingTermSet::default()` is empty.
pub use extractor::stopwords::{ExistingTermSet, StopwordSet, DEFAULT_STOPWORDS};

/// Output record
/// `{ term, reading, count }`, serializable as JSON / CBOR.
pub use extractor::record::TermRecord;

/// Occurrence accumulator
/// Insertion-ordered counts with first-occurrence readings.
pub use extractor::frequency::TermOccurrences;

/// Title normalization
pub use extractor::normalizer::{normalize, Normalizer};

/// Tokenizers
/// - `CommandTokenizer`: external MeCab / Sudachi process
/// - `LexiconTokenizer`: in-process longest match over a user lexicon
/// - `LinderaTokenizer`: in-process lindera analyzer (feature `lindera`)
pub use engine::{CommandTokenizer, LexiconTokenizer, OutputFormat};
#[cfg(feature = "lindera")]
pub use engine::LinderaTokenizer;

pub use error::{
    BatchTokenizeError, ExtractError, ExtractResult, LexiconError, TokenizeError, TokenizeResult,
};
