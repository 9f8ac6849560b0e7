use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{BatchTokenizeError, TokenizeResult};

/// A single morphological unit produced by a [`Tokenizer`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    /// Text as it appeared in the input
    pub surface: String,
    /// Dictionary form, never empty
    pub base_form: String,
    /// Part-of-speech tag in the tokenizer's taxonomy (e.g. `名詞,一般,*,*`)
    pub part_of_speech: String,
    /// Phonetic reading, if the analyzer knows one
    pub reading: Option<String>,
}

impl Morpheme {
    pub fn new(
        surface: impl Into<String>,
        base_form: impl Into<String>,
        part_of_speech: impl Into<String>,
        reading: Option<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            base_form: base_form.into(),
            part_of_speech: part_of_speech.into(),
            reading,
        }
    }

    /// Reading of this unit, falling back to the base form when absent
    #[inline]
    pub fn reading_or_base(&self) -> &str {
        self.reading.as_deref().unwrap_or(&self.base_form)
    }

    /// Number of characters of the base form (not bytes)
    #[inline]
    pub fn base_len(&self) -> usize {
        self.base_form.chars().count()
    }
}

/// Morphological tokenizer capability
///
/// Implementors turn a normalized string into morphemes in left-to-right
/// order. Any compliant analyzer (MeCab, Sudachi, an in-process lexicon)
/// can be plugged into [`crate::TermExtractor`] without touching the
/// filtering or aggregation logic.
///
/// Errors must be returned, not swallowed: the pipeline hands them back to
/// the caller unmodified.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text` into morphemes
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>>;

    /// Tokenize several texts, one morpheme list per text in input order
    ///
    /// Calls [`Tokenizer::tokenize`] per text by default. Analyzers with a
    /// per-call startup cost override this to share it across the batch.
    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>, BatchTokenizeError> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                self.tokenize(text)
                    .map_err(|source| BatchTokenizeError { index, source })
            })
            .collect()
    }

    /// Human readable name, used in logs and errors
    fn name(&self) -> &str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>> {
        (**self).tokenize(text)
    }

    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>, BatchTokenizeError> {
        (**self).tokenize_batch(texts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>> {
        (**self).tokenize(text)
    }

    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>, BatchTokenizeError> {
        (**self).tokenize_batch(texts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Arc<T> {
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>> {
        (**self).tokenize(text)
    }

    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>, BatchTokenizeError> {
        (**self).tokenize_batch(texts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
