use std::io;

use thiserror::Error;

/// Errors raised by a morphological tokenizer.
///
/// These pass through the extraction pipeline untouched so the caller can
/// decide how to react (retry, abort, report).
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// The analyzer could not be started or loaded at all
    #[error("tokenizer `{name}` is unavailable: {source}")]
    Unavailable {
        name: String,
        #[source]
        source: io::Error,
    },
    /// The analyzer ran but rejected the input
    #[error("tokenizer `{name}` failed: {message}")]
    Failed { name: String, message: String },
    /// The analyzer produced output this crate cannot parse
    #[error("tokenizer `{name}` returned a malformed line: {line:?}")]
    MalformedOutput { name: String, line: String },
    #[error("tokenizer i/o error: {0}")]
    Io(#[from] io::Error),
}

/// A tokenizer failure inside a batch, `index` being the position of the
/// offending text in that batch
#[derive(Debug, Error)]
#[error("text {index} of the batch: {source}")]
pub struct BatchTokenizeError {
    pub index: usize,
    #[source]
    pub source: TokenizeError,
}

/// Errors raised by the term extraction pipeline and its input loaders.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Tokenizer failure while processing the title at `index`
    #[error("failed to tokenize title #{index}: {source}")]
    Tokenize {
        index: usize,
        #[source]
        source: TokenizeError,
    },
    /// A title element is not a string (e.g. `null` in a JSON array)
    #[error("title #{index} is not a string: {found}")]
    MalformedTitle { index: usize, found: String },
    /// A term list element is not a string
    #[error("term #{index} is not a string: {found}")]
    MalformedTerm { index: usize, found: String },
    #[error("invalid json input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while loading a user lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon line {line}: expected `surface<TAB>base<TAB>pos[<TAB>reading]`, got {content:?}")]
    InvalidEntry { line: usize, content: String },
    #[error("lexicon line {line}: empty surface or base form")]
    EmptyField { line: usize },
    #[error("lexicon i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type TokenizeResult<T> = Result<T, TokenizeError>;
pub type ExtractResult<T> = Result<T, ExtractError>;
