//! Concrete morphological tokenizers
//!
//! - [`command::CommandTokenizer`] pipes text through an external analyzer (MeCab, Sudachi)
//! - [`lexicon::LexiconTokenizer`] runs in process over a user lexicon,
//!   with no dictionary dependency
//! - `lindera::LinderaTokenizer` (feature `lindera`) runs lindera's IPADIC in process

pub mod command;
pub mod lexicon;
#[cfg(feature = "lindera")]
pub mod lindera;

pub use command::{CommandTokenizer, OutputFormat};
pub use lexicon::{LexiconEntry, LexiconTokenizer};
#[cfg(feature = "lindera")]
pub use self::lindera::LinderaTokenizer;
