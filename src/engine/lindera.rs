use std::io;

use ::lindera::{
    dictionary::{load_embedded_dictionary, DictionaryKind},
    mode::Mode,
    segmenter::Segmenter,
    tokenizer::Tokenizer as Analyzer,
};

use crate::{
    engine::command::ipadic_morpheme,
    error::{TokenizeError, TokenizeResult},
    extractor::morpheme::{Morpheme, Tokenizer},
};

const NAME: &str = "lindera";

/// In-process morphological analyzer over lindera's embedded IPADIC
///
/// Token details follow the MeCab IPADIC layout, so morphemes come out the
/// same as from [`crate::CommandTokenizer`] with [`crate::OutputFormat::Mecab`].
pub struct LinderaTokenizer {
    analyzer: Analyzer,
}

impl LinderaTokenizer {
    /// Load the embedded IPADIC dictionary
    pub fn new() -> TokenizeResult<Self> {
        let dictionary = load_embedded_dictionary(DictionaryKind::IPADIC).map_err(|err| {
            TokenizeError::Unavailable {
                name: NAME.to_string(),
                source: io::Error::other(err.to_string()),
            }
        })?;
        let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
        Ok(Self {
            analyzer: Analyzer::new(segmenter),
        })
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>> {
        let tokens = self
            .analyzer
            .tokenize(text)
            .map_err(|err| TokenizeError::Failed {
                name: NAME.to_string(),
                message: err.to_string(),
            })?;
        Ok(tokens
            .into_iter()
            .map(|mut token| {
                let surface = token.surface.to_string();
                let details = token.details();
                ipadic_morpheme(&surface, &details)
            })
            .collect())
    }

    fn name(&self) -> &str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzes_with_ipadic_features() {
        let tokenizer = LinderaTokenizer::new().unwrap();
        let units = tokenizer.tokenize("すもももももももものうち").unwrap();
        let bases: Vec<&str> = units.iter().map(|m| m.base_form.as_str()).collect();
        assert_eq!(bases, vec!["すもも", "も", "もも", "も", "もも", "の", "うち"]);
        assert!(units[0].part_of_speech.starts_with("名詞"));
        assert_eq!(units[0].reading.as_deref(), Some("スモモ"));
        assert!(units[1].part_of_speech.starts_with("助詞"));
    }

    #[test]
    fn feeds_the_extractor() {
        let tokenizer = LinderaTokenizer::new().unwrap();
        let terms = crate::aggregate(
            &["プログラミング入門", "楽しいプログラミング"],
            2,
            3,
            None,
            None,
            &tokenizer,
        )
        .unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term, "プログラミング");
        assert_eq!(terms[0].count, 2);
    }
}
