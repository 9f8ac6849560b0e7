use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use ahash::RandomState;

use crate::{
    error::{LexiconError, TokenizeResult},
    extractor::morpheme::{Morpheme, Tokenizer},
};

const UNKNOWN_PROPER_NOUN: &str = "名詞,固有名詞,一般,*";
const UNKNOWN_NOUN: &str = "名詞,一般,*,*";
const UNKNOWN_NUMBER: &str = "名詞,数,*,*";
const UNKNOWN_OTHER: &str = "その他,*,*,*";

/// One lexicon entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub surface: String,
    pub base_form: String,
    pub part_of_speech: String,
    pub reading: Option<String>,
}

/// Script class used to segment text the lexicon does not cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Digit,
    Katakana,
    Hiragana,
    Kanji,
    Other,
}

impl Script {
    fn of(c: char) -> Self {
        match c {
            '0'..='9' | '０'..='９' => Script::Digit,
            'a'..='z' | 'A'..='Z' | 'ａ'..='ｚ' | 'Ａ'..='Ｚ' | '+' | '.' | '_' | '-' | '&' => {
                Script::Latin
            }
            '\u{30A1}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                Script::Katakana
            }
            '\u{3041}'..='\u{309F}' => Script::Hiragana,
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '々' | '〆' => Script::Kanji,
            _ => Script::Other,
        }
    }

    fn part_of_speech(self) -> &'static str {
        match self {
            Script::Latin => UNKNOWN_PROPER_NOUN,
            Script::Digit => UNKNOWN_NUMBER,
            Script::Katakana | Script::Kanji => UNKNOWN_NOUN,
            Script::Hiragana | Script::Other => UNKNOWN_OTHER,
        }
    }

    fn reading(self, surface: &str) -> Option<String> {
        match self {
            Script::Katakana => Some(surface.to_string()),
            Script::Hiragana => Some(hiragana_to_katakana(surface)),
            _ => None,
        }
    }
}

fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// In-process tokenizer
/// Greedy longest match against a user lexicon; text not covered by the
/// lexicon is split into runs of the same script (Latin, digits, katakana,
/// hiragana, kanji). Unknown Latin, digit, katakana and kanji runs are
/// tagged as nouns.
///
/// Lexicon files are TSV: `surface<TAB>base<TAB>pos[<TAB>reading]`,
/// blank lines and lines starting with `#` are ignored.
///
/// # Examples
/// ```
/// use trend_term_extractor::{LexiconTokenizer, Tokenizer};
/// let mut tokenizer = LexiconTokenizer::new();
/// tokenizer.insert("入門", "入門", "名詞,一般", Some("ニュウモン"));
///
/// let units = tokenizer.tokenize("Rust入門講座").unwrap();
/// let bases: Vec<&str> = units.iter().map(|u| u.base_form.as_str()).collect();
/// assert_eq!(bases, vec!["Rust", "入門", "講座"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexiconTokenizer {
    entries: HashMap<String, LexiconEntry, RandomState>,
    max_len: usize,
}

impl LexiconTokenizer {
    /// Create a tokenizer with an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a lexicon from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LexiconError> {
        let mut tokenizer = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let trimmed = line.trim_end_matches('\r');
            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let columns: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
            if !(3..=4).contains(&columns.len()) {
                return Err(LexiconError::InvalidEntry {
                    line: line_no,
                    content: trimmed.to_string(),
                });
            }
            if columns[0].is_empty() || columns[1].is_empty() {
                return Err(LexiconError::EmptyField { line: line_no });
            }
            let reading = columns.get(3).copied().filter(|r| !r.is_empty() && *r != "*");
            tokenizer.insert(columns[0], columns[1], columns[2], reading);
        }
        tracing::debug!(entries = tokenizer.len(), "lexicon loaded");
        Ok(tokenizer)
    }

    /// Add or replace an entry
    pub fn insert(
        &mut self,
        surface: &str,
        base_form: &str,
        part_of_speech: &str,
        reading: Option<&str>,
    ) -> &mut Self {
        self.max_len = self.max_len.max(surface.chars().count());
        self.entries.insert(
            surface.to_string(),
            LexiconEntry {
                surface: surface.to_string(),
                base_form: base_form.to_string(),
                part_of_speech: part_of_speech.to_string(),
                reading: reading.map(str::to_string),
            },
        );
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest lexicon entry starting at char `start`
    fn longest_match(&self, text: &str, offsets: &[usize], start: usize) -> Option<(usize, &LexiconEntry)> {
        let remaining = offsets.len() - 1 - start;
        (1..=self.max_len.min(remaining)).rev().find_map(|len| {
            self.entries
                .get(&text[offsets[start]..offsets[start + len]])
                .map(|entry| (len, entry))
        })
    }
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>> {
        // byte offset of every char boundary, including the end
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let chars: Vec<char> = text.chars().collect();

        let mut units = Vec::new();
        let mut pos = 0;
        while pos < chars.len() {
            if let Some((len, entry)) = self.longest_match(text, &offsets, pos) {
                units.push(Morpheme::new(
                    &text[offsets[pos]..offsets[pos + len]],
                    entry.base_form.as_str(),
                    entry.part_of_speech.as_str(),
                    entry.reading.clone(),
                ));
                pos += len;
                continue;
            }

            let script = Script::of(chars[pos]);
            let mut end = pos + 1;
            while end < chars.len()
                && Script::of(chars[end]) == script
                && self.longest_match(text, &offsets, end).is_none()
            {
                end += 1;
            }
            let surface = &text[offsets[pos]..offsets[end]];
            units.push(Morpheme::new(
                surface,
                surface,
                script.part_of_speech(),
                script.reading(surface),
            ));
            pos = end;
        }
        Ok(units)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
