//! Loading titles and term lists from files
//!
//! Accepted layouts:
//! - a JSON array of strings, or of row objects (`{"title": ..}` / `{"term": ..}`)
//! - plain text, one entry per line (blank lines ignored)
//!
//! [`InputFormat::Auto`] reads content starting with `[` as JSON unless it is
//! not JSON at all (e.g. a first title like `[LIVE] ...`), in which case it
//! falls back to lines. A truncated JSON array stays an error.
//!
//! A JSON element that is neither is rejected with its index rather than
//! skipped, since dropping an element would shift corpus order.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use serde_json::Value;

use crate::{
    error::{ExtractError, ExtractResult},
    extractor::stopwords::{ExistingTermSet, StopwordSet},
};

/// Layout of a title or term list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON when the content parses as a JSON array, lines otherwise
    #[default]
    Auto,
    Json,
    Lines,
}

/// Read the whole of `path`, `-` meaning stdin
pub fn read_input<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let path = path.as_ref();
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

/// Parse titles in corpus order
pub fn parse_titles(content: &str) -> ExtractResult<Vec<String>> {
    parse_titles_as(content, InputFormat::Auto)
}

pub fn parse_titles_as(content: &str, format: InputFormat) -> ExtractResult<Vec<String>> {
    parse_entries(content, format, "title", |index, found| ExtractError::MalformedTitle {
        index,
        found,
    })
}

/// Parse a term list (existing terms, stopwords)
pub fn parse_terms(content: &str) -> ExtractResult<Vec<String>> {
    parse_terms_as(content, InputFormat::Auto)
}

pub fn parse_terms_as(content: &str, format: InputFormat) -> ExtractResult<Vec<String>> {
    parse_entries(content, format, "term", |index, found| ExtractError::MalformedTerm {
        index,
        found,
    })
}

pub fn load_titles<P: AsRef<Path>>(path: P) -> ExtractResult<Vec<String>> {
    load_titles_as(path, InputFormat::Auto)
}

pub fn load_titles_as<P: AsRef<Path>>(path: P, format: InputFormat) -> ExtractResult<Vec<String>> {
    parse_titles_as(&read_input(path)?, format)
}

pub fn load_existing_terms<P: AsRef<Path>>(path: P) -> ExtractResult<ExistingTermSet> {
    load_existing_terms_as(path, InputFormat::Auto)
}

pub fn load_existing_terms_as<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
) -> ExtractResult<ExistingTermSet> {
    Ok(parse_terms_as(&read_input(path)?, format)?.into_iter().collect())
}

pub fn load_stopwords<P: AsRef<Path>>(path: P) -> ExtractResult<StopwordSet> {
    load_stopwords_as(path, InputFormat::Auto)
}

pub fn load_stopwords_as<P: AsRef<Path>>(path: P, format: InputFormat) -> ExtractResult<StopwordSet> {
    Ok(parse_terms_as(&read_input(path)?, format)?.into_iter().collect())
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_entries<F>(
    content: &str,
    format: InputFormat,
    field: &str,
    malformed: F,
) -> ExtractResult<Vec<String>>
where
    F: Fn(usize, String) -> ExtractError,
{
    let values: Vec<Value> = match format {
        InputFormat::Lines => return Ok(parse_lines(content)),
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Auto => {
            if !content.trim_start().starts_with('[') {
                return Ok(parse_lines(content));
            }
            match serde_json::from_str(content) {
                Ok(values) => values,
                // input ran out inside the array: a broken JSON file, not text
                Err(err) if err.is_eof() => return Err(err.into()),
                Err(err) => {
                    tracing::debug!(%err, "bracketed input is not JSON, reading lines");
                    return Ok(parse_lines(content));
                }
            }
        }
    };
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(s) => Ok(s),
            Value::Object(mut row) => match row.remove(field) {
                Some(Value::String(s)) => Ok(s),
                other => Err(malformed(
                    index,
                    other.map_or_else(|| format!("object without `{field}`"), |v| v.to_string()),
                )),
            },
            other => Err(malformed(index, other.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_strings_and_rows() {
        let titles = parse_titles(r#"["Python入門講座", {"title": "JavaScript基礎"}]"#).unwrap();
        assert_eq!(titles, vec!["Python入門講座", "JavaScript基礎"]);
    }

    #[test]
    fn parses_lines() {
        let titles = parse_titles("Python入門講座\r\n\nReact開発ガイド\n").unwrap();
        assert_eq!(titles, vec!["Python入門講座", "React開発ガイド"]);
    }

    #[test]
    fn rejects_null_title_with_index() {
        let err = parse_titles(r#"["ok", null, "ok"]"#).unwrap_err();
        match err {
            ExtractError::MalformedTitle { index, found } => {
                assert_eq!(index, 1);
                assert_eq!(found, "null");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_row_without_field() {
        let err = parse_terms(r#"[{"term": "Rust"}, {"name": "Go"}]"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTerm { index: 1, .. }));
    }

    #[test]
    fn bracketed_first_line_is_plain_text() {
        let titles = parse_titles("[LIVE] Rust配信\nRust入門講座\n").unwrap();
        assert_eq!(titles, vec!["[LIVE] Rust配信", "Rust入門講座"]);

        let titles = parse_titles("[1] 第一回\n[2] 第二回").unwrap();
        assert_eq!(titles, vec!["[1] 第一回", "[2] 第二回"]);
    }

    #[test]
    fn explicit_format_overrides_detection() {
        let titles = parse_titles_as(r#"["a", "b"]"#, InputFormat::Lines).unwrap();
        assert_eq!(titles, vec![r#"["a", "b"]"#]);

        let err = parse_titles_as("[LIVE] Rust配信", InputFormat::Json).unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(parse_titles("[\"unterminated"), Err(ExtractError::Json(_))));
    }

    #[test]
    fn loads_term_sets_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.json");
        fs::write(&path, r#"[{"term": "Python"}, {"term": "JavaScript"}, {"term": "React"}]"#).unwrap();
        let existing = load_existing_terms(&path).unwrap();
        assert_eq!(existing.len(), 3);
        assert!(existing.contains("React"));

        let path = dir.path().join("stop.txt");
        fs::write(&path, "動画\n配信\n").unwrap();
        let stopwords = load_stopwords(&path).unwrap();
        assert!(stopwords.contains("配信"));
        assert!(!stopwords.contains("入門"));
    }
}
