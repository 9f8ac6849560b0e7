use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
    thread,
};

use crate::{
    error::{BatchTokenizeError, TokenizeError, TokenizeResult},
    extractor::morpheme::{Morpheme, Tokenizer},
};

/// Output layout of the external analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// MeCab default (IPADIC):
    /// `surface\tPOS1,POS2,POS3,POS4,ctype,cform,base,reading,pron`
    Mecab,
    /// `sudachi -a`:
    /// `surface\tPOS1,..,POS6\tnormalized\tdictionary_form\treading\t..`
    Sudachi,
}

impl OutputFormat {
    fn default_program(self) -> &'static str {
        match self {
            OutputFormat::Mecab => "mecab",
            OutputFormat::Sudachi => "sudachi",
        }
    }

    fn env_var(self) -> &'static str {
        match self {
            OutputFormat::Mecab => "MECAB_CMD",
            OutputFormat::Sudachi => "SUDACHI_CMD",
        }
    }

    fn default_args(self) -> Vec<String> {
        match self {
            OutputFormat::Mecab => Vec::new(),
            OutputFormat::Sudachi => vec!["-a".to_string()],
        }
    }
}

/// Upper bound on the bytes piped to one analyzer run
pub const CHUNK_BYTE_LIMIT: usize = 40_000;

/// Tokenizer backed by an external analyzer process (MeCab / Sudachi CLI)
///
/// Each call pipes the text to the process's stdin and parses stdout.
/// [`Tokenizer::tokenize_batch`] sends many texts per run, one per line,
/// and splits the output back on `EOS`.
#[derive(Debug, Clone)]
pub struct CommandTokenizer {
    program: String,
    args: Vec<String>,
    format: OutputFormat,
}

impl CommandTokenizer {
    /// Create a tokenizer for `format`
    /// The program is taken from `MECAB_CMD` / `SUDACHI_CMD`, else the tool name.
    pub fn new(format: OutputFormat) -> Self {
        let program = env::var(format.env_var())
            .ok()
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| format.default_program().to_string());
        Self::with_program(format, program)
    }

    /// Create a tokenizer running `program` with the default arguments for `format`
    pub fn with_program(format: OutputFormat, program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: format.default_args(),
            format,
        }
    }

    /// Replace the program arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Run the analyzer once so a missing binary or dictionary fails early
    pub fn probe(&self) -> TokenizeResult<()> {
        self.tokenize("形態素解析").map(|_| ())
    }

    fn run(&self, text: &str) -> TokenizeResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TokenizeError::Unavailable {
                name: self.program.clone(),
                source,
            })?;
        // fed from another thread, the analyzer may fill stdout before reading all input
        let writer = child.stdin.take().map(|mut stdin| {
            let input = format!("{text}\n");
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });
        let output = child.wait_with_output()?;
        let written = match writer {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
            None => Ok(()),
        };
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TokenizeError::Failed {
                name: self.program.clone(),
                message: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }
        written?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Parse analyzer output into morphemes
    pub fn parse(&self, output: &str) -> TokenizeResult<Vec<Morpheme>> {
        Ok(self.parse_sentences(output)?.into_iter().flatten().collect())
    }

    /// Parse analyzer output into one morpheme list per `EOS`-terminated sentence
    ///
    /// A trailing sentence without `EOS` is kept.
    pub fn parse_sentences(&self, output: &str) -> TokenizeResult<Vec<Vec<Morpheme>>> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();
        for line in output.lines() {
            let line = line.trim_end_matches('\r');
            if line == "EOS" {
                sentences.push(std::mem::take(&mut current));
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            let morpheme = match self.format {
                OutputFormat::Mecab => parse_mecab_line(line),
                OutputFormat::Sudachi => parse_sudachi_line(line),
            };
            match morpheme {
                Some(m) => current.push(m),
                None => {
                    return Err(TokenizeError::MalformedOutput {
                        name: self.program.clone(),
                        line: line.to_string(),
                    })
                }
            }
        }
        if !current.is_empty() {
            sentences.push(current);
        }
        Ok(sentences)
    }

    fn tokenize_chunk(&self, chunk: &[&str]) -> TokenizeResult<Vec<Vec<Morpheme>>> {
        let output = self.run(&chunk.join("\n"))?;
        let sentences = self.parse_sentences(&output)?;
        if sentences.len() != chunk.len() {
            return Err(TokenizeError::Failed {
                name: self.program.clone(),
                message: format!(
                    "expected {} sentences in batch output, got {}",
                    chunk.len(),
                    sentences.len()
                ),
            });
        }
        Ok(sentences)
    }
}

/// Texts that cannot share a run: line breaks would split them, and an
/// empty line is not guaranteed to produce an `EOS`
fn runs_alone(text: &str) -> bool {
    text.is_empty() || text.contains(['\n', '\r'])
}

/// End (exclusive) of the chunk starting at `start`
fn chunk_end(texts: &[&str], start: usize) -> usize {
    if runs_alone(texts[start]) {
        return start + 1;
    }
    let mut bytes = texts[start].len() + 1;
    let mut end = start + 1;
    while let Some(text) = texts.get(end) {
        if runs_alone(text) || bytes + text.len() + 1 > CHUNK_BYTE_LIMIT {
            break;
        }
        bytes += text.len() + 1;
        end += 1;
    }
    end
}

impl Tokenizer for CommandTokenizer {
    fn tokenize(&self, text: &str) -> TokenizeResult<Vec<Morpheme>> {
        let output = self.run(text)?;
        self.parse(&output)
    }

    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>, BatchTokenizeError> {
        let mut analyses = Vec::with_capacity(texts.len());
        let mut start = 0;
        while start < texts.len() {
            let end = chunk_end(texts, start);
            let chunk = &texts[start..end];
            let result = if chunk.len() == 1 {
                self.tokenize(chunk[0]).map(|units| vec![units])
            } else {
                self.tokenize_chunk(chunk)
            };
            analyses.extend(result.map_err(|source| BatchTokenizeError { index: start, source })?);
            start = end;
        }
        tracing::debug!(tokenizer = %self.program, texts = texts.len(), "batch tokenized");
        Ok(analyses)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// `*` marks an absent field in both MeCab and Sudachi output
fn field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != "*")
}

fn parse_mecab_line(line: &str) -> Option<Morpheme> {
    let (surface, features) = line.split_once('\t')?;
    if surface.is_empty() {
        return None;
    }
    let features: Vec<&str> = features.split(',').collect();
    Some(ipadic_morpheme(surface, &features))
}

/// Build a morpheme from IPADIC features:
/// `POS1,POS2,POS3,POS4,ctype,cform,base,reading,pron`
pub(crate) fn ipadic_morpheme(surface: &str, features: &[&str]) -> Morpheme {
    let part_of_speech = features.iter().take(4).copied().collect::<Vec<_>>().join(",");
    let base_form = field(features.get(6).copied()).unwrap_or(surface);
    let reading = field(features.get(7).copied()).map(str::to_string);
    Morpheme::new(surface, base_form, part_of_speech, reading)
}

fn parse_sudachi_line(line: &str) -> Option<Morpheme> {
    let columns: Vec<&str> = line.split('\t').collect();
    let surface = *columns.first()?;
    let part_of_speech = *columns.get(1)?;
    if surface.is_empty() {
        return None;
    }
    let base_form = field(columns.get(3).copied())
        .or_else(|| field(columns.get(2).copied()))
        .unwrap_or(surface);
    let reading = field(columns.get(4).copied()).map(str::to_string);
    Some(Morpheme::new(surface, base_form, part_of_speech, reading))
}
