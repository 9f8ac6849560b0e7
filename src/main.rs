use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
#[cfg(feature = "lindera")]
use trend_term_extractor::LinderaTokenizer;
use trend_term_extractor::{
    source::{self, InputFormat},
    CommandTokenizer, ExtractConfig, ExtractionReport, LexiconTokenizer, OutputFormat,
    TermExtractor, TermRecord, Tokenizer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TokenizerKind {
    /// External MeCab process
    Mecab,
    /// External Sudachi process (`sudachi -a`)
    Sudachi,
    /// In-process lexicon tokenizer
    Lexicon,
    /// In-process lindera analyzer (embedded IPADIC)
    #[cfg(feature = "lindera")]
    Lindera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputKind {
    /// JSON array when the content parses as one, lines otherwise
    Auto,
    Json,
    Lines,
}

impl From<InputKind> for InputFormat {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Auto => InputFormat::Auto,
            InputKind::Json => InputFormat::Json,
            InputKind::Lines => InputFormat::Lines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Tsv,
    Cbor,
}

/// Extract frequent terms from a list of titles
#[derive(Debug, Parser)]
#[command(name = "trend-term-extractor", version)]
struct Cli {
    /// Titles: JSON array or one title per line (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    titles: PathBuf,

    /// Layout of the titles and term list files
    #[arg(long, value_enum, default_value_t = InputKind::Auto)]
    input_format: InputKind,

    /// JSON config file (ExtractConfig); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Known terms to exclude: JSON array or one term per line
    #[arg(long)]
    existing: Option<PathBuf>,

    /// Stopword list replacing the built-in one
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Minimum occurrence count
    #[arg(long, allow_negative_numbers = true)]
    min_count: Option<i64>,

    /// Minimum term length in characters
    #[arg(long)]
    min_length: Option<usize>,

    /// Tokenize titles in parallel
    #[arg(long)]
    parallel: bool,

    #[arg(long, value_enum, default_value_t = TokenizerKind::Mecab)]
    tokenizer: TokenizerKind,

    /// Analyzer command (defaults to $MECAB_CMD / $SUDACHI_CMD or the tool name)
    #[arg(long)]
    tokenizer_cmd: Option<String>,

    /// Lexicon TSV for `--tokenizer lexicon`
    #[arg(long)]
    lexicon: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// JSON body, same shape as the analysis endpoint response
#[derive(Serialize)]
struct Response<'a> {
    status: &'static str,
    message: String,
    titles: usize,
    candidates: u64,
    extracted_terms: &'a [TermRecord],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let tokenizer = build_tokenizer(&cli)?;

    let load_start = Instant::now();
    let titles = source::load_titles_as(&cli.titles, cli.input_format.into())
        .with_context(|| format!("failed to load titles from {}", cli.titles.display()))?;
    tracing::info!(
        titles = titles.len(),
        elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
        "titles loaded"
    );

    let extractor = TermExtractor::new(tokenizer, config);
    let report = extractor.extract_report(&titles)?;
    tracing::info!("{}", report.message());

    let bytes = render(&report, cli.format)?;
    match &cli.output {
        Some(path) => fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ExtractConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ExtractConfig::default(),
    };
    if let Some(min_count) = cli.min_count {
        config.min_count = min_count;
    }
    if let Some(min_length) = cli.min_length {
        config.min_length = min_length;
    }
    if cli.parallel {
        config.parallel = true;
    }
    if let Some(path) = &cli.existing {
        config.existing_terms = Some(
            source::load_existing_terms_as(path, cli.input_format.into())
                .with_context(|| format!("failed to load existing terms from {}", path.display()))?,
        );
    }
    if let Some(path) = &cli.stopwords {
        config.stopwords = Some(
            source::load_stopwords_as(path, cli.input_format.into())
                .with_context(|| format!("failed to load stopwords from {}", path.display()))?,
        );
    }
    if config.min_count < 1 {
        tracing::warn!(min_count = config.min_count, "min_count below 1, using 1");
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn build_tokenizer(cli: &Cli) -> Result<Box<dyn Tokenizer>> {
    let command = |format: OutputFormat| -> Result<Box<dyn Tokenizer>> {
        let tokenizer = match &cli.tokenizer_cmd {
            Some(cmd) => CommandTokenizer::with_program(format, cmd.clone()),
            None => CommandTokenizer::new(format),
        };
        // a missing analyzer is a configuration error, fail before reading input
        tokenizer
            .probe()
            .with_context(|| format!("tokenizer `{}` is not usable", tokenizer.program()))?;
        Ok(Box::new(tokenizer))
    };
    match cli.tokenizer {
        TokenizerKind::Mecab => command(OutputFormat::Mecab),
        TokenizerKind::Sudachi => command(OutputFormat::Sudachi),
        TokenizerKind::Lexicon => {
            let tokenizer = match &cli.lexicon {
                Some(path) => LexiconTokenizer::from_path(path)
                    .with_context(|| format!("failed to load lexicon {}", path.display()))?,
                None => LexiconTokenizer::new(),
            };
            Ok(Box::new(tokenizer))
        }
        #[cfg(feature = "lindera")]
        TokenizerKind::Lindera => Ok(Box::new(
            LinderaTokenizer::new().context("failed to load the lindera dictionary")?,
        )),
    }
}

fn render(report: &ExtractionReport, format: Format) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Json => {
            let response = Response {
                status: "success",
                message: report.message(),
                titles: report.titles,
                candidates: report.candidates,
                extracted_terms: &report.terms,
            };
            let mut bytes = serde_json::to_vec_pretty(&response)?;
            bytes.push(b'\n');
            bytes
        }
        Format::Tsv => report
            .terms
            .iter()
            .map(|record| format!("{record}\n"))
            .collect::<String>()
            .into_bytes(),
        Format::Cbor => serde_cbor::to_vec(&report.terms)?,
    };
    Ok(bytes)
}
