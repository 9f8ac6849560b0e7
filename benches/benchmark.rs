use criterion::{criterion_group, criterion_main, Criterion};
use trend_term_extractor::{ExtractConfig, LexiconTokenizer, TermExtractor};

const WORDS: &[&str] = &[
    "Rust", "Python", "ゲーム実況", "プログラミング", "機械学習", "東京都", "新作", "アップデート",
    "マインクラフト", "攻略", "TypeScript", "サーバー",
];

fn synthetic_titles(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                "【{}】{}の{}を{}で解説! #{}",
                WORDS[i % WORDS.len()],
                WORDS[(i * 7 + 3) % WORDS.len()],
                WORDS[(i * 13 + 5) % WORDS.len()],
                WORDS[(i / 3) % WORDS.len()],
                i
            )
        })
        .collect()
}

fn extract_benchmark(c: &mut Criterion) {
    let titles = synthetic_titles(20_000);

    c.bench_function("extract_sequential", |b| {
        let extractor = TermExtractor::new(LexiconTokenizer::new(), ExtractConfig::default());
        b.iter(|| extractor.extract(&titles).expect("extraction failed"));
    });

    c.bench_function("extract_parallel", |b| {
        let extractor = TermExtractor::new(
            LexiconTokenizer::new(),
            ExtractConfig::default().parallel(true),
        );
        b.iter(|| extractor.extract(&titles).expect("extraction failed"));
    });
}

criterion_group!(benches, extract_benchmark);
criterion_main!(benches);
