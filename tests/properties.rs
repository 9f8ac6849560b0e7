use std::collections::HashSet;

use proptest::prelude::*;
use trend_term_extractor::{
    ExistingTermSet, ExtractConfig, LexiconTokenizer, StopwordSet, TermExtractor, TermRecord,
};

const VOCAB: &[&str] = &[
    "アルファ", "ガンマ", "デルタ", "イプシロン", "カッパ", "Rust", "Python", "TypeScript",
    "東京都", "大阪府", "機械学習", "入門",
];

fn titles() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(VOCAB), 0..6).prop_map(|words| words.join("の")),
        0..40,
    )
}

fn run(titles: &[String], config: ExtractConfig) -> Vec<TermRecord> {
    TermExtractor::new(LexiconTokenizer::new(), config)
        .extract(titles)
        .unwrap()
}

proptest! {
    #[test]
    fn extraction_is_idempotent(titles in titles(), min_count in 1i64..4) {
        let config = ExtractConfig::default().min_count(min_count);
        prop_assert_eq!(run(&titles, config.clone()), run(&titles, config));
    }

    #[test]
    fn parallel_run_matches_sequential(titles in titles(), min_count in 1i64..4) {
        let config = ExtractConfig::default().min_count(min_count);
        prop_assert_eq!(run(&titles, config.clone()), run(&titles, config.parallel(true)));
    }

    #[test]
    fn higher_threshold_gives_subset(titles in titles(), k in 1i64..5) {
        let lower = run(&titles, ExtractConfig::default().min_count(k));
        let higher = run(&titles, ExtractConfig::default().min_count(k + 1));
        let lower: HashSet<TermRecord> = lower.into_iter().collect();
        for record in higher {
            prop_assert!(lower.contains(&record));
        }
    }

    #[test]
    fn excluded_terms_never_appear(
        titles in titles(),
        existing in prop::sample::subsequence(VOCAB, 0..4),
        stop in prop::sample::subsequence(VOCAB, 0..4),
    ) {
        let config = ExtractConfig::default()
            .min_count(1)
            .existing_terms(existing.iter().copied().collect::<ExistingTermSet>())
            .stopwords(stop.iter().copied().collect::<StopwordSet>());
        for record in run(&titles, config) {
            prop_assert!(!existing.contains(&record.term.as_str()));
            prop_assert!(!stop.contains(&record.term.as_str()));
        }
    }

    #[test]
    fn output_is_ranked_and_unique(titles in titles(), min_count in -2i64..4) {
        let terms = run(&titles, ExtractConfig::default().min_count(min_count));
        let threshold = min_count.max(1) as u64;
        let mut seen = HashSet::new();
        for pair in terms.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        for record in &terms {
            prop_assert!(record.count >= threshold);
            prop_assert!(seen.insert(record.term.clone()));
        }
    }
}
