use trend_term_extractor::{
    aggregate, ExistingTermSet, ExtractConfig, LexiconTokenizer, StopwordSet, TermExtractor,
    TermRecord,
};

const TITLES: [&str; 3] = [
    "Pythonプログラミング入門",
    "Pythonプログラミング応用",
    "JavaScript開発",
];

fn extractor(config: ExtractConfig) -> TermExtractor<LexiconTokenizer> {
    TermExtractor::new(LexiconTokenizer::new(), config)
}

#[test]
fn frequent_terms_from_programming_titles() {
    let terms = extractor(ExtractConfig::default().min_count(2).min_length(3))
        .extract(&TITLES)
        .unwrap();
    assert_eq!(
        terms,
        vec![
            TermRecord::new("Python", "Python", 2),
            TermRecord::new("プログラミング", "プログラミング", 2),
        ]
    );
}

#[test]
fn short_and_rare_terms_are_dropped() {
    let terms = extractor(ExtractConfig::default().min_count(1).min_length(2))
        .extract(&TITLES)
        .unwrap();
    let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
    // 入門 is a default stopword
    assert_eq!(names, vec!["Python", "プログラミング", "応用", "JavaScript", "開発"]);
    assert!(terms[2..].iter().all(|t| t.count == 1));
}

#[test]
fn existing_terms_are_excluded() {
    let existing: ExistingTermSet = ["Python"].into_iter().collect();
    let terms = extractor(ExtractConfig::default().existing_terms(existing))
        .extract(&TITLES)
        .unwrap();
    assert_eq!(terms, vec![TermRecord::new("プログラミング", "プログラミング", 2)]);
}

#[test]
fn custom_stopwords_replace_the_default_list() {
    let stopwords: StopwordSet = ["プログラミング"].into_iter().collect();
    let terms = extractor(
        ExtractConfig::default()
            .min_count(1)
            .min_length(2)
            .stopwords(stopwords),
    )
    .extract(&TITLES)
    .unwrap();
    let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
    assert!(names.contains(&"入門"));
    assert!(!names.contains(&"プログラミング"));
}

#[test]
fn empty_corpus_gives_empty_result() {
    let titles: Vec<String> = Vec::new();
    for min_count in [-1, 0, 1, 10] {
        let terms = extractor(ExtractConfig::default().min_count(min_count))
            .extract(&titles)
            .unwrap();
        assert!(terms.is_empty());
    }
}

#[test]
fn min_length_boundary_is_inclusive() {
    let titles = ["東京都と大阪", "東京都と大阪"];
    let terms = extractor(ExtractConfig::default().min_length(3)).extract(&titles).unwrap();
    assert_eq!(terms, vec![TermRecord::new("東京都", "東京都", 2)]);
    let terms = extractor(ExtractConfig::default().min_length(2)).extract(&titles).unwrap();
    assert_eq!(terms.len(), 2);
}

#[test]
fn reading_comes_from_first_title() {
    let mut tokenizer = LexiconTokenizer::new();
    tokenizer
        .insert("日本国", "日本国", "名詞,固有名詞,地域", Some("ニホンコク"))
        .insert("にっぽん国", "日本国", "名詞,固有名詞,地域", Some("ニッポンコク"));

    let terms = aggregate(&["にっぽん国の旅", "日本国の歴史"], 2, 3, None, None, &tokenizer).unwrap();
    assert_eq!(terms, vec![TermRecord::new("日本国", "ニッポンコク", 2)]);

    let terms = aggregate(&["日本国の歴史", "にっぽん国の旅"], 2, 3, None, None, &tokenizer).unwrap();
    assert_eq!(terms, vec![TermRecord::new("日本国", "ニホンコク", 2)]);
}

#[test]
fn equal_counts_keep_first_appearance_order() {
    let titles = ["Rustの話", "Goの話とSwift", "SwiftとRust"];
    let terms = extractor(ExtractConfig::default().min_count(1).min_length(2))
        .extract(&titles)
        .unwrap();
    let names: Vec<(&str, u64)> = terms.iter().map(|t| (t.term.as_str(), t.count)).collect();
    assert_eq!(names, vec![("Rust", 2), ("Swift", 2), ("Go", 1)]);
}

#[test]
fn decorated_titles_match_plain_ones() {
    let plain = extractor(ExtractConfig::default())
        .extract(&["最新Rust情報", "Rust情報"])
        .unwrap();
    let decorated = extractor(ExtractConfig::default())
        .extract(&["【最新】 Rust 情報!", "#Rust / 情報?"])
        .unwrap();
    assert_eq!(plain, decorated);
    assert_eq!(plain, vec![TermRecord::new("Rust", "Rust", 2)]);
}
