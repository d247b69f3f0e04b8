//! End-to-end scenarios over synthetic books.
//!
//! Each test builds a small corpus, runs the analyzer or simplifier the way
//! the command line does, and checks the observable result.

use std::path::Path;

use tomes::{
    chapter_names, find_section, report, Chapter, ChapterStatus, Config, Corpus,
    FrequencyAnalyzer, HeadingMatcher, LoadOutcome, PatternMatcher, SummarySimplifier,
};

// =============================================================================
// Helpers
// =============================================================================

fn filler(c: char, n: usize) -> String {
    std::iter::repeat(c).take(n).collect()
}

fn summary_body(text: &str) -> String {
    let matcher = HeadingMatcher::from_config(&Config::default().summary).unwrap();
    find_section(text, &matcher)
        .map(|s| s.body)
        .unwrap_or_default()
}

fn write_chapter(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

fn read_chapter(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

/// Chapter A: a 600-character summary with three bullets and two
/// encouragement paragraphs.
fn chapter_a() -> (String, [&'static str; 3]) {
    let bullets = [
        "- 成長ホルモンは睡眠中に分泌される",
        "- 夜10時までに寝る習慣をつける",
        "1. 朝食でタンパク質をとる",
    ];
    let p1 = format!("一緒に頑張りましょう。{}", filler('話', 120));
    let head = format!("{}\n{}\n{}\n\n{p1}\n\n", bullets[0], bullets[1], bullets[2]);
    let p2_prefix = "あなたはきっとできます。";
    let pad = 600 - head.chars().count() - p2_prefix.chars().count();
    let body = format!("{head}{p2_prefix}{}", filler('説', pad));

    let text = format!("# 第1章 睡眠\n\n本文。\n\n## 第1章のまとめ\n{body}\n---\n\n次へ\n");
    (text, bullets)
}

/// Chapter B: a 300-character summary.
fn chapter_b() -> String {
    format!("# 第2章 食事\n\n本文。\n\n## まとめ\n{}\n", filler('食', 299))
}

// =============================================================================
// Simplification scenarios
// =============================================================================

#[test]
fn two_chapter_book_is_simplified_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let (a, bullets) = chapter_a();
    let b = chapter_b();
    assert_eq!(summary_body(&a).chars().count(), 600);
    assert_eq!(summary_body(&b).chars().count(), 300);

    write_chapter(dir.path(), "01_第1章.md", &a);
    write_chapter(dir.path(), "02_第2章.md", &b);

    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();
    let batch = simplifier.simplify_files(dir.path(), &["01_第1章.md", "02_第2章.md"], true);

    // Chapter A keeps exactly its bullets
    let new_a = read_chapter(dir.path(), "01_第1章.md");
    let expected_body = format!("\n{}\n", bullets.join("\n"));
    assert_eq!(summary_body(&new_a), expected_body);
    assert!(new_a.starts_with("# 第1章 睡眠\n\n本文。\n\n## 第1章のまとめ\n"));
    assert!(new_a.ends_with("\n---\n\n次へ\n"));

    // Chapter B is byte-identical
    assert_eq!(read_chapter(dir.path(), "02_第2章.md"), b);

    // Aggregate counts only chapter A
    let new_len = expected_body.chars().count();
    assert!(new_len < 600);
    assert_eq!(batch.total_original(), 600);
    assert_eq!(batch.total_new(), new_len);
    let expected_pct = (600 - new_len) as f64 / 600.0 * 100.0;
    let pct = batch.reduction_percent().unwrap();
    assert!((pct - expected_pct).abs() < 1e-9);
}

#[test]
fn missing_chapter_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let (a, _) = chapter_a();
    write_chapter(dir.path(), "03.md", &a);

    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();
    let batch = simplifier.simplify_files(dir.path(), &["01.md", "03.md"], true);

    assert!(matches!(batch.outcomes[0].status, ChapterStatus::Missing(_)));
    assert!(matches!(
        batch.outcomes[1].status,
        ChapterStatus::Rewritten { original_len: 600, .. }
    ));
    assert_eq!(batch.skipped(), 1);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (a, _) = chapter_a();
    write_chapter(dir.path(), "01.md", &a);

    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();
    let batch = simplifier.simplify_files(dir.path(), &["01.md"], false);

    assert!(matches!(batch.outcomes[0].status, ChapterStatus::Rewritten { .. }));
    assert_eq!(read_chapter(dir.path(), "01.md"), a);
}

#[test]
fn simplifying_twice_equals_simplifying_once() {
    let (a, _) = chapter_a();
    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();

    let once = simplifier.simplify(&a);
    let twice = simplifier.simplify(&once.text);

    assert_eq!(once.text, twice.text);
    assert_eq!(twice.original_len, twice.new_len);
}

#[test]
fn retention_classification_example() {
    let bold = "**成長ホルモンは夜に出る**";
    let bullet = "- 睡眠時間を確保する";
    let long_bullet = format!("- {}", filler('長', 248));
    let paragraph = format!("最後まで頑張りましょう。{}", filler('文', 200));
    let text = format!("## まとめ\n{bold}\n{bullet}\n{long_bullet}\n{paragraph}\n");

    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();
    let result = simplifier.simplify(&text);

    assert_eq!(result.text, format!("## まとめ\n\n{bold}\n{bullet}\n"));
}

#[test]
fn chapter_without_summary_reports_no_percentage() {
    let mut corpus = Corpus::new(vec![Chapter::new("01.md", "# 第1章\n本文だけ。\n")]);
    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();

    let batch = simplifier.simplify_corpus(&mut corpus);
    assert!(matches!(batch.outcomes[0].status, ChapterStatus::NoSummary));
    assert_eq!(batch.reduction_percent(), None);

    let mut out = Vec::new();
    report::write_batch(&mut out, &batch).unwrap();
    let text = String::from_utf8(out).unwrap();
    let line = text.lines().find(|l| l.contains("01.md")).unwrap();

    assert!(!line.contains('%'));
    assert!(!text.contains("NaN"));
}

// =============================================================================
// Analysis scenarios
// =============================================================================

#[test]
fn repetition_threshold_across_chapters() {
    let thrice = filler('繰', 40);
    let twice = filler('返', 40);
    let corpus = Corpus::new(vec![
        Chapter::new("01.md", format!("{thrice}。{twice}。{thrice}。")),
        Chapter::new("02.md", format!("{thrice}。{twice}。短い。")),
    ]);

    let analyzer = FrequencyAnalyzer::new(&Config::default()).unwrap();
    let repeated = analyzer.repeated_sentences(&corpus);

    assert_eq!(repeated.len(), 1);
    assert_eq!(repeated[0].text, thrice);
    assert_eq!(repeated[0].count, 3);
}

#[test]
fn last_summary_heading_wins() {
    let text = "## まとめ\n最初のまとめ\n## 本文\n内容\n## まとめ\n二番目のまとめ\n";
    let matcher = HeadingMatcher::new(PatternMatcher::new("まとめ").unwrap(), Some(2));

    let section = find_section(text, &matcher).unwrap();

    assert_eq!(section.body, "二番目のまとめ\n");
    assert_eq!(section.heading_start, text.rfind("## まとめ").unwrap());
}

#[test]
fn full_analysis_of_a_book_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (a, _) = chapter_a();
    let case_heavy = format!("# 第3章\n{}", "実際のケースです。".repeat(11));
    write_chapter(dir.path(), "01.md", &a);
    write_chapter(dir.path(), "02.md", &chapter_b());
    write_chapter(dir.path(), "03.md", &case_heavy);

    let corpus = Corpus::load_dir(dir.path(), "md").unwrap();
    let config = Config::default();
    let analysis = FrequencyAnalyzer::new(&config).unwrap().analyze(&corpus);

    assert_eq!(analysis.volumes.len(), 3);
    assert!(analysis.volumes.windows(2).all(|w| w[0].chars >= w[1].chars));
    assert_eq!(analysis.summaries[0].chapter, "01.md");
    assert_eq!(analysis.summaries[0].chars, 600);
    assert_eq!(analysis.summaries[1].chars, 300);
    assert_eq!(analysis.case_studies.len(), 1);
    assert_eq!(analysis.case_studies[0].chapter, "03.md");
    assert_eq!(analysis.case_studies[0].count, 22);

    let mut out = Vec::new();
    report::write_analysis(&mut out, &analysis, &config.report).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[3. Summary sections]"));
    assert!(text.contains("03.md"));
}

#[test]
fn analysis_survives_an_unreadable_chapter() {
    let dir = tempfile::tempdir().unwrap();
    let (a, _) = chapter_a();
    write_chapter(dir.path(), "01.md", &a);
    std::fs::write(dir.path().join("02.md"), [0xff, 0xfe, 0x00]).unwrap();

    let corpus = Corpus::load_dir(dir.path(), "md").unwrap();
    let analysis = FrequencyAnalyzer::new(&Config::default())
        .unwrap()
        .analyze(&corpus);

    assert_eq!(analysis.volumes.len(), 1);
    assert_eq!(analysis.summaries[0].chapter, "01.md");
    assert_eq!(analysis.summaries[0].chars, 600);
}

#[test]
fn configured_chapter_list_selects_and_orders_chapters() {
    let dir = tempfile::tempdir().unwrap();
    let (a, _) = chapter_a();
    write_chapter(dir.path(), "01.md", &a);
    write_chapter(dir.path(), "02.md", &chapter_b());
    write_chapter(dir.path(), "03.md", "# 第3章\n対象外。\n");

    let config = Config::default().with_chapters(["02.md", "04.md", "01.md"]);
    let (corpus, outcomes) = Corpus::load_book(dir.path(), "md", &config.chapters).unwrap();

    let names: Vec<_> = corpus.chapters().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["02.md", "01.md"]);
    assert!(matches!(outcomes[1], LoadOutcome::Missing(_)));

    let simplifier = SummarySimplifier::new(&config.summary).unwrap();
    let names = chapter_names(dir.path(), "md", &config.chapters).unwrap();
    let batch = simplifier.simplify_files(dir.path(), &names, false);
    assert_eq!(batch.outcomes.len(), 3);
    assert_eq!(batch.skipped(), 1);
    assert!(batch.outcomes.iter().all(|o| o.chapter != "03.md"));
}

#[test]
fn empty_chapter_list_means_every_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    write_chapter(dir.path(), "02.md", &chapter_b());
    write_chapter(dir.path(), "01.md", "# 第1章\n本文。\n");
    write_chapter(dir.path(), "notes.txt", "メモ");

    let config = Config::default();
    let names = chapter_names(dir.path(), "md", &config.chapters).unwrap();
    let (corpus, outcomes) = Corpus::load_book(dir.path(), "md", &config.chapters).unwrap();

    assert_eq!(names, vec!["01.md", "02.md"]);
    assert_eq!(corpus.len(), 2);
    assert!(outcomes.iter().all(|o| matches!(o, LoadOutcome::Loaded(_))));
}

#[test]
fn config_file_changes_behavior() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tomes.toml");
    std::fs::write(&path, "[summary]\nskip_below = 1000\n").unwrap();

    let config = Config::load(&path).unwrap();
    let simplifier = SummarySimplifier::new(&config.summary).unwrap();
    let (a, _) = chapter_a();

    // 600 characters is now below the threshold
    assert_eq!(simplifier.simplify(&a).text, a);
}
