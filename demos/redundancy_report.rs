//! Redundancy Report
//!
//! Analyze a small in-memory book, then simplify its summaries.
//!
//! ```bash
//! cargo run --example redundancy_report
//! ```

use std::io::Write;

use tomes::{report, Chapter, Config, Corpus, FrequencyAnalyzer, SummarySimplifier};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let shared = "成長ホルモンの70～80%は眠り始めの深い睡眠中に分泌されると考えられています";
    let prose = "この章では睡眠と成長の関係について詳しく見てきました。".repeat(12);

    let mut corpus = Corpus::new(vec![
        Chapter::new(
            "01_第1章.md",
            format!(
                "# 第1章 睡眠\n\n{shared}。\n\n## 第1章のまとめ\n\n\
                 **睡眠が最優先**\n- 22時までに寝る\n- 寝る前の画面を控える\n\n{prose}\n\n\
                 一緒に頑張りましょう！\n"
            ),
        ),
        Chapter::new(
            "02_第2章.md",
            format!("# 第2章 食事\n\n{shared}。\n\n## まとめ\n\n- タンパク質をとる\n"),
        ),
        Chapter::new("03_第3章.md", format!("# 第3章 運動\n\n{shared}。\n")),
    ]);

    let config = Config::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Read-only pass
    let analyzer = FrequencyAnalyzer::new(&config)?;
    report::write_analysis(&mut out, &analyzer.analyze(&corpus), &config.report)?;

    // Rewrite pass, in memory only
    let simplifier = SummarySimplifier::new(&config.summary)?;
    let batch = simplifier.simplify_corpus(&mut corpus);
    report::write_batch(&mut out, &batch)?;

    writeln!(out, "\n{}", corpus.chapters()[0].text)?;
    Ok(())
}
