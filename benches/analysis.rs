//! Benchmarks for corpus analysis and summary simplification.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tomes::{Chapter, Config, Corpus, FrequencyAnalyzer, SentenceSegmenter, SummarySimplifier};

fn sample_chapter(size: usize) -> String {
    // Realistic chapter: prose with repeated sentences, then a long summary
    let sentences = [
        "成長ホルモンの70～80%は睡眠中に分泌されると言われています。",
        "寝る子は育つという言葉には科学的な根拠があります。",
        "実際のケースでは、母親が生活リズムを整えたことで改善しました。",
        "タンパク質は一日40～50gを目安にとりましょう。",
        "ストレスが続くと成長ホルモンの分泌が妨げられます。",
    ];
    let mut text = String::from("# 第1章\n\n");
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        if i % 4 == 3 {
            text.push_str("\n\n");
        }
        i += 1;
    }
    text.push_str("\n\n## 第1章のまとめ\n\n");
    for n in 0..8 {
        text.push_str(&format!("- 要点{n}：睡眠と栄養を優先する\n"));
    }
    for _ in 0..6 {
        text.push_str("この章ではたくさんのことを学びました。一緒に頑張りましょう。\n\n");
    }
    text
}

fn bench_segmenter(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmenter");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_chapter(size);
        let segmenter = SentenceSegmenter::default();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("terminator", size), &text, |b, text| {
            b.iter(|| segmenter.segment(black_box(text)))
        });
    }

    group.finish();
}

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");
    let analyzer = FrequencyAnalyzer::new(&Config::default()).unwrap();

    for size in [10_000, 100_000] {
        let corpus: Corpus = (1..=10)
            .map(|i| Chapter::new(format!("{i:02}.md"), sample_chapter(size)))
            .collect();

        group.throughput(Throughput::Bytes((size * 10) as u64));
        group.bench_with_input(BenchmarkId::new("analyze", size), &corpus, |b, corpus| {
            b.iter(|| analyzer.analyze(black_box(corpus)))
        });
    }

    group.finish();
}

fn bench_simplifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplifier");
    let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_chapter(size);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("simplify", size), &text, |b, text| {
            b.iter(|| simplifier.simplify(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_segmenter, bench_analyzer, bench_simplifier);
criterion_main!(benches);
