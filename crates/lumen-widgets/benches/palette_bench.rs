//! Benchmarks for command palette ranking and navigation.
//!
//! Run with: cargo bench -p lumen-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lumen_widgets::command_palette::{
    Command, DEFAULT_MIN_SCORE, Direction, PaletteConfig, PaletteController, ScoreModel, Scorer,
};
use std::hint::black_box;

const WORDS: [&str; 12] = [
    "open", "file", "view", "toggle", "theme", "panel", "search", "git", "commit", "drawer",
    "select", "spinner",
];

fn catalog(n: usize) -> Vec<Command> {
    (0..n)
        .map(|i| {
            let a = WORDS[i % WORDS.len()];
            let b = WORDS[(i / WORDS.len()) % WORDS.len()];
            Command::new(format!("cmd-{i}"), format!("{a} {b} {i}"))
                .with_description(format!("Runs the {a} action on {b}"))
                .with_keywords(&[a, b])
        })
        .collect()
}

// ============================================================================
// Scorer
// ============================================================================

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette/rank");

    for n in [100, 1_000, 10_000] {
        let commands = catalog(n);
        for (model, label) in [
            (ScoreModel::Compatible, "compatible"),
            (ScoreModel::Graded, "graded"),
        ] {
            let scorer = Scorer::new(model);
            for query in ["", "tog", "fl th"] {
                group.bench_with_input(
                    BenchmarkId::new(label, format!("{n}/{query:?}")),
                    &commands,
                    |b, commands| {
                        b.iter(|| {
                            let query = black_box(query);
                            black_box(scorer.rank(query, commands, DEFAULT_MIN_SCORE, 10))
                        });
                    },
                );
            }
        }
    }

    group.finish();
}

// ============================================================================
// Controller
// ============================================================================

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette/typing");

    for n in [100, 1_000] {
        let config = PaletteConfig::default().with_max_results(20);
        let mut palette = PaletteController::with_config(catalog(n), config).unwrap();
        group.bench_function(BenchmarkId::new("query_sequence", n), |b| {
            b.iter(|| {
                palette.open();
                for query in ["s", "se", "sea", "sear", "search"] {
                    palette.set_query(black_box(query));
                }
                black_box(palette.result_count())
            });
        });
    }

    let mut palette = PaletteController::new(catalog(1_000)).unwrap();
    palette.open();
    group.bench_function("move_selection", |b| {
        b.iter(|| {
            palette.move_selection(black_box(Direction::Next));
            black_box(palette.selected_index())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rank, bench_typing);
criterion_main!(benches);
