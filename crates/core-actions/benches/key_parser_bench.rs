use core_actions::{CommandLine, key_parser};
use core_config::Config;
use core_host::MemoryHost;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn parse_tokens(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_parser");

    for input in ["j", "3j", "0", "12dd", "dwjjk", "999999w", ":wq"] {
        group.bench_function(input, |b| b.iter(|| black_box(key_parser::parse(black_box(input)))));
    }

    group.finish();
}

fn chained_burst(c: &mut Criterion) {
    let text: String = (0..200).map(|i| format!("line {i} with some words\n")).collect();
    let config = Config::default();

    c.bench_function("command_line_burst", |b| {
        b.iter_batched(
            || {
                let host = MemoryHost::with_document("bench", &text).unwrap();
                let mut cl = CommandLine::new(host, &config);
                cl.focus_in();
                cl
            },
            |mut cl| {
                cl.on_text_changed(black_box("10j3w$0dw2ddu5k"));
                cl
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, parse_tokens, chained_burst);
criterion_main!(benches);
