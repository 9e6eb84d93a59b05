// benches/splitter_benchmarks.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use statsheet::parsers::football;
use statsheet::splitter::{split_batting, split_pitching, split_rbi_tb, DigitSearch};

const BATTING: &[(&str, u32)] = &[("1510412", 40), ("112100", 20), ("2231811", 88), ("0000", 3), ("12111", 5)];
const PITCHING: &[&str] = &[
    "12.1503215",
    "2.1654410",
    "45.2483020112",
    "101.011055403398",
];

fn bench_batting(c: &mut Criterion) {
    c.bench_function("split_batting", |b| {
        b.iter(|| {
            for (token, ab) in BATTING {
                black_box(split_batting(black_box(token), *ab));
            }
        })
    });

    c.bench_function("split_rbi_tb", |b| {
        b.iter(|| black_box(split_rbi_tb(black_box("341.000"), 4)))
    });
}

fn bench_pitching(c: &mut Criterion) {
    c.bench_function("split_pitching", |b| {
        b.iter(|| {
            for token in PITCHING {
                black_box(split_pitching(black_box(token)));
            }
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let search = DigitSearch::uniform(6, 1..=3).require(|p| p.iter().sum::<u32>() > 0);
    c.bench_function("digit_search_candidates", |b| {
        b.iter(|| black_box(search.candidates(black_box("123456789012")).len()))
    });
}

fn bench_football(c: &mut Criterion) {
    let mut text = String::from("Rushing gp att gain loss net avg td long avg/g\n");
    for n in 1..=60 {
        text.push_str(&format!("{} Runner, Number{} 10 {} 120 8 112 4.5 2 35 11.2\n", n, n, n + 10));
    }
    text.push_str("Receiving gp no. yds avg td long avg/g\n");
    for n in 1..=60 {
        text.push_str(&format!("{} Runner, Number{} 10 {} 300 12.0 3 60 30.0\n", n, n, n));
    }
    c.bench_function("football_parse_lines", |b| {
        b.iter(|| black_box(football::parse_lines(black_box(text.lines())).records.len()))
    });
}

criterion_group!(benches, bench_batting, bench_pitching, bench_search, bench_football);
criterion_main!(benches);
