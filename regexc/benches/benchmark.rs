use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regexc::tree::Definitions;
use regexc::{Dfa, EmitOptions};

const PATTERNS: &[&str] = &[
    "a",
    "ab",
    "a|b|c",
    "[a-z]+",
    "[a-z][a-z0-9_]*",
    "(ab|cd)*e",
    "[0-9]+\\.[0-9]+",
    "(a|b|c|d|e|f|g|h)*",
    "[^\\n]*",
    ".*",
];

fn parse_only(c: &mut Criterion) {
    let defs = Definitions::new();
    c.bench_function("parse", |b| {
        b.iter(|| {
            for pattern in PATTERNS {
                regexc::parser::parse(black_box(pattern), &defs).unwrap();
            }
        })
    });
}

fn determinize_only(c: &mut Criterion) {
    let defs = Definitions::new();
    let trees: Vec<_> = PATTERNS.iter().map(|p| regexc::parser::parse(p, &defs).unwrap()).collect();
    c.bench_function("determinize", |b| {
        b.iter(|| {
            for tree in &trees {
                Dfa::from_trees(black_box(std::slice::from_ref(tree))).unwrap();
            }
        })
    });
}

fn minimize_only(c: &mut Criterion) {
    let defs = Definitions::new();
    let dfas: Vec<Dfa> = PATTERNS
        .iter()
        .map(|p| Dfa::from_trees(&[regexc::parser::parse(p, &defs).unwrap()]).unwrap())
        .collect();
    c.bench_function("minimize", |b| {
        b.iter(|| {
            for dfa in &dfas {
                black_box(dfa.minimized());
            }
        })
    });
}

fn full_pipeline(c: &mut Criterion) {
    let defs = Definitions::new();
    let opts = EmitOptions::default();
    c.bench_function("compile_end_to_end", |b| {
        b.iter(|| {
            for pattern in PATTERNS {
                regexc::compile(black_box(pattern), &defs, &opts).unwrap();
            }
        })
    });
}

fn against_regex_crate(c: &mut Criterion) {
    let compiled: Vec<regex::Regex> = PATTERNS.iter().map(|p| regex::Regex::new(p).unwrap()).collect();
    c.bench_function("regex_crate_compile_for_comparison", |b| {
        b.iter(|| {
            for pattern in PATTERNS {
                black_box(regex::Regex::new(pattern).unwrap());
            }
        })
    });
    c.bench_function("regex_crate_match_for_comparison", |b| {
        b.iter(|| {
            for re in &compiled {
                black_box(re.is_match("aaabbbccc"));
            }
        })
    });
}

criterion_group!(benches, parse_only, determinize_only, minimize_only, full_pipeline, against_regex_crate);
criterion_main!(benches);
