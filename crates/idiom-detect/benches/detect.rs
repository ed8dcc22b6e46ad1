//! Benchmarks for detection throughput.
//!
//! Measures rule compilation, single-snippet detection over the built-in
//! catalog, and parallel batch detection.

#![allow(clippy::expect_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use idiom_catalog::{GlyphRegistry, PatternCatalog};
use idiom_core::DetectConfig;
use idiom_detect::Detector;

const SNIPPET: &str = r"
import { load } from './api';

export async function render(users) {
  const data = await load();
  const active = users.filter(u => u.active).map(u => u.name);
  const port = config.port ?? 8080;
  for (const name of active) {
    console.log(`hello ${name}`);
  }
  try {
    return Promise.all(active.map(n => fetch(n)));
  } catch (err) {
    throw new Error('failed');
  }
}
";

fn builtin_catalog() -> PatternCatalog {
    let glyphs = GlyphRegistry::builtin().expect("registry");
    PatternCatalog::builtin(&glyphs).expect("catalog")
}

/// Benchmarks compiling every built-in rule.
fn bench_compile_rules(c: &mut Criterion) {
    let catalog = builtin_catalog();
    let config = DetectConfig::default();

    c.bench_function("compile_builtin_rules", |b| {
        b.iter(|| Detector::new(black_box(&catalog), black_box(&config)));
    });
}

/// Benchmarks detection over one realistic snippet.
fn bench_detect_snippet(c: &mut Criterion) {
    let catalog = builtin_catalog();
    let detector = Detector::new(&catalog, &DetectConfig::default());

    c.bench_function("detect_snippet", |b| {
        b.iter(|| detector.detect(black_box(SNIPPET)));
    });
}

/// Benchmarks batch detection over 1k snippets.
fn bench_detect_batch(c: &mut Criterion) {
    let catalog = builtin_catalog();
    let detector = Detector::new(&catalog, &DetectConfig::default());
    let sources = vec![SNIPPET; 1_000];

    c.bench_function("detect_batch_1k", |b| {
        b.iter(|| detector.detect_batch(black_box(&sources)));
    });
}

criterion_group!(
    benches,
    bench_compile_rules,
    bench_detect_snippet,
    bench_detect_batch
);
criterion_main!(benches);
