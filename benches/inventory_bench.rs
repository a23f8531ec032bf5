//! Inventory scan and store snapshot performance benchmarks.

use consentnet::consent::{ConsentStore, MemoryStorage};
use consentnet::inventory::{parse_cookie_names, CookieInventory, CookieSource, MemoryCookieJar};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn seeded_jar() -> MemoryCookieJar {
    let jar = MemoryCookieJar::with_names(&["__cf_bm", "cf_clearance", "cf_ob_info", "__cfseq"]);
    for i in 0..40 {
        jar.set(&format!("unrelated_{i}"), "x");
    }
    jar
}

fn benchmark_parse(c: &mut Criterion) {
    let header = seeded_jar().cookie_header().unwrap();

    c.bench_function("parse_cookie_names", |b| {
        b.iter(|| parse_cookie_names(black_box(&header)))
    });
}

fn benchmark_detect(c: &mut Criterion) {
    let inv = CookieInventory::new(Box::new(seeded_jar()));

    c.bench_function("detect_known_cookies", |b| b.iter(|| inv.detect_known_cookies()));

    c.bench_function("summarize", |b| b.iter(|| inv.summarize()));
}

fn benchmark_store_reads(c: &mut Criterion) {
    let inv = CookieInventory::new(Box::new(seeded_jar()));
    let mut store = ConsentStore::new(Box::new(MemoryStorage::new()), inv);
    store.load();

    c.bench_function("store_snapshot", |b| b.iter(|| store.snapshot()));

    c.bench_function("banner_visibility", |b| b.iter(|| store.is_banner_visible()));
}

criterion_group!(benches, benchmark_parse, benchmark_detect, benchmark_store_reads);
criterion_main!(benches);
