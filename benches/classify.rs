//! Benchmarks for classification and entity resolution.

use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use dinebot::config::NluConfig;
use dinebot::data::RestaurantData;
use dinebot::nlu::{MenuCorpus, ratio, resolve_faq, weighted_ratio};

const MESSAGES: [&str; 6] = [
    "Hi there!",
    "what time do you open",
    "do you have vegetarian options",
    "where is your branch",
    "I want something spicy",
    "zzzz qqqq xxxx kkkk jjjj",
];

fn bundled_data() -> RestaurantData {
    RestaurantData::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("data")).unwrap()
}

fn bench_scorers(c: &mut Criterion) {
    c.bench_function("ratio_short", |bench| {
        bench.iter(|| black_box(ratio(black_box("zinger burger"), black_box("zinger burgr"))))
    });
    c.bench_function("weighted_ratio_phrase", |bench| {
        bench.iter(|| {
            black_box(weighted_ratio(
                black_box("i want something spicy"),
                black_box("Hot & Spicy Zinger Burger"),
            ))
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let classifier = NluConfig::bundled().unwrap().classifier();
    c.bench_function("classify_6_messages", |bench| {
        bench.iter(|| {
            for message in MESSAGES {
                black_box(classifier.classify(black_box(message)));
            }
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let data = bundled_data();
    c.bench_function("menu_corpus_build", |bench| {
        bench.iter(|| black_box(MenuCorpus::build(&data.catalog).len()))
    });

    let corpus = MenuCorpus::build(&data.catalog);
    c.bench_function("menu_search", |bench| {
        bench.iter(|| black_box(corpus.search(black_box("I want something spicy"))))
    });
    c.bench_function("faq_search", |bench| {
        bench.iter(|| black_box(resolve_faq(black_box("is your meat halal"), &data.faqs)))
    });
}

criterion_group!(benches, bench_scorers, bench_classify, bench_resolve);
criterion_main!(benches);
