//! Benchmarks for the expensive pipeline stages.
//!
//! Run with: cargo bench --package pipeline
//!
//! Vectorization is linear in corpus size; the similarity matrix is the
//! O(N²) stage that dominates real runs, so it gets its own benchmark.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dataset::Item;
use pipeline::similarity::compute_similarity;
use pipeline::vectorize::{VectorizerOptions, combine_blocks, fit_transform};
use pipeline::{Recommender, RecommenderConfig};

const GENRES: &[&str] = &[
    "Action", "Adventure", "Comedy", "Drama", "Fantasy", "Horror", "Mecha", "Music", "Mystery",
    "Romance", "Sci-Fi", "Slice of Life", "Sports", "Thriller",
];

const WORDS: &[&str] = &[
    "kingdom", "pilot", "school", "demon", "tournament", "guild", "idol", "space", "curse",
    "bakery", "sword", "ghost", "detective", "island", "empire", "robot", "band", "chef",
];

/// Deterministic synthetic catalog; no RNG so runs are comparable.
fn synthetic_items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            let genre_a = GENRES[i % GENRES.len()];
            let genre_b = GENRES[(i * 7 + 3) % GENRES.len()];
            let description = format!(
                "A {} meets a {} in the {} during the great {}.",
                WORDS[i % WORDS.len()],
                WORDS[(i * 5 + 1) % WORDS.len()],
                WORDS[(i * 11 + 2) % WORDS.len()],
                WORDS[(i * 13 + 4) % WORDS.len()],
            );
            Item::new(i as u32, format!("Series {i}"))
                .with_genres(&[genre_a, genre_b])
                .with_description(description)
        })
        .collect()
}

fn bench_vectorize(c: &mut Criterion) {
    let items = synthetic_items(2000);
    let soups: Vec<String> = items
        .iter()
        .map(|i| i.genres.join(" "))
        .collect();
    let soup_refs: Vec<&str> = soups.iter().map(String::as_str).collect();
    let options = VectorizerOptions::default().with_min_df(3).with_max_features(500);

    c.bench_function("fit_transform_2000_soups", |b| {
        b.iter(|| {
            let fit = fit_transform(black_box(&soup_refs), black_box(&options));
            black_box(fit)
        })
    });
}

fn bench_similarity(c: &mut Criterion) {
    let items = synthetic_items(2000);
    let soups: Vec<String> = items.iter().map(|i| i.genres.join(" ")).collect();
    let soup_refs: Vec<&str> = soups.iter().map(String::as_str).collect();
    let texts: Vec<String> = items
        .iter()
        .map(|i| i.description.clone().unwrap_or_default())
        .collect();
    let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();

    let meta = fit_transform(&soup_refs, &VectorizerOptions::default());
    let text = fit_transform(&text_refs, &VectorizerOptions::default().with_stop_words(true));
    let combined = combine_blocks(&meta.matrix, &text.matrix, 0.7, 0.3);

    c.bench_function("similarity_2000x2000", |b| {
        b.iter(|| {
            let sim = compute_similarity(black_box(&combined));
            black_box(sim)
        })
    });
}

fn bench_full_run(c: &mut Criterion) {
    let items = synthetic_items(1000);
    let config = RecommenderConfig::default()
        .with_meta_options(VectorizerOptions::default())
        .with_text_options(VectorizerOptions::default().with_stop_words(true));
    let recommender = Recommender::new(config).expect("valid config");

    c.bench_function("full_run_1000_items", |b| {
        b.iter(|| {
            let output = recommender.run(black_box(&items)).expect("run succeeds");
            black_box(output)
        })
    });
}

criterion_group!(benches, bench_vectorize, bench_similarity, bench_full_run);
criterion_main!(benches);
