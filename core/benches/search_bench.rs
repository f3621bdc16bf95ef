use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{DocumentStatus, SearchServer};

const WORDS: &[&str] = &[
    "cat", "dog", "fluffy", "tail", "collar", "starling", "groomed", "eyes", "white", "big", "small", "fancy",
];

fn build_server(documents: usize) -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("and in on with").unwrap();
    for id in 0..documents {
        let text: Vec<&str> = (0..8).map(|i| WORDS[(id * 7 + i * 3) % WORDS.len()]).collect();
        server.add_document(id as i32, &text.join(" and "), DocumentStatus::Actual, &[(id % 10) as i32]).unwrap();
    }
    server
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = build_server(10_000);
    c.bench_function("find_top_documents_10k", |b| b.iter(|| server.find_top_documents("fluffy groomed cat -collar")));
}

fn bench_add_document(c: &mut Criterion) {
    c.bench_function("build_index_1k", |b| b.iter(|| build_server(1_000)));
}

criterion_group!(benches, bench_find_top_documents, bench_add_document);
criterion_main!(benches);
