use criterion::{black_box, criterion_group, criterion_main, Criterion};
use routrie::Router;
use std::collections::HashMap;

fn build_router(routes: usize) -> Router<usize> {
    let table: HashMap<String, usize> = (0..routes)
        .map(|i| {
            let expr = format!(
                r#"Method("GET") && Path("/api/v{}/items/<string:name>")"#,
                i
            );
            (expr, i)
        })
        .collect();
    let router = Router::new();
    router.init(table).expect("routes compile");
    router
}

fn bench_merged_trie_matching(c: &mut Criterion) {
    for routes in [10, 100, 1000] {
        let router = build_router(routes);
        let hit = http::Request::builder()
            .method("GET")
            .uri(format!("/api/v{}/items/widget", routes / 2))
            .body(())
            .expect("request");
        c.bench_function(&format!("route_hit_{}_routes", routes), |b| {
            b.iter(|| black_box(router.route(&hit).expect("routes")))
        });
    }
}

fn bench_trie_miss(c: &mut Criterion) {
    let router = build_router(1000);
    let miss = http::Request::builder()
        .method("GET")
        .uri("/api/other/items/widget")
        .body(())
        .expect("request");
    c.bench_function("route_miss_1000_routes", |b| {
        b.iter(|| black_box(router.route(&miss).expect("routes")))
    });
}

fn bench_recompile(c: &mut Criterion) {
    c.bench_function("compile_100_routes", |b| {
        b.iter(|| black_box(build_router(100)))
    });
}

criterion_group!(
    benches,
    bench_merged_trie_matching,
    bench_trie_miss,
    bench_recompile
);
criterion_main!(benches);
