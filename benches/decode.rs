//! Benchmarks for decoding Triangle files.

use criterion::{criterion_group, criterion_main, Criterion};
use tridata::prelude::*;

/// Node, element and neighbor text for an `n × n` grid of quads split into
/// triangles, numbered from 1.
fn grid_sources(n: usize) -> MeshSources {
    let mut node = format!("{} 2 1 1\n", (n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            let id = j * (n + 1) + i + 1;
            let boundary = (i == 0 || j == 0 || i == n || j == n) as u8;
            node.push_str(&format!("{} {} {} {} {}\n", id, i, j, (i * j) as f64 * 0.5, boundary));
        }
    }

    let mut ele = format!("{} 3 0\n", n * n * 2);
    let mut neigh = format!("{} 3\n", n * n * 2);
    let mut t = 1;
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i + 1;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            ele.push_str(&format!("{} {} {} {}\n", t, v00, v10, v11));
            neigh.push_str(&format!("{} {} -1 -1\n", t, t + 1));
            ele.push_str(&format!("{} {} {} {}\n", t + 1, v00, v11, v01));
            neigh.push_str(&format!("{} {} -1 -1\n", t + 1, t));
            t += 2;
        }
    }

    MeshSources::new()
        .with(FileKind::Node, node)
        .with(FileKind::Ele, ele)
        .with(FileKind::Neigh, neigh)
}

fn bench_tokenize(c: &mut Criterion) {
    let sources = grid_sources(100);
    let node = sources.get(FileKind::Node).unwrap();

    c.bench_function("tokenize_node_100x100", |b| {
        b.iter(|| tridata::io::tokenizer::tokenize(node, '#').len());
    });
}

fn bench_loads(c: &mut Criterion) {
    let small = grid_sources(10);
    let large = grid_sources(100);

    c.bench_function("loads_grid_10x10", |b| {
        b.iter(|| loads(&small).unwrap());
    });

    c.bench_function("loads_grid_100x100", |b| {
        b.iter(|| loads(&large).unwrap());
    });
}

criterion_group!(benches, bench_tokenize, bench_loads);
criterion_main!(benches);
