//! Performance benchmarks for organogram layout and projection
//!
//! Run with: `cargo bench -p organogram-core`
//!
//! These benchmarks measure the per-render path:
//! - Filter projection (search + status filters + grade sort)
//! - Full layout (positions, connectors, extent) of wide and deep charts
//! - Snapshot encode/decode of a large chart

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use organogram_core::db::{decode_snapshot, encode_snapshot};
use organogram_core::layout::{LayoutConfig, LayoutMode, OrgLayout};
use organogram_core::models::{DeptKey, Grade, NodeStatus, OrgFilters, PositionNode};
use organogram_core::services::project;

/// Build a balanced chart with `fanout` reports per position, `depth` levels deep
fn generate_chart(fanout: usize, depth: usize) -> PositionNode {
    fn build(prefix: String, fanout: usize, depth: usize, level: usize) -> PositionNode {
        let status = match level % 5 {
            3 => NodeStatus::Vacant,
            4 => NodeStatus::Separation,
            _ => NodeStatus::Active,
        };
        let mut node = PositionNode::new_with_id(prefix.clone(), status);
        node.name = Some(format!("Employee {}", prefix));
        node.designation = Some(format!("Role {}", level));
        node.department = Some(DeptKey::from("ops"));
        node.department_label = Some("Operations".to_string());
        node.grade = Grade::DESCENDING.get(level % 9).copied();

        if level < depth {
            node.children = (0..fanout)
                .map(|i| build(format!("{}-{}", prefix, i), fanout, depth, level + 1))
                .collect();
        }
        node
    }

    build("n".to_string(), fanout, depth, 0)
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let chart = generate_chart(4, 6);

    group.bench_function("default_filters", |b| {
        b.iter(|| black_box(project(&chart, &OrgFilters::default())));
    });

    group.bench_function("search_and_grade_sort", |b| {
        let filters = OrgFilters {
            search: "role 5".to_string(),
            show_vacant: false,
            grade_sort: true,
            ..Default::default()
        };
        b.iter(|| black_box(project(&chart, &filters)));
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();

    for (fanout, depth) in [(10, 3), (3, 7), (50, 1)] {
        let chart = generate_chart(fanout, depth);
        let label = format!("{}x{}", fanout, depth);

        for mode in [LayoutMode::Depth, LayoutMode::Grade] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), &label),
                &chart,
                |b, chart| {
                    b.iter(|| black_box(OrgLayout::compute(chart.clone(), mode, &config)));
                },
            );
        }
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    let chart = generate_chart(6, 4);
    let payload = encode_snapshot(&chart).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(encode_snapshot(&chart).unwrap()));
    });

    group.bench_function("decode", |b| {
        b.iter(|| black_box(decode_snapshot(&payload).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_layout, bench_snapshot);
criterion_main!(benches);
