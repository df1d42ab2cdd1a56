use criterion::{Criterion, criterion_group, criterion_main};
use orgchart_core::builder::GraphBuilder;
use orgchart_core::config::DecomposeConfig;
use orgchart_core::decompose::Decomposition;
use orgchart_core::document::HierarchyDocument;
use orgchart_core::model::Hierarchy;
use orgchart_core::paths::enumerate_paths;
use orgchart_core::rank::RankStrategy;
use orgchart_core::source::{RawEntity, RawRelation, RawSubject};
use std::hint::black_box;

/// Layered hierarchy: each unit has one parent in the previous layer, and
/// every third unit a second one, so path counts grow with depth.
fn build_hierarchy(layers: usize, width: usize) -> Hierarchy {
    let mut doc = HierarchyDocument::default();
    for layer in 0..layers {
        for i in 0..width {
            let mut parents = Vec::new();
            if layer > 0 {
                parents.push(format!("u{}_{}", layer - 1, i));
                if i % 3 == 0 {
                    parents.push(format!("u{}_{}", layer - 1, (i + 1) % width));
                }
            }
            doc.unit.push(RawEntity {
                id: format!("u{}_{}", layer, i),
                parents,
            });
        }
    }
    doc.role.push(RawEntity {
        id: "member".to_string(),
        parents: Vec::new(),
    });
    for i in 0..width * 4 {
        doc.subjects.push(RawSubject {
            id: format!("s{}", i),
            uid: format!("uid-{}", i),
            relations: vec![RawRelation {
                unit: format!("u{}_{}", i % layers, i % width),
                role: "member".to_string(),
            }],
        });
    }

    GraphBuilder::default().build(&doc).unwrap()
}

fn bench_enumerate_paths(c: &mut Criterion) {
    let hierarchy = build_hierarchy(6, 30);

    c.bench_function("enumerate_paths_6x30", |b| {
        b.iter(|| enumerate_paths(black_box(&hierarchy)))
    });
}

fn bench_decompose_and_rank(c: &mut Criterion) {
    let hierarchy = build_hierarchy(6, 30);
    let config = DecomposeConfig::default();

    c.bench_function("decompose_rank_long_6x30", |b| {
        b.iter(|| {
            let mut d = Decomposition::new(black_box(&hierarchy), &config);
            d.rank(RankStrategy::Long).unwrap().len()
        })
    });
}

criterion_group!(benches, bench_enumerate_paths, bench_decompose_and_rank);
criterion_main!(benches);
