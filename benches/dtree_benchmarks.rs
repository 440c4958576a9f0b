use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dtree::data::to_column_major;
use dtree::splitter::{entropy, find_best_split};
use dtree::{DecisionTree, LabeledPoint, Matrix};
use std::time::Duration;

mod utils;

pub fn tree_benchmarks(c: &mut Criterion) {
    let data = utils::create_data(1000, 5);
    let subset: Vec<&LabeledPoint> = data.iter().collect();

    c.bench_function("entropy", |b| b.iter(|| entropy(black_box(&subset))));
    c.bench_function("find_best_split", |b| b.iter(|| find_best_split(black_box(&subset), black_box(5))));

    let mut tree_train = c.benchmark_group("train_tree");
    tree_train.warm_up_time(Duration::from_secs(5));
    tree_train.sample_size(20);
    tree_train.bench_function("Train Tree (min_size_datalist=1)", |b| {
        b.iter(|| DecisionTree::new(black_box(&data), black_box(1)))
    });
    tree_train.bench_function("Train Tree (min_size_datalist=20)", |b| {
        b.iter(|| DecisionTree::new(black_box(&data), black_box(20)))
    });
    tree_train.finish();

    let tree = DecisionTree::new(&data, 1).unwrap();
    let values = to_column_major(&data);
    let matrix = Matrix::new(&values, data.len(), 5);
    c.bench_function("Tree Predict (Single Threaded)", |b| {
        b.iter(|| tree.predict(black_box(&matrix), black_box(false)))
    });
    c.bench_function("Tree Predict (Multi Threaded)", |b| {
        b.iter(|| tree.predict(black_box(&matrix), black_box(true)))
    });
    c.bench_function("Check Performance", |b| b.iter(|| tree.check_performance(black_box(&data))));
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
