//! Layout benchmark: weighted allocation and full-tree remodel.
//!
//! Target: < 50µs to remodel a 100-widget dashboard

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridloom::canvas::Canvas;
use gridloom::layout::{allocate, LayoutSlot};
use gridloom::widget::{AxisLayout, Frame, Label, ProgressBar, WidgetTree};

fn slots(count: u32) -> Vec<LayoutSlot> {
    (0..count)
        .map(|i| {
            LayoutSlot::new()
                .with_weight(50 + (i * 37) % 200)
                .with_min(u16::try_from(1 + i % 4).unwrap_or(1))
        })
        .collect()
}

fn allocate_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");
    for count in [4u32, 16, 64] {
        let slots = slots(count);
        group.bench_with_input(BenchmarkId::new("slots", count), &slots, |b, slots| {
            b.iter(|| black_box(allocate(black_box(slots), 120)));
        });
    }
    group.finish();
}

fn allocate_with_drops(c: &mut Criterion) {
    // minimums sum well past the total, so most of the slots are dropped
    let slots: Vec<LayoutSlot> = (0..32u32)
        .map(|i| LayoutSlot::new().with_weight(1 + i).with_min(10))
        .collect();
    c.bench_function("allocate_32_overcommitted", |b| {
        b.iter(|| black_box(allocate(black_box(&slots), 80)));
    });
}

/// Ten rows of framed label + progress bar columns.
fn dashboard() -> (WidgetTree, gridloom::WidgetId) {
    let mut tree = WidgetTree::new();
    let mut rows = AxisLayout::column();
    for r in 0..10 {
        let mut row = AxisLayout::row();
        for c in 0..4 {
            let label = tree.insert(Label::new(format!("cell {r}.{c}")));
            let bar = tree.insert(ProgressBar::new());
            let column = tree.insert(AxisLayout::column().with_child(label).with_child(bar));
            let framed = tree.insert(Frame::new(format!("#{c}"), column));
            row.push(framed, 100);
        }
        let row = tree.insert(row);
        rows.push(row, 100);
    }
    let root = tree.insert(rows);
    tree.set_root(root);
    (tree, root)
}

fn remodel_dashboard(c: &mut Criterion) {
    let (mut tree, root) = dashboard();
    c.bench_function("remodel_dashboard_160x50", |b| {
        b.iter(|| tree.remodel(root, black_box(Canvas::root(160, 50))));
    });
}

criterion_group!(benches, allocate_slots, allocate_with_drops, remodel_dashboard);
criterion_main!(benches);
