// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_reorder::{
    Axis, ContainerAttributes, GeometryRegistry, PointerSample, ReorderConfig, ReorderController,
    ReorderEvent,
};

const ROW: f64 = 24.0;

fn registry(len: u32) -> GeometryRegistry<u32> {
    let mut registry = GeometryRegistry::new(Axis::Vertical);
    for i in 0..len {
        let y = f64::from(i) * ROW;
        registry.register(i, Rect::new(0.0, y, 320.0, y + ROW));
    }
    registry
}

fn bench_index_for_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/index_for_point");

    // Slot lookup is a linear scan over registered midpoints.
    for len in [16_u32, 128, 1_024, 8_192] {
        let registry = registry(len);
        let extent = f64::from(len) * ROW;
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::from_parameter(len), &registry, |b, registry| {
            let mut y = 0.0;
            b.iter(|| {
                y = (y + 7.3) % extent;
                black_box(registry.index_for_point(Point::new(10.0, y)))
            });
        });
    }

    group.finish();
}

fn bench_drag_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/drag_pipeline");

    // One pointer sample plus one frame tick while autoscrolling.
    for len in [16_u32, 128, 1_024] {
        let extent = f64::from(len) * ROW;
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            let mut stack = ReorderController::new(ReorderConfig::default());
            for i in 0..len {
                let y = f64::from(i) * ROW;
                stack.on_bounds_changed(i, Rect::new(0.0, y, 320.0, y + ROW));
            }
            let mut container = ContainerAttributes::new(
                Size::new(320.0, 480.0),
                Size::new(320.0, extent),
                Vec2::ZERO,
            );
            stack.set_container(container);
            stack.pointer_down(0, PointerSample::container(Point::new(10.0, 5.0), Vec2::ZERO));

            b.iter(|| {
                let sample = PointerSample::container(Point::new(10.0, 470.0), container.offset);
                black_box(stack.pointer_move(sample));
                for event in stack.tick(1.0 / 120.0) {
                    if let ReorderEvent::ScrollTo(offset) = event {
                        container.offset = offset;
                    }
                }
                if container.offset.y >= extent - 480.0 {
                    container.offset = Vec2::ZERO;
                    stack.set_container(container);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_for_point, bench_drag_pipeline);
criterion_main!(benches);
