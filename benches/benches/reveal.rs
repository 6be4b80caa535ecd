// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_reveal::{
    Extent, MalformedGeometry, MilestoneEvent, Snapshot, SourceElement, ViewportWindow,
    sink::from_fn,
};

const VIEWPORT: f64 = 800.0;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_f64(&mut self, upper: f64) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * upper
    }
}

/// A column layout: `n` elements stacked top to bottom with random heights,
/// every eighth one hidden (measured off-flow).
fn columns(n: u32, seed: u64) -> (Vec<SourceElement<u32>>, f64) {
    let mut rng = Lcg::new(seed);
    let mut y = 0.0;
    let mut out = Vec::with_capacity(n as usize);
    for key in 0..n {
        if key % 8 == 7 {
            out.push(SourceElement::new(key, Extent::new(0.0, 0.0)));
            continue;
        }
        let height = 20.0 + rng.gen_range_f64(400.0);
        out.push(SourceElement::new(key, Extent::new(y, y + height)));
        y += height;
    }
    (out, y)
}

fn bench_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_reveal");
    group.sample_size(50);

    for &n in &[256_u32, 4_096_u32, 65_536_u32] {
        group.bench_function(format!("build(n={n})"), |b| {
            b.iter_batched(
                || columns(n, 0x5C20_0000_0000_0001).0,
                |source| {
                    black_box(Snapshot::build(source, MalformedGeometry::Exclude));
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("sweep_to_end(n={n},step=40)"), |b| {
            let (source, total) = columns(n, 0x5C20_0000_0000_0002);
            b.iter_batched(
                || Snapshot::build(source.clone(), MalformedGeometry::Exclude),
                |mut snapshot| {
                    let mut count = 0_usize;
                    let mut sink = from_fn(|_: MilestoneEvent<u32>| count += 1);
                    let mut offset = 0.0;
                    while offset <= total {
                        snapshot.evaluate(ViewportWindow::new(offset, VIEWPORT), &mut sink);
                        offset += 40.0;
                    }
                    black_box(count);
                },
                BatchSize::LargeInput,
            );
        });

        // Every element already latched: measures the skip path.
        group.bench_function(format!("evaluate_completed(n={n})"), |b| {
            let (source, total) = columns(n, 0x5C20_0000_0000_0003);
            let mut snapshot = Snapshot::build(source, MalformedGeometry::Exclude);
            let mut events = Vec::new();
            snapshot.evaluate(ViewportWindow::new(total, VIEWPORT), &mut events);
            b.iter(|| {
                let latched =
                    snapshot.evaluate(ViewportWindow::new(black_box(total), VIEWPORT), &mut events);
                black_box(latched);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reveal);
criterion_main!(benches);
