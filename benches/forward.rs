use criterion::{Criterion, black_box, criterion_group, criterion_main};

use letter_mlp::{Dataset, Matrix, NetworkBuilder};

fn letter_like_dataset(m: usize) -> Dataset {
    // 16 features per example, as in the UCI letter-recognition set.
    let x = Matrix::from_fn(m, 16, |r, c| ((r * 7 + c * 3) % 16) as f32 / 15.0);
    let y = (0..m).map(|r| (r % 26) as u32 + 1).collect();
    Dataset::from_parts(y, x).unwrap()
}

fn forward_pass_bench(c: &mut Criterion) {
    let net = NetworkBuilder::new()
        .build_with_seed(letter_like_dataset(2_000), 0)
        .unwrap();

    c.bench_function("forward_pass_2000x16_25_26", |b| {
        b.iter(|| {
            let pass = net.forward_pass().unwrap();
            black_box(pass);
        })
    });
}

criterion_group!(benches, forward_pass_bench);
criterion_main!(benches);
