//! Cost of drawing both players' question sets from pools of various sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quiz_duel::bank::{Question, QuestionBank};
use quiz_duel::core::GameRng;

fn bench_draw_sets(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_sets");

    for pool_size in [20usize, 200, 2_000] {
        let pool: Vec<Question> = (0..pool_size)
            .map(|i| Question::new(format!("Question {i}"), ["a", "b", "c", "d"], i % 4))
            .collect();
        let bank = QuestionBank::load(&pool).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(pool_size), &bank, |b, bank| {
            let mut rng = GameRng::new(42);
            b.iter(|| bank.draw_sets(black_box(10), &mut rng).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_draw_sets);
criterion_main!(benches);
