use criterion::{Criterion, criterion_group, criterion_main};
use vizepisode::{AssembleOptions, Episode, Visualizer};

fn synthetic_episode(epochs: usize, scenes_per_epoch: usize, cast: usize) -> String {
    let mut out = String::from("title: Synthetic\nscenes:\n");
    for e in 0..epochs {
        out.push_str(&format!("  - Day {e}:\n"));
        for s in 0..scenes_per_epoch {
            let characters: Vec<String> = (0..3)
                .map(|k| format!("Character {}", (e * 7 + s * 3 + k) % cast))
                .collect();
            out.push_str(&format!(
                "      - location: Room {s}\n        title: Scene {s} of day {e}, in which things happen\n        characters: [{}]\n",
                characters.join(", ")
            ));
        }
    }
    out
}

fn bench_pipeline(c: &mut Criterion) {
    let text = synthetic_episode(12, 8, 20);
    let visualizer = Visualizer::new();

    let mut group = c.benchmark_group("pipeline");
    group.bench_function("parse", |b| {
        b.iter(|| Episode::from_yaml_str(&text).unwrap());
    });

    let episode = Episode::from_yaml_str(&text).unwrap();
    group.bench_function("assemble", |b| {
        b.iter(|| vizepisode_dot::assemble(&episode, None, &AssembleOptions::default()).unwrap());
    });
    group.bench_function("translate_str", |b| {
        b.iter(|| visualizer.translate_str(&text).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
