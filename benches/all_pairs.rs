use criterion::{criterion_group, criterion_main, Criterion};
use layerclip::algorithms::intersect_all_pairs;
use layerclip::data::{Layer, Point, Polygon, Vector};
use layerclip::render::{Recorder, Scene};
use layerclip::Transform;

use rand::Rng;

fn random_layer<R: Rng>(n: usize, rng: &mut R) -> Layer {
  let t = Transform::uniform_scale(400.0);
  (0..n)
    .map(|_| Polygon::new_unchecked((0..3).map(|_| &t * &rng.gen::<Point<f64, 2>>()).collect()))
    .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let scene = Scene::new();
  c.bench_function("Scene::frame", |b| {
    b.iter(|| scene.frame(&Vector([25.0, -40.0])))
  });
  c.bench_function("Scene::draw", |b| {
    let mut surface = Recorder::new(400.0, 400.0);
    b.iter(|| {
      surface.take_calls();
      scene.draw(&mut surface, &Vector([25.0, -40.0]))
    })
  });

  let mut rng = rand::thread_rng();
  let layers: Vec<Layer> = (0..3).map(|_| random_layer(10, &mut rng)).collect();
  c.bench_function("intersect_all_pairs(3 x 10)", |b| {
    b.iter(|| intersect_all_pairs(&layers))
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
