#![allow(dead_code)]
use dtree::LabeledPoint;
use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) fn create_data(n_samples: usize, n_features: usize) -> Vec<LabeledPoint> {
    // reproducible seed
    let mut rng = StdRng::seed_from_u64(1903);

    let feature_distribution = Uniform::new(0.0, 1.0);
    let noise_distribution = Uniform::new(-0.25, 0.25);
    let weight_distribution = Uniform::new(-1.0, 1.0);

    // random hyperplane, the label is the side a noisy point falls on
    let weights: Vec<f64> = (0..n_features).map(|_| rng.sample(weight_distribution)).collect();

    (0..n_samples)
        .map(|_| {
            let x: Vec<f64> = (0..n_features).map(|_| rng.sample(feature_distribution)).collect();
            let linear: f64 = x.iter().zip(weights.iter()).map(|(x, w)| x * w).sum();
            let y = u8::from(linear + rng.sample(noise_distribution) > 0.0);
            LabeledPoint::new(x, y)
        })
        .collect()
}
