//! Codec property tests: round-trip bound, truncation, padding, persistence,
//! registry partition, identity recipes, pipeline equivalence and
//! out-of-range handling.

use bytestate_core::{
    apply, layers_in, ByteUnit, Category, CodecError, FidelityReport, FixedState, LinearCodec,
    Orchestrator, Transform, NUM_LAYERS,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Box-Muller standard normal sample scaled by `sigma`.
fn normal(rng: &mut ChaCha8Rng, sigma: f32) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen_range(0.0..1.0);
    sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

fn random_vector(rng: &mut ChaCha8Rng, sigma: f32) -> Vec<f32> {
    (0..NUM_LAYERS).map(|_| normal(rng, sigma)).collect()
}

fn roundtrip_over_random_vectors(seed: u64, sigma: f32) -> FidelityReport {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total = FidelityReport::aggregate(
        (0..1000).map(|_| LinearCodec::measure_fidelity(&random_vector(&mut rng, sigma))),
    );
    println!("1000 vectors, seed={} sigma={}: {}", seed, sigma, total.summary());
    assert_eq!(total.compared, 1000 * NUM_LAYERS);
    total
}

#[test]
fn roundtrip_bound_over_random_vectors() {
    let total = roundtrip_over_random_vectors(42, 0.5);
    assert!(
        total.mean_error < 0.01,
        "average mean error {:.6} exceeds 0.01",
        total.mean_error
    );
}

#[test]
fn roundtrip_bound_over_unit_normal_vectors() {
    for seed in [1, 42, 99] {
        let total = roundtrip_over_random_vectors(seed, 1.0);
        assert!(
            total.mean_error < 0.01,
            "seed {}: average mean error {:.6} exceeds 0.01",
            seed,
            total.mean_error
        );
    }
}

#[test]
fn truncation_ignores_extra_features() {
    let twenty = [0.1f32; 20];
    let sixteen = [0.1f32; 16];
    assert_eq!(LinearCodec::encode(&twenty), LinearCodec::encode(&sixteen));

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut tail = twenty;
    for x in tail[16..].iter_mut() {
        *x = normal(&mut rng, 5.0);
    }
    assert_eq!(LinearCodec::encode(&tail), LinearCodec::encode(&sixteen));
}

#[test]
fn padding_keeps_vacuum_slots() {
    let state = LinearCodec::encode(&[0.5, -0.5]);
    let vacuum = FixedState::vacuum();
    for i in 2..NUM_LAYERS {
        assert_eq!(state.get_layer(i), vacuum.get_layer(i));
    }

    let decoded = LinearCodec::decode(&state);
    let expected = libm::atanhf(-LinearCodec::DEFAULT_CLIP);
    assert!((expected - (-3.800_207_6)).abs() < 1e-5);
    for (i, &value) in decoded.iter().enumerate().skip(2) {
        assert_eq!(value, expected, "slot {} decoded to {}", i, value);
    }
}

#[test]
fn updates_are_persistent() {
    let s1 = FixedState::vacuum();
    let s2 = s1.with_layer(3, ByteUnit::from_raw(200)).unwrap();
    assert_eq!(s1.get_layer(3).unwrap().to_raw(), 0);
    assert_eq!(s2.get_layer(3).unwrap().to_raw(), 200);

    let s3 = s2.with_layer(3, ByteUnit::from_raw(7)).unwrap();
    assert_eq!(s2.get_layer(3).unwrap().to_raw(), 200);
    assert_eq!(s3.get_layer(3).unwrap().to_raw(), 7);
}

#[test]
fn registry_partition() {
    assert_eq!(layers_in(Category::Perception).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);

    let mut all: Vec<usize> = Category::ALL.into_iter().flat_map(layers_in).collect();
    let before = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(before, all.len(), "categories overlap");
    assert_eq!(all, (0..NUM_LAYERS).collect::<Vec<_>>());
}

#[test]
fn identity_recipe_is_bit_exact() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..100 {
        let bytes: [u8; 16] = rng.gen();
        let state = FixedState::from_bytes(bytes);
        let steps: Vec<(usize, Transform)> = (0..5).map(|i| (i, Transform::Identity)).collect();
        let out = apply(state, &steps);
        assert_eq!(out.to_bytes()[..5], bytes[..5]);
        assert_eq!(out, state);
    }
}

#[test]
fn pure_orchestrator_equals_codec() {
    let orch = Orchestrator::new("pure");
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for len in [0, 1, 5, 16, 24] {
        let features: Vec<f32> = (0..len).map(|_| normal(&mut rng, 2.0)).collect();
        assert_eq!(orch.encode(&features), LinearCodec::encode(&features));
    }
}

#[test]
fn out_of_range_handling() {
    let state = LinearCodec::encode(&[0.3; 16]);
    assert_eq!(state.get_layer(16), Err(CodecError::IndexOutOfRange { index: 16 }));
    assert_eq!(
        state.with_layer(16, ByteUnit::MAX),
        Err(CodecError::IndexOutOfRange { index: 16 })
    );

    let out = apply(
        state,
        &[(16, Transform::Identity), (2, Transform::Power(2)), (17, Transform::Power(3))],
    );
    let expected = state
        .with_layer(2, state.get_layer(2).unwrap().power(2))
        .unwrap();
    assert_eq!(out, expected);
}

#[test]
fn states_are_shareable_across_threads() {
    let state = LinearCodec::encode(&[0.25; 16]);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let decoded = LinearCodec::decode(&state);
                (state.get_layer(i).unwrap(), decoded[i])
            })
        })
        .collect();
    for handle in handles {
        let (unit, value) = handle.join().unwrap();
        assert_eq!(unit, state.get_layer(0).unwrap());
        assert!((value - 0.25).abs() < 0.01);
    }
}
