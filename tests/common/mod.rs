#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raymath::{Matrix33, Matrix44, Vector2, Vector3, Vector4};

/// Tolerance for results that went through a handful of float operations
pub const TOLERANCE: f32 = 1e-4;

pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fixed seed so failures are reproducible
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

pub fn assert_approx_slice(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            approx_eq(*a, *e),
            "component {i}: expected {e}, got {a} ({actual:?} vs {expected:?})"
        );
    }
}

fn component(rng: &mut StdRng) -> f32 {
    rng.random_range(-10.0..10.0)
}

/// Matrix elements stay small so chained products keep their precision
fn element(rng: &mut StdRng) -> f32 {
    rng.random_range(-1.0..1.0)
}

pub fn random_vector2(rng: &mut StdRng) -> Vector2 {
    Vector2::new(component(rng), component(rng))
}

pub fn random_vector3(rng: &mut StdRng) -> Vector3 {
    Vector3::new(component(rng), component(rng), component(rng))
}

pub fn random_vector4(rng: &mut StdRng) -> Vector4 {
    Vector4::new(component(rng), component(rng), component(rng), component(rng))
}

pub fn random_matrix33(rng: &mut StdRng) -> Matrix33 {
    let mut m = Matrix33::ZERO;
    for row in m.m.iter_mut() {
        for cell in row.iter_mut() {
            *cell = element(rng);
        }
    }
    m
}

pub fn random_matrix44(rng: &mut StdRng) -> Matrix44 {
    let mut m = Matrix44::ZERO;
    for row in m.m.iter_mut() {
        for cell in row.iter_mut() {
            *cell = element(rng);
        }
    }
    m
}
