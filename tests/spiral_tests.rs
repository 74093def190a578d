// Host-side tests for spiral placement.

use galaxy_core::{generate_stars, place, Rgb, SpiralDraw, SpiralParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

fn params(radius: f32, arms: u32) -> SpiralParams {
    SpiralParams {
        radius,
        arms,
        ..SpiralParams::default()
    }
}

fn draw(radial: f32, jitter: f32, height: f32) -> SpiralDraw {
    SpiralDraw {
        radial,
        jitter,
        height,
    }
}

#[test]
fn placements_stay_within_radius_and_hue_span() {
    let mut rng = StdRng::seed_from_u64(1);
    for (radius, arms) in [(1.0, 1), (800.0, 5), (2500.0, 3), (0.25, 12)] {
        let p = params(radius, arms);
        for _ in 0..2000 {
            let arm = rng.gen_range(0..arms);
            let pt = place(&p, arm, SpiralDraw::sample(&mut rng));
            assert!(pt.distance >= 0.0 && pt.distance <= radius);
            assert!(pt.hue >= 0.0 && pt.hue <= 0.8 + 1e-6, "hue {}", pt.hue);
            let xz = (pt.position.x * pt.position.x + pt.position.z * pt.position.z).sqrt();
            assert!(xz <= radius * (1.0 + 1e-5), "xz {} > {}", xz, radius);
        }
    }
}

#[test]
fn median_radius_is_near_inverse_sqrt_two() {
    let mut rng = StdRng::seed_from_u64(2);
    let p = params(800.0, 5);
    let mut ratios: Vec<f32> = (0..20_000)
        .map(|i| place(&p, i % 5, SpiralDraw::sample(&mut rng)).distance / 800.0)
        .collect();
    ratios.sort_by(|a, b| a.total_cmp(b));
    let median = ratios[ratios.len() / 2];
    assert!(
        (median - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.02,
        "median {}",
        median
    );
}

#[test]
fn identical_draws_give_identical_points() {
    let p = SpiralParams::default();
    let d = draw(0.37, 0.81, 0.12);
    let a = place(&p, 3, d);
    let b = place(&p, 3, d);
    assert_eq!(a, b);
}

#[test]
fn centre_draw_has_zero_hue_and_red_colour() {
    let pt = place(
        &SpiralParams::default(),
        2,
        SpiralDraw {
            radial: 0.0,
            jitter: 0.0,
            height: 0.5,
        },
    );
    assert_eq!(pt.distance, 0.0);
    assert_eq!(pt.hue, 0.0);
    assert!(pt.position.length() < 1e-6);
    let expected = Rgb::new(1.0, 0.2, 0.2);
    assert!((pt.color.r - expected.r).abs() < 1e-6);
    assert!((pt.color.g - expected.g).abs() < 1e-6);
    assert!((pt.color.b - expected.b).abs() < 1e-6);
}

#[test]
fn height_spans_disk_thickness() {
    let p = SpiralParams::default();
    let low = place(&p, 0, draw(0.5, 0.5, 0.0));
    let high = place(&p, 0, draw(0.5, 0.5, 1.0));
    assert!((low.position.y + 25.0).abs() < 1e-5);
    assert!((high.position.y - 25.0).abs() < 1e-5);
}

#[test]
fn full_radial_draw_reaches_rim_with_max_hue() {
    let pt = place(
        &SpiralParams::default(),
        0,
        SpiralDraw {
            radial: 1.0,
            jitter: 0.0,
            height: 0.5,
        },
    );
    assert!((pt.distance - 800.0).abs() < 1e-3);
    assert!((pt.hue - 0.8).abs() < 1e-6);
    // angle = 800 * 0.05 for arm 0 with no jitter
    assert!((pt.angle - 40.0).abs() < 1e-3);
}

#[test]
fn default_galaxy_has_five_thousand_points_in_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let stars = generate_stars(&SpiralParams::default(), 1000, &mut rng);
    assert_eq!(stars.len(), 5000);
    for s in &stars {
        let xz = (s.position.x * s.position.x + s.position.z * s.position.z).sqrt();
        assert!(xz <= 800.0 * (1.0 + 1e-5));
        assert!(s.position.y.abs() <= 25.0);
    }
}

#[test]
fn stars_are_generated_arm_major() {
    let p = SpiralParams {
        winding: 0.0,
        arm_jitter: 0.0,
        ..SpiralParams::default()
    };
    let mut rng = StdRng::seed_from_u64(4);
    let stars = generate_stars(&p, 10, &mut rng);
    assert_eq!(stars.len(), 50);
    for (i, s) in stars.iter().enumerate() {
        let arm = (i / 10) as f32;
        assert!((s.angle - arm * TAU / 5.0).abs() < 1e-5, "star {} angle {}", i, s.angle);
    }
}

#[test]
fn same_seed_reproduces_layout() {
    let p = SpiralParams::default();
    let a = generate_stars(&p, 200, &mut StdRng::seed_from_u64(9));
    let b = generate_stars(&p, 200, &mut StdRng::seed_from_u64(9));
    let c = generate_stars(&p, 200, &mut StdRng::seed_from_u64(10));
    assert_eq!(a, b);
    assert_ne!(a, c);
}
