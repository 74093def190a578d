// Host-side tests for parameter validation and scene construction.

use galaxy_core::{default_nebulae, GalaxyError, GalaxyParams, NebulaLayer, SimulationState};
use glam::{Mat4, Vec3};

#[test]
fn defaults_validate() {
    let params = GalaxyParams::default();
    assert_eq!(params.validate(), Ok(()));
    assert_eq!(params.star_count(), 5000);
    assert_eq!(params.nebulae.len(), 5);
    assert!(!params.tint_stars);
}

fn rejected(params: &GalaxyParams) -> &'static str {
    match params.validate() {
        Err(GalaxyError::InvalidParam { name, .. }) => name,
        other => panic!("expected InvalidParam, got {:?}", other),
    }
}

#[test]
fn invalid_params_are_named() {
    let mut p = GalaxyParams::default();
    p.spiral.radius = 0.0;
    assert_eq!(rejected(&p), "spiral.radius");

    let mut p = GalaxyParams::default();
    p.spiral.arms = 0;
    assert_eq!(rejected(&p), "spiral.arms");

    let mut p = GalaxyParams::default();
    p.core_segments = 2;
    assert_eq!(rejected(&p), "core_segments");

    let mut p = GalaxyParams::default();
    p.bloom.strength = f32::NAN;
    assert_eq!(rejected(&p), "bloom.strength");

    let mut p = GalaxyParams::default();
    p.nebulae[2].size = -1.0;
    assert_eq!(rejected(&p), "nebulae.size");
}

#[test]
fn star_size_follows_field_of_view() {
    let params = GalaxyParams::default();
    let size = params.star_world_size(75f32.to_radians());
    assert!((size - 7.673).abs() < 1e-3, "{}", size);
}

#[test]
fn nebula_stack_scales_with_radius() {
    let sizes: Vec<f32> = default_nebulae(800.0)
        .unwrap()
        .iter()
        .map(|n| n.size)
        .collect();
    let expected = [2560.0, 2240.0, 1600.0, 800.0, 400.0];
    for (got, want) in sizes.iter().zip(expected) {
        assert!((got - want).abs() < 1e-2, "{} vs {}", got, want);
    }
}

#[test]
fn nebula_planes_lie_flat_in_the_disk() {
    let config = default_nebulae(800.0).unwrap().remove(3);
    let mut layer = NebulaLayer::new(config);
    layer.rotation = 0.7;
    let corner = layer
        .model_matrix(Mat4::IDENTITY)
        .transform_point3(Vec3::new(0.5, 0.5, 0.0));
    assert!(corner.y.abs() < 1e-3);
    assert!((corner.length() - 800.0 * 0.5 * 2f32.sqrt()).abs() < 1e-2);
}

#[test]
fn scene_has_stock_counts() {
    let params = GalaxyParams::default();
    let state = SimulationState::new(&params, 42);
    assert_eq!(state.stars.len(), 5000);
    assert_eq!(state.markers.len(), 150);
    assert_eq!(state.nebulae.len(), 5);
    assert_eq!(state.frame, 0);
    assert_eq!(state.galaxy_rotation, 0.0);
    assert_eq!(state.group_matrix(), Mat4::IDENTITY);
    for m in &state.markers {
        assert!((0.5..1.0).contains(&m.speed), "speed {}", m.speed);
        assert_eq!(m.position, m.base_position);
        assert!(Vec3::new(m.position.x, 0.0, m.position.z).length() <= 800.0 + 1e-2);
    }
}

#[test]
fn seed_determines_the_whole_layout() {
    let params = GalaxyParams::default();
    let a = SimulationState::new(&params, 9);
    let b = SimulationState::new(&params, 9);
    let c = SimulationState::new(&params, 10);
    assert_eq!(a.stars, b.stars);
    assert_eq!(a.markers, b.markers);
    assert_ne!(a.markers, c.markers);
}

#[test]
fn every_colour_constant_parses() {
    use galaxy_core::constants::{CORE_COLOR, GALAXY_RADIUS, NEBULA_LAYERS, WORD_COLORS};
    use galaxy_core::Rgb;

    for (_, hex) in NEBULA_LAYERS {
        assert!(Rgb::from_hex(hex).is_ok(), "nebula colour {:?}", hex);
    }
    for hex in WORD_COLORS {
        assert!(Rgb::from_hex(hex).is_ok(), "word colour {:?}", hex);
    }
    let core = Rgb::from_hex(CORE_COLOR).unwrap();

    // defaults must carry the parsed values, not the fallbacks
    let params = GalaxyParams::default();
    assert_eq!(params.core_color, core);
    assert_eq!(params.nebulae, default_nebulae(GALAXY_RADIUS).unwrap());
    assert_eq!(params.nebulae.len(), NEBULA_LAYERS.len());
}
