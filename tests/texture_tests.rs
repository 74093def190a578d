// Host-side tests for procedural textures, the label atlas and core mesh.

use galaxy_core::constants::{
    HEART_TEXTURE_SIZE, LABEL_ATLAS_COLUMNS, LABEL_CELL_HEIGHT, LABEL_CELL_WIDTH,
};
use galaxy_core::{
    heart_texture, uv_sphere, BitmapFontRasterizer, GalaxyError, GalaxyParams, LabelAtlas,
    LabelRasterizer, Rgb, SimulationState, WordMarker,
};
use glam::Vec3;

fn alpha(img: &galaxy_core::RgbaImage, x: u32, y: u32) -> u8 {
    img.pixel(x, y)[3]
}

#[test]
fn heart_has_solid_centre_and_clear_corners() {
    let img = heart_texture(HEART_TEXTURE_SIZE);
    assert_eq!((img.width, img.height), (128, 128));
    assert_eq!(img.pixels.len(), 128 * 128 * 4);

    let [r, g, _, a] = img.pixel(64, 64);
    assert_eq!(a, 255);
    assert_eq!(r, 255);
    assert!((75..=82).contains(&g), "centre green {}", g);

    for (x, y) in [(0, 0), (127, 0), (0, 127), (127, 127)] {
        assert_eq!(alpha(&img, x, y), 0, "corner ({}, {})", x, y);
    }
}

#[test]
fn heart_is_drawn_tip_down() {
    let img = heart_texture(HEART_TEXTURE_SIZE);
    // notch between the lobes near the top
    assert_eq!(alpha(&img, 64, 41), 0);
    assert_eq!(alpha(&img, 45, 41), 255);
    assert_eq!(alpha(&img, 83, 41), 255);
    // tip near the bottom
    assert_eq!(alpha(&img, 64, 89), 255);
    assert_eq!(alpha(&img, 64, 90), 255);
    assert_eq!(alpha(&img, 64, 92), 0);
    assert_eq!(alpha(&img, 64, 94), 0);
}

#[test]
fn highlight_sits_on_one_side_only() {
    let img = heart_texture(HEART_TEXTURE_SIZE);
    let lit = img.pixel(82, 81);
    let plain = img.pixel(46, 81);
    assert_eq!(lit[3], 255);
    assert_eq!(plain[3], 255);
    assert!(lit[2] > 100, "highlight blue {}", lit[2]);
    assert!(plain[2] < 40, "mirror blue {}", plain[2]);
}

struct SolidRasterizer {
    calls: Vec<(String, [u8; 3])>,
}

impl LabelRasterizer for SolidRasterizer {
    fn rasterize(
        &mut self,
        text: &str,
        color: Rgb,
        width: u32,
        height: u32,
    ) -> galaxy_core::Result<Vec<u8>> {
        let [r, g, b] = color.to_bytes();
        self.calls.push((text.to_string(), [r, g, b]));
        Ok([r, g, b, 255].repeat((width * height) as usize))
    }
}

fn marker(phrase: usize, color: usize) -> WordMarker {
    WordMarker {
        phrase,
        color,
        base_position: Vec3::ZERO,
        speed: 0.5,
        position: Vec3::ZERO,
    }
}

#[test]
fn atlas_shares_cells_between_identical_labels() {
    let markers = [marker(0, 0), marker(1, 0), marker(0, 0), marker(0, 1)];
    let mut raster = SolidRasterizer { calls: Vec::new() };
    let atlas = LabelAtlas::build(&markers, 4, 2, 2, &mut raster).unwrap();

    assert_eq!(atlas.marker_cells, vec![0, 1, 0, 2]);
    assert_eq!(atlas.cell_count, 3);
    assert_eq!(raster.calls.len(), 3);
    assert_eq!(raster.calls[0].0, "Te Amo");
    assert_eq!((atlas.image.width, atlas.image.height), (8, 4));

    // cell 2 wraps to the second row; its colour differs from cell 0
    assert_eq!(atlas.uv_rect(2), [0.0, 0.5, 0.5, 1.0]);
    assert_eq!(atlas.image.pixel(0, 2)[..3], raster.calls[2].1);
    assert_eq!(atlas.image.pixel(0, 0)[..3], raster.calls[0].1);
    // the unused fourth cell stays transparent
    assert_eq!(atlas.image.pixel(6, 3), [0, 0, 0, 0]);
}

struct ShortRasterizer;

impl LabelRasterizer for ShortRasterizer {
    fn rasterize(&mut self, _: &str, _: Rgb, _: u32, _: u32) -> galaxy_core::Result<Vec<u8>> {
        Ok(vec![0; 3])
    }
}

#[test]
fn atlas_rejects_wrongly_sized_rasters() {
    let err = LabelAtlas::build(&[marker(0, 0)], 4, 2, 1, &mut ShortRasterizer).unwrap_err();
    assert_eq!(err, GalaxyError::LabelSize { expected: 32, got: 3 });
}

fn opaque_pixels(raster: &[u8]) -> usize {
    raster.chunks(4).filter(|p| p[3] == 255).count()
}

#[test]
fn bitmap_font_draws_centred_glyphs() {
    let mut font = BitmapFontRasterizer;
    let white = Rgb::WHITE;
    let blank = font.rasterize(" ", white, 64, 32).unwrap();
    assert_eq!(blank.len(), 64 * 32 * 4);
    assert_eq!(opaque_pixels(&blank), 0);

    let a = font.rasterize("A", white, 64, 32).unwrap();
    assert!(opaque_pixels(&a) > 0);
    assert!(a.chunks(4).all(|p| p[3] == 0 || p == [255, 255, 255, 255]));
    // nothing in the outer columns of a single centred glyph
    for y in 0..32 {
        assert_eq!(a[(y * 64) * 4 + 3], 0);
        assert_eq!(a[(y * 64 + 63) * 4 + 3], 0);
    }
}

#[test]
fn bitmap_font_covers_accents_and_falls_back() {
    let mut font = BitmapFontRasterizer;
    let pink = Rgb::from_hex("#FFD6E0").unwrap();
    for text in ["ñ", "é", "€"] {
        let raster = font.rasterize(text, pink, 48, 24).unwrap();
        assert!(opaque_pixels(&raster) > 0, "{:?} is blank", text);
    }
}

#[test]
fn default_scene_atlas_fits_every_marker() {
    let params = GalaxyParams::default();
    let state = SimulationState::new(&params, 11);
    let atlas = LabelAtlas::build(
        &state.markers,
        LABEL_CELL_WIDTH,
        LABEL_CELL_HEIGHT,
        LABEL_ATLAS_COLUMNS,
        &mut BitmapFontRasterizer,
    )
    .unwrap();

    assert_eq!(atlas.marker_cells.len(), state.markers.len());
    assert!(atlas.cell_count as usize <= state.markers.len());
    assert!(atlas.marker_cells.iter().all(|&c| c < atlas.cell_count));
    assert_eq!(atlas.image.width, LABEL_CELL_WIDTH * LABEL_ATLAS_COLUMNS);
    for cell in 0..atlas.cell_count {
        let [u0, v0, u1, v1] = atlas.uv_rect(cell);
        assert!(0.0 <= u0 && u0 < u1 && u1 <= 1.0);
        assert!(0.0 <= v0 && v0 < v1 && v1 <= 1.0);
    }
}

#[test]
fn core_sphere_matches_segment_counts() {
    let mesh = uv_sphere(45.0, 70, 70);
    assert_eq!(mesh.positions.len(), 71 * 71);
    assert_eq!(mesh.indices.len(), 6 * 70 * 69);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    for p in &mesh.positions {
        assert!((Vec3::from(*p).length() - 45.0).abs() < 1e-3);
    }
}
