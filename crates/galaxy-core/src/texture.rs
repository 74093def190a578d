//! Procedural heart sprite used for every star.
//!
//! The outline is two cubic Béziers flattened into a polygon. Coverage is
//! supersampled per pixel; the fill is a radial gradient clipped to the heart
//! and a translucent white highlight is composited on top without clipping.

use glam::Vec2;

/// Tightly packed RGBA8 image, row 0 at the top, straight (unpremultiplied) alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }
}

const SUPERSAMPLE: u32 = 4;
const CURVE_STEPS: usize = 48;
const HIGHLIGHT_ALPHA: f32 = 0.4;
const GRADIENT: [(f32, [u8; 3]); 3] = [
    (0.0, [0xFF, 0x4D, 0x4D]),
    (0.5, [0xFF, 0x99, 0x00]),
    (1.0, [0xFF, 0xFF, 0x33]),
];

fn cubic(p0: Vec2, c0: Vec2, c1: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c0 * (3.0 * u * u * t) + c1 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// Outline in the unrotated frame, where the lobes sit below the tip.
fn heart_outline(size: f32) -> Vec<Vec2> {
    let c = Vec2::splat(size / 2.0);
    let w = size * 0.7;
    let h = size * 0.65;
    let bottom = c + Vec2::new(0.0, h / 4.0);
    let top = c + Vec2::new(0.0, -h / 3.0);
    let left = [
        bottom,
        c + Vec2::new(-w / 2.0, h / 2.0),
        c + Vec2::new(-w / 1.6, -h / 4.0),
        top,
    ];
    let right = [
        top,
        c + Vec2::new(w / 1.6, -h / 4.0),
        c + Vec2::new(w / 2.0, h / 2.0),
        bottom,
    ];
    let mut poly = Vec::with_capacity(CURVE_STEPS * 2);
    for seg in [left, right] {
        for i in 0..CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            poly.push(cubic(seg[0], seg[1], seg[2], seg[3], t));
        }
    }
    poly
}

/// Even-odd point-in-polygon test.
fn contains(poly: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn gradient_at(t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    for pair in GRADIENT.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let k = (t - t0) / (t1 - t0);
            return [0, 1, 2].map(|i| c0[i] as f32 + (c1[i] as f32 - c0[i] as f32) * k);
        }
    }
    GRADIENT[GRADIENT.len() - 1].1.map(|c| c as f32)
}

/// Rasterise the heart sprite at `size × size`, rotated half a turn so the tip
/// points down in image space.
pub fn heart_texture(size: u32) -> RgbaImage {
    let s = size as f32;
    let centre = Vec2::splat(s / 2.0);
    let poly = heart_outline(s);
    let ellipse_centre = centre + Vec2::new(-s * 0.7 * 0.2, -s * 0.65 * 0.2);
    let ellipse_radii = Vec2::new(s * 0.7 * 0.15, s * 0.65 * 0.1);
    let samples = (SUPERSAMPLE * SUPERSAMPLE) as f32;

    let mut image = RgbaImage::new(size, size);
    for py in 0..size {
        for px in 0..size {
            let mut heart_hits = 0u32;
            let mut glint_hits = 0u32;
            for sy in 0..SUPERSAMPLE {
                for sx in 0..SUPERSAMPLE {
                    let sample = Vec2::new(
                        px as f32 + (sx as f32 + 0.5) / SUPERSAMPLE as f32,
                        py as f32 + (sy as f32 + 0.5) / SUPERSAMPLE as f32,
                    );
                    let p = Vec2::splat(s) - sample;
                    if contains(&poly, p) {
                        heart_hits += 1;
                    }
                    let e = (p - ellipse_centre) / ellipse_radii;
                    if e.length_squared() <= 1.0 {
                        glint_hits += 1;
                    }
                }
            }
            let heart_a = heart_hits as f32 / samples;
            let glint_a = glint_hits as f32 / samples * HIGHLIGHT_ALPHA;
            let out_a = glint_a + heart_a * (1.0 - glint_a);
            if out_a <= 0.0 {
                continue;
            }
            let pixel_centre = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
            let fill = gradient_at(pixel_centre.distance(centre) / (s / 2.0));
            let rgb = fill.map(|c| {
                (255.0 * glint_a + c * heart_a * (1.0 - glint_a)) / out_a
            });
            image.put(
                px,
                py,
                [
                    rgb[0].round().clamp(0.0, 255.0) as u8,
                    rgb[1].round().clamp(0.0, 255.0) as u8,
                    rgb[2].round().clamp(0.0, 255.0) as u8,
                    (out_a * 255.0).round() as u8,
                ],
            );
        }
    }
    image
}
