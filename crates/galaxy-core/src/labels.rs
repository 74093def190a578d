//! Word label atlas.
//!
//! Each distinct `(phrase, colour)` pair gets one cell in a single RGBA
//! texture; markers refer to cells by index so the renderer can draw every
//! label from one bind group.

use crate::color::Rgb;
use crate::error::{GalaxyError, Result};
use crate::texture::RgbaImage;
use crate::words::WordMarker;
use fnv::FnvHashMap;
use font8x8::legacy::{BASIC_LEGACY, LATIN_LEGACY};

/// Draws one line of text, centred, into a transparent `width × height` RGBA cell.
pub trait LabelRasterizer {
    fn rasterize(&mut self, text: &str, color: Rgb, width: u32, height: u32) -> Result<Vec<u8>>;
}

#[derive(Clone, Debug)]
pub struct LabelAtlas {
    pub image: RgbaImage,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub cell_count: u32,
    /// Cell index for each marker, in marker order.
    pub marker_cells: Vec<u32>,
}

impl LabelAtlas {
    pub fn build<R: LabelRasterizer + ?Sized>(
        markers: &[WordMarker],
        cell_width: u32,
        cell_height: u32,
        columns: u32,
        rasterizer: &mut R,
    ) -> Result<Self> {
        let columns = columns.max(1);
        let mut cells: FnvHashMap<(usize, usize), u32> = FnvHashMap::default();
        let mut order: Vec<&WordMarker> = Vec::new();
        let marker_cells = markers
            .iter()
            .map(|m| {
                let next = cells.len() as u32;
                *cells.entry((m.phrase, m.color)).or_insert_with(|| {
                    order.push(m);
                    next
                })
            })
            .collect::<Vec<_>>();

        let cell_count = order.len() as u32;
        let rows = cell_count.div_ceil(columns).max(1);
        let mut image = RgbaImage::new(columns * cell_width, rows * cell_height);
        let expected = (cell_width * cell_height * 4) as usize;
        for (cell, marker) in order.iter().enumerate() {
            let color = Rgb::from_hex(marker.color_hex())?;
            let raster = rasterizer.rasterize(marker.text(), color, cell_width, cell_height)?;
            if raster.len() != expected {
                return Err(GalaxyError::LabelSize {
                    expected,
                    got: raster.len(),
                });
            }
            let x0 = (cell as u32 % columns) * cell_width;
            let y0 = (cell as u32 / columns) * cell_height;
            let row_bytes = (cell_width * 4) as usize;
            for y in 0..cell_height {
                let src = (y * cell_width * 4) as usize;
                let dst = (((y0 + y) * image.width + x0) * 4) as usize;
                image.pixels[dst..dst + row_bytes].copy_from_slice(&raster[src..src + row_bytes]);
            }
        }
        log::info!(
            "[labels] {} cells for {} markers, atlas {}x{}",
            cell_count,
            markers.len(),
            image.width,
            image.height
        );
        Ok(Self {
            image,
            cell_width,
            cell_height,
            columns,
            cell_count,
            marker_cells,
        })
    }

    /// `[u0, v0, u1, v1]` of `cell`, v growing downward.
    pub fn uv_rect(&self, cell: u32) -> [f32; 4] {
        let x0 = (cell % self.columns) * self.cell_width;
        let y0 = (cell / self.columns) * self.cell_height;
        let w = self.image.width as f32;
        let h = self.image.height as f32;
        [
            x0 as f32 / w,
            y0 as f32 / h,
            (x0 + self.cell_width) as f32 / w,
            (y0 + self.cell_height) as f32 / h,
        ]
    }
}

const GLYPH_SIZE: u32 = 8;
const MAX_GLYPH_SCALE: u32 = 6;

/// Host-independent rasterizer using the 8×8 public-domain bitmap font.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapFontRasterizer;

fn glyph_for_char(ch: char) -> [u8; 8] {
    let code = ch as usize;
    if code < BASIC_LEGACY.len() {
        BASIC_LEGACY[code]
    } else if (0xA0..0xA0 + LATIN_LEGACY.len()).contains(&code) {
        LATIN_LEGACY[code - 0xA0]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

impl LabelRasterizer for BitmapFontRasterizer {
    fn rasterize(&mut self, text: &str, color: Rgb, width: u32, height: u32) -> Result<Vec<u8>> {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        let chars = text.chars().count().max(1) as u32;
        let scale = (width / (chars * GLYPH_SIZE))
            .min(height / (GLYPH_SIZE * 2))
            .clamp(1, MAX_GLYPH_SCALE);
        let glyph_px = GLYPH_SIZE * scale;
        let text_w = chars * glyph_px;
        let x0 = width.saturating_sub(text_w) / 2;
        let y0 = height.saturating_sub(glyph_px) / 2;
        let [r, g, b] = color.to_bytes();

        for (col, ch) in text.chars().enumerate() {
            let glyph = glyph_for_char(ch);
            let gx = x0 + col as u32 * glyph_px;
            for (row, bits) in glyph.iter().enumerate() {
                for bit in 0..GLYPH_SIZE {
                    if (bits >> bit) & 0x01 == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        let y = y0 + row as u32 * scale + dy;
                        if y >= height {
                            continue;
                        }
                        for dx in 0..scale {
                            let x = gx + bit * scale + dx;
                            if x >= width {
                                continue;
                            }
                            let i = ((y * width + x) * 4) as usize;
                            pixels[i..i + 4].copy_from_slice(&[r, g, b, 255]);
                        }
                    }
                }
            }
        }
        Ok(pixels)
    }
}
