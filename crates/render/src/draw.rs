//! Minimal raster primitives over an RGBA buffer.
//!
//! Coordinates are signed so that shapes may hang off any edge; everything
//! outside the buffer is clipped.

use font8x8::UnicodeFonts;
use image::{Rgba, RgbaImage};

const GLYPH_SIZE: u32 = 8;

/// Source-over blend of `src` onto `dst`, in 8-bit integer math.
///
/// Color channels assume an opaque destination, which is all this crate draws onto.
pub fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    let inv_sa = 255 - sa;
    let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv_sa + 127) / 255) as u8;
    *dst = Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (sa + (dst[3] as u32 * inv_sa + 127) / 255).min(255) as u8,
    ]);
}

fn blend_at(img: &mut RgbaImage, x: i64, y: i64, c: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    blend_pixel(img.get_pixel_mut(x as u32, y as u32), c);
}

/// Overwrite every pixel with `c`.
pub fn fill(img: &mut RgbaImage, c: Rgba<u8>) {
    for px in img.pixels_mut() {
        *px = c;
    }
}

/// One pixel wide line from `(x0, y0)` to `(x1, y1)`, both ends inclusive.
///
/// Steps along the major axis so each touched pixel is blended exactly once.
pub fn draw_line(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, c: Rgba<u8>) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        blend_at(img, x0, y0, c);
        return;
    }
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = x0 as f64 + t * dx as f64;
        let y = y0 as f64 + t * dy as f64;
        blend_at(img, x.round() as i64, y.round() as i64, c);
    }
}

/// A single line of text laid out with the built-in 8x8 bitmap font.
#[derive(Debug, Clone)]
pub struct TextLayout {
    glyphs: Vec<[u8; 8]>,
    scale: u32,
}

impl TextLayout {
    pub fn new(text: &str, scale: u32) -> Self {
        let glyphs = text.chars().filter_map(glyph).collect();
        Self {
            glyphs,
            scale: scale.max(1),
        }
    }

    pub fn width(&self) -> i64 {
        self.glyphs.len() as i64 * (GLYPH_SIZE * self.scale) as i64
    }

    pub fn height(&self) -> i64 {
        if self.glyphs.is_empty() {
            0
        } else {
            (GLYPH_SIZE * self.scale) as i64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Top-left corner that puts the text's own center on `(cx, cy)`.
    pub fn anchor_center(&self, cx: i64, cy: i64) -> (i64, i64) {
        (cx - self.width() / 2, cy - self.height() / 2)
    }

    /// Calls `f` once for every lit pixel when the text's top-left is `(x0, y0)`.
    pub fn for_each_pixel(&self, x0: i64, y0: i64, mut f: impl FnMut(i64, i64)) {
        let s = self.scale as i64;
        let advance = GLYPH_SIZE as i64 * s;
        for (i, rows) in self.glyphs.iter().enumerate() {
            let gx = x0 + i as i64 * advance;
            for (row, bits) in rows.iter().copied().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    // Bit 0 is the leftmost column.
                    let px = gx + col as i64 * s;
                    let py = y0 + row as i64 * s;
                    for yy in py..py + s {
                        for xx in px..px + s {
                            f(xx, yy);
                        }
                    }
                }
            }
        }
    }
}

fn glyph(ch: char) -> Option<[u8; 8]> {
    font8x8::BASIC_FONTS
        .get(ch)
        .or_else(|| font8x8::LATIN_FONTS.get(ch))
        .or_else(|| font8x8::BASIC_FONTS.get('?'))
}

/// Draw `text` filled with `c`, top-left at `(x0, y0)`.
pub fn draw_text(img: &mut RgbaImage, text: &TextLayout, x0: i64, y0: i64, c: Rgba<u8>) {
    text.for_each_pixel(x0, y0, |x, y| blend_at(img, x, y, c));
}

/// Draw the silhouette of `text` dilated by `radius` pixels in every direction.
///
/// Equivalent to drawing the text at each offset in `[-radius, radius]^2`,
/// except each covered pixel is blended once, so a translucent color keeps
/// its alpha instead of stacking up where offsets overlap.
pub fn draw_text_outline(
    img: &mut RgbaImage,
    text: &TextLayout,
    x0: i64,
    y0: i64,
    radius: u32,
    c: Rgba<u8>,
) {
    if text.is_empty() {
        return;
    }
    let r = radius as i64;

    // Coverage mask over the text box grown by the radius, clipped to the image.
    let left = (x0 - r).max(0);
    let top = (y0 - r).max(0);
    let right = (x0 + text.width() + r).min(img.width() as i64);
    let bottom = (y0 + text.height() + r).min(img.height() as i64);
    if left >= right || top >= bottom {
        return;
    }
    let mw = (right - left) as usize;
    let mh = (bottom - top) as usize;
    let mut mask = vec![false; mw * mh];

    text.for_each_pixel(x0, y0, |x, y| {
        for yy in (y - r).max(top)..(y + r + 1).min(bottom) {
            let row = (yy - top) as usize * mw;
            for xx in (x - r).max(left)..(x + r + 1).min(right) {
                mask[row + (xx - left) as usize] = true;
            }
        }
    });

    for (i, covered) in mask.iter().enumerate() {
        if *covered {
            let x = left + (i % mw) as i64;
            let y = top + (i / mw) as i64;
            blend_at(img, x, y, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_opaque_replaces() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend_pixel(&mut dst, Rgba([200, 100, 50, 255]));
        assert_eq!(dst, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn blend_translucent_mixes() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend_pixel(&mut dst, Rgba([255, 255, 255, 179]));
        assert_eq!(dst, Rgba([179, 179, 179, 255]));
    }

    #[test]
    fn blend_keeps_opaque_destination_opaque() {
        let mut dst = Rgba([255, 0, 0, 255]);
        blend_pixel(&mut dst, Rgba([255, 255, 255, 179]));
        assert_eq!(dst, Rgba([255, 179, 179, 255]));

        let mut dst = Rgba([255, 255, 255, 255]);
        blend_pixel(&mut dst, Rgba([0, 0, 0, 179]));
        assert_eq!(dst, Rgba([76, 76, 76, 255]));
    }

    #[test]
    fn blend_transparent_is_noop() {
        let mut dst = Rgba([1, 2, 3, 4]);
        blend_pixel(&mut dst, Rgba([255, 255, 255, 0]));
        assert_eq!(dst, Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn line_hits_both_ends_and_clips() {
        let mut img = RgbaImage::from_pixel(10, 5, Rgba([0, 0, 0, 255]));
        let white = Rgba([255, 255, 255, 255]);
        draw_line(&mut img, -5, -5, 9, 4, white);
        assert_eq!(*img.get_pixel(9, 4), white);
        draw_line(&mut img, 0, 4, 9, 0, white);
        assert_eq!(*img.get_pixel(0, 4), white);
        assert_eq!(*img.get_pixel(9, 0), white);
    }

    #[test]
    fn text_layout_size() {
        let t = TextLayout::new("abc", 3);
        assert_eq!(t.width(), 72);
        assert_eq!(t.height(), 24);
        assert_eq!(t.anchor_center(100, 50), (64, 38));
        assert!(TextLayout::new("", 3).is_empty());
        assert_eq!(TextLayout::new("", 3).height(), 0);
    }

    #[test]
    fn unknown_glyphs_fall_back() {
        assert_eq!(TextLayout::new("\u{1F600}", 1).width(), 8);
    }

    #[test]
    fn outline_covers_more_than_fill() {
        let t = TextLayout::new("I", 1);
        let red = Rgba([255, 0, 0, 255]);
        let mut filled = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        draw_text(&mut filled, &t, 6, 6, red);
        let mut outlined = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        draw_text_outline(&mut outlined, &t, 6, 6, 2, red);

        let count = |img: &RgbaImage| img.pixels().filter(|p| **p == red).count();
        assert!(count(&filled) > 0);
        assert!(count(&outlined) > count(&filled));
        for (x, y, p) in filled.enumerate_pixels() {
            if *p == red {
                assert_eq!(*outlined.get_pixel(x, y), red);
            }
        }
    }

    #[test]
    fn outline_blends_each_pixel_once() {
        let t = TextLayout::new("#", 2);
        let ink = Rgba([255, 255, 255, 179]);
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        draw_text_outline(&mut img, &t, 10, 10, 2, ink);
        for p in img.pixels() {
            assert!(*p == Rgba([0, 0, 0, 255]) || *p == Rgba([179, 179, 179, 255]));
        }
    }
}
