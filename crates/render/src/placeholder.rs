use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgba, RgbaImage};
use params::{Color, RenderRequest};

use crate::draw::{self, TextLayout};

/// Alpha applied to the ink color: round(0.7 * 255).
const INK_ALPHA: u8 = 179;

/// Knobs shared by every render. Built once at startup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Outline thickness around the caption, in pixels.
    pub stroke_size: u32,
    /// Integer upscale of the 8x8 font; 3 gives 24px glyphs.
    pub font_scale: u32,
    /// When false the cross overlay is skipped even if requested.
    pub allow_cross: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stroke_size: 2,
            font_scale: 3,
            allow_cross: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Black on light backgrounds, white on dark ones, at 70% opacity.
pub fn ink_color(background: Color) -> Rgba<u8> {
    if background.is_light() {
        Rgba([0, 0, 0, INK_ALPHA])
    } else {
        Rgba([255, 255, 255, INK_ALPHA])
    }
}

/// Rasterize a placeholder: flat background, optional cross, outlined caption.
pub fn render(req: &RenderRequest, opts: &RenderOptions) -> RgbaImage {
    let dims = req.dimensions();
    let [r, g, b] = req.background().to_rgb8();
    let bg = Rgba([r, g, b, 255]);
    let ink = ink_color(req.background());

    let mut img = RgbaImage::new(dims.width, dims.height);
    if dims.is_empty() {
        return img;
    }
    draw::fill(&mut img, bg);

    let w = dims.width as i64;
    let h = dims.height as i64;

    if req.cross() && opts.allow_cross {
        draw::draw_line(&mut img, 0, 0, w - 1, h - 1, ink);
        draw::draw_line(&mut img, 0, h - 1, w - 1, 0, ink);
    }

    let text = TextLayout::new(req.caption(), opts.font_scale);
    let (x0, y0) = text.anchor_center(w / 2, h / 2);
    draw::draw_text_outline(&mut img, &text, x0, y0, opts.stroke_size, ink);
    // The glyph interior is the literal background color.
    draw::draw_text(&mut img, &text, x0, y0, bg);

    img
}

/// PNG-encode `img` into `out`.
///
/// A zero-area buffer is written as a single transparent pixel, since PNG
/// cannot describe an empty image.
pub fn encode_png<W: Write>(img: &RgbaImage, out: W) -> Result<(), RenderError> {
    let enc = PngEncoder::new(out);
    if img.width() == 0 || img.height() == 0 {
        enc.write_image(&[0, 0, 0, 0], 1, 1, image::ColorType::Rgba8.into())?;
        return Ok(());
    }
    enc.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8.into(),
    )?;
    Ok(())
}

/// Render and encode in one step.
pub fn render_png(req: &RenderRequest, opts: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let img = render(req, opts);
    let mut out = Vec::new();
    encode_png(&img, &mut out)?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        bytes = out.len(),
        "rendered placeholder"
    );
    Ok(out)
}
