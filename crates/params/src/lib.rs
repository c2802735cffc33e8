//! Request parameters for placeholder images.
//!
//! This crate turns the raw strings pulled out of a request path into a
//! validated [`RenderRequest`]. It knows nothing about HTTP or pixels.

pub mod color;

pub use color::Color;

pub const MAX_WIDTH: i64 = 10_000;
pub const MAX_HEIGHT: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing {0}")]
    MissingField(&'static str),
    #[error("Invalid Color Format. Use HEX eg: ff0000")]
    InvalidColor,
    #[error("Invalid Width")]
    InvalidWidth,
    #[error("Invalid Height")]
    InvalidHeight,
    #[error("Image too big, must be of size at most {max_width}x{max_height}")]
    ImageTooLarge { max_width: i64, max_height: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Unvalidated parameters as extracted by the caller.
///
/// `cross` only matters for its presence; its value is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawParams<'a> {
    pub color: Option<&'a str>,
    pub width: Option<&'a str>,
    pub height: Option<&'a str>,
    pub text: Option<&'a str>,
    pub cross: Option<&'a str>,
}

/// A fully validated render job. Built only through [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    background: Color,
    dimensions: Dimensions,
    caption: String,
    cross: bool,
}

impl RenderRequest {
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn cross(&self) -> bool {
        self.cross
    }
}

/// Validate raw parameters. Checks run in order and the first failure wins:
/// color, width, height, size limit.
pub fn validate(raw: RawParams<'_>) -> Result<RenderRequest, ValidationError> {
    let color = raw.color.ok_or(ValidationError::MissingField("Color"))?;
    let background = Color::from_hex(color)?;

    let width_raw = raw.width.ok_or(ValidationError::MissingField("Width"))?;
    let width: i64 = width_raw
        .parse()
        .map_err(|_| ValidationError::InvalidWidth)?;

    let height_raw = raw.height.ok_or(ValidationError::MissingField("Height"))?;
    let height: i64 = height_raw
        .parse()
        .map_err(|_| ValidationError::InvalidHeight)?;

    if width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(ValidationError::ImageTooLarge {
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
        });
    }

    let caption = match raw.text {
        Some(t) => t.replace('_', " "),
        None => format!("{width_raw}x{height_raw}"),
    };

    // Non-positive sizes are not rejected; they render as an empty image.
    let dimensions = Dimensions {
        width: width.max(0) as u32,
        height: height.max(0) as u32,
    };
    if dimensions.is_empty() {
        tracing::debug!(width, height, "degenerate image size requested");
    }

    Ok(RenderRequest {
        background,
        dimensions,
        caption,
        cross: raw.cross.is_some(),
    })
}
