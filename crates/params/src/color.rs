use crate::ValidationError;

/// Background color with each channel normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Parse a `RRGGBB` hex string (no leading `#`), case-insensitive.
    pub fn from_hex(raw: &str) -> Result<Self, ValidationError> {
        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor);
        }

        let channel = |i: usize| -> Result<f64, ValidationError> {
            let v = u8::from_str_radix(&raw[i..i + 2], 16)
                .map_err(|_| ValidationError::InvalidColor)?;
            Ok(v as f64 / 255.0)
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Sum of the three channels, in `[0, 3]`.
    pub fn luminance_sum(self) -> f64 {
        self.r + self.g + self.b
    }

    /// A background is "light" when its average channel is above one half.
    pub fn is_light(self) -> bool {
        self.luminance_sum() > 1.5
    }
}
