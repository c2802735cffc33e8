//! Placeholder image rasterization and PNG encoding.

pub mod draw;
pub mod placeholder;

pub use placeholder::{encode_png, ink_color, render, render_png, RenderError, RenderOptions};
