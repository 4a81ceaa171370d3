#![cfg_attr(not(test), no_std)]

//! Text rendering with PCF bitmap fonts for small pixel displays.
//!
//! ```ignore
//! let font = pcf_render::load_font(FONT_BLOB)?;
//! pcf_render::render_text(&font, &mut display, 0, 0, "Hello".as_bytes())?;
//! ```

mod framebuffer;
#[cfg(feature = "embedded-graphics")]
mod graphics;
mod raster;
mod sink;
mod utf8;

pub use framebuffer::{FrameBuffer, FrameBufferError};
#[cfg(feature = "embedded-graphics")]
pub use graphics::DrawTargetSink;
pub use raster::{
    Config, ConfigError, MAX_GLYPH_PIXELS, MissingGlyph, Rasterizer, RenderError, render_text,
};
pub use sink::{DisplaySink, Rect};
pub use utf8::{Utf8Decoder, Utf8Error};

pub use pcf_font;
pub use pcf_font::{FontHandle, load_font};
