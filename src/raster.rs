//! UTF-8 text to per-glyph display writes.

use core::{convert::Infallible, fmt};

use heapless::Vec;
use log::{debug, warn};
use pcf_font::{FontHandle, GlyphIndex};

use crate::{
    sink::{DisplaySink, Rect},
    utf8::{Utf8Decoder, Utf8Error},
};

/// Capacity of the per-call pixel buffer. `Config::max_glyph_pixels` may
/// not exceed it.
pub const MAX_GLYPH_PIXELS: usize = 1024;

/// What to draw for a code point the font has no glyph for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MissingGlyph {
    /// Draw nothing and do not advance.
    Skip,
    /// Draw the font's default character, or skip if the font lacks it too.
    DefaultChar,
}

/// Rasterizer configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Rows drawn per glyph.
    pub glyph_height: u16,
    /// RGB565 value of set bits.
    pub foreground: u16,
    /// RGB565 value of clear bits.
    pub background: u16,
    /// Largest `width * glyph_height` a single glyph may expand to.
    pub max_glyph_pixels: usize,
    pub missing_glyph: MissingGlyph,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyph_height: 16,
            foreground: 0xFFFF,
            background: 0x0000,
            max_glyph_pixels: 512,
            missing_glyph: MissingGlyph::Skip,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    ZeroGlyphHeight,
    /// `max_glyph_pixels` exceeds [`MAX_GLYPH_PIXELS`].
    PixelBudgetTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroGlyphHeight => f.write_str("glyph height must be non-zero"),
            ConfigError::PixelBudgetTooLarge => {
                write!(f, "glyph pixel budget exceeds {}", MAX_GLYPH_PIXELS)
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Render failures. `E` is the display sink's error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderError<E> {
    /// Glyph lookup failed against the font tables.
    Font(pcf_font::Error),
    InvalidUtf8(Utf8Error),
    /// Glyph would expand past `Config::max_glyph_pixels`.
    GlyphTooLarge { codepoint: u32, pixels: usize },
    /// Glyph window does not fit the `u16` coordinate space.
    CoordinateOverflow,
    Sink(E),
}

impl<E> From<pcf_font::Error> for RenderError<E> {
    fn from(err: pcf_font::Error) -> Self {
        RenderError::Font(err)
    }
}

impl<E> From<Utf8Error> for RenderError<E> {
    fn from(err: Utf8Error) -> Self {
        RenderError::InvalidUtf8(err)
    }
}

impl<E: fmt::Display> fmt::Display for RenderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Font(err) => write!(f, "font: {}", err),
            RenderError::InvalidUtf8(err) => fmt::Display::fmt(err, f),
            RenderError::GlyphTooLarge { codepoint, pixels } => write!(
                f,
                "glyph for U+{:04X} needs {} pixels, over the configured limit",
                codepoint, pixels
            ),
            RenderError::CoordinateOverflow => f.write_str("glyph window exceeds display coordinates"),
            RenderError::Sink(err) => write!(f, "display: {}", err),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for RenderError<E> {}

/// Draws text with one font.
///
/// Text is streamed: each code point is decoded, looked up and written to
/// the sink before the next one is touched. On error, glyphs already
/// written stay on the display.
#[derive(Clone, Copy, Debug)]
pub struct Rasterizer<'f, 'a> {
    font: &'f FontHandle<'a>,
    config: Config,
}

impl<'f, 'a> Rasterizer<'f, 'a> {
    pub fn new(font: &'f FontHandle<'a>, config: Config) -> Result<Self, ConfigError> {
        if config.glyph_height == 0 {
            return Err(ConfigError::ZeroGlyphHeight);
        }
        if config.max_glyph_pixels > MAX_GLYPH_PIXELS {
            return Err(ConfigError::PixelBudgetTooLarge);
        }
        Ok(Self { font, config })
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    ///
    /// Returns the pen position after the last glyph. It may be one past
    /// `u16::MAX` when the last glyph ends on the final column.
    pub fn render<S>(&self, sink: &mut S, x: u16, y: u16, text: &[u8]) -> Result<u32, RenderError<S::Error>>
    where
        S: DisplaySink,
    {
        let mut pixels: Vec<u16, MAX_GLYPH_PIXELS> = Vec::new();
        let mut pen = x as u32;

        for decoded in Utf8Decoder::new(text) {
            let (codepoint, _) = decoded.inspect_err(|err| warn!("text: {}", err))?;
            let Some(glyph) = self.resolve(codepoint) else {
                continue;
            };

            let width = self.font.metrics().width_of(glyph)?;
            if width == 0 {
                continue;
            }

            let area = u16::try_from(pen)
                .ok()
                .and_then(|x| Rect::new(x, y, width, self.config.glyph_height))
                .ok_or(RenderError::CoordinateOverflow)?;
            self.expand(glyph, codepoint, width, &mut pixels)?;
            sink.write(area, &pixels).map_err(RenderError::Sink)?;

            pen += width as u32;
        }

        Ok(pen)
    }

    /// Total advance of `text` in pixels, without drawing.
    pub fn measure(&self, text: &[u8]) -> Result<u32, RenderError<Infallible>> {
        let mut total = 0u32;
        for decoded in Utf8Decoder::new(text) {
            let (codepoint, _) = decoded?;
            if let Some(glyph) = self.resolve(codepoint) {
                let width = self.font.metrics().width_of(glyph)?;
                total = total.saturating_add(width as u32);
            }
        }
        Ok(total)
    }

    fn resolve(&self, codepoint: u32) -> Option<GlyphIndex> {
        if let Some(glyph) = self.font.glyph(codepoint) {
            return Some(glyph);
        }

        debug!("text: no glyph for U+{:04X}", codepoint);
        match self.config.missing_glyph {
            MissingGlyph::Skip => None,
            MissingGlyph::DefaultChar => self.font.encoding().default_glyph(),
        }
    }

    /// Expands one glyph into `out`, one RGB565 value per bit, row-major.
    fn expand<E>(
        &self,
        glyph: GlyphIndex,
        codepoint: u32,
        width: u16,
        out: &mut Vec<u16, MAX_GLYPH_PIXELS>,
    ) -> Result<(), RenderError<E>> {
        let height = self.config.glyph_height;
        let too_large = RenderError::GlyphTooLarge {
            codepoint,
            pixels: width as usize * height as usize,
        };
        if width as usize * height as usize > self.config.max_glyph_pixels {
            warn!(
                "text: glyph for U+{:04X} is {}x{}, over the {} pixel limit",
                codepoint, width, height, self.config.max_glyph_pixels
            );
            return Err(too_large);
        }

        let rows = self
            .font
            .bitmaps()
            .rows_of(glyph, width, height)
            .inspect_err(|err| warn!("text: U+{:04X}: {}", codepoint, err))?;

        out.clear();
        for row in rows {
            for on in row.bits(width) {
                let color = if on {
                    self.config.foreground
                } else {
                    self.config.background
                };
                if out.push(color).is_err() {
                    return Err(too_large);
                }
            }
        }

        Ok(())
    }
}

/// Draws `text` at `(x, y)` with the default configuration.
pub fn render_text<S>(
    font: &FontHandle<'_>,
    sink: &mut S,
    x: u16,
    y: u16,
    text: &[u8],
) -> Result<(), RenderError<S::Error>>
where
    S: DisplaySink,
{
    let rasterizer = Rasterizer {
        font,
        config: Config::default(),
    };
    rasterizer.render(sink, x, y, text).map(|_| ())
}

#[cfg(test)]
mod tests;
