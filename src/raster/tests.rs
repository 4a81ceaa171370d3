use std::vec::Vec;

use pcf_font::{FontHandle, load_font, testing::FontBuilder};

use super::{Config, ConfigError, MAX_GLYPH_PIXELS, MissingGlyph, Rasterizer, RenderError, render_text};
use crate::{DisplaySink, FrameBuffer, FrameBufferError, Rect};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct BusError;

/// Sink that records every write and can be told to fail on the n-th one.
#[derive(Default)]
struct Recorder {
    writes: Vec<(Rect, Vec<u16>)>,
    fail_on: Option<usize>,
}

impl DisplaySink for Recorder {
    type Error = BusError;

    fn write(&mut self, area: Rect, pixels: &[u16]) -> Result<(), Self::Error> {
        if self.fail_on == Some(self.writes.len()) {
            return Err(BusError);
        }
        assert_eq!(pixels.len(), area.pixel_count());
        self.writes.push((area, pixels.to_vec()));
        Ok(())
    }
}

fn small_font(format: u32) -> Vec<u8> {
    FontBuilder::new(4)
        .bitmap_format(format)
        .glyph('A', 3, &[".#.", "#.#", "###", "#.#"])
        .glyph('i', 1, &["#", ".", "#", "#"])
        .glyph('?', 2, &["##", ".#", "..", ".#"])
        .glyph('\u{200B}', 0, &[])
        .glyph(' ', 2, &[])
        .default_char('?')
        .build()
}

fn config() -> Config {
    Config {
        glyph_height: 4,
        foreground: 1,
        background: 0,
        ..Config::default()
    }
}

fn rasterizer<'f, 'a>(font: &'f FontHandle<'a>, config: Config) -> Rasterizer<'f, 'a> {
    Rasterizer::new(font, config).unwrap()
}

const GLYPH_A: [u16; 12] = [0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1];

#[test]
fn empty_text_issues_no_writes() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    assert_eq!(rasterizer(&font, config()).render(&mut sink, 7, 3, b""), Ok(7));
    assert!(render_text(&font, &mut sink, 0, 0, b"").is_ok());
    assert!(sink.writes.is_empty());
}

#[test]
fn glyph_is_written_as_one_window() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    rasterizer(&font, config()).render(&mut sink, 10, 20, b"A").unwrap();

    assert_eq!(sink.writes.len(), 1);
    let (area, pixels) = &sink.writes[0];
    assert_eq!(*area, Rect { x0: 10, y0: 20, x1: 12, y1: 23 });
    assert_eq!(pixels, &GLYPH_A);
}

#[test]
fn pen_advances_by_glyph_width() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    let pen = rasterizer(&font, config()).render(&mut sink, 0, 0, b"Ai A").unwrap();

    let starts: Vec<u16> = sink.writes.iter().map(|(area, _)| area.x0).collect();
    assert_eq!(starts, [0, 3, 4, 6]);
    assert_eq!(pen, 9);
    assert_eq!(sink.writes[1].1, [1, 0, 1, 1]);
    assert_eq!(sink.writes[2].1, [0; 8]);
}

#[test]
fn every_bitmap_layout_renders_the_same_pixels() {
    for format in [0x00, 0x08, 0x0C, 0x0E, 0x19, 0x15, 0x2E, 0x22, 0x1B] {
        let blob = small_font(format);
        let font = load_font(&blob).unwrap();
        let mut sink = Recorder::default();

        rasterizer(&font, config()).render(&mut sink, 0, 0, b"A").unwrap();
        assert_eq!(sink.writes[0].1, GLYPH_A, "format {:#x}", format);
    }
}

#[test]
fn unmapped_code_points_are_skipped_by_default() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    let pen = rasterizer(&font, config())
        .render(&mut sink, 0, 0, "A\u{7}é😀i".as_bytes())
        .unwrap();

    assert_eq!(sink.writes.len(), 2);
    assert_eq!(sink.writes[1].0.x0, 3);
    assert_eq!(pen, 4);
}

#[test]
fn unmapped_code_points_can_use_default_char() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();
    let config = Config {
        missing_glyph: MissingGlyph::DefaultChar,
        ..config()
    };

    rasterizer(&font, config).render(&mut sink, 0, 0, b"A\x07i").unwrap();

    assert_eq!(sink.writes.len(), 3);
    assert_eq!(sink.writes[1].0, Rect { x0: 3, y0: 0, x1: 4, y1: 3 });
    assert_eq!(sink.writes[1].1, [1, 1, 0, 1, 0, 0, 0, 1]);
    assert_eq!(sink.writes[2].0.x0, 5);
}

#[test]
fn zero_width_glyphs_draw_nothing() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    let pen = rasterizer(&font, config())
        .render(&mut sink, 0, 0, "A\u{200B}i".as_bytes())
        .unwrap();

    assert_eq!(sink.writes.len(), 2);
    assert_eq!(pen, 4);
}

#[test]
fn oversized_glyph_fails_after_earlier_glyphs() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();
    let config = Config {
        max_glyph_pixels: 8,
        ..config()
    };

    let err = rasterizer(&font, config).render(&mut sink, 0, 0, b"iAi").unwrap_err();

    assert_eq!(
        err,
        RenderError::GlyphTooLarge {
            codepoint: 'A' as u32,
            pixels: 12
        }
    );
    assert_eq!(sink.writes.len(), 1);
}

#[test]
fn wide_glyph_exceeds_default_budget() {
    let blob = FontBuilder::new(16)
        .glyph('W', 40, &["#"; 16])
        .glyph('n', 8, &["#"; 16])
        .build();
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    let err = render_text(&font, &mut sink, 0, 0, b"nWn").unwrap_err();

    assert_eq!(
        err,
        RenderError::GlyphTooLarge {
            codepoint: 'W' as u32,
            pixels: 640
        }
    );
    assert_eq!(sink.writes.len(), 1);
}

#[test]
fn invalid_utf8_stops_rendering() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    let err = rasterizer(&font, config())
        .render(&mut sink, 0, 0, b"i\xFFA")
        .unwrap_err();

    assert!(matches!(err, RenderError::InvalidUtf8(e) if e.offset() == 1));
    assert_eq!(sink.writes.len(), 1);
}

#[test]
fn sink_errors_are_propagated() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder {
        fail_on: Some(1),
        ..Recorder::default()
    };

    let err = rasterizer(&font, config()).render(&mut sink, 0, 0, b"AiA").unwrap_err();

    assert_eq!(err, RenderError::Sink(BusError));
    assert_eq!(sink.writes.len(), 1);
}

#[test]
fn glyph_past_coordinate_space_is_rejected() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();
    let r = rasterizer(&font, config());

    assert_eq!(r.render(&mut sink, u16::MAX - 2, 0, b"A"), Ok(u16::MAX as u32 + 1));
    assert_eq!(
        r.render(&mut sink, u16::MAX - 1, 0, b"A"),
        Err(RenderError::CoordinateOverflow)
    );
    assert_eq!(
        r.render(&mut sink, 0, u16::MAX - 2, b"A"),
        Err(RenderError::CoordinateOverflow)
    );
}

#[test]
fn glyph_after_last_column_does_not_overlap() {
    let blob = FontBuilder::new(4)
        .glyph('a', 2, &["##", "##", "##", "##"])
        .glyph('b', 1, &["#", "#", "#", "#"])
        .build();
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();

    let err = rasterizer(&font, config())
        .render(&mut sink, u16::MAX - 1, 0, b"ab")
        .unwrap_err();

    assert_eq!(err, RenderError::CoordinateOverflow);
    assert_eq!(sink.writes.len(), 1);
    assert_eq!(sink.writes[0].0.x1, u16::MAX);
}

#[test]
fn rows_past_bitmap_data_are_a_font_error() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut sink = Recorder::default();
    let config = Config {
        glyph_height: 5,
        ..config()
    };

    let err = rasterizer(&font, config).render(&mut sink, 0, 0, b" ").unwrap_err();

    assert_eq!(
        err,
        RenderError::Font(pcf_font::Error::BufferOverflow { glyph: 4 })
    );
    assert!(sink.writes.is_empty());
}

#[test]
fn measure_sums_advances_of_drawn_glyphs() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();

    assert_eq!(rasterizer(&font, config()).measure(b"Ai?"), Ok(6));
    assert_eq!(rasterizer(&font, config()).measure(b"A\x07"), Ok(3));
    assert!(rasterizer(&font, config()).measure(b"\xC3").is_err());

    let substitute = Config {
        missing_glyph: MissingGlyph::DefaultChar,
        ..config()
    };
    assert_eq!(rasterizer(&font, substitute).measure(b"A\x07"), Ok(5));
}

#[test]
fn measure_is_not_limited_to_display_coordinates() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let text = [b'A'; 30_000];

    assert_eq!(rasterizer(&font, config()).measure(&text), Ok(90_000));
}

#[test]
fn invalid_configs_are_rejected() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();

    let zero = Config {
        glyph_height: 0,
        ..Config::default()
    };
    assert_eq!(
        Rasterizer::new(&font, zero).unwrap_err(),
        ConfigError::ZeroGlyphHeight
    );

    let huge = Config {
        max_glyph_pixels: MAX_GLYPH_PIXELS + 1,
        ..Config::default()
    };
    assert_eq!(
        Rasterizer::new(&font, huge).unwrap_err(),
        ConfigError::PixelBudgetTooLarge
    );
}

#[test]
fn default_config_draws_into_framebuffer() {
    let blob = FontBuilder::new(16)
        .glyph('H', 8, &["#......#", "########", "#......#"])
        .build();
    let font = load_font(&blob).unwrap();
    let mut fb = FrameBuffer::<32, 20>::new();

    render_text(&font, &mut fb, 2, 1, b"HH").unwrap();

    assert_eq!(fb.pixel(2, 1), Some(0xFFFF));
    assert_eq!(fb.pixel(3, 1), Some(0x0000));
    assert_eq!(fb.pixel(9, 1), Some(0xFFFF));
    assert_eq!(fb.pixel(10, 2), Some(0xFFFF));
    assert_eq!(fb.pixel(17, 2), Some(0xFFFF));
    assert_eq!(fb.pixel(18, 2), Some(0x0000));
    assert_eq!(fb.pixel(2, 16), Some(0x0000));
}

#[test]
fn glyph_outside_framebuffer_surfaces_sink_error() {
    let blob = small_font(0x0C);
    let font = load_font(&blob).unwrap();
    let mut fb = FrameBuffer::<4, 4>::new();

    let err = rasterizer(&font, config()).render(&mut fb, 0, 0, b"AA").unwrap_err();

    assert_eq!(err, RenderError::Sink(FrameBufferError::OutOfBounds));
    assert_eq!(fb.pixel(1, 0), Some(1));
}
