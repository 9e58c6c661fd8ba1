//! End-to-end drawing through `Display` onto an in-memory framebuffer

mod common;

use std::fmt::Write;

use common::MemoryStore;
use gfx::{
    Bitmap, Color, Display, DisplayConfig, FontTable, Framebuffer, LocalFont, PixelSink,
    RemoteFont, Rotation,
};

/// Forwards single pixels only, so every run falls back to the rasterizer
struct PlotOnly<'a>(Framebuffer<'a>);

impl PixelSink for PlotOnly<'_> {
    fn plot(&mut self, x: i16, y: i16, color: Color) {
        self.0.plot(x, y, color);
    }
}

fn scene<S: PixelSink>(display: &mut Display<S, LocalFont>) {
    display.fill_screen(Color::BLACK);
    display.draw_rect(1, 1, 30, 20, Color::WHITE);
    display.fill_rect(-5, 10, 12, 40, Color::RED);
    display.fill_circle(24, 24, 9, Color::GREEN);
    display.draw_circle(40, 10, 30, Color::BLUE);
    display.draw_round_rect(3, 30, 25, 18, 6, Color::CYAN);
    display.fill_round_rect(30, 30, 20, 15, 4, Color::MAGENTA);
    display.fill_triangle(0, 63, 20, 40, 47, 60, Color::YELLOW);
    display.draw_hline(-3, 2, 100, Color::WHITE);
    display.draw_vline(45, -10, 30, Color::WHITE);
    display.set_cursor(2, 2);
    display.set_text_colors(Color::WHITE, Color::BLUE);
    display.print("run\nfill").unwrap();
}

#[test]
fn test_run_overrides_match_plotting() {
    let mut fast = vec![Color::BLACK; 48 * 64];
    let mut slow = vec![Color::BLACK; 48 * 64];
    let config = DisplayConfig::new(48, 64);

    let mut a = Display::new(Framebuffer::new(&mut fast, 48, 64).unwrap(), LocalFont, config);
    scene(&mut a);
    let mut b = Display::new(
        PlotOnly(Framebuffer::new(&mut slow, 48, 64).unwrap()),
        LocalFont,
        config,
    );
    scene(&mut b);

    drop(a);
    drop(b);
    assert!(fast == slow);
}

#[test]
fn test_rotation_scenario() {
    let mut pixels = vec![Color::BLACK; 128 * 64];
    let fb = Framebuffer::new(&mut pixels, 128, 64).unwrap();
    let mut display = Display::new(fb, LocalFont, DisplayConfig::new(128, 64));
    display.set_rotation(1);
    assert_eq!((display.width(), display.height()), (64, 128));
    assert_eq!(display.rotation(), Rotation::Deg90);
    display.set_rotation(6);
    assert_eq!((display.width(), display.height()), (128, 64));
}

#[test]
fn test_local_text_lands_in_framebuffer() {
    let mut pixels = vec![Color::BLACK; 32 * 16];
    let fb = Framebuffer::new(&mut pixels, 32, 16).unwrap();
    let mut display = Display::new(fb, LocalFont, DisplayConfig::new(32, 16));
    display.set_text_color(Color::GREEN);
    write!(display, "!\n|").unwrap();

    let fb = display.into_sink();
    // '!' in column 2 of the first cell, bit 5 clear.
    assert_eq!(fb.get(2, 0), Some(Color::GREEN));
    assert_eq!(fb.get(2, 5), Some(Color::BLACK));
    assert_eq!(fb.get(2, 6), Some(Color::GREEN));
    // '|' on the second line, rows 8..15.
    assert!((8..15).all(|y| fb.get(2, y) == Some(Color::GREEN)));
    assert_eq!(fb.get(2, 15), Some(Color::BLACK));
}

#[test]
fn test_xbm_and_standard_bitmaps_mirror() {
    let data = [0b1000_0000, 0b0000_0001];
    let image = Bitmap::new(&data, 8, 2).unwrap();

    let mut pixels = vec![Color::BLACK; 8 * 2];
    let fb = Framebuffer::new(&mut pixels, 8, 2).unwrap();
    let mut display = Display::new(fb, LocalFont, DisplayConfig::new(8, 2));
    display.draw_bitmap(0, 0, &image, Color::WHITE, None);
    let fb = display.into_sink();
    assert_eq!(fb.get(0, 0), Some(Color::WHITE));
    assert_eq!(fb.get(7, 1), Some(Color::WHITE));

    let mut pixels = vec![Color::BLACK; 8 * 2];
    let fb = Framebuffer::new(&mut pixels, 8, 2).unwrap();
    let mut display = Display::new(fb, LocalFont, DisplayConfig::new(8, 2));
    display.draw_xbitmap(0, 0, &image, Color::WHITE, None);
    let fb = display.into_sink();
    assert_eq!(fb.get(7, 0), Some(Color::WHITE));
    assert_eq!(fb.get(0, 1), Some(Color::WHITE));
}

#[test]
fn test_remote_font_display() {
    // Two glyphs: 'A' is 2 columns, 'B' is 3; one band each.
    static WIDTHS: [u8; 2] = [2, 3];
    static OFFSETS: [u16; 2] = [0, 2];
    let table = FontTable::new(b'A', 1, 0x40, &WIDTHS, &OFFSETS).unwrap();
    let mut store = MemoryStore::with_payload(128, 0x40, &[0xFF, 0x81, 0x01, 0x02, 0x04], 16);
    // 8x2 image right after the font data.
    store.data[0x50] = 0xF0;
    store.data[0x51] = 0x0F;

    let mut pixels = vec![Color::BLACK; 24 * 16];
    let fb = Framebuffer::new(&mut pixels, 24, 16).unwrap();
    let config = DisplayConfig::new(24, 16).text_color(Color::WHITE);
    let mut display = Display::new(fb, RemoteFont::new(table, store), config);

    display.print("AB\nA").unwrap();
    assert_eq!(display.cursor(), (3, 8));

    let progress = display
        .stream_stored_bitmap(10, 8, 0x50, 8, 2, Color::RED, None)
        .unwrap();
    assert_eq!(progress.rows, 2);

    let err = display.print("Z").unwrap_err();
    assert!(matches!(err, gfx::TextError::Font(gfx::FontError::MissingGlyph(b'Z'))));

    let fb = display.into_sink();
    // 'A': solid column 0, column 1 top and bottom.
    assert!((0..8).all(|y| fb.get(0, y) == Some(Color::WHITE)));
    assert_eq!(fb.get(1, 0), Some(Color::WHITE));
    assert_eq!(fb.get(1, 3), Some(Color::BLACK));
    assert_eq!(fb.get(1, 7), Some(Color::WHITE));
    // 'B' starts after the 1px gap: a diagonal.
    assert_eq!(fb.get(3, 0), Some(Color::WHITE));
    assert_eq!(fb.get(4, 1), Some(Color::WHITE));
    assert_eq!(fb.get(5, 2), Some(Color::WHITE));
    // Second line.
    assert_eq!(fb.get(0, 8), Some(Color::WHITE));
    // Streamed image.
    assert_eq!(fb.get(10, 8), Some(Color::RED));
    assert_eq!(fb.get(14, 8), Some(Color::BLACK));
    assert_eq!(fb.get(17, 9), Some(Color::RED));
}
