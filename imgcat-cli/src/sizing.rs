// ABOUTME: Terminal-aware default height for images shown without an explicit size
// ABOUTME: Reads intrinsic dimensions from the image header and converts pixels to rows

use crate::constants::sizing;
use image::ImageReader;
use std::io::Cursor;

/// Intrinsic (width, height) in pixels, read from the container header only
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok(dims) => Some(dims),
        Err(e) => {
            log::debug!("Could not determine image size: {}", e);
            None
        }
    }
}

/// Current terminal height in rows, if stdout is attached to one
pub fn terminal_rows() -> Option<u16> {
    crossterm::terminal::size().ok().map(|(_, rows)| rows)
}

/// Rows needed to show `pixel_height` pixels at `pixels_per_line` pixels per row
pub fn rows_for_pixels(pixel_height: u32, pixels_per_line: u32) -> u32 {
    pixel_height.div_ceil(pixels_per_line.max(1))
}

/// Keep the image from scrolling off a terminal of `terminal_rows` rows
pub fn clamp_to_terminal(rows: u32, terminal_rows: Option<u16>) -> u32 {
    let rows = match terminal_rows {
        Some(available) => {
            let available = available.saturating_sub(sizing::TERMINAL_MARGIN_ROWS);
            rows.min(u32::from(available))
        }
        None => rows,
    };
    rows.max(1)
}

/// Height in rows used when the caller did not give one
pub fn default_height(bytes: &[u8], pixels_per_line: u32, terminal_rows: Option<u16>) -> u32 {
    match image_dimensions(bytes) {
        Some((_, pixel_height)) if pixel_height > 0 => {
            let rows = clamp_to_terminal(
                rows_for_pixels(pixel_height, pixels_per_line),
                terminal_rows,
            );
            log::debug!(
                "Image is {}px tall; using {} rows at {}px per line",
                pixel_height,
                rows,
                pixels_per_line
            );
            rows
        }
        _ => sizing::FALLBACK_ROWS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_image_dimensions_png() {
        assert_eq!(image_dimensions(&png_bytes(32, 48)), Some((32, 48)));
    }

    #[test]
    fn test_image_dimensions_bmp() {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(5, 7)
            .write_to(&mut out, ImageFormat::Bmp)
            .unwrap();
        assert_eq!(image_dimensions(out.get_ref()), Some((5, 7)));
    }

    #[test]
    fn test_image_dimensions_invalid() {
        assert_eq!(image_dimensions(&[b'0'; 32]), None);
        assert_eq!(image_dimensions(&[]), None);
    }

    #[test]
    fn test_rows_for_pixels_rounds_up() {
        assert_eq!(rows_for_pixels(24, 24), 1);
        assert_eq!(rows_for_pixels(25, 24), 2);
        assert_eq!(rows_for_pixels(1, 24), 1);
        assert_eq!(rows_for_pixels(480, 24), 20);
    }

    #[test]
    fn test_clamp_to_terminal() {
        assert_eq!(clamp_to_terminal(100, Some(40)), 31);
        assert_eq!(clamp_to_terminal(10, Some(40)), 10);
        assert_eq!(clamp_to_terminal(10, Some(5)), 1);
        assert_eq!(clamp_to_terminal(100, None), 100);
        assert_eq!(clamp_to_terminal(0, None), 1);
    }

    #[test]
    fn test_default_height() {
        assert_eq!(default_height(&png_bytes(10, 240), 24, None), 10);
        assert_eq!(default_height(&png_bytes(10, 2400), 24, Some(50)), 41);
        assert_eq!(default_height(b"not an image", 24, Some(50)), 10);
    }
}
