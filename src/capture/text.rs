//! Caption glyph rendering with fontdue.

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::capture::error::FontError;

/// DejaVu Sans Bold, shipped with the binary so captions always render.
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
const BUNDLED_FONT_NAME: &str = "bundled DejaVu Sans Bold";

const TEXT_COLOR: [u8; 3] = [255, 255, 255];
const SHADOW_COLOR: [u8; 3] = [0, 0, 0];
const SHADOW_ALPHA: f32 = 0.6;
const SHADOW_OFFSET: i32 = 2;

/// A loaded caption font.
pub struct CaptionFont {
    font: Font,
    /// File path or bundled font name, for logs.
    origin: String,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont").field("origin", &self.origin).finish()
    }
}

impl CaptionFont {
    /// The font compiled into the binary.
    pub fn bundled() -> Result<Self, FontError> {
        let font = Font::from_bytes(BUNDLED_FONT, FontSettings::default()).map_err(|message| {
            FontError::Parse {
                origin: BUNDLED_FONT_NAME.to_string(),
                message,
            }
        })?;
        Ok(Self {
            font,
            origin: BUNDLED_FONT_NAME.to_string(),
        })
    }

    /// Parses a TTF/OTF file.
    pub fn from_path(path: &Path) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|message| {
            FontError::Parse {
                origin: origin.clone(),
                message,
            }
        })?;
        Ok(Self { font, origin })
    }

    /// Loads `preferred` when given and usable, else the bundled font.
    pub fn load(preferred: Option<&Path>) -> Result<Self, FontError> {
        let font = match preferred.map(Self::from_path) {
            Some(Ok(font)) => font,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "Caption font unusable; using bundled font");
                Self::bundled()?
            }
            None => Self::bundled()?,
        };
        tracing::debug!(origin = %font.origin, "Loaded caption font");
        Ok(font)
    }

    /// Rendered width of `text` at `px`, including kerning.
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        let mut width = 0.0;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            if let Some(left) = prev {
                width += self.font.horizontal_kern(left, ch, px).unwrap_or(0.0);
            }
            width += self.font.metrics(ch, px).advance_width;
            prev = Some(ch);
        }
        width
    }

    fn ascent_descent(&self, px: f32) -> (f32, f32) {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((px * 0.8, -px * 0.2))
    }

    /// Draws one line with a drop shadow, centred on `center_x`.
    ///
    /// `line_top` is the top of a line box `line_height` tall; the glyphs are
    /// vertically centred inside it.
    pub fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        px: f32,
        center_x: f32,
        line_top: f32,
        line_height: f32,
    ) {
        let (ascent, descent) = self.ascent_descent(px);
        let half_leading = (line_height - (ascent - descent)) / 2.0;
        let baseline = line_top + half_leading + ascent;
        let start_x = center_x - self.measure(text, px) / 2.0;

        self.draw_glyphs(
            canvas,
            text,
            px,
            start_x + SHADOW_OFFSET as f32,
            baseline + SHADOW_OFFSET as f32,
            SHADOW_COLOR,
            SHADOW_ALPHA,
        );
        self.draw_glyphs(canvas, text, px, start_x, baseline, TEXT_COLOR, 1.0);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_glyphs(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        px: f32,
        start_x: f32,
        baseline: f32,
        color: [u8; 3],
        opacity: f32,
    ) {
        let mut pen_x = start_x;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            if let Some(left) = prev {
                pen_x += self.font.horizontal_kern(left, ch, px).unwrap_or(0.0);
            }
            let (metrics, coverage) = self.font.rasterize(ch, px);
            let origin_x = pen_x.round() as i32 + metrics.xmin;
            let origin_y = baseline.round() as i32 - metrics.height as i32 - metrics.ymin;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col] as f32 / 255.0 * opacity;
                    if alpha <= 0.0 {
                        continue;
                    }
                    blend_pixel(
                        canvas,
                        origin_x + col as i32,
                        origin_y + row as i32,
                        color,
                        alpha,
                    );
                }
            }

            pen_x += metrics.advance_width;
            prev = Some(ch);
        }
    }
}

/// Source-over blend of an opaque `color` at `alpha` onto one pixel.
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: [u8; 3], alpha: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    let Rgba([r, g, b, a]) = *canvas.get_pixel(x as u32, y as u32);
    let mix = |dst: u8, src: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
    let out_alpha = (alpha * 255.0 + a as f32 * (1.0 - alpha)).round() as u8;
    canvas.put_pixel(
        x as u32,
        y as u32,
        Rgba([mix(r, color[0]), mix(g, color[1]), mix(b, color[2]), out_alpha]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_full_alpha_replaces_pixel() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        blend_pixel(&mut canvas, 1, 1, [255, 255, 255], 1.0);
        assert_eq!(canvas.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn blend_half_alpha_mixes() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        blend_pixel(&mut canvas, 0, 0, [200, 100, 50], 0.5);
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn blend_outside_canvas_is_ignored() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));
        blend_pixel(&mut canvas, -1, 0, [255, 255, 255], 1.0);
        blend_pixel(&mut canvas, 0, 5, [255, 255, 255], 1.0);
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn bundled_font_parses_and_measures() {
        let font = CaptionFont::bundled().unwrap();
        let hello = font.measure("HELLO", 24.0);
        assert!(hello > 0.0);
        assert!(font.measure("HELLO HELLO", 24.0) > hello * 2.0);
        assert_eq!(font.measure("", 24.0), 0.0);
    }

    #[test]
    fn missing_preferred_font_falls_back_to_bundled() {
        let font = CaptionFont::load(Some(Path::new("/definitely/not/here/font.ttf"))).unwrap();
        assert_eq!(font.origin, BUNDLED_FONT_NAME);
    }

    #[test]
    fn draw_line_centres_white_text_with_shadow() {
        let font = CaptionFont::bundled().unwrap();
        let mut canvas = RgbaImage::from_pixel(200, 40, Rgba([128, 128, 128, 255]));
        font.draw_line(&mut canvas, "HI", 24.0, 100.0, 4.0, 32.0);

        let white: Vec<u32> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[..3] == [255, 255, 255])
            .map(|(x, _, _)| x)
            .collect();
        assert!(!white.is_empty());
        let (min, max) = (white.iter().min().unwrap(), white.iter().max().unwrap());
        assert!(((min + max) as i32 / 2 - 100).abs() <= 4, "text spans {min}..{max}");

        let shadowed = canvas.pixels().any(|p| p.0[0] < 128 && p.0[0] == p.0[1]);
        assert!(shadowed);
    }

    #[test]
    fn garbage_font_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(matches!(
            CaptionFont::from_path(&path),
            Err(FontError::Parse { .. })
        ));
        assert!(matches!(
            CaptionFont::from_path(&dir.path().join("absent.ttf")),
            Err(FontError::Read { .. })
        ));
    }
}
