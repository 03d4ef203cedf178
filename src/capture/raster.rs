use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use reqwest::Url;
use std::io::Cursor;

use crate::capture::composition::{wrap_words, Composition};
use crate::capture::error::CaptureError;
use crate::capture::text::{blend_pixel, CaptionFont};

/// Bounds of the captured element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Knobs of the capture call.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Capture images served from another origin.
    pub allow_cross_origin: bool,
    /// Origin of the page doing the capture.
    pub origin: Option<Url>,
    /// Scroll applied to the region; document = region - scroll.
    pub scroll_x: i64,
    pub scroll_y: i64,
    /// Fill for pixels not covered by the composition.
    pub background: Rgba<u8>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            allow_cross_origin: false,
            origin: None,
            scroll_x: 0,
            scroll_y: 0,
            background: Rgba([255, 255, 255, 255]),
        }
    }
}

/// A captured, pixel-encoded composition.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CaptureError> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// `data:image/png;base64,...`
    pub fn to_data_url(&self) -> Result<String, CaptureError> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

/// Rasterizes the part of `document` that `region` covers.
pub fn capture(
    document: &Composition,
    font: &CaptionFont,
    region: CaptureRegion,
    options: &CaptureOptions,
) -> Result<RasterImage, CaptureError> {
    if region.width == 0 || region.height == 0 {
        return Err(CaptureError::EmptyRegion {
            width: region.width,
            height: region.height,
        });
    }

    if !options.allow_cross_origin && is_cross_origin(&document.source_url, options.origin.as_ref()) {
        return Err(CaptureError::TaintedSource {
            source_url: document.source_url.clone(),
        });
    }

    let rendered = render_document(document, font, options.background);

    let doc_x = region.x - options.scroll_x;
    let doc_y = region.y - options.scroll_y;
    let mut output = RgbaImage::from_pixel(region.width, region.height, options.background);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let src_x = doc_x + i64::from(x);
        let src_y = doc_y + i64::from(y);
        if src_x < 0 || src_y < 0 {
            continue;
        }
        if let Some(src) = rendered.get_pixel_checked(src_x as u32, src_y as u32) {
            *pixel = *src;
        }
    }

    Ok(RasterImage::new(output))
}

fn is_cross_origin(source_url: &str, origin: Option<&Url>) -> bool {
    let Some(origin) = origin else {
        return false;
    };
    match Url::parse(source_url) {
        Ok(source) => source.origin() != origin.origin(),
        Err(_) => true,
    }
}

/// Draws the composition at its display size in document coordinates.
fn render_document(document: &Composition, font: &CaptionFont, background: Rgba<u8>) -> RgbaImage {
    let (width, height) = document.size();
    let layout = document.layout;

    let scaled = imageops::resize(document.image.as_ref(), width, height, FilterType::Triangle);
    let mut canvas = RgbaImage::from_pixel(width, height, background);
    for (x, y, src) in scaled.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *src;
        blend_pixel(&mut canvas, x as i32, y as i32, [r, g, b], a as f32 / 255.0);
    }

    if !document.has_captions() {
        return canvas;
    }

    let px = layout.caption_px;
    let line_height = layout.line_height();
    let center_x = width as f32 / 2.0;
    let measure = |line: &str| font.measure(line, px);

    let top_lines = wrap_words(&document.top, layout.caption_max_width(), measure);
    for (i, line) in top_lines.iter().enumerate() {
        let line_top = layout.inset as f32 + i as f32 * line_height;
        font.draw_line(&mut canvas, line, px, center_x, line_top, line_height);
    }

    let bottom_lines = wrap_words(&document.bottom, layout.caption_max_width(), measure);
    let block_top = height as f32 - layout.inset as f32 - bottom_lines.len() as f32 * line_height;
    for (i, line) in bottom_lines.iter().enumerate() {
        let line_top = block_top + i as f32 * line_height;
        font.draw_line(&mut canvas, line, px, center_x, line_top, line_height);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::composition::CompositionLayout;
    use std::sync::Arc;

    fn striped_document() -> Composition {
        // 4x4 source, each row a distinct grey level; displayed at 4px wide.
        let mut img = RgbaImage::new(4, 4);
        for (_, y, px) in img.enumerate_pixels_mut() {
            let v = (y * 60) as u8;
            *px = Rgba([v, v, v, 255]);
        }
        Composition {
            image: Arc::new(img),
            source_url: "https://i.imgflip.com/x.png".to_string(),
            top: String::new(),
            bottom: String::new(),
            layout: CompositionLayout {
                width: 4,
                caption_px: 24.0,
                inset: 8,
            },
        }
    }

    fn font() -> CaptionFont {
        CaptionFont::bundled().unwrap()
    }

    fn full_region(doc: &Composition, scroll: i64) -> CaptureRegion {
        let (w, h) = doc.size();
        CaptureRegion::new(0, -scroll, w, h)
    }

    #[test]
    fn empty_region_is_rejected() {
        let doc = striped_document();
        let err = capture(&doc, &font(), CaptureRegion::new(0, 0, 0, 4), &CaptureOptions::default())
            .unwrap_err();
        assert!(matches!(err, CaptureError::EmptyRegion { width: 0, height: 4 }));
    }

    #[test]
    fn scroll_compensation_yields_same_pixels() {
        let doc = striped_document();
        let unscrolled = capture(&doc, &font(), full_region(&doc, 0), &CaptureOptions::default()).unwrap();

        let options = CaptureOptions {
            scroll_y: -2,
            ..CaptureOptions::default()
        };
        let scrolled = capture(&doc, &font(), full_region(&doc, 2), &options).unwrap();
        assert_eq!(unscrolled, scrolled);
    }

    #[test]
    fn missing_compensation_shifts_output() {
        let doc = striped_document();
        let reference = capture(&doc, &font(), full_region(&doc, 0), &CaptureOptions::default()).unwrap();
        let shifted = capture(&doc, &font(), full_region(&doc, 2), &CaptureOptions::default()).unwrap();
        assert_ne!(reference, shifted);
        // Top rows fall outside the document and show the background.
        assert_eq!(shifted.pixels().get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(shifted.pixels().get_pixel(0, 2), reference.pixels().get_pixel(0, 0));
    }

    #[test]
    fn cross_origin_blocked_unless_allowed() {
        let doc = striped_document();
        let origin = Url::parse("https://api.imgflip.com/get_memes").ok();
        let blocked = CaptureOptions {
            origin: origin.clone(),
            ..CaptureOptions::default()
        };
        let err = capture(&doc, &font(), full_region(&doc, 0), &blocked).unwrap_err();
        assert!(matches!(err, CaptureError::TaintedSource { .. }));

        let allowed = CaptureOptions {
            allow_cross_origin: true,
            origin,
            ..CaptureOptions::default()
        };
        assert!(capture(&doc, &font(), full_region(&doc, 0), &allowed).is_ok());
    }

    #[test]
    fn same_origin_needs_no_permission() {
        let doc = striped_document();
        let options = CaptureOptions {
            origin: Url::parse("https://i.imgflip.com/").ok(),
            ..CaptureOptions::default()
        };
        assert!(capture(&doc, &font(), full_region(&doc, 0), &options).is_ok());
    }

    /// Black 384x384 composition with the default layout.
    fn captioned_document(top: &str, bottom: &str) -> Composition {
        Composition {
            image: Arc::new(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]))),
            source_url: "https://i.imgflip.com/x.png".to_string(),
            top: top.to_string(),
            bottom: bottom.to_string(),
            layout: CompositionLayout::default(),
        }
    }

    /// Rows `rows` contain caption-white pixels.
    fn has_white(image: &RgbaImage, rows: std::ops::Range<u32>) -> bool {
        rows.flat_map(|y| (0..image.width()).map(move |x| (x, y)))
            .any(|(x, y)| image.get_pixel(x, y).0[..3] == [255, 255, 255])
    }

    #[test]
    fn captions_sit_at_top_and_bottom_insets() {
        let doc = captioned_document("HELLO", "WORLD");
        let out = capture(&doc, &font(), full_region(&doc, 0), &CaptureOptions::default()).unwrap();
        let image = out.pixels();
        assert_eq!(image.dimensions(), (384, 384));

        // Line boxes are 32px tall: top at 8..40, bottom at 344..376.
        assert!(has_white(image, 8..40));
        assert!(has_white(image, 344..376));
        assert!(!has_white(image, 0..6));
        assert!(!has_white(image, 48..336));
        assert!(!has_white(image, 378..384));
    }

    #[test]
    fn captions_are_centred() {
        let doc = captioned_document("HELLO", "");
        let out = capture(&doc, &font(), full_region(&doc, 0), &CaptureOptions::default()).unwrap();
        let xs: Vec<u32> = out
            .pixels()
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[..3] == [255, 255, 255])
            .map(|(x, _, _)| x)
            .collect();
        let (min, max) = (*xs.iter().min().unwrap(), *xs.iter().max().unwrap());
        assert!(((min + max) as i32 / 2 - 192).abs() <= 4, "caption spans {min}..{max}");
    }

    #[test]
    fn long_top_caption_wraps_downward_and_bottom_grows_upward() {
        let long = "HELLO WORLD HELLO WORLD HELLO WORLD";
        let doc = captioned_document(long, long);
        let out = capture(&doc, &font(), full_region(&doc, 0), &CaptureOptions::default()).unwrap();
        let image = out.pixels();

        // Second top line below the first, second-to-last bottom line above the last.
        assert!(has_white(image, 42..70));
        assert!(has_white(image, 314..342));
        assert!(!has_white(image, 120..260));
    }

    #[test]
    fn transparent_pixels_take_background() {
        let mut doc = striped_document();
        doc.image = Arc::new(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])));
        let options = CaptureOptions {
            background: Rgba([10, 20, 30, 255]),
            ..CaptureOptions::default()
        };
        let out = capture(&doc, &font(), full_region(&doc, 0), &options).unwrap();
        assert!(out.pixels().pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn data_url_is_png() {
        let raster = RasterImage::new(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let url = raster.to_data_url().unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
