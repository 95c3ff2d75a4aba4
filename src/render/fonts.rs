//! Fonts embedded in every document, and the metrics used to fit text.
//!
//! The same bytes are measured here and shipped as `@font-face` data, so
//! line breaks and shrink-to-fit sizes match what a viewer draws.

use std::sync::OnceLock;

use base64::prelude::*;
use ttf_parser::Face;

use crate::error::RenderError;

pub const BODY_FAMILY: &str = "DejaVu Sans";
pub const TITLE_FAMILY: &str = "DejaVu Sans Condensed";

const BODY_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
const TITLE_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSansCondensed-Bold.ttf");

/// Horizontal advances of one embedded face
pub struct FontMetrics<'a> {
    face: Face<'a>,
    units_per_em: f64,
    missing_advance: f64,
}

impl<'a> FontMetrics<'a> {
    pub fn parse(family: &'static str, data: &'a [u8]) -> Result<Self, RenderError> {
        let face = Face::parse(data, 0).map_err(|e| RenderError::Font {
            family,
            reason: e.to_string(),
        })?;
        let units_per_em = f64::from(face.units_per_em());
        // Glyph 0 is .notdef, which is what a viewer draws for unknown characters
        let missing_advance = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map(f64::from)
            .unwrap_or(units_per_em / 2.0);

        Ok(Self {
            face,
            units_per_em,
            missing_advance,
        })
    }

    /// Width of `text` set on one line at `font_size`
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let units: f64 = text
            .chars()
            .map(|ch| {
                self.face
                    .glyph_index(ch)
                    .and_then(|id| self.face.glyph_hor_advance(id))
                    .map(f64::from)
                    .unwrap_or(self.missing_advance)
            })
            .sum();
        units / self.units_per_em * font_size
    }
}

/// Metrics for the face used by class names, details and notes
pub fn body() -> Result<FontMetrics<'static>, RenderError> {
    FontMetrics::parse(BODY_FAMILY, BODY_FONT)
}

/// `@font-face` rules carrying both fonts as data URIs
pub fn font_face_css() -> &'static str {
    static CSS: OnceLock<String> = OnceLock::new();
    CSS.get_or_init(|| {
        [(BODY_FAMILY, BODY_FONT), (TITLE_FAMILY, TITLE_FONT)]
            .iter()
            .map(|(family, data)| {
                format!(
                    "@font-face{{font-family:\"{}\";src:url(\"data:font/ttf;base64,{}\") format(\"truetype\")}}",
                    family,
                    BASE64_STANDARD.encode(data)
                )
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fonts_parse() {
        assert!(body().is_ok());
        assert!(FontMetrics::parse(TITLE_FAMILY, TITLE_FONT).is_ok());
    }

    #[test]
    fn widths_scale_with_size() {
        let metrics = body().unwrap();
        let small = metrics.text_width("Graphic Design", 20.0);
        let large = metrics.text_width("Graphic Design", 40.0);
        assert!(small > 0.0);
        assert!((large - small * 2.0).abs() < 1e-9);
    }

    #[test]
    fn wide_glyphs_measure_wider() {
        let metrics = body().unwrap();
        assert!(metrics.text_width("WWWW", 50.0) > metrics.text_width("iiii", 50.0));
        assert_eq!(metrics.text_width("", 50.0), 0.0);
    }

    #[test]
    fn unknown_characters_still_take_space() {
        let metrics = body().unwrap();
        assert!(metrics.text_width("\u{10FFFD}", 50.0) > 0.0);
    }

    #[test]
    fn rejects_bytes_that_are_not_a_font() {
        let err = FontMetrics::parse(BODY_FAMILY, b"not a font").err().unwrap();
        assert!(matches!(err, RenderError::Font { family: "DejaVu Sans", .. }));
    }

    #[test]
    fn css_embeds_both_families() {
        let css = font_face_css();
        assert_eq!(css.matches("@font-face").count(), 2);
        assert!(css.contains("font-family:\"DejaVu Sans\""));
        assert!(css.contains("font-family:\"DejaVu Sans Condensed\""));
        assert!(css.contains("data:font/ttf;base64,AAEAAA"));
    }
}
