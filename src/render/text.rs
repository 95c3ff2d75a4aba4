use super::fonts::FontMetrics;
use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub font_size: f64,
    pub lines: Vec<String>,
}

/// Largest whole font size (down to `min_size`) at which `text` fits
/// `max_width`. With `allow_split`, text too wide for one line at
/// `base_size` is broken onto two lines first.
pub fn fit_text(
    metrics: &FontMetrics<'_>,
    text: &str,
    max_width: f64,
    base_size: f64,
    min_size: f64,
    allow_split: bool,
) -> FittedText {
    if metrics.text_width(text, base_size) <= max_width {
        return FittedText {
            font_size: base_size,
            lines: vec![text.to_string()],
        };
    }

    let lines = if allow_split && text.contains(' ') {
        split_two_lines(text)
    } else {
        vec![text.to_string()]
    };

    let mut size = base_size;
    while size >= min_size {
        if lines.iter().all(|line| metrics.text_width(line, size) <= max_width) {
            return FittedText { font_size: size, lines };
        }
        size -= 1.0;
    }

    FittedText {
        font_size: min_size,
        lines,
    }
}

/// Breaks text at the space nearest its middle. The earlier space wins
/// a tie.
pub fn split_two_lines(text: &str) -> Vec<String> {
    let mid = text.len() / 2;
    let spaces = || text.char_indices().filter(|(_, c)| *c == ' ').map(|(i, _)| i);

    let left = spaces().filter(|&i| i < mid).last();
    let right = spaces().find(|&i| i >= mid);

    let split = match (left, right) {
        (None, None) => return vec![text.to_string()],
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (Some(l), Some(r)) => {
            if mid - l <= r - mid {
                l
            } else {
                r
            }
        }
    };

    vec![
        text[..split].trim().to_string(),
        text[split + 1..].trim().to_string(),
    ]
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Fails on characters an XML document cannot carry
pub fn check_renderable(field: &'static str, text: &str) -> Result<(), RenderError> {
    match text
        .chars()
        .find(|&c| (c.is_control() && c != '\t') || c == '\u{FFFE}' || c == '\u{FFFF}')
    {
        Some(ch) => Err(RenderError::UnsupportedCharacter {
            field,
            text: text.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}
