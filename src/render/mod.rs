//! SVG rendering of a composed timetable.
//!
//! The document is self-contained: no fonts, images or stylesheets are
//! fetched, so it prints as-is from a browser.

pub mod fonts;
pub mod geometry;
pub mod text;
pub mod times;

use std::fmt::{self, Write};

use log::debug;

use crate::error::RenderError;
use crate::schedule::{Day, GridCell, ScheduleGrid};
use geometry::*;
use fonts::{font_face_css, FontMetrics, BODY_FAMILY, TITLE_FAMILY};
use text::{check_renderable, escape_xml, fit_text};
pub use times::{BellSchedule, TimeRange};

pub const DEFAULT_TITLE: &str = "Upper School Timetable";

const STYLE_RULES: &str = "\
text{text-anchor:middle;dominant-baseline:central;fill:#000000}\
text.time{fill:#FFFFFF}\
text.also{fill:#666666}";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub bell_schedule: BellSchedule,
    /// Pixel width/height on the root element; otherwise 100% for
    /// responsive previews
    pub exact_dimensions: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            bell_schedule: BellSchedule::default(),
            exact_dimensions: true,
        }
    }
}

/// A finished SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    markup: String,
}

impl SvgDocument {
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn into_string(self) -> String {
        self.markup
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// Accumulates SVG elements
struct Canvas {
    out: String,
}

impl Canvas {
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> fmt::Result {
        writeln!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="black" stroke-width="{}"/>"#,
            x, y, width, height, fill, STROKE_WIDTH
        )
    }

    /// Empty text emits nothing
    fn text(&mut self, x: f64, y: f64, size: f64, class: Option<&str>, content: &str) -> fmt::Result {
        if content.is_empty() {
            return Ok(());
        }
        let class = class.map(|c| format!(r#" class="{}""#, c)).unwrap_or_default();
        writeln!(
            self.out,
            r#"<text x="{}" y="{}" font-size="{}"{}>{}</text>"#,
            x,
            y,
            size,
            class,
            escape_xml(content)
        )
    }
}

/// Draws the timetable for a composed grid.
pub fn render_svg(grid: &ScheduleGrid, options: &RenderOptions) -> Result<SvgDocument, RenderError> {
    check_renderable("title", &options.title)?;
    for column in grid.columns() {
        for cell in &column.cells {
            let primary = &cell.resolved.primary;
            check_renderable("name", &primary.name)?;
            check_renderable("room", &primary.room)?;
            check_renderable("teacher", &primary.teacher)?;
            check_renderable("also note", &cell.resolved.also_note)?;
        }
    }

    let (width, height) = if options.exact_dimensions {
        (CANVAS_WIDTH.to_string(), CANVAS_HEIGHT.to_string())
    } else {
        ("100%".to_string(), "100%".to_string())
    };

    let mut canvas = Canvas { out: String::new() };
    writeln!(
        canvas.out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet">"#,
        width, height, CANVAS_WIDTH, CANVAS_HEIGHT
    )?;
    let metrics = fonts::body()?;
    writeln!(
        canvas.out,
        "<style>{}text{{font-family:\"{}\",sans-serif}}text.title{{font-family:\"{}\",sans-serif;font-weight:bold}}{}</style>",
        font_face_css(),
        BODY_FAMILY,
        TITLE_FAMILY,
        STYLE_RULES
    )?;

    draw_titles(&mut canvas, &options.title)?;
    for (index, column) in grid.columns().iter().filter(|c| c.day.is_regular()).enumerate() {
        draw_day(&mut canvas, &metrics, regular_day_x(index), &column.cells)?;
    }
    draw_shared_bands(&mut canvas)?;
    draw_times(&mut canvas, &options.bell_schedule)?;
    draw_x_day(&mut canvas, &metrics, &grid.column(Day::XDay).cells, &options.bell_schedule)?;

    canvas.out.push_str("</svg>\n");
    debug!("Rendered SVG: {} bytes", canvas.out.len());

    Ok(SvgDocument { markup: canvas.out })
}

fn draw_titles(canvas: &mut Canvas, title: &str) -> fmt::Result {
    canvas.out.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND_FILL
    ));

    let label_y = GRID_TOP * 0.85;
    canvas.text(CANVAS_WIDTH / 2.0, label_y / 2.0, TITLE_TEXT_SIZE, Some("title"), title)?;
    canvas.text(
        X_DAY_X + COLUMN_WIDTH / 2.0,
        label_y,
        DAY_LABEL_TEXT_SIZE,
        Some("title"),
        Day::XDay.label(),
    )?;
    for (index, day) in Day::ALL.iter().filter(|d| d.is_regular()).enumerate() {
        canvas.text(
            regular_day_x(index) + COLUMN_WIDTH / 2.0,
            label_y,
            DAY_LABEL_TEXT_SIZE,
            Some("title"),
            day.label(),
        )?;
    }
    Ok(())
}

/// One regular day: four class blocks plus the blank flex block
fn draw_day(canvas: &mut Canvas, metrics: &FontMetrics<'_>, x: f64, cells: &[GridCell]) -> fmt::Result {
    let center = x + COLUMN_WIDTH / 2.0;
    let max_width = COLUMN_WIDTH - TEXT_PADDING;

    for band in regular_bands() {
        let y = GRID_TOP + band.y;
        let cell = match band.kind {
            BandKind::Class(row) => match cells.get(row) {
                Some(cell) => cell,
                None => continue,
            },
            BandKind::Flex => {
                canvas.rect(x, y, COLUMN_WIDTH, band.height, BACKGROUND_FILL)?;
                continue;
            }
            _ => continue,
        };

        canvas.rect(x, y, COLUMN_WIDTH, band.height, period_fill(cell.period.number()))?;

        let primary = &cell.resolved.primary;
        let fitted = fit_text(metrics, &primary.name, max_width, CLASS_TEXT_SIZE, MIN_TEXT_SIZE, true);
        match fitted.lines.as_slice() {
            [first, second] => {
                canvas.text(center, y + band.height * 0.35, fitted.font_size, None, first)?;
                canvas.text(center, y + band.height * 0.60, fitted.font_size, None, second)?;
            }
            _ => canvas.text(center, y + band.height * 0.5, fitted.font_size, None, &primary.name)?,
        }

        canvas.text(center, y + band.height * 0.15, DETAIL_TEXT_SIZE, None, &primary.teacher)?;
        if cell.resolved.has_also_note() {
            let note = fit_text(metrics, &cell.resolved.also_note, max_width, ALSO_TEXT_SIZE, MIN_TEXT_SIZE, false);
            canvas.text(center, y + band.height * 0.74, note.font_size, Some("also"), &cell.resolved.also_note)?;
        }
        canvas.text(center, y + band.height * 0.85, DETAIL_TEXT_SIZE, None, &primary.room)?;
    }
    Ok(())
}

/// Office hours, breaks, lunch and the flex row, spanning all four
/// regular days
fn draw_shared_bands(canvas: &mut Canvas) -> fmt::Result {
    let x = REGULAR_DAYS_X;
    let w = COLUMN_WIDTH;

    for band in regular_bands() {
        let y = GRID_TOP + band.y;
        let middle = y + band.height / 2.0;
        match band.kind {
            BandKind::OfficeHours => {
                canvas.rect(x, y, w * 2.0, band.height, OFFICE_HOURS_FILL)?;
                canvas.rect(x + w * 2.0, y, w, band.height, OFFICE_HOURS_FILL)?;
                canvas.rect(x + w * 3.0, y, w, band.height, OFFICE_HOURS_FILL)?;
                canvas.text(x + w, middle, OTHER_TEXT_SIZE, None, "Office Hours")?;
                canvas.text(x + w * 2.5, middle, OTHER_TEXT_SIZE, None, "Faculty Meeting")?;
                canvas.text(x + w * 3.5, middle, OTHER_TEXT_SIZE, None, "Office Hours")?;
            }
            BandKind::Break => {
                canvas.rect(x, y, w * 4.0, band.height, BREAK_FILL)?;
                canvas.text(x + w * 2.0, middle, OTHER_TEXT_SIZE, None, "Break")?;
            }
            BandKind::Lunch => {
                canvas.rect(x, y, w * 4.0, band.height, LUNCH_FILL)?;
                canvas.text(x + w * 2.0, middle, CLASS_TEXT_SIZE, None, "Lunch")?;
            }
            BandKind::Flex => {
                let labels = ["Flex 1 or Flex 3", "Advisory", "Flex 2 or Flex 4", "Assembly"];
                for (i, label) in labels.iter().enumerate() {
                    let cx = x + w * (i as f64 + 0.5);
                    canvas.text(cx, y + band.height * 0.35, OTHER_TEXT_SIZE, None, label)?;
                    canvas.text(cx, y + band.height * 0.65, OTHER_TEXT_SIZE, None, "and or office hours")?;
                }
            }
            BandKind::Class(_) => {}
        }
    }
    Ok(())
}

fn draw_times(canvas: &mut Canvas, bells: &BellSchedule) -> fmt::Result {
    let center = TIMES_X + COLUMN_WIDTH / 2.0;
    for (band, range) in regular_bands().iter().zip(bells.regular_bands.iter()) {
        let y = GRID_TOP + band.y;
        canvas.rect(TIMES_X, y, COLUMN_WIDTH, band.height, TIMES_FILL)?;
        canvas.text(center, y + band.height / 2.0, TIMES_TEXT_SIZE, Some("time"), &range.label())?;
    }
    Ok(())
}

/// The X-Day column: eight short class blocks with their own clock times
fn draw_x_day(
    canvas: &mut Canvas,
    metrics: &FontMetrics<'_>,
    cells: &[GridCell],
    bells: &BellSchedule,
) -> fmt::Result {
    let x = X_DAY_X;
    let center = x + COLUMN_WIDTH / 2.0;
    let max_width = COLUMN_WIDTH - TEXT_PADDING;
    let mut breaks = bells.x_day_breaks.iter();

    for band in x_day_bands() {
        let y = GRID_TOP + band.y;
        match band.kind {
            BandKind::OfficeHours => {
                canvas.rect(x, y, COLUMN_WIDTH, band.height, OFFICE_HOURS_FILL)?;
                canvas.text(center, y + band.height / 2.0, OTHER_TEXT_SIZE, None, "Office Hours")?;
            }
            BandKind::Break => {
                canvas.rect(x, y, COLUMN_WIDTH, band.height, BREAK_FILL)?;
                let label = breaks
                    .next()
                    .map(|r| format!("Break {}", r.label()))
                    .unwrap_or_else(|| "Break".to_string());
                canvas.text(center, y + band.height / 2.0, OTHER_TEXT_SIZE, None, &label)?;
            }
            BandKind::Lunch => {
                canvas.rect(x, y, COLUMN_WIDTH, band.height, LUNCH_FILL)?;
                canvas.text(center, y + band.height * 0.3, CLASS_TEXT_SIZE, None, "Lunch")?;
                canvas.text(center, y + band.height * 0.7, OTHER_TEXT_SIZE, None, &bells.x_day_lunch.label())?;
            }
            BandKind::Class(row) => {
                let Some(cell) = cells.get(row) else { continue };
                canvas.rect(x, y, COLUMN_WIDTH, band.height, period_fill(cell.period.number()))?;

                let primary = &cell.resolved.primary;
                let details = [primary.room.as_str(), primary.teacher.as_str()]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" · ");
                let time = bells.x_day_periods.get(row).map(TimeRange::label).unwrap_or_default();

                // Line positions depend on whether an also-note needs room
                let rows: &[f64] = if cell.resolved.has_also_note() {
                    &[0.20, 0.43, 0.64, 0.85]
                } else {
                    &[0.27, 0.53, 0.80]
                };

                let name = fit_text(metrics, &primary.name, max_width, X_DAY_NAME_TEXT_SIZE, MIN_TEXT_SIZE, false);
                canvas.text(center, y + band.height * rows[0], name.font_size, None, &primary.name)?;

                let detail = fit_text(metrics, &details, max_width, X_DAY_DETAIL_TEXT_SIZE, MIN_TEXT_SIZE, false);
                canvas.text(center, y + band.height * rows[1], detail.font_size, None, &details)?;

                if cell.resolved.has_also_note() {
                    let note = fit_text(metrics, &cell.resolved.also_note, max_width, X_DAY_ALSO_TEXT_SIZE, MIN_TEXT_SIZE, false);
                    canvas.text(center, y + band.height * rows[2], note.font_size, Some("also"), &cell.resolved.also_note)?;
                }
                canvas.text(center, y + band.height * rows[rows.len() - 1], X_DAY_DETAIL_TEXT_SIZE, None, &time)?;
            }
            BandKind::Flex => {}
        }
    }
    Ok(())
}
