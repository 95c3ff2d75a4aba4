//! Fixed page geometry, in SVG user units.

pub const OTHER_HEIGHT: f64 = 140.0;
pub const CLASS_HEIGHT: f64 = 250.0;
pub const BREAK_HEIGHT: f64 = 80.0;
pub const TITLE_HEIGHT: f64 = 100.0;

pub const COLUMN_WIDTH: f64 = 450.0;
pub const X_DAY_GAP: f64 = 65.0;
pub const MARGIN_X: f64 = 200.0;
pub const MARGIN_Y: f64 = 200.0;
pub const STROKE_WIDTH: f64 = 4.0;
pub const TEXT_PADDING: f64 = 20.0;

/// Height of the day grid below the headers
pub const GRID_HEIGHT: f64 = OTHER_HEIGHT * 3.0 + CLASS_HEIGHT * 4.0 + BREAK_HEIGHT * 2.0;

/// X-Day squeezes eight classes, three breaks, lunch and office hours
/// into the same height as a regular day.
pub const X_DAY_CLASS_HEIGHT: f64 = (GRID_HEIGHT - BREAK_HEIGHT * 3.0 - OTHER_HEIGHT * 2.0) / 8.0;

pub const CANVAS_WIDTH: f64 = MARGIN_X * 2.0 + COLUMN_WIDTH * 6.0 + X_DAY_GAP;
pub const CANVAS_HEIGHT: f64 = MARGIN_Y * 2.0 + TITLE_HEIGHT + GRID_HEIGHT;

pub const GRID_TOP: f64 = MARGIN_Y + TITLE_HEIGHT;
pub const X_DAY_X: f64 = MARGIN_X;
pub const TIMES_X: f64 = MARGIN_X + X_DAY_GAP + COLUMN_WIDTH;
pub const REGULAR_DAYS_X: f64 = MARGIN_X + X_DAY_GAP + COLUMN_WIDTH * 2.0;

pub const CLASS_TEXT_SIZE: f64 = 50.0;
pub const OTHER_TEXT_SIZE: f64 = 40.0;
pub const TIMES_TEXT_SIZE: f64 = 45.0;
pub const TITLE_TEXT_SIZE: f64 = 150.0;
pub const DAY_LABEL_TEXT_SIZE: f64 = 100.0;
pub const DETAIL_TEXT_SIZE: f64 = 30.0;
pub const ALSO_TEXT_SIZE: f64 = 24.0;
pub const X_DAY_NAME_TEXT_SIZE: f64 = 40.0;
pub const X_DAY_DETAIL_TEXT_SIZE: f64 = 26.0;
pub const X_DAY_ALSO_TEXT_SIZE: f64 = 20.0;
pub const MIN_TEXT_SIZE: f64 = 8.0;

pub const OFFICE_HOURS_FILL: &str = "#AB91FA";
pub const BREAK_FILL: &str = "#00B6FF";
pub const LUNCH_FILL: &str = "#A8FA91";
pub const TIMES_FILL: &str = "#888888";
pub const BACKGROUND_FILL: &str = "#FFFFFF";

/// Fill colour for a period's class blocks
pub fn period_fill(period: u8) -> &'static str {
    match period {
        1 => "#91DCFA",
        2 => "#FEF59C",
        3 => "#FFC4E7",
        4 => "#E3B5FB",
        5 => "#FF9795",
        6 => "#A7F0D6",
        7 => "#FDC688",
        _ => "#CCCCCC",
    }
}

/// Left edge of a regular day column, `index` 0-3
pub fn regular_day_x(index: usize) -> f64 {
    REGULAR_DAYS_X + COLUMN_WIDTH * index as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandKind {
    OfficeHours,
    /// Nth class row of the column
    Class(usize),
    Break,
    Lunch,
    Flex,
}

/// A horizontal band of a column, relative to [`GRID_TOP`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub kind: BandKind,
    pub y: f64,
    pub height: f64,
}

fn stack(kinds: &[(BandKind, f64)]) -> Vec<Band> {
    let mut y = 0.0;
    kinds
        .iter()
        .map(|&(kind, height)| {
            let band = Band { kind, y, height };
            y += height;
            band
        })
        .collect()
}

/// Bands of a regular day (and of the Times column), top to bottom
pub fn regular_bands() -> Vec<Band> {
    stack(&[
        (BandKind::OfficeHours, OTHER_HEIGHT),
        (BandKind::Class(0), CLASS_HEIGHT),
        (BandKind::Break, BREAK_HEIGHT),
        (BandKind::Class(1), CLASS_HEIGHT),
        (BandKind::Lunch, OTHER_HEIGHT),
        (BandKind::Class(2), CLASS_HEIGHT),
        (BandKind::Break, BREAK_HEIGHT),
        (BandKind::Class(3), CLASS_HEIGHT),
        (BandKind::Flex, OTHER_HEIGHT),
    ])
}

/// Bands of the X-Day column, top to bottom
pub fn x_day_bands() -> Vec<Band> {
    let class = |row| (BandKind::Class(row), X_DAY_CLASS_HEIGHT);
    stack(&[
        (BandKind::OfficeHours, OTHER_HEIGHT),
        class(0),
        class(1),
        (BandKind::Break, BREAK_HEIGHT),
        class(2),
        class(3),
        (BandKind::Break, BREAK_HEIGHT),
        class(4),
        (BandKind::Lunch, OTHER_HEIGHT),
        class(5),
        class(6),
        (BandKind::Break, BREAK_HEIGHT),
        class(7),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_size() {
        assert_eq!(CANVAS_WIDTH, 3165.0);
        assert_eq!(CANVAS_HEIGHT, 2080.0);
        assert_eq!(X_DAY_CLASS_HEIGHT, 132.5);
    }

    #[test]
    fn both_columns_fill_the_grid() {
        for bands in [regular_bands(), x_day_bands()] {
            let last = bands.last().unwrap();
            assert_eq!(last.y + last.height, GRID_HEIGHT);
        }
    }

    #[test]
    fn class_rows_are_numbered_in_order() {
        let rows: Vec<usize> = x_day_bands()
            .iter()
            .filter_map(|b| match b.kind {
                BandKind::Class(row) => Some(row),
                _ => None,
            })
            .collect();
        assert_eq!(rows, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn regular_class_rows_sit_between_shared_bands() {
        let ys: Vec<f64> = regular_bands()
            .iter()
            .filter(|b| matches!(b.kind, BandKind::Class(_)))
            .map(|b| b.y)
            .collect();
        assert_eq!(ys, vec![140.0, 470.0, 860.0, 1190.0]);
    }
}
