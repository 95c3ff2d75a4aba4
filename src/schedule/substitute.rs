use log::debug;

use super::resolve::FOUNDATIONS;
use super::types::{Day, ScheduleGrid};

pub const DEFAULT_FREE_PERIOD_NAME: &str = "Study Period";

/// Renames Foundations classes on the X-Day column.
///
/// X-Day has no Foundations meeting, so any X-Day cell whose primary name
/// contains "Foundations" shows `free_period_name` instead. Room, teacher
/// and the also-note are left alone, as is every regular-day column. An
/// empty `free_period_name` turns the rule off.
pub fn substitute_free_periods(grid: &ScheduleGrid, free_period_name: &str) -> ScheduleGrid {
    let mut substituted = grid.clone();
    if free_period_name.is_empty() {
        return substituted;
    }

    for column in substituted.columns.iter_mut().filter(|c| c.day == Day::XDay) {
        for cell in column.cells.iter_mut() {
            if cell.resolved.primary.name.contains(FOUNDATIONS) {
                debug!(
                    "X Day period {}: showing '{}' instead of '{}'",
                    cell.period, free_period_name, cell.resolved.primary.name
                );
                cell.resolved.primary.name = free_period_name.to_string();
            }
        }
    }

    substituted
}
