pub mod types;
pub mod normalize;
pub mod resolve;
pub mod layout;
pub mod substitute;

use std::collections::BTreeMap;

pub use types::{ClassEntry, Day, DayColumn, GridCell, Period, PeriodAssignments, ResolvedPeriod, ScheduleGrid};
pub use normalize::{normalize, Normalized, MAX_EMPTY_PERIODS};
pub use resolve::{resolve_period, SelectionRule, TieBreakPolicy, FOUNDATIONS};
pub use layout::{layout_days, ROTATION};
pub use substitute::{substitute_free_periods, DEFAULT_FREE_PERIOD_NAME};

/// Resolves every period of a validated schedule
pub fn resolve_all(
    assignments: &PeriodAssignments,
    policy: &TieBreakPolicy,
) -> BTreeMap<Period, ResolvedPeriod> {
    assignments
        .iter()
        .map(|(period, entries)| (period, resolve_period(entries, policy)))
        .collect()
}

/// Resolution, layout and substitution for already-normalized data
pub fn compose_grid(
    assignments: &PeriodAssignments,
    policy: &TieBreakPolicy,
    free_period_name: &str,
) -> ScheduleGrid {
    let resolved = resolve_all(assignments, policy);
    let grid = layout_days(&resolved);
    substitute_free_periods(&grid, free_period_name)
}
