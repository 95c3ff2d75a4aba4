use std::collections::BTreeMap;

use super::types::{Day, DayColumn, GridCell, Period, ResolvedPeriod, ScheduleGrid};

const fn periods<const N: usize>(numbers: [u8; N]) -> [Period; N] {
    let mut out = [Period::from_table(1); N];
    let mut i = 0;
    while i < N {
        out[i] = Period::from_table(numbers[i]);
        i += 1;
    }
    out
}

const X_DAY: [Period; 8] = periods([1, 2, 3, 4, 5, 6, 7, 8]);
const DAY_1: [Period; 4] = periods([1, 3, 5, 7]);
const DAY_2: [Period; 4] = periods([2, 4, 6, 8]);
const DAY_3: [Period; 4] = periods([3, 1, 7, 5]);
const DAY_4: [Period; 4] = periods([4, 2, 8, 6]);

/// Periods shown in each day-column, top to bottom
pub const ROTATION: [(Day, &[Period]); 5] = [
    (Day::XDay, &X_DAY),
    (Day::Day1, &DAY_1),
    (Day::Day2, &DAY_2),
    (Day::Day3, &DAY_3),
    (Day::Day4, &DAY_4),
];

/// Rows on a regular day
pub const REGULAR_DAY_ROWS: usize = 4;

const fn rotation_is_well_formed() -> bool {
    let mut day = 0;
    // seen[p] counts how many regular days show period p
    let mut seen = [0u8; 9];
    while day < ROTATION.len() {
        let rows = ROTATION[day].1;
        let expected = if day == 0 { Period::COUNT } else { REGULAR_DAY_ROWS };
        if rows.len() != expected {
            return false;
        }
        let mut i = 0;
        while i < rows.len() {
            let n = rows[i].number();
            if n < 1 || n > 8 {
                return false;
            }
            if day == 0 && n as usize != i + 1 {
                return false;
            }
            if day > 0 {
                seen[n as usize] += 1;
            }
            i += 1;
        }
        day += 1;
    }
    // Every period meets on exactly two of the four regular days
    let mut p = 1;
    while p <= 8 {
        if seen[p] != 2 {
            return false;
        }
        p += 1;
    }
    true
}

const _: () = assert!(rotation_is_well_formed(), "day rotation table is malformed");

/// Arranges resolved periods into the five day-columns.
///
/// A pure reindexing: each cell gets its own copy of the resolved period
/// for the period the rotation table puts there.
pub fn layout_days(resolved: &BTreeMap<Period, ResolvedPeriod>) -> ScheduleGrid {
    let columns = ROTATION
        .iter()
        .map(|(day, rows)| DayColumn {
            day: *day,
            cells: rows
                .iter()
                .map(|period| GridCell {
                    period: *period,
                    resolved: resolved.get(period).cloned().unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    ScheduleGrid { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::ClassEntry;
    use proptest::prelude::*;

    fn resolved_all() -> BTreeMap<Period, ResolvedPeriod> {
        Period::all()
            .map(|p| {
                (
                    p,
                    ResolvedPeriod {
                        primary: ClassEntry::named(format!("Class {}", p)),
                        also_note: String::new(),
                    },
                )
            })
            .collect()
    }

    fn numbers(column: &DayColumn) -> Vec<u8> {
        column.periods().into_iter().map(Period::number).collect()
    }

    #[test]
    fn matches_rotation_table_literally() {
        let grid = layout_days(&resolved_all());

        assert_eq!(numbers(grid.column(Day::XDay)), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(numbers(grid.column(Day::Day1)), vec![1, 3, 5, 7]);
        assert_eq!(numbers(grid.column(Day::Day2)), vec![2, 4, 6, 8]);
        assert_eq!(numbers(grid.column(Day::Day3)), vec![3, 1, 7, 5]);
        assert_eq!(numbers(grid.column(Day::Day4)), vec![4, 2, 8, 6]);
    }

    #[test]
    fn columns_are_in_page_order() {
        let grid = layout_days(&resolved_all());
        let days: Vec<Day> = grid.columns().iter().map(|c| c.day).collect();
        assert_eq!(days, Day::ALL.to_vec());
    }

    #[test]
    fn cells_carry_the_resolved_period() {
        let grid = layout_days(&resolved_all());
        let cell = grid.cell(Day::Day3, 1).unwrap();
        assert_eq!(cell.period.number(), 1);
        assert_eq!(cell.resolved.primary.name, "Class 1");
    }

    #[test]
    fn missing_resolution_becomes_blank_cell() {
        let mut resolved = resolved_all();
        resolved.remove(&Period::new(6).unwrap());

        let grid = layout_days(&resolved);
        let cell = grid.column(Day::Day2).cell_for(Period::new(6).unwrap()).unwrap();
        assert_eq!(cell.resolved, ResolvedPeriod::empty());
    }

    #[test]
    fn rotation_table_is_well_formed() {
        assert!(rotation_is_well_formed());
    }

    proptest! {
        #[test]
        fn x_day_places_each_period_at_its_own_row(n in 1u8..=8) {
            let grid = layout_days(&resolved_all());
            let cell = grid.cell(Day::XDay, (n - 1) as usize).unwrap();
            prop_assert_eq!(cell.period.number(), n);
        }
    }
}
