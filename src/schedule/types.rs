use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight daily instructional slots, numbered 1-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

impl Period {
    pub const COUNT: usize = 8;

    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT as u8).contains(&number).then_some(Period(number))
    }

    /// Builds a period from a number known to be in range (rotation table data).
    pub(crate) const fn from_table(number: u8) -> Self {
        Period(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// All eight periods in ascending order
    pub fn all() -> impl Iterator<Item = Period> {
        (1..=Self::COUNT as u8).map(Period)
    }
}

impl TryFrom<u8> for Period {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Period::new(number).ok_or_else(|| format!("period {} is outside 1-8", number))
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> u8 {
        period.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate class for a period. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    pub room: String,
    pub teacher: String,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>, room: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            room: room.into(),
            teacher: teacher.into(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "", "")
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Validated class entries for all eight periods.
///
/// Entry order within a period is the order the input supplied and
/// decides which entry wins when nothing else does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodAssignments {
    periods: BTreeMap<Period, Vec<ClassEntry>>,
}

impl PeriodAssignments {
    /// Missing periods are filled with an empty entry list.
    pub(crate) fn from_map(mut periods: BTreeMap<Period, Vec<ClassEntry>>) -> Self {
        for period in Period::all() {
            periods.entry(period).or_default();
        }
        Self { periods }
    }

    pub fn entries(&self, period: Period) -> &[ClassEntry] {
        self.periods.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, &[ClassEntry])> {
        self.periods.iter().map(|(p, entries)| (*p, entries.as_slice()))
    }

    /// Periods with no named class
    pub fn empty_periods(&self) -> Vec<Period> {
        self.iter()
            .filter(|(_, entries)| !entries.iter().any(ClassEntry::has_name))
            .map(|(p, _)| p)
            .collect()
    }
}

/// The outcome of resolving one period's competing entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    pub primary: ClassEntry,
    /// Summary of every entry that lost, or an empty string
    pub also_note: String,
}

impl ResolvedPeriod {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_also_note(&self) -> bool {
        !self.also_note.is_empty()
    }
}

/// The five day-columns of the printed timetable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    XDay,
    Day1,
    Day2,
    Day3,
    Day4,
}

impl Day {
    /// Column order on the page
    pub const ALL: [Day; 5] = [Day::XDay, Day::Day1, Day::Day2, Day::Day3, Day::Day4];

    pub fn label(self) -> &'static str {
        match self {
            Day::XDay => "X Day",
            Day::Day1 => "Day 1",
            Day::Day2 => "Day 2",
            Day::Day3 => "Day 3",
            Day::Day4 => "Day 4",
        }
    }

    pub fn is_regular(self) -> bool {
        !matches!(self, Day::XDay)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Day::XDay => 0,
            Day::Day1 => 1,
            Day::Day2 => 2,
            Day::Day3 => 3,
            Day::Day4 => 4,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a day-column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub period: Period,
    pub resolved: ResolvedPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub day: Day,
    pub cells: Vec<GridCell>,
}

impl DayColumn {
    pub fn periods(&self) -> Vec<Period> {
        self.cells.iter().map(|c| c.period).collect()
    }

    pub fn cell_for(&self, period: Period) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.period == period)
    }
}

/// All five day-columns, in page order. Every cell owns its own copy
/// of the resolved period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    pub(crate) columns: Vec<DayColumn>,
}

impl ScheduleGrid {
    pub fn columns(&self) -> &[DayColumn] {
        &self.columns
    }

    pub fn column(&self, day: Day) -> &DayColumn {
        &self.columns[day.index()]
    }

    pub fn cell(&self, day: Day, row: usize) -> Option<&GridCell> {
        self.column(day).cells.get(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_rejects_out_of_range() {
        assert!(Period::new(0).is_none());
        assert!(Period::new(9).is_none());
        assert_eq!(Period::new(8).map(Period::number), Some(8));
    }

    #[test]
    fn period_all_is_one_through_eight() {
        let numbers: Vec<u8> = Period::all().map(Period::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn assignments_fill_missing_periods() {
        let mut map = BTreeMap::new();
        map.insert(Period::new(3).unwrap(), vec![ClassEntry::named("Chemistry")]);
        let assignments = PeriodAssignments::from_map(map);

        assert_eq!(assignments.iter().count(), 8);
        assert_eq!(assignments.entries(Period::new(3).unwrap())[0].name, "Chemistry");
        assert_eq!(assignments.empty_periods().len(), 7);
    }

    #[test]
    fn period_with_only_blank_names_is_empty() {
        let mut map = BTreeMap::new();
        for period in Period::all() {
            map.insert(period, vec![ClassEntry::named(format!("Class {}", period))]);
        }
        map.insert(Period::new(4).unwrap(), vec![ClassEntry::new("", "Room 4", "")]);
        let assignments = PeriodAssignments::from_map(map);

        assert_eq!(assignments.empty_periods(), vec![Period::new(4).unwrap()]);
    }
}
