use chrono::{NaiveTime, Timelike};

/// A start-end pair of clock times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// `8:30 - 9:45 a.m.`, or `11:50 a.m. - 1:05 p.m.` across noon
    pub fn label(&self) -> String {
        if is_pm(self.start) == is_pm(self.end) {
            format!("{} - {} {}", clock(self.start), clock(self.end), meridiem(self.end))
        } else {
            format!(
                "{} {} - {} {}",
                clock(self.start),
                meridiem(self.start),
                clock(self.end),
                meridiem(self.end)
            )
        }
    }
}

fn is_pm(time: NaiveTime) -> bool {
    time.hour12().0
}

fn clock(time: NaiveTime) -> String {
    format!("{}:{:02}", time.hour12().1, time.minute())
}

fn meridiem(time: NaiveTime) -> &'static str {
    if is_pm(time) {
        "p.m."
    } else {
        "a.m."
    }
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange::new(at(start.0, start.1), at(end.0, end.1))
}

/// Clock times printed on the timetable.
///
/// `regular_bands` labels the Times column from top to bottom: office
/// hours, class, break, class, lunch, class, break, class, flex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BellSchedule {
    pub regular_bands: [TimeRange; 9],
    pub x_day_periods: [TimeRange; 8],
    /// After periods 2, 4 and 7
    pub x_day_breaks: [TimeRange; 3],
    /// After period 5
    pub x_day_lunch: TimeRange,
}

impl Default for BellSchedule {
    fn default() -> Self {
        Self {
            regular_bands: [
                range((7, 50), (8, 20)),
                range((8, 30), (9, 45)),
                range((9, 45), (9, 55)),
                range((9, 55), (11, 10)),
                range((11, 10), (11, 50)),
                range((11, 50), (13, 5)),
                range((13, 5), (13, 15)),
                range((13, 15), (14, 30)),
                range((14, 30), (15, 15)),
            ],
            x_day_periods: [
                range((8, 30), (9, 10)),
                range((9, 15), (9, 55)),
                range((10, 5), (10, 45)),
                range((10, 50), (11, 30)),
                range((11, 40), (12, 20)),
                range((13, 0), (13, 40)),
                range((13, 45), (14, 25)),
                range((14, 35), (15, 15)),
            ],
            x_day_breaks: [
                range((9, 55), (10, 5)),
                range((11, 30), (11, 40)),
                range((14, 25), (14, 35)),
            ],
            x_day_lunch: range((12, 20), (13, 0)),
        }
    }
}
