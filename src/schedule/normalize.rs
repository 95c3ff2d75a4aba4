use std::collections::BTreeMap;

use log::{debug, warn};
use serde_json::Value;

use super::types::{ClassEntry, Period, PeriodAssignments};
use crate::error::{NormalizationWarning, ValidationError};
use crate::parser::RawSchedule;

/// More empty periods than this and the schedule is rejected
pub const MAX_EMPTY_PERIODS: usize = 2;

const FIELDS: [&str; 3] = ["name", "room", "teacher"];

/// Validated assignments plus whatever was repaired on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub assignments: PeriodAssignments,
    pub warnings: Vec<NormalizationWarning>,
}

/// Cleans and validates raw period data.
///
/// Keys must name periods 1-8; missing periods become empty. Every field
/// is trimmed. Parallel lists of different lengths are truncated to the
/// shortest one and reported as a warning. A field that is absent
/// altogether is filled with empty strings instead.
pub fn normalize(raw: &RawSchedule) -> Result<Normalized, ValidationError> {
    let mut periods: BTreeMap<Period, Vec<ClassEntry>> = BTreeMap::new();
    let mut warnings = Vec::new();

    for (key, value) in raw.iter() {
        let period = parse_period_key(key)?;
        if periods.contains_key(&period) {
            return Err(ValidationError::MalformedPeriod {
                key: key.to_string(),
                reason: format!("period {} is supplied more than once", period),
            });
        }

        let (entries, warning) = read_period(key, period, value)?;
        if let Some(warning) = warning {
            warn!("{}", warning);
            warnings.push(warning);
        }
        periods.insert(period, entries);
    }

    let assignments = PeriodAssignments::from_map(periods);

    let empty = assignments.empty_periods();
    if empty.len() > MAX_EMPTY_PERIODS {
        return Err(ValidationError::TooManyEmptyPeriods {
            count: empty.len(),
            periods: empty,
        });
    }

    debug!(
        "Normalized schedule: {} empty periods, {} warnings",
        empty.len(),
        warnings.len()
    );
    Ok(Normalized {
        assignments,
        warnings,
    })
}

fn parse_period_key(key: &str) -> Result<Period, ValidationError> {
    key.trim()
        .parse::<u8>()
        .ok()
        .and_then(Period::new)
        .ok_or_else(|| ValidationError::InvalidPeriodKey {
            key: key.to_string(),
        })
}

fn read_period(
    key: &str,
    period: Period,
    value: &Value,
) -> Result<(Vec<ClassEntry>, Option<NormalizationWarning>), ValidationError> {
    let fields = value.as_object().ok_or_else(|| ValidationError::MalformedPeriod {
        key: key.to_string(),
        reason: "expected an object with name, room and teacher".to_string(),
    })?;

    let mut lists: [Option<Vec<String>>; 3] = [None, None, None];
    for (slot, field) in lists.iter_mut().zip(FIELDS) {
        *slot = match fields.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(read_field(key, field, value)?),
        };
    }

    let present: Vec<usize> = lists.iter().flatten().map(Vec::len).collect();
    let kept = present.iter().copied().min().unwrap_or(0);
    let mismatched = present.iter().any(|&len| len != kept);

    let warning = mismatched.then(|| {
        let len = |i: usize| lists[i].as_ref().map_or(0, Vec::len);
        NormalizationWarning::MismatchedFieldLengths {
            period,
            names: len(0),
            rooms: len(1),
            teachers: len(2),
            kept,
        }
    });

    let [names, rooms, teachers] = lists.map(|list| {
        let mut list = list.unwrap_or_default();
        list.resize(kept, String::new());
        list
    });

    let entries = names
        .into_iter()
        .zip(rooms)
        .zip(teachers)
        .map(|((name, room), teacher)| ClassEntry::new(name, room, teacher))
        .collect();

    Ok((entries, warning))
}

fn read_field(key: &str, field: &str, value: &Value) -> Result<Vec<String>, ValidationError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| read_scalar(item).ok_or_else(|| malformed_field(key, field)))
            .collect(),
        other => read_scalar(other)
            .map(|s| vec![s])
            .ok_or_else(|| malformed_field(key, field)),
    }
}

/// Strings are trimmed; numbers are accepted as text (room numbers
/// often arrive unquoted) and null reads as an empty string.
fn read_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn malformed_field(key: &str, field: &str) -> ValidationError {
    ValidationError::MalformedPeriod {
        key: key.to_string(),
        reason: format!("'{}' must be a string or a list of strings", field),
    }
}
