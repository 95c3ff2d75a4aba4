use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ParseError;

/// Period data as supplied by a form, a calendar import or a file.
///
/// Keys are period labels ("1".."8") and values are objects with
/// `name`, `room` and `teacher` fields, each either a string or a list of
/// strings. Nothing is validated here; see [`crate::schedule::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSchedule {
    periods: BTreeMap<String, Value>,
}

impl RawSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry to a period, creating the period if needed.
    pub fn push_entry(&mut self, key: &str, name: &str, room: &str, teacher: &str) {
        let period = self
            .periods
            .entry(key.to_string())
            .or_insert_with(|| json!({ "name": [], "room": [], "teacher": [] }));

        if let Value::Object(fields) = period {
            for (field, value) in [("name", name), ("room", room), ("teacher", teacher)] {
                let list = fields
                    .entry(field.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(items) = list {
                    items.push(Value::String(value.to_string()));
                }
            }
        }
    }

    /// Replaces a period with a raw JSON value, as received.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.periods.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.periods.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Parses the JSON payload shape used by every input source
pub fn parse_schedule_json(text: &str) -> Result<RawSchedule, ParseError> {
    Ok(serde_json::from_str(text)?)
}

/// Column positions of a schedule CSV file, read from its header
struct CsvColumns {
    period: Option<usize>,
    name: Option<usize>,
    room: Option<usize>,
    teacher: Option<usize>,
}

impl CsvColumns {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |column: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(column));
        Self {
            period: position("period"),
            name: position("name"),
            room: position("room"),
            teacher: position("teacher"),
        }
    }
}

/// Missing or absent columns read as empty
fn cell(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or("")
}

/// Loads period data from CSV with the header `period,name,room,teacher`.
/// Each row adds one entry to its period, in file order. Short rows treat
/// the missing columns as empty.
pub fn parse_schedule_csv<R: std::io::Read>(reader: R) -> Result<RawSchedule, ParseError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = CsvColumns::from_headers(reader.headers()?);
    let mut schedule = RawSchedule::new();
    for result in reader.records() {
        let record = result?;
        schedule.push_entry(
            cell(&record, columns.period),
            cell(&record, columns.name),
            cell(&record, columns.room),
            cell(&record, columns.teacher),
        );
    }

    debug!("Parsed {} periods from CSV", schedule.len());
    Ok(schedule)
}

/// Loads a schedule file, choosing the format from its extension
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<RawSchedule, ParseError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let schedule = match extension.as_deref() {
        Some("json") => parse_schedule_json(&std::fs::read_to_string(path)?)?,
        Some("csv") => parse_schedule_csv(std::fs::File::open(path)?)?,
        _ => return Err(ParseError::UnsupportedFormat(path.display().to_string())),
    };

    info!("Loaded {} periods from {}", schedule.len(), path.display());
    Ok(schedule)
}
