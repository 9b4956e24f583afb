use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::CourseRecord;

// ---------------------------------------------------------------------------
// Raw row layout
// ---------------------------------------------------------------------------

/// Cell positions in a raw catalog row (18 cells, meaning by position only).
pub mod cell {
    pub const INDEX: usize = 0;
    pub const CRN: usize = 1;
    pub const SUBJECT: usize = 2;
    pub const COURSE: usize = 3;
    pub const SECTION: usize = 4;
    pub const TITLE: usize = 5;
    pub const PRIMARY_INSTRUCTOR: usize = 6;
    pub const DELIVERY_TYPE: usize = 7;
    pub const DELIVERY_METHOD: usize = 8;
    pub const EDUCATION_TYPE: usize = 9;
    pub const SEMESTER_LENGTH: usize = 10;
    pub const DATES: usize = 11;
    // 12 is unused
    pub const PACKED_INFO: usize = 13;
    pub const DESCRIPTION: usize = 14;
    pub const INSTRUCTORS: usize = 15;
    // 16 is unused, 17 is a second packed cell with nothing we keep

    pub const COUNT: usize = 18;
}

/// Sub-field positions inside the packed-info cell.
pub mod packed {
    pub const START_TIME: usize = 2;
    pub const END_TIME: usize = 3;
    pub const LOCATION: usize = 4;
    pub const ROOM: usize = 5;
    pub const SHORT_DAYS: usize = 6;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    /// The row was not a JSON array at all.
    NotAnArray,
    /// These cells held numbers, booleans, arrays or objects instead of text.
    UnexpectedCells(Vec<usize>),
}

impl fmt::Display for RowProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowProblem::NotAnArray => write!(f, "row is not an array"),
            RowProblem::UnexpectedCells(cells) => write!(f, "non-text cells at {cells:?}"),
        }
    }
}

/// A row that could only be partly normalized. `record` holds whatever was
/// recovered and is still meant to be kept.
#[derive(Debug, Clone, Error)]
#[error("malformed catalog row: {problem}")]
pub struct MalformedRow {
    pub record: CourseRecord,
    pub problem: RowProblem,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Turn one raw catalog row into a [`CourseRecord`].
///
/// Missing cells become empty strings. Cells that are not strings or null
/// are kept as their JSON text, untrimmed, and reported through
/// [`MalformedRow`] together with the partial record.
pub fn normalize(row: &JsonValue) -> Result<CourseRecord, MalformedRow> {
    let Some(cells) = row.as_array() else {
        return Err(MalformedRow {
            record: CourseRecord::default(),
            problem: RowProblem::NotAnArray,
        });
    };

    let mut reader = CellReader::new(cells);

    let index = strip_tags(&reader.raw(cell::INDEX)).trim().to_string();

    let packed_raw = reader.raw(cell::PACKED_INFO);
    let bits: Vec<&str> = packed_raw.split(',').collect();
    let packed_at = |i: usize| bits.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

    let record = CourseRecord {
        index,
        crn: reader.text(cell::CRN),
        subject: reader.text(cell::SUBJECT),
        course: reader.text(cell::COURSE),
        section: reader.text(cell::SECTION),
        title: reader.text(cell::TITLE),
        primary_instructor: reader.text(cell::PRIMARY_INSTRUCTOR),
        delivery_type: reader.text(cell::DELIVERY_TYPE),
        delivery_method: reader.text(cell::DELIVERY_METHOD),
        education_type: reader.text(cell::EDUCATION_TYPE),
        semester_length: reader.text(cell::SEMESTER_LENGTH),
        dates: reader.text(cell::DATES),
        start_time: packed_at(packed::START_TIME),
        end_time: packed_at(packed::END_TIME),
        location: packed_at(packed::LOCATION),
        room: packed_at(packed::ROOM),
        short_days: packed_at(packed::SHORT_DAYS),
        description: reader.text(cell::DESCRIPTION),
        all_instructors: split_instructors(&reader.raw(cell::INSTRUCTORS)),
    };

    if reader.bad.is_empty() {
        Ok(record)
    } else {
        reader.bad.sort_unstable();
        reader.bad.dedup();
        Err(MalformedRow {
            record,
            problem: RowProblem::UnexpectedCells(reader.bad),
        })
    }
}

/// Split a comma-separated instructor list, dropping blank entries.
pub fn split_instructors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^\n\r\x{2028}\x{2029}]*?>").expect("static regex: markup tag")
});

/// Remove every `<...>` tag. A tag may not span a line break (`\n`, `\r`,
/// U+2028, U+2029); an unclosed `<` is left in place.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG_REGEX.replace_all(s, "")
}

/// Positional access to a row's cells, remembering which ones were not text.
struct CellReader<'a> {
    cells: &'a [JsonValue],
    bad: Vec<usize>,
}

impl<'a> CellReader<'a> {
    fn new(cells: &'a [JsonValue]) -> Self {
        Self {
            cells,
            bad: Vec::new(),
        }
    }

    /// Cell content as-is (strings untouched, null/missing empty).
    fn raw(&mut self, pos: usize) -> Cow<'a, str> {
        match self.cells.get(pos) {
            None | Some(JsonValue::Null) => Cow::Borrowed(""),
            Some(JsonValue::String(s)) => Cow::Borrowed(s.as_str()),
            Some(v @ (JsonValue::Number(_) | JsonValue::Bool(_))) => {
                self.bad.push(pos);
                Cow::Owned(v.to_string())
            }
            Some(JsonValue::Array(_) | JsonValue::Object(_)) => {
                self.bad.push(pos);
                Cow::Borrowed("")
            }
        }
    }

    /// Trimmed text for string cells; other cells as [`Self::raw`] gives them.
    fn text(&mut self, pos: usize) -> String {
        match self.cells.get(pos) {
            Some(JsonValue::String(s)) => s.trim().to_string(),
            _ => self.raw(pos).into_owned(),
        }
    }
}
