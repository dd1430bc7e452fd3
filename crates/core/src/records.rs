//! Input record parsing.
//!
//! Each valid line of the export carries at least [`MIN_FIELDS`]
//! tab-separated fields: the beer id, its display name, and brewery
//! metadata that is carried along untouched. [`RecordParser`] filters
//! malformed lines and applies an optional [`DataRange`].

use std::io::{self, BufRead};
use std::str::FromStr;

use crate::encoding::Utf16LeLines;
use crate::error::CoreError;
use crate::naming;
use crate::types::BeerId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Field separator used by the export.
pub const FIELD_DELIMITER: char = '\t';

/// Lines with fewer fields than this are skipped.
pub const MIN_FIELDS: usize = 6;

// ---------------------------------------------------------------------------
// InputRecord
// ---------------------------------------------------------------------------

/// One beer from the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub id: BeerId,
    /// Entity-decoded, trimmed display name.
    pub name: String,
    /// Every field of the source line, as read.
    pub raw_fields: Vec<String>,
}

// ---------------------------------------------------------------------------
// DataRange
// ---------------------------------------------------------------------------

/// Inclusive, 1-based range of record positions to process.
///
/// Parsed from `"low:high"`, e.g. `"101:200"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRange {
    pub low: u64,
    pub high: u64,
}

impl DataRange {
    pub fn new(low: u64, high: u64) -> Result<Self, CoreError> {
        if low == 0 {
            return Err(CoreError::Validation(
                "Data range positions start at 1".to_string(),
            ));
        }
        if low > high {
            return Err(CoreError::Validation(format!(
                "Data range start {low} is after its end {high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, position: u64) -> bool {
        (self.low..=self.high).contains(&position)
    }
}

impl FromStr for DataRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s.split_once(':').ok_or_else(|| {
            CoreError::Validation(format!("Data range must look like 'low:high', got '{s}'"))
        })?;

        let parse = |part: &str| {
            part.trim().parse::<u64>().map_err(|_| {
                CoreError::Validation(format!("Data range bound '{part}' is not a number"))
            })
        };

        Self::new(parse(low)?, parse(high)?)
    }
}

impl std::fmt::Display for DataRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// RecordParser
// ---------------------------------------------------------------------------

/// Turns a stream of lines into [`InputRecord`]s.
///
/// Every line with at least [`MIN_FIELDS`] fields takes the next position,
/// starting at 1. When a range is set, positions below it are skipped and
/// the first position past it ends iteration without pulling more lines.
pub struct RecordParser<L> {
    lines: L,
    range: Option<DataRange>,
    position: u64,
    finished: bool,
}

impl<L> RecordParser<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: L, range: Option<DataRange>) -> Self {
        Self {
            lines,
            range,
            position: 0,
            finished: false,
        }
    }

    /// Number of well-formed lines seen so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<L> Iterator for RecordParser<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<InputRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };

            let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
            if fields.len() < MIN_FIELDS {
                continue;
            }
            self.position += 1;

            if let Some(range) = self.range {
                if self.position > range.high {
                    self.finished = true;
                    return None;
                }
                if !range.contains(self.position) {
                    continue;
                }
            }

            match parse_fields(&fields) {
                Some(record) => return Some(Ok(record)),
                None => {
                    tracing::debug!(
                        position = self.position,
                        id_field = fields[0],
                        "Skipping line with non-numeric id",
                    );
                }
            }
        }
        None
    }
}

fn parse_fields(fields: &[&str]) -> Option<InputRecord> {
    let id = fields[0].trim().parse::<BeerId>().ok()?;
    Some(InputRecord {
        id,
        name: naming::escape(fields[1]),
        raw_fields: fields.iter().map(|f| f.to_string()).collect(),
    })
}

/// Decode a UTF-16LE export and collect every record within `range`.
pub fn parse_records<R: BufRead>(
    reader: R,
    range: Option<DataRange>,
) -> io::Result<Vec<InputRecord>> {
    RecordParser::new(Utf16LeLines::new(reader), range).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
