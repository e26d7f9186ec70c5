//! Decode the `HH:MM:SS:UUUUUU` offsets printed on capture headers.
//!
//! VPP prints each capture's time as an offset from when the trace buffer
//! was armed, not as a wall-clock time. The hour field is a plain count and
//! may exceed 23; the microsecond field is six digits in practice but any
//! count is accepted.

use std::fmt;
use std::time::Duration;

/// Why a timestamp failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampIssue {
    /// The token did not split into exactly four colon-separated groups
    FieldCount { found: usize },
    /// A group was empty or contained something other than ASCII digits
    NotANumber { field: &'static str, value: String },
    /// The groups are valid numbers but the total does not fit a `Duration`
    Overflow,
}

/// A capture-header timestamp that is not of the shape `HH:MM:SS:UUUUUU`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTimestamp {
    /// The offending token, as read
    pub input: String,
    pub reason: TimestampIssue,
}

impl std::error::Error for MalformedTimestamp {}

impl fmt::Display for MalformedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed timestamp `{}`: ", self.input)?;
        match &self.reason {
            TimestampIssue::FieldCount { found } => {
                write!(f, "expected 4 colon-separated fields, found {found}")
            }
            TimestampIssue::NotANumber { field, value } => {
                write!(f, "{field} field `{value}` is not a decimal number")
            }
            TimestampIssue::Overflow => write!(f, "value out of range"),
        }
    }
}

const FIELDS: [&str; 4] = ["hours", "minutes", "seconds", "microseconds"];

/// Parse `HH:MM:SS:UUUUUU` into the duration it denotes.
///
/// No upper bound is enforced on any group and surrounding whitespace is not
/// trimmed; callers strip the token first.
pub fn parse_timestamp(s: &str) -> Result<Duration, MalformedTimestamp> {
    let malformed = |reason| MalformedTimestamp {
        input: s.to_string(),
        reason,
    };

    let groups: Vec<&str> = s.split(':').collect();
    if groups.len() != FIELDS.len() {
        return Err(malformed(TimestampIssue::FieldCount {
            found: groups.len(),
        }));
    }

    let mut values = [0u64; 4];
    for ((value, group), field) in values.iter_mut().zip(&groups).zip(FIELDS) {
        // `u64::from_str` accepts a leading '+', which is not a digit group
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(TimestampIssue::NotANumber {
                field,
                value: group.to_string(),
            }));
        }
        *value = group
            .parse()
            .map_err(|_| malformed(TimestampIssue::Overflow))?;
    }

    let [hours, minutes, seconds, micros] = values;
    let secs = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| malformed(TimestampIssue::Overflow))?;

    Duration::from_secs(secs)
        .checked_add(Duration::from_micros(micros))
        .ok_or_else(|| malformed(TimestampIssue::Overflow))
}
