//! Errors raised while parsing a trace dump.
//!
//! Every error carries the 1-based number of the line that caused it. Parsing
//! stops at the first error; no partial [`Traces`](super::Traces) is returned.

use std::fmt;

use super::timestamp::MalformedTimestamp;

/// What went wrong on the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceErrorKind {
    /// A capture header whose timestamp does not decode
    MalformedTimestamp(MalformedTimestamp),
    /// A capture header before any `Packet N` line
    StrayCaptureHeader,
    /// A body line with no capture open to receive it
    StrayBodyLine,
    /// A capture header with nothing after the timestamp
    MissingNodeName,
    /// A `Packet N` line whose number does not fit a `u64`
    PacketIdOutOfRange { id: String },
}

/// A parse failure, located by line.
///
/// # Usage
///
/// ```
/// use vpp_trace::{TraceErrorKind, parse_trace};
///
/// let err = parse_trace("Packet 1\n00:00:00: bad-node\n").unwrap_err();
/// assert_eq!(err.line, 2);
/// assert!(matches!(err.kind, TraceErrorKind::MalformedTimestamp(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceError {
    /// 1-based line number of the offending line
    pub line: usize,
    pub kind: TraceErrorKind,
}

impl TraceError {
    pub(crate) fn new(line: usize, kind: TraceErrorKind) -> Self {
        Self { line, kind }
    }
}

impl std::error::Error for TraceError {}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            TraceErrorKind::MalformedTimestamp(err) => write!(f, "{err}"),
            TraceErrorKind::StrayCaptureHeader => {
                write!(f, "capture header before any `Packet N` line")
            }
            TraceErrorKind::StrayBodyLine => {
                write!(f, "body line outside of any capture")
            }
            TraceErrorKind::MissingNodeName => {
                write!(f, "capture header has no node name")
            }
            TraceErrorKind::PacketIdOutOfRange { id } => {
                write!(f, "packet number `{id}` is out of range")
            }
        }
    }
}
