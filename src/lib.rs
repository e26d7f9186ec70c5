pub mod trace;

pub use trace::{Capture, Packet, TraceError, TraceErrorKind, Traces, parse_timestamp, parse_trace};
