//! VPP packet-trace parsing and latency analysis.
//!
//! This module turns the text printed by VPP's `show trace` command into a
//! tree of [`Packet`]s, each holding the ordered [`Capture`]s recorded by the
//! graph nodes the packet went through.
//!
//! # Features
//!
//! - **Trace parsing**: Parse a whole dump into [`Traces`] with [`parse_trace`]
//! - **Timestamps**: Decode `HH:MM:SS:UUUUUU` header offsets with [`parse_timestamp`]
//! - **Banner stripping**: Drop per-thread banners from multi-worker dumps
//! - **Analysis**: Per-node dwell statistics and slowest packets
//!
//! # Usage
//!
//! ```bash
//! # Capture a dump from a running data plane
//! vppctl trace add virtio-input 50
//! vppctl show trace > trace.txt
//!
//! # Summarise per-node latency
//! vpp-trace --strip-banners trace.txt
//!
//! # List only packets that reached ip4-lookup
//! vpp-trace --strip-banners --list --node ip4-lookup trace.txt
//! ```

pub mod analyze;
pub mod banner;
pub mod display;
pub mod error;
pub mod parse;
pub mod timestamp;

// Re-export main types for convenience
pub use analyze::{NodeStats, TraceAnalysis, analyze};
pub use banner::strip_thread_banners;
pub use display::{render_listing, render_summary};
pub use error::{TraceError, TraceErrorKind};
pub use parse::{Capture, Packet, Traces, parse_trace};
pub use timestamp::{MalformedTimestamp, TimestampIssue, parse_timestamp};
