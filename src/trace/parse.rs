//! Parse a VPP `show trace` dump into packets and captures.
//!
//! A dump looks like this:
//! ```text
//! ------------------- Start of thread 0 vpp_main -------------------
//! Packet 1
//!
//! 00:00:00:209689: virtio-input
//!   virtio: hw_if_index 1 next-index 4 vring 0 len 42
//! 00:00:00:209709: ethernet-input
//!   ARP: 02:fe:2e:5d:d6:9a -> ff:ff:ff:ff:ff:ff
//! ```
//!
//! Each line is classified, first match wins:
//!
//! 1. `Packet N` (N positive) closes the open packet and starts packet N.
//! 2. `HH:MM:SS:UUUUUU: node-name` closes the open capture and starts a new
//!    one. Anything after the node name is ignored.
//! 3. Blank lines are dropped, including inside capture bodies.
//! 4. Anything else is a body line of the open capture. A two-space indent is
//!    removed and a trailing LF is appended.
//!
//! Unindented lines before the first `Packet N` are banners and are skipped.

use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::error::{TraceError, TraceErrorKind};
use super::timestamp::parse_timestamp;

static PACKET_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Packet ([1-9][0-9]*)$").unwrap());

/// Indent VPP puts under every capture header.
const BODY_INDENT: &str = "  ";

/// One graph-node event recorded for a packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Graph node name (e.g., "ip4-lookup")
    pub name: String,
    /// Offset from when tracing was armed
    pub start: Duration,
    /// Body text, one LF-terminated line per body line, header indent removed
    pub content: String,
}

impl Capture {
    /// Body lines without their trailing LF.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// A traced packet and the captures it produced, in the order VPP printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Number from the `Packet N` line, kept as printed
    pub id: u64,
    pub captures: Vec<Capture>,
}

impl Packet {
    fn new(id: u64) -> Self {
        Self {
            id,
            captures: Vec::new(),
        }
    }

    /// Node names in traversal order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|c| c.name.as_str())
    }

    /// First capture recorded by the named node.
    pub fn capture(&self, name: &str) -> Option<&Capture> {
        self.captures.iter().find(|c| c.name == name)
    }

    /// Returns true if the packet went through the named node.
    pub fn traversed(&self, name: &str) -> bool {
        self.capture(name).is_some()
    }

    /// Time between the first and last capture.
    /// Zero for packets with fewer than two captures.
    pub fn elapsed(&self) -> Duration {
        match (self.captures.first(), self.captures.last()) {
            (Some(first), Some(last)) => last.start.saturating_sub(first.start),
            _ => Duration::ZERO,
        }
    }
}

/// Every packet in a dump, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traces {
    packets: Vec<Packet>,
}

impl Traces {
    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Packet> {
        self.packets.iter()
    }

    /// Look up a packet by the number VPP gave it.
    ///
    /// Returns the first match; VPP numbers restart per thread, so multi-thread
    /// dumps can repeat an ID.
    pub fn get(&self, id: u64) -> Option<&Packet> {
        self.packets.iter().find(|p| p.id == id)
    }
}

impl IntoIterator for Traces {
    type Item = Packet;
    type IntoIter = std::vec::IntoIter<Packet>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.into_iter()
    }
}

impl<'a> IntoIterator for &'a Traces {
    type Item = &'a Packet;
    type IntoIter = std::slice::Iter<'a, Packet>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.iter()
    }
}

impl FromStr for Traces {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_trace(s)
    }
}

/// A recognised capture header, before its timestamp is decoded.
struct Header<'a> {
    timestamp: &'a str,
    /// Empty when nothing follows the timestamp
    node: &'a str,
}

/// Split `HH:MM:SS:UUUUUU: node-name ...` into its timestamp and node name.
///
/// A line is a header when it starts with a run of digits and colons that
/// contains an inner colon and is closed by a colon followed by whitespace or
/// end of line. Hex dumps (`00000000: 4500...`) and MAC addresses
/// (`02:fe:2e:...`) don't qualify. The timestamp itself is validated later,
/// so `00:00:00: node` is still a header.
fn split_header(line: &str) -> Option<Header<'_>> {
    let prefix_len = line
        .find(|c: char| !(c.is_ascii_digit() || c == ':'))
        .unwrap_or(line.len());
    let prefix = &line[..prefix_len];
    let timestamp = prefix.strip_suffix(':')?;
    if !timestamp.starts_with(|c: char| c.is_ascii_digit()) || !timestamp.contains(':') {
        return None;
    }

    let rest = &line[prefix_len..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let node = rest
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == ':')
        .next()
        .unwrap_or("");

    Some(Header { timestamp, node })
}

/// The digits of a `Packet N` line, not yet checked to fit a `u64`.
fn packet_separator(line: &str) -> Option<&str> {
    PACKET_SEPARATOR
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Packet and capture currently being assembled.
#[derive(Default)]
struct Builder {
    packets: Vec<Packet>,
    packet: Option<Packet>,
    capture: Option<Capture>,
}

impl Builder {
    fn close_capture(&mut self) {
        if let Some(capture) = self.capture.take()
            && let Some(packet) = self.packet.as_mut()
        {
            packet.captures.push(capture);
        }
    }

    fn close_packet(&mut self) {
        self.close_capture();
        if let Some(packet) = self.packet.take() {
            log::trace!(
                "Packet {} closed with {} captures",
                packet.id,
                packet.captures.len()
            );
            self.packets.push(packet);
        }
    }

    fn finish(mut self) -> Traces {
        self.close_packet();
        Traces {
            packets: self.packets,
        }
    }
}

/// Parse a complete `show trace` dump.
///
/// CR-LF line endings are accepted. Banner lines before the first `Packet N`
/// are skipped. Parsing stops at the first error.
///
/// # Usage
///
/// ```
/// use std::time::Duration;
/// use vpp_trace::parse_trace;
///
/// let traces = parse_trace("Packet 1\n\n00:00:00:000010: ip4-lookup\n  fib 0\n").unwrap();
/// let packet = &traces.packets()[0];
/// assert_eq!(packet.id, 1);
/// assert_eq!(packet.captures[0].name, "ip4-lookup");
/// assert_eq!(packet.captures[0].start, Duration::from_micros(10));
/// assert_eq!(packet.captures[0].content, "fib 0\n");
/// ```
pub fn parse_trace(text: &str) -> Result<Traces, TraceError> {
    let mut builder = Builder::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        // A lone CR before end of input survives `str::lines`
        let raw = raw.trim_end_matches('\r');
        let trimmed = raw.trim();

        if let Some(digits) = packet_separator(trimmed) {
            let id = digits.parse().map_err(|_| {
                TraceError::new(
                    line_no,
                    TraceErrorKind::PacketIdOutOfRange {
                        id: digits.to_string(),
                    },
                )
            })?;
            builder.close_packet();
            builder.packet = Some(Packet::new(id));
            continue;
        }

        if let Some(header) = split_header(trimmed) {
            if builder.packet.is_none() {
                return Err(TraceError::new(line_no, TraceErrorKind::StrayCaptureHeader));
            }
            let start = parse_timestamp(header.timestamp)
                .map_err(|e| TraceError::new(line_no, TraceErrorKind::MalformedTimestamp(e)))?;
            if header.node.is_empty() {
                return Err(TraceError::new(line_no, TraceErrorKind::MissingNodeName));
            }
            builder.close_capture();
            builder.capture = Some(Capture {
                name: header.node.to_string(),
                start,
                content: String::new(),
            });
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        match builder.capture.as_mut() {
            Some(capture) => {
                capture
                    .content
                    .push_str(raw.strip_prefix(BODY_INDENT).unwrap_or(raw));
                capture.content.push('\n');
            }
            // Unindented text ahead of the first packet is a banner
            None if builder.packet.is_none() && !raw.starts_with(char::is_whitespace) => {
                log::trace!("Skipping banner line {line_no}: {raw}");
            }
            None => return Err(TraceError::new(line_no, TraceErrorKind::StrayBodyLine)),
        }
    }

    let traces = builder.finish();
    log::debug!(
        "Parsed {} packets, {} captures",
        traces.len(),
        traces.iter().map(|p| p.captures.len()).sum::<usize>()
    );
    Ok(traces)
}
