//! Per-node latency statistics over a parsed dump.
//!
//! A capture's dwell time is the gap between its start and the start of the
//! next capture of the same packet, i.e. how long the packet sat in that node
//! (plus any frame batching). The last capture of a packet has no dwell time.

use std::collections::HashMap;
use std::time::Duration;

use super::parse::{Packet, Traces};

/// Summary statistics for one graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStats {
    pub name: String,
    /// Number of captures recorded by this node
    pub count: usize,
    /// Number of those captures that had a successor in the same packet
    pub timed: usize,
    pub total: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub max: Duration,
}

/// Complete analysis of a dump.
#[derive(Debug)]
pub struct TraceAnalysis {
    pub packet_count: usize,
    pub capture_count: usize,
    /// Stats per node, sorted by total dwell time descending
    pub node_stats: Vec<NodeStats>,
    /// Slowest packets by first-to-last capture time, as (elapsed, id)
    pub slowest_packets: Vec<(Duration, u64)>,
}

const SLOWEST_PACKETS: usize = 10;

/// Analyze a dump and produce a complete summary.
pub fn analyze(traces: &Traces) -> TraceAnalysis {
    TraceAnalysis {
        packet_count: traces.len(),
        capture_count: traces.iter().map(|p| p.captures.len()).sum(),
        node_stats: compute_node_stats(traces.packets()),
        slowest_packets: compute_slowest(traces.packets(), SLOWEST_PACKETS),
    }
}

fn compute_node_stats(packets: &[Packet]) -> Vec<NodeStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut dwell: HashMap<&str, Vec<Duration>> = HashMap::new();

    for packet in packets {
        for (idx, capture) in packet.captures.iter().enumerate() {
            *counts.entry(capture.name.as_str()).or_default() += 1;
            let durations = dwell.entry(capture.name.as_str()).or_default();
            if let Some(next) = packet.captures.get(idx + 1) {
                durations.push(next.start.saturating_sub(capture.start));
            }
        }
    }

    let mut stats: Vec<NodeStats> = counts
        .into_iter()
        .map(|(name, count)| {
            let mut durations = dwell.remove(name).unwrap_or_default();
            durations.sort();
            NodeStats {
                name: name.to_string(),
                count,
                timed: durations.len(),
                total: durations.iter().sum(),
                p50: percentile(&durations, 50),
                p90: percentile(&durations, 90),
                max: durations.last().copied().unwrap_or(Duration::ZERO),
            }
        })
        .collect();

    // Sort by total time descending, then name for stable output
    stats.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    stats
}

/// Compute a percentile from sorted durations.
fn percentile(sorted: &[Duration], pct: usize) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = (sorted.len() * pct / 100).min(sorted.len() - 1);
    sorted[idx]
}

fn compute_slowest(packets: &[Packet], limit: usize) -> Vec<(Duration, u64)> {
    let mut elapsed: Vec<(Duration, u64)> = packets
        .iter()
        .filter(|p| p.captures.len() > 1)
        .map(|p| (p.elapsed(), p.id))
        .collect();
    // Stable sort keeps document order among ties
    elapsed.sort_by(|a, b| b.0.cmp(&a.0));
    elapsed.truncate(limit);
    elapsed
}
