//! Plain-text rendering for the `vpp-trace` command.

use std::fmt::Write as _;
use std::time::Duration;

use super::analyze::TraceAnalysis;
use super::parse::Packet;

/// Render the complete analysis to a string.
pub fn render_summary(analysis: &TraceAnalysis) -> String {
    let mut out = String::new();

    render_header(&mut out, analysis);
    render_node_breakdown(&mut out, analysis);
    render_slowest(&mut out, analysis);

    out
}

fn render_header(out: &mut String, analysis: &TraceAnalysis) {
    out.push_str("TRACE SUMMARY\n");
    out.push_str("=============\n");
    writeln!(out, "Packets:  {}", analysis.packet_count).unwrap();
    writeln!(out, "Captures: {}", analysis.capture_count).unwrap();
}

fn render_node_breakdown(out: &mut String, analysis: &TraceAnalysis) {
    if analysis.node_stats.is_empty() {
        return;
    }

    out.push_str("\nNODE DWELL TIME\n");
    out.push_str("---------------\n");
    writeln!(
        out,
        "{:<24} {:>6} {:>6} {:>10} {:>8} {:>8} {:>8}",
        "Node", "Count", "Timed", "Total(us)", "p50(us)", "p90(us)", "Max(us)"
    )
    .unwrap();

    for stat in &analysis.node_stats {
        writeln!(
            out,
            "{:<24} {:>6} {:>6} {:>10} {:>8} {:>8} {:>8}",
            stat.name,
            stat.count,
            stat.timed,
            micros(stat.total),
            micros(stat.p50),
            micros(stat.p90),
            micros(stat.max),
        )
        .unwrap();
    }
}

fn render_slowest(out: &mut String, analysis: &TraceAnalysis) {
    if analysis.slowest_packets.is_empty() {
        return;
    }

    out.push_str("\nSLOWEST PACKETS\n");
    out.push_str("---------------\n");
    writeln!(out, "{:<8} {:>12}", "Packet", "Elapsed(us)").unwrap();
    for (elapsed, id) in &analysis.slowest_packets {
        writeln!(out, "{:<8} {:>12}", id, micros(*elapsed)).unwrap();
    }
}

/// Render one block per packet with each capture's offset from the first.
pub fn render_listing(packets: &[&Packet]) -> String {
    let mut out = String::new();

    for packet in packets {
        writeln!(
            out,
            "Packet {} ({} captures, {}us)",
            packet.id,
            packet.captures.len(),
            micros(packet.elapsed())
        )
        .unwrap();

        let origin = packet.captures.first().map(|c| c.start).unwrap_or_default();
        for capture in &packet.captures {
            let offset = format!("+{}us", micros(capture.start.saturating_sub(origin)));
            writeln!(out, "  {offset:>10}  {}", capture.name).unwrap();
        }
    }

    out
}

fn micros(d: Duration) -> u128 {
    d.as_micros()
}
