//! Strip per-thread banners from multi-worker dumps.
//!
//! `show trace` on a multi-worker data plane prints one section per thread:
//! ```text
//! ------------------- Start of thread 0 vpp_main -------------------
//! No packets in trace buffer
//! ------------------- Start of thread 1 vpp_wk_0 -------------------
//! Packet 1
//! ...
//! ```
//!
//! The parser skips banners ahead of the first packet, but a banner for a later
//! thread lands in the body of the previous thread's last capture. Removing
//! them first keeps capture bodies clean.

use std::sync::LazyLock;

use regex::Regex;

static BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:-+ Start of thread \d+ \S+ -+|No packets in trace buffer|Limiting display to \d+ packets\..*)$",
    )
    .unwrap()
});

/// Returns true if the line is a thread banner or a per-thread status line.
pub fn is_banner(line: &str) -> bool {
    BANNER.is_match(line.trim())
}

/// Remove banner lines, returning LF-terminated text.
pub fn strip_thread_banners(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dropped = 0usize;
    for line in text.lines() {
        if is_banner(line) {
            dropped += 1;
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    log::debug!("Stripped {dropped} banner lines");
    out
}
