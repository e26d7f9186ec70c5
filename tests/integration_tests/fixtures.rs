//! Library-level checks against the shipped fixture dumps.

use std::time::Duration;

use vpp_trace::trace::{analyze, parse_trace, strip_thread_banners};

use crate::common::fixture;

#[test]
fn test_two_workers_parsed_in_document_order() {
    let traces = parse_trace(&strip_thread_banners(&fixture("two_workers.txt"))).unwrap();

    assert_eq!(traces.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 1]);

    let icmp = &traces.packets()[0];
    assert_eq!(
        icmp.node_names().collect::<Vec<_>>(),
        [
            "dpdk-input",
            "ethernet-input",
            "ip4-input-no-checksum",
            "ip4-lookup",
            "ip4-local",
            "ip4-icmp-input",
            "ip4-icmp-echo-request",
        ]
    );
    assert_eq!(
        icmp.captures[0].start,
        Duration::from_secs(72) + Duration::from_micros(418_205)
    );
    assert_eq!(
        icmp.capture("ip4-local").unwrap().content,
        "  ICMP: 10.0.2.2 -> 10.0.2.15
    tos 0x00, ttl 64, length 84, checksum 0x22a5 dscp CS0 ecn NON_ECN
    fragment id 0x0000
  ICMP echo_request checksum 0x7d1f id 4561
"
    );
    assert_eq!(
        icmp.capture("ip4-icmp-echo-request").unwrap().content,
        "ICMP: 10.0.2.2 -> 10.0.2.15\n"
    );

    let arp = &traces.packets()[1];
    assert_eq!(arp.captures.len(), 4);
    assert_eq!(arp.elapsed(), Duration::from_micros(50));
}

#[test]
fn test_two_workers_without_stripping_keeps_banner_in_body() {
    let traces = parse_trace(&fixture("two_workers.txt")).unwrap();
    let last = traces.packets()[0].captures.last().unwrap();
    assert!(last.content.ends_with("------------------- Start of thread 2 vpp_wk_1 -------------------\n"));
}

#[test]
fn test_two_workers_analysis() {
    let traces = parse_trace(&strip_thread_banners(&fixture("two_workers.txt"))).unwrap();
    let analysis = analyze(&traces);

    assert_eq!(analysis.packet_count, 2);
    assert_eq!(analysis.capture_count, 11);

    let dpdk = &analysis.node_stats[0];
    assert_eq!(dpdk.name, "dpdk-input");
    assert_eq!(dpdk.count, 2);
    assert_eq!(dpdk.total, Duration::from_micros(45));
    assert_eq!(dpdk.max, Duration::from_micros(26));
}
