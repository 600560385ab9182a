//! Accumulates classified flows into the two result views.
use super::containers::{ClassifiedFlow, Direction, FlowRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Peer address mapped to the set of destination ports seen with it.
/// Ports are strings, so the set order is lexicographic, not numeric.
pub type PeerPortMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Clone, Debug, Default, Serialize)]
pub struct TrafficSummary {
    pub sent: PeerPortMap,
    pub received: PeerPortMap,
}

/// Running state of one scan: the deduplicated flow set and the per-peer
/// summary, maintained together in a single pass over the input.
///
/// BTree collections keep both views in their presentation order, so the
/// emitter can iterate them directly. Recording never fails; an aggregator
/// that stays empty is a valid end state.
#[derive(Clone, Debug, Default)]
pub struct Aggregator {
    flows: BTreeSet<FlowRecord>,
    summary: TrafficSummary,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, flow: ClassifiedFlow) {
        let map = match flow.direction {
            Direction::Sent => &mut self.summary.sent,
            Direction::Received => &mut self.summary.received,
        };
        map.entry(flow.peer).or_insert_with(BTreeSet::new).insert(flow.port);

        self.flows.insert(flow.record);
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    /// Unique flows in ascending lexicographic order of the full tuple.
    pub fn flows(&self) -> &BTreeSet<FlowRecord> {
        &self.flows
    }

    pub fn summary(&self) -> &TrafficSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::classify::classify;
    use crate::analyser::containers::FlowAttributes;

    fn attrs(src: &str, sport: &str, dst: &str, dport: &str, proto: &str) -> FlowAttributes {
        FlowAttributes {
            source_address: src.to_string(),
            source_port: sport.to_string(),
            destination_address: dst.to_string(),
            destination_port: dport.to_string(),
            protocol_id: proto.to_string(),
        }
    }

    #[test]
    fn starts_empty() {
        let agg = Aggregator::new();
        assert!(agg.is_empty());
        assert!(agg.summary().sent.is_empty());
        assert!(agg.summary().received.is_empty());
    }

    #[test]
    fn identical_flows_collapse_to_one_record() {
        let mut agg = Aggregator::new();
        for _ in 0..3 {
            let flow = classify(&attrs("10.1.1.1", "5000", "10.2.2.2", "443", "6"), "10.1.1.1").unwrap();
            agg.record(flow);
        }

        assert_eq!(agg.flow_count(), 1);
        let ports = agg.summary().sent.get("10.2.2.2").unwrap();
        assert_eq!(ports.len(), 1);
    }

    #[test]
    fn directions_land_in_their_own_map() {
        let mut agg = Aggregator::new();
        agg.record(classify(&attrs("10.1.1.1", "5000", "10.2.2.2", "443", "6"), "10.1.1.1").unwrap());
        agg.record(classify(&attrs("10.9.9.9", "6000", "10.1.1.1", "22", "6"), "10.1.1.1").unwrap());

        assert_eq!(agg.summary().sent.keys().collect::<Vec<_>>(), vec!["10.2.2.2"]);
        assert_eq!(agg.summary().received.keys().collect::<Vec<_>>(), vec!["10.9.9.9"]);
        assert!(agg.summary().received["10.9.9.9"].contains("22"));
    }

    #[test]
    fn peers_and_ports_enumerate_in_lexicographic_order() {
        let mut agg = Aggregator::new();
        agg.record(classify(&attrs("10.0.0.1", "5000", "10.0.0.5", "80", "6"), "10.0.0.1").unwrap());
        agg.record(classify(&attrs("10.0.0.1", "5001", "10.0.0.5", "443", "6"), "10.0.0.1").unwrap());
        agg.record(classify(&attrs("10.0.0.1", "5002", "10.0.0.2", "22", "6"), "10.0.0.1").unwrap());

        let peers: Vec<&String> = agg.summary().sent.keys().collect();
        assert_eq!(peers, vec!["10.0.0.2", "10.0.0.5"]);

        // String order, not numeric: "443" sorts before "80".
        let ports: Vec<&String> = agg.summary().sent["10.0.0.5"].iter().collect();
        assert_eq!(ports, vec!["443", "80"]);
    }

    #[test]
    fn flow_set_enumerates_in_tuple_order() {
        let mut agg = Aggregator::new();
        agg.record(classify(&attrs("10.2.2.2", "80", "10.1.1.1", "443", "6"), "10.1.1.1").unwrap());
        agg.record(classify(&attrs("10.1.1.1", "5000", "10.2.2.2", "443", "6"), "10.1.1.1").unwrap());

        let sources: Vec<&str> = agg.flows().iter().map(|f| f.source_address.as_str()).collect();
        assert_eq!(sources, vec!["10.1.1.1", "10.2.2.2"]);
    }
}
