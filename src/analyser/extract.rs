//! Tolerant extraction of flow attributes from raw session-log lines.
//!
//! SRX deployments drift in how they render key/value pairs: values may or
//! may not be double-quoted and token separation varies between one and
//! several whitespace characters. The patterns here accept all of it.
use super::containers::FlowAttributes;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Source fields, then destination fields, with protocol-id anywhere
    // later in the line (other key/value pairs may sit in between).
    static ref FLOW_PATTERN: Regex = Regex::new(
        r#"source-address="?([\d.]+)"?\s+source-port="?(\d+)"?\s+destination-address="?([\d.]+)"?\s+destination-port="?(\d+)"?.*?protocol-id="?(\d+)"?"#
    ).unwrap();

    static ref SOURCE_ADDRESS: Regex = Regex::new(r#"source-address="?([\d.]+)"?"#).unwrap();
    static ref SOURCE_PORT: Regex = Regex::new(r#"source-port="?(\d+)"?"#).unwrap();
    static ref DESTINATION_ADDRESS: Regex = Regex::new(r#"destination-address="?([\d.]+)"?"#).unwrap();
    static ref DESTINATION_PORT: Regex = Regex::new(r#"destination-port="?(\d+)"?"#).unwrap();
    static ref PROTOCOL_ID: Regex = Regex::new(r#"protocol-id="?(\d+)"?"#).unwrap();
}

/// Whether the address/port keys are required to appear in the
/// source-before-destination order the firewall emits them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOrder {
    Fixed,
    Any,
}

/// Locates the five required flow attributes in one line of text.
///
/// Extraction is all-or-nothing: a line missing any key, or with a value
/// failing its character class, yields `None`. Unrelated lines are the
/// common case and are not worth logging.
pub struct Extractor {
    order: KeyOrder,
}

impl Extractor {
    pub fn new(order: KeyOrder) -> Self {
        Self { order }
    }

    pub fn extract(&self, line: &str) -> Option<FlowAttributes> {
        match self.order {
            KeyOrder::Fixed => extract_fixed(line),
            KeyOrder::Any => extract_any(line),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(KeyOrder::Fixed)
    }
}

fn extract_fixed(line: &str) -> Option<FlowAttributes> {
    let caps = FLOW_PATTERN.captures(line)?;

    Some(FlowAttributes {
        source_address: caps[1].to_string(),
        source_port: caps[2].to_string(),
        destination_address: caps[3].to_string(),
        destination_port: caps[4].to_string(),
        protocol_id: caps[5].to_string(),
    })
}

// Plain substring searches, same as the ordered pattern: no word-boundary
// assertion around the key names, to stay match-for-match with it.
fn extract_any(line: &str) -> Option<FlowAttributes> {
    let grab = |pattern: &Regex| {
        pattern
            .captures(line)
            .map(|caps| caps[1].to_string())
    };

    Some(FlowAttributes {
        source_address: grab(&SOURCE_ADDRESS)?,
        source_port: grab(&SOURCE_PORT)?,
        destination_address: grab(&DESTINATION_ADDRESS)?,
        destination_port: grab(&DESTINATION_PORT)?,
        protocol_id: grab(&PROTOCOL_ID)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTED: &str = r#"RT_FLOW_SESSION_CREATE: session created source-address="10.1.1.1" source-port="5000" destination-address="10.2.2.2" destination-port="443" service-name="junos-https" protocol-id="6" policy-name="allow-web""#;

    #[test]
    fn extracts_quoted_line() {
        let attrs = Extractor::default().extract(QUOTED).unwrap();
        assert_eq!(attrs.source_address, "10.1.1.1");
        assert_eq!(attrs.source_port, "5000");
        assert_eq!(attrs.destination_address, "10.2.2.2");
        assert_eq!(attrs.destination_port, "443");
        assert_eq!(attrs.protocol_id, "6");
    }

    #[test]
    fn extracts_unquoted_line() {
        let line = "source-address=10.1.1.1 source-port=5000 destination-address=10.2.2.2 destination-port=443 protocol-id=17";
        let attrs = Extractor::default().extract(line).unwrap();
        assert_eq!(attrs.source_address, "10.1.1.1");
        assert_eq!(attrs.protocol_id, "17");
    }

    #[test]
    fn tolerates_mixed_quoting_and_whitespace_runs() {
        let line = r#"source-address="10.1.1.1"   source-port=5000  destination-address=10.2.2.2     destination-port="443" protocol-id="6""#;
        let quoted = Extractor::default().extract(QUOTED).unwrap();
        let mixed = Extractor::default().extract(line).unwrap();
        assert_eq!(quoted, mixed);
    }

    #[test]
    fn ignores_unrelated_lines() {
        let extractor = Extractor::default();
        assert!(extractor.extract("").is_none());
        assert!(extractor
            .extract("Aug  7 12:00:01 fw1 sshd[1234]: Accepted publickey for admin")
            .is_none());
    }

    #[test]
    fn rejects_partial_vocabulary() {
        let line = r#"source-address="10.1.1.1" source-port="5000" destination-address="10.2.2.2""#;
        assert!(Extractor::default().extract(line).is_none());
    }

    #[test]
    fn rejects_bad_value_class() {
        let line = r#"source-address="10.1.1.1" source-port="high" destination-address="10.2.2.2" destination-port="443" protocol-id="6""#;
        assert!(Extractor::default().extract(line).is_none());
    }

    #[test]
    fn fixed_order_rejects_reordered_keys() {
        let line = r#"destination-address="10.2.2.2" destination-port="443" source-address="10.1.1.1" source-port="5000" protocol-id="6""#;
        assert!(Extractor::new(KeyOrder::Fixed).extract(line).is_none());
    }

    #[test]
    fn any_order_accepts_reordered_keys() {
        let line = r#"protocol-id="6" destination-address="10.2.2.2" destination-port="443" source-address="10.1.1.1" source-port="5000""#;
        let attrs = Extractor::new(KeyOrder::Any).extract(line).unwrap();
        assert_eq!(attrs.source_address, "10.1.1.1");
        assert_eq!(attrs.destination_port, "443");
        assert_eq!(attrs.protocol_id, "6");
    }

    #[test]
    fn any_order_still_requires_all_keys() {
        let line = r#"destination-address="10.2.2.2" destination-port="443" protocol-id="6""#;
        assert!(Extractor::new(KeyOrder::Any).extract(line).is_none());
    }
}
