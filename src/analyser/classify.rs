//! Turns extracted attributes into classified flows relative to a target.
use super::containers::{ClassifiedFlow, Direction, FlowAttributes, FlowRecord, Protocol};

/// Classifies one set of flow attributes against the target address.
///
/// Returns `None` when the target is neither endpoint. The source side is
/// checked first, so self-traffic (target on both ends) classifies as
/// `Sent`. The recorded port is the destination port in both directions:
/// that is the service port the investigation cares about.
pub fn classify(attrs: &FlowAttributes, target: &str) -> Option<ClassifiedFlow> {
    let protocol = Protocol::from_id(&attrs.protocol_id);

    let (direction, peer) = if target == attrs.source_address {
        (Direction::Sent, attrs.destination_address.clone())
    } else if target == attrs.destination_address {
        (Direction::Received, attrs.source_address.clone())
    } else {
        return None;
    };

    Some(ClassifiedFlow {
        record: FlowRecord::new(attrs, &protocol),
        direction,
        peer,
        port: attrs.destination_port.clone(),
    })
}
