use serde::Serialize;
use std::fmt;

/// One fully-extracted set of flow attributes from a single log line.
///
/// All five fields are non-empty; a line either yields all of them or none.
/// Ports and protocol ids stay strings, since nothing does arithmetic on
/// them and the logged text must survive into the output unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowAttributes {
    pub source_address: String,
    pub source_port: String,
    pub destination_address: String,
    pub destination_port: String,
    pub protocol_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Other(String),
}

impl Protocol {
    pub fn from_id(id: &str) -> Self {
        match id {
            "6" => Protocol::Tcp,
            "17" => Protocol::Udp,
            _ => Protocol::Other(id.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Protocol::Tcp => String::from("TCP"),
            Protocol::Udp => String::from("UDP"),
            Protocol::Other(id) => format!("ID-{}", id),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Direction of a flow relative to the target address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The five-tuple retained per unique flow involving the target.
///
/// Field order matters: the derived `Ord` is the ascending lexicographic
/// tuple order the listing output is enumerated in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FlowRecord {
    pub source_address: String,
    pub source_port: String,
    pub destination_address: String,
    pub destination_port: String,
    pub protocol: String,
}

impl FlowRecord {
    pub fn new(attrs: &FlowAttributes, protocol: &Protocol) -> Self {
        Self {
            source_address: attrs.source_address.clone(),
            source_port: attrs.source_port.clone(),
            destination_address: attrs.destination_address.clone(),
            destination_port: attrs.destination_port.clone(),
            protocol: protocol.label(),
        }
    }
}

/// A relevant flow plus everything the aggregator needs: direction and the
/// peer/port pair for the summary view. `port` is the destination port for
/// both directions, as that is the service port of interest.
#[derive(Clone, Debug)]
pub struct ClassifiedFlow {
    pub record: FlowRecord,
    pub direction: Direction,
    pub peer: String,
    pub port: String,
}
