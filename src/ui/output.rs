use crate::analyser::aggregate::{PeerPortMap, TrafficSummary};
use crate::analyser::containers::{Direction, FlowRecord};
use ansi_term::Colour;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn print_flows(target: &str, flows: &BTreeSet<FlowRecord>) {
    if flows.is_empty() {
        println!("No flows found involving IP: {}", target);
        return;
    }

    println!("\n\u{250F}\u{2501}\u{2501}\u{2501}\u{2501} Flows involving IP: {}", Colour::Red.paint(target));
    println!("\u{2503}");
    for flow in flows {
        println!(
            "\u{2503} Source: {}:{} -> Destination: {}:{} | Protocol: {}",
            Colour::Fixed(226).paint(&flow.source_address),
            flow.source_port,
            Colour::Fixed(226).paint(&flow.destination_address),
            flow.destination_port,
            flow.protocol,
        );
    }
    println!("\u{2503} ");
}

pub fn print_summary(target: &str, summary: &TrafficSummary) {
    if summary.sent.is_empty() && summary.received.is_empty() {
        println!("No flows found involving IP: {}", target);
        return;
    }

    println!("\n\u{250F}\u{2501}\u{2501}\u{2501}\u{2501} Traffic summary for {}", Colour::Red.paint(target));
    print_direction(Direction::Sent, &summary.sent);
    print_direction(Direction::Received, &summary.received);
    println!("\u{2503} ");
}

fn print_direction(direction: Direction, map: &PeerPortMap) {
    println!("\u{2503}");
    println!(
        "\u{2503} {} ({} peers)",
        Colour::Fixed(226).paint(direction.to_string()),
        map.len()
    );
    for (peer, ports) in map {
        let ports: Vec<&str> = ports.iter().map(String::as_str).collect();
        println!("\u{2503}   {} : {}", peer, ports.join(", "));
    }
}

pub fn flows_as_json(flows: &BTreeSet<FlowRecord>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(flows)
}

pub fn summary_as_json(summary: &TrafficSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

pub fn data_to_file(data: String, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Renders the summary as CSV rows, Sent rows before Received, each block
/// in peer then port order.
pub fn write_summary_csv<W: Write>(summary: &TrafficSummary, writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Peer IP", "Direction", "Destination Port"])?;

    for (direction, map) in [(Direction::Sent, &summary.sent), (Direction::Received, &summary.received)] {
        let label = direction.to_string();
        for (peer, ports) in map {
            for port in ports {
                writer.write_record([peer.as_str(), label.as_str(), port.as_str()])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

pub fn save_summary_csv(summary: &TrafficSummary, path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    write_summary_csv(summary, file)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
