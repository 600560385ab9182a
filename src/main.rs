mod analyser;
mod ui;

use analyser::extract::{Extractor, KeyOrder};
use clap::{ArgAction, Parser};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use ui::output;

/// srxflow digs flows involving a target IP out of Juniper SRX session logs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Syslog file to scan
    #[arg(short = 'f', long, value_parser)]
    file: PathBuf,

    /// Target IP address to investigate
    #[arg(short = 't', long, value_parser, required_unless_present = "targets", conflicts_with = "targets")]
    target: Option<String>,

    /// CSV file of targets, one record per line, address in the second field
    #[arg(short = 'T', long, value_parser)]
    targets: Option<PathBuf>,

    /// Print the per-peer sent/received summary instead of the flow listing
    #[arg(short = 's', long, action = ArgAction::SetTrue)]
    summary: bool,

    /// Directory to write per-target result files
    #[arg(short = 'o', long, value_parser)]
    output_dir: Option<String>,

    /// Accept the flow keys in any order within a line
    #[arg(long, action = ArgAction::SetTrue)]
    any_order: bool,

    /// Display output as formatted JSON
    #[arg(short = 'j', long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() {
    simple_logger::init_with_env().unwrap();

    let args = Args::parse();
    let out;

    if let Some(out_dir) = args.output_dir.as_deref() {
        log::info!("Output directory {out_dir}");
        let _ = fs::create_dir_all(out_dir);
        out = Some(out_dir);
    } else {
        out = None;
    }

    let order = if args.any_order { KeyOrder::Any } else { KeyOrder::Fixed };
    let extractor = Extractor::new(order);

    if let Some(targets_file) = args.targets.as_deref() {
        let targets = match analyser::utils::read_targets(targets_file) {
            Ok(targets) => targets,
            Err(err) => {
                log::error!("Failed to read target list {}: {err}", targets_file.display());
                process::exit(1);
            }
        };
        if targets.is_empty() {
            log::warn!("No target addresses found in {}", targets_file.display());
        }

        // One target's unreadable source must not sink the rest of the batch.
        for target in &targets {
            if let Err(err) = run_target(&args, &extractor, target, out) {
                log::error!("Skipping {target}: {err}");
            }
        }
    } else {
        let target = args.target.as_deref().unwrap();
        if let Err(err) = run_target(&args, &extractor, target, out) {
            log::error!("Failed to scan {}: {err}", args.file.display());
            process::exit(1);
        }
    }
}

fn run_target(args: &Args, extractor: &Extractor, target: &str, out: Option<&str>) -> io::Result<()> {
    let aggregator = analyser::core::scan_log(&args.file, target, extractor)?;

    // ---- Output ----
    if args.summary {
        if args.json {
            println!("{}", output::summary_as_json(aggregator.summary()).unwrap());
        } else {
            output::print_summary(target, aggregator.summary());
        }
        if let Some(out_dir) = out {
            let path = format!("{}/{}_summary.csv", out_dir, target);
            if let Err(err) = output::save_summary_csv(aggregator.summary(), Path::new(&path)) {
                log::error!("Failed to write {path}: {err}");
            }
        }
    } else {
        if args.json {
            println!("{}", output::flows_as_json(aggregator.flows()).unwrap());
        } else {
            output::print_flows(target, aggregator.flows());
        }
        if let Some(out_dir) = out {
            let path = format!("{}/{}_flows.json", out_dir, target);
            let json = output::flows_as_json(aggregator.flows()).unwrap();
            let _ = output::data_to_file(json, Path::new(&path));
        }
    }

    Ok(())
}
