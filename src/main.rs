// Demo host: loads a speaker layout from TOML, registers the configured
// sounds, and drives the field with a fixed-period tick loop, logging each
// report. Real hosts own transport and serialization themselves.
mod cli;

use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use phonotope::config::FieldConfig;
use phonotope::field::registry::{ReportEvent, SoundField};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args = cli::Args::parse();
    let cfg = FieldConfig::load_or_default(&args.config);

    let graph = match cfg.build_graph() {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("speaker graph: {err}");
            std::process::exit(1);
        }
    };
    info!(speakers = graph.len(), "speaker graph built");

    let mut field = SoundField::new(graph, cfg.params());
    for cmd in cfg.commands.clone() {
        match field.apply(cmd) {
            Ok(Some(notice)) => info!(id = %notice.id, status = notice.status, "sound"),
            Ok(None) => {}
            Err(err) => warn!(%err, "command rejected"),
        }
    }

    for _ in 0..args.ticks {
        std::thread::sleep(Duration::from_millis(args.period_ms));

        for notice in field.advance() {
            info!(id = %notice.id, status = notice.status, "sound");
        }

        for event in field.report() {
            match event {
                ReportEvent::Begin => info!("begin"),
                ReportEvent::Sound { id, gains } => info!(id = %id, ?gains, "sound gains"),
                ReportEvent::Done => info!("done"),
            }
        }

        if args.stop_when_empty && field.is_empty() {
            info!("no live sounds, stopping");
            break;
        }
    }
}
