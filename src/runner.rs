// src/runner.rs
use std::error::Error;
use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use crate::{
    agent::ContentAgent,
    bus::{LocalBus, Message},
    capture::TapReader,
    config::options::{AppOptions, CaptureInput, CaptureOptions, InputKind},
    coordinator::Coordinator,
    core::net::http_get,
    file::write_export,
    model::NormalizedRecord,
    progress::Progress,
    store::Store,
};

/// Summary of what was produced.
pub struct RunSummary {
    pub records: Vec<NormalizedRecord>,
    pub written: Option<PathBuf>,
}

/// Feed every input of `opts` through the agent's capture surface.
/// Returns how many records the agent holds afterwards.
pub fn run_capture(
    opts: &CaptureOptions,
    agent: &mut ContentAgent,
    mut progress: Option<&mut dyn Progress>,
) -> Result<usize, Box<dyn Error>> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts.inputs.len());
    }

    for input in &opts.inputs {
        let n = capture_one(input, agent)?;
        logf!("Capture: {:?} {} → {} record(s)", input.kind, input.source, n);
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&input.source, n);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(agent.cache().len())
}

fn capture_one(input: &CaptureInput, agent: &mut ContentAgent) -> Result<usize, Box<dyn Error>> {
    Ok(match input.kind {
        InputKind::Html => {
            let html = fs::read_to_string(&input.source)?;
            agent.load_document(html)
        }
        InputKind::Body => {
            // consumer reads the body; the tap sees it at EOF
            let mut body = String::new();
            TapReader::new(File::open(&input.source)?, agent.network_tap()).read_to_string(&mut body)?;
            agent.pump()
        }
        InputKind::Flight => {
            let text = fs::read_to_string(&input.source)?;
            let mut binding = agent.install_queue(None, Instant::now());
            for (i, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
                binding.push(json!([i + 1, line]));
            }
            agent.pump()
        }
        InputKind::Url => {
            let body = http_get(&input.source, Some(&agent.network_tap()))?;
            agent.pump() + agent.load_document(body)
        }
    })
}

/// CLI entry: capture into one context, optionally persist, optionally export.
pub fn run(
    options: &AppOptions,
    export: bool,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let capture = &options.capture;
    let coordinator = if capture.save { Coordinator::with_store(Store::default()) } else { Coordinator::new() };
    let mut bus = LocalBus::new(coordinator);

    let tab = capture.tab_id;
    run_capture(capture, bus.focus(tab), progress)?;

    if capture.save {
        bus.sync_tab(tab)?;
    }

    let records = crate::bus::ask(&mut bus, tab, Message::GetData).unwrap_or_default();
    let written = if export {
        Some(write_export(&options.export, &records)?)
    } else {
        None
    };

    Ok(RunSummary { records, written })
}
