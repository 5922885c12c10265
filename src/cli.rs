// src/cli.rs
use std::{env, error::Error};

use crate::{
    config::options::{AppOptions, CaptureInput, ExportFormat, InputKind},
    progress::Progress,
    runner,
    store::Store,
};

#[derive(Debug)]
pub enum Command {
    Capture { options: AppOptions, export: bool },
    ListContexts,
    Clear,
    Help,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    match parse_args(env::args().skip(1))? {
        Command::Help => eprintln!("{}", include_str!("cli_help.txt")),
        Command::ListContexts => {
            let store = Store::default();
            for (tab, items) in store.load_all() {
                println!("{},{}", tab, items.len());
            }
        }
        Command::Clear => {
            let store = Store::default();
            let ids = store.list_contexts();
            for tab in &ids {
                store.remove_context(*tab)?;
            }
            eprintln!("Cleared {} stored context(s)", ids.len());
        }
        Command::Capture { options, export } => {
            let mut prog = CliProgress;
            let summary = runner::run(&options, export, Some(&mut prog))?;
            match summary.written {
                Some(path) => eprintln!("Wrote {} record(s) → {}", summary.records.len(), path.display()),
                None => eprintln!("{} record(s) captured", summary.records.len()),
            }
        }
    }
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Command, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut options = AppOptions::default();
    let mut export = false;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--html" => options.capture.inputs.push(input(InputKind::Html, args.next(), "--html")?),
            "--body" => options.capture.inputs.push(input(InputKind::Body, args.next(), "--body")?),
            "--flight" => options.capture.inputs.push(input(InputKind::Flight, args.next(), "--flight")?),
            "--url" => options.capture.inputs.push(input(InputKind::Url, args.next(), "--url")?),
            "--tab" => {
                options.capture.tab_id = args.next().ok_or("Missing value for --tab")?.parse()?;
            }
            "-o" | "--out" => {
                options.export.set_path(&args.next().ok_or("Missing output path")?);
                export = true;
            }
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                options.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "json" => ExportFormat::Json,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };
                export = true;
            }
            "--save" => options.capture.save = true,
            "--list-contexts" => return Ok(Command::ListContexts),
            "--clear" => return Ok(Command::Clear),
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if options.capture.inputs.is_empty() {
        return Err("Nothing to capture (use --html, --body, --flight or --url)".into());
    }
    Ok(Command::Capture { options, export })
}

fn input(kind: InputKind, v: Option<String>, flag: &str) -> Result<CaptureInput, Box<dyn Error>> {
    let v = v.ok_or_else(|| format!("Missing value for {flag}"))?;
    Ok(CaptureInput::new(kind, v))
}

struct CliProgress;

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        eprintln!("Capturing {} input(s)", total);
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, source: &str, records: usize) {
        eprintln!("  {source}: {records} record(s)");
    }
}
