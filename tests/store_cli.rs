// tests/store_cli.rs
//
// Context store, entitlement, CLI parsing and the capture runner.

use std::fs;
use std::path::PathBuf;

use csg_scrape::agent::ContentAgent;
use csg_scrape::cli::{parse_args, Command};
use csg_scrape::config::options::{CaptureInput, CaptureOptions, ExportFormat, InputKind};
use csg_scrape::coordinator::Coordinator;
use csg_scrape::entitlement::{Entitlement, LicenseFile, Unlocked, User};
use csg_scrape::extract::normalize;
use csg_scrape::runner::run_capture;
use csg_scrape::store::Store;
use serde_json::json;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("csg_store_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn store_round_trips_contexts() {
    let store = Store::new(tmp_dir("roundtrip").join("contexts"));
    let items = vec![normalize(&json!({"_id": "a", "certificationStatus": "certified", "score": 1.5}))];

    store.save_context(12, &items).unwrap();
    store.save_context(3, &[]).unwrap();
    assert_eq!(store.list_contexts(), vec![3, 12]);
    assert_eq!(store.load_context(12).unwrap(), items);

    store.remove_context(3).unwrap();
    store.remove_context(3).unwrap(); // already gone is fine
    assert_eq!(store.list_contexts(), vec![12]);
}

#[test]
fn broken_store_files_are_skipped() {
    let dir = tmp_dir("broken");
    let store = Store::new(&dir);
    store.save_context(1, &[]).unwrap();
    fs::write(dir.join("tab_2.json"), "{not json").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let all = store.load_all();
    assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn coordinator_starts_from_the_store() {
    let dir = tmp_dir("coordinator");
    let items = vec![normalize(&json!({"_id": "x", "certificationStatus": "c"}))];
    Store::new(&dir).save_context(5, &items).unwrap();

    let c = Coordinator::with_store(Store::new(&dir));
    assert_eq!(c.context_ids(), vec![5]);
    assert_eq!(c.items(5), &items[..]);
}

#[test]
fn unlocked_when_paid_or_active() {
    let u: User = serde_json::from_str(r#"{"subscriptionStatus":"active"}"#).unwrap();
    assert!(u.is_unlocked());
    let u: User = serde_json::from_str(r#"{"paid":false,"subscriptionStatus":"canceled","email":"a@b"}"#).unwrap();
    assert!(!u.is_unlocked());
    assert!(User { paid: true, ..Default::default() }.is_unlocked());
    assert!(Unlocked.get_user().unwrap().is_unlocked());
}

#[test]
fn license_file_is_read_when_present() {
    let dir = tmp_dir("license");
    let mut lic = LicenseFile::new(dir.join("license.json"));
    assert_eq!(lic.get_user(), None);

    fs::write(lic.path(), r#"{"paid":true,"plan":"pro"}"#).unwrap();
    let user = lic.get_user().unwrap();
    assert!(user.is_unlocked());
    assert_eq!(user.plan.as_deref(), Some("pro"));

    fs::write(lic.path(), "nope").unwrap();
    assert_eq!(lic.get_user(), None);
}

#[test]
fn cli_parses_capture_flags() {
    let cmd = parse_args(args(&["--html", "page.html", "--flight", "q.txt", "--tab", "4", "--format", "json", "--save"])).unwrap();
    let Command::Capture { options, export } = cmd else { panic!("expected capture") };
    assert!(export);
    assert!(options.capture.save);
    assert_eq!(options.capture.tab_id, 4);
    assert_eq!(options.export.format, ExportFormat::Json);
    assert_eq!(
        options.capture.inputs,
        vec![CaptureInput::new(InputKind::Html, "page.html"), CaptureInput::new(InputKind::Flight, "q.txt")]
    );
}

#[test]
fn cli_rejects_bad_input() {
    assert!(parse_args(args(&[])).is_err());
    assert!(parse_args(args(&["--html"])).is_err());
    assert!(parse_args(args(&["--body", "b", "--format", "tsv"])).is_err());
    assert!(parse_args(args(&["--bogus"])).is_err());
    assert!(matches!(parse_args(args(&["--list-contexts"])), Ok(Command::ListContexts)));
    assert!(matches!(parse_args(args(&["-h"])), Ok(Command::Help)));
}

#[test]
fn input_kind_is_guessed_from_the_path() {
    assert_eq!(CaptureInput::guess("a/B.HTML").kind, InputKind::Html);
    assert_eq!(CaptureInput::guess("q.flight").kind, InputKind::Flight);
    assert_eq!(CaptureInput::guess("resp.json").kind, InputKind::Body);
    assert_eq!(CaptureInput::guess("http://host/x").kind, InputKind::Url);
}

#[test]
fn runner_feeds_every_input_kind() {
    let dir = tmp_dir("runner");
    let html = dir.join("page.html");
    let body = dir.join("body.json");
    let flight = dir.join("queue.flight");

    fs::write(&html, r#"<script>{"_id":"h","certificationStatus":"certified"}</script>"#).unwrap();
    fs::write(&body, r#"{"data":[{"_id":"b","certificationStatus":"pending"}]}"#).unwrap();
    fs::write(
        &flight,
        "0:[\"$\",{\"results\":[{\"_id\":\"f1\",\"certificationStatus\":\"x\"}]}]\n\n1:[{\"results\":[{\"_id\":\"f2\",\"certificationStatus\":\"y\"}]}]\n",
    )
    .unwrap();

    let opts = CaptureOptions {
        tab_id: 9,
        inputs: vec![
            CaptureInput::new(InputKind::Html, html.to_string_lossy()),
            CaptureInput::new(InputKind::Body, body.to_string_lossy()),
            CaptureInput::new(InputKind::Flight, flight.to_string_lossy()),
        ],
        save: false,
    };
    let mut agent = ContentAgent::new(9);
    assert_eq!(run_capture(&opts, &mut agent, None).unwrap(), 4);

    let mut ids: Vec<String> = agent.snapshot().into_iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, ["b", "f1", "f2", "h"]);

    let missing = CaptureOptions { inputs: vec![CaptureInput::new(InputKind::Html, dir.join("nope.html").to_string_lossy())], ..opts };
    assert!(run_capture(&missing, &mut agent, None).is_err());
}
