// tests/capture.rs
//
// Queue interception, re-wrap window and the network tap.

use std::io::{Cursor, Read};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use csg_scrape::capture::{FlightQueue, NetworkTap, PageEvent, QueueBinding, RewrapWindow, TapReader};
use csg_scrape::model::{CaptureKind, RawCapture};
use serde_json::json;

fn captures(rx: &Receiver<PageEvent>) -> Vec<RawCapture> {
    rx.try_iter()
        .filter_map(|ev| match ev {
            PageEvent::Capture(c) => Some(c),
            PageEvent::Debug(_) => None,
        })
        .collect()
}

#[test]
fn push_forwards_and_still_appends() {
    let (tx, rx) = mpsc::channel();
    let mut binding = QueueBinding::install(None, tx, Instant::now());

    binding.push(json!([1, "0:[\"$\"]"]));
    binding.push(json!([2])); // nothing to forward
    binding.push(json!("odd"));

    let q = binding.queue().unwrap();
    assert!(q.is_wrapped());
    assert_eq!(q.len(), 3);

    let got = captures(&rx);
    assert_eq!(got, vec![RawCapture::queue("0:[\"$\"]")]);
    assert_eq!(got[0].kind, CaptureKind::QueueFragment);
}

#[test]
fn existing_entries_are_kept_not_replayed() {
    let (tx, rx) = mpsc::channel();
    let existing = FlightQueue::from_entries(vec![json!([0, "early"])]);
    let mut binding = QueueBinding::install(Some(existing), tx, Instant::now());
    binding.push(json!([1, "late"]));

    assert_eq!(binding.queue().unwrap().len(), 2);
    assert_eq!(captures(&rx), vec![RawCapture::queue("late")]);
}

#[test]
fn assignment_is_rewrapped() {
    let (tx, rx) = mpsc::channel();
    let mut binding = QueueBinding::install(None, tx, Instant::now());

    binding.assign(json!([[9, "kept"]]));
    assert!(binding.queue().unwrap().is_wrapped());
    assert_eq!(binding.queue().unwrap().len(), 1);

    binding.assign(json!({"not": "an array"}));
    assert!(binding.queue().unwrap().is_empty());

    binding.push(json!([1, "after"]));
    assert_eq!(captures(&rx), vec![RawCapture::queue("after")]);
}

#[test]
fn poll_rewraps_replacements_within_the_window() {
    let (tx, rx) = mpsc::channel();
    let t0 = Instant::now();
    let window = RewrapWindow::new(t0, Duration::from_millis(250), Duration::from_secs(30));
    let mut binding = QueueBinding::with_window(None, tx, window);

    // replaced behind the setter's back
    *binding.raw_slot() = Some(FlightQueue::new());
    assert!(!binding.queue().unwrap().is_wrapped());

    // not due yet
    assert!(binding.poll(t0 + Duration::from_millis(100)));
    assert!(!binding.queue().unwrap().is_wrapped());

    assert!(binding.poll(t0 + Duration::from_millis(300)));
    assert!(binding.queue().unwrap().is_wrapped());

    binding.push(json!([1, "seen"]));
    assert_eq!(captures(&rx), vec![RawCapture::queue("seen")]);
}

#[test]
fn poll_stops_after_the_window() {
    let (tx, _rx) = mpsc::channel();
    let t0 = Instant::now();
    let mut binding = QueueBinding::install(None, tx, t0);

    *binding.raw_slot() = Some(FlightQueue::new());
    assert!(!binding.poll(t0 + Duration::from_secs(31)));
    assert!(!binding.queue().unwrap().is_wrapped());
}

#[test]
fn tap_forwards_only_discriminated_bodies() {
    let (tx, rx) = mpsc::channel();
    let tap = NetworkTap::new(tx);

    assert!(!tap.observe(r#"{"status":"ok"}"#));
    assert!(tap.observe(r#"{"certificationStatus":"x"}"#));
    assert!(tap.observe(r#"push("{\"certificationStatus\":\"x\"}")"#));

    let got = captures(&rx);
    assert_eq!(got.len(), 2);
    assert!(got.iter().all(|c| c.kind == CaptureKind::NetworkBody));
}

#[test]
fn tap_truncates_large_bodies() {
    let (tx, rx) = mpsc::channel();
    let tap = NetworkTap::new(tx);
    let body = format!("{{\"certificationStatus\":\"x\",\"pad\":\"{}\"}}", "é".repeat(250_000));

    assert!(tap.observe(&body));
    let got = captures(&rx);
    assert_eq!(got[0].text.chars().count(), 200_000);
}

#[test]
fn tap_reader_passes_bytes_through_and_scans_at_eof() {
    let (tx, rx) = mpsc::channel();
    let body = br#"{"items":[{"certificationStatus":"certified"}]}"#.to_vec();
    let mut reader = TapReader::new(Cursor::new(body.clone()), NetworkTap::new(tx));

    let mut first = [0u8; 8];
    reader.read_exact(&mut first).unwrap();
    assert!(captures(&rx).is_empty()); // nothing before EOF

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    let mut all = first.to_vec();
    all.extend(rest);
    assert_eq!(all, body);

    let got = captures(&rx);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].text.as_bytes(), &body[..]);
}
