// tests/bus.rs
//
// Cache, content agent, coordinator and the message bus between them.

use std::time::Instant;

use csg_scrape::agent::ContentAgent;
use csg_scrape::bus::{ask, BusError, Endpoint, LocalBus, Message, Reply};
use csg_scrape::cache::RecordCache;
use csg_scrape::coordinator::Coordinator;
use csg_scrape::extract::normalize;
use csg_scrape::model::NormalizedRecord;
use serde_json::json;

const PAGE: &str = r#"<html><body>
<script>self.__next_f.push([1,"5:[\"$\",\"div\",null,{\"results\":[{\"testName\":\"GCA\",\"screenDoc\":{\"_id\":\"p1\",\"certificationStatus\":\"certified\",\"score\":700}}]}]"])</script>
</body></html>"#;

fn record(id: &str, score: f64) -> NormalizedRecord {
    NormalizedRecord { id: id.into(), test_name: "T".into(), score: Some(score), ..Default::default() }
}

#[test]
fn cache_keeps_the_later_of_two_same_key_records() {
    let mut cache = RecordCache::new();
    assert_eq!(cache.upsert([record("k", 1.0)]), 1);
    assert_eq!(cache.upsert([record("k", 2.0)]), 0);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("k").unwrap().score, Some(2.0));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn identity_falls_back_to_name_date_score() {
    let mut r = record("", 80.0);
    r.finish_date = "2023-11-14T22:13:20.000Z".into();
    assert_eq!(r.identity_key(), "T|2023-11-14T22:13:20.000Z|80");
    r.score = None;
    assert_eq!(r.identity_key(), "T|2023-11-14T22:13:20.000Z|");
}

#[test]
fn later_capture_overwrites_earlier_one() {
    let mut agent = ContentAgent::new(1);
    let mut queue = agent.install_queue(None, Instant::now());
    queue.push(json!([1, r#"1:[{"results":[{"_id":"same","name":"old","certificationStatus":"pending"}]}]"#]));
    queue.push(json!([2, r#"2:[{"results":[{"_id":"same","name":"new","certificationStatus":"certified"}]}]"#]));

    assert_eq!(agent.pump(), 2);
    let snap = agent.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].test_name, "new");
}

#[test]
fn agent_serves_verify_data() {
    let mut agent = ContentAgent::new(3);
    assert_eq!(agent.load_document(PAGE), 1);

    let reply = agent.handle(None, Message::GetData).unwrap();
    let Reply::Message(Message::VerifyData { payload }) = reply else { panic!("unexpected reply") };
    assert_eq!(payload.len(), 1);
    assert_eq!(payload[0].id, "p1");

    // network bodies arrive through the tap
    agent.network_tap().observe(r#"{"x":[{"_id":"n","certificationStatus":"x"}]}"#);
    let reply = agent.handle(None, Message::ForceScan).unwrap();
    assert_eq!(reply.records().map(<[NormalizedRecord]>::len), Some(2));
}

#[test]
fn mutations_and_force_scan_rescan_inline_scripts() {
    let mut agent = ContentAgent::new(5);
    assert_eq!(agent.load_document("<html><body></body></html>"), 0);
    assert!(agent.snapshot().is_empty());

    // scripts inserted after load; rescans are idempotent
    assert_eq!(agent.on_mutation(PAGE), 1);
    assert_eq!(agent.on_mutation(PAGE), 1);
    assert_eq!(agent.snapshot().len(), 1);

    let reply = agent.handle(None, Message::ForceScan).unwrap();
    let records = reply.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "p1");
}

#[test]
fn save_uses_the_senders_context() {
    let mut c = Coordinator::new();
    let items = vec![normalize(&json!({"_id": "a", "certificationStatus": "x"}))];

    let reply = c.handle(Some(4), Message::Save { tab_id: Some(99), items: items.clone() });
    assert_eq!(reply, Some(Reply::ok()));
    assert_eq!(c.items(4), &items[..]);
    assert!(c.items(99).is_empty());
    assert_eq!(c.take_outbox(), vec![Message::CacheUpdated { tab_id: 4, count: 1 }]);

    let reply = c.handle(None, Message::Save { tab_id: None, items });
    assert_eq!(reply, Some(Reply::fail("no-tab")));
}

#[test]
fn refresh_without_an_active_context_fails() {
    let mut bus = LocalBus::default();
    let reply = bus.send_to_background(None, Message::RefreshTab).unwrap();
    assert_eq!(reply, Reply::fail("no-active-tab"));
}

#[test]
fn refresh_reloads_and_announces_completion() {
    let mut bus = LocalBus::new(Coordinator::new());
    bus.focus(7).load_document(PAGE);
    assert_eq!(bus.sync_tab(7).unwrap(), Reply::ok());
    assert_eq!(bus.poll_notification(), Some(Message::CacheUpdated { tab_id: 7, count: 1 }));

    let reply = bus.send_to_background(None, Message::RefreshTab).unwrap();
    assert_eq!(reply, Reply::ok());

    let notes: Vec<Message> = std::iter::from_fn(|| bus.poll_notification()).collect();
    assert_eq!(
        notes,
        vec![Message::CacheUpdated { tab_id: 7, count: 1 }, Message::TabReloaded { tab_id: 7 }]
    );

    let Reply::Items { items } = bus.send_to_background(None, Message::GetData).unwrap() else {
        panic!("expected items");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "p1");
}

#[test]
fn reload_drops_records_the_page_no_longer_has() {
    let mut bus = LocalBus::new(Coordinator::new());
    let agent = bus.focus(8);
    agent.load_document(PAGE);
    let mut queue = agent.install_queue(None, Instant::now());
    queue.push(json!([1, r#"1:[{"results":[{"_id":"gone","name":"Old","certificationStatus":"expired"}]}]"#]));
    assert_eq!(agent.pump(), 1);
    assert_eq!(ask(&mut bus, 8, Message::GetData).map(|r| r.len()), Some(2));

    assert_eq!(bus.send_to_background(None, Message::RefreshTab).unwrap(), Reply::ok());

    let ids: Vec<String> = ask(&mut bus, 8, Message::GetData)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, ["p1"]);

    let Reply::Items { items } = bus.send_to_background(None, Message::GetData).unwrap() else {
        panic!("expected items");
    };
    assert_eq!(items.len(), 1);
}

#[test]
fn ask_returns_none_when_nobody_listens() {
    let mut bus = LocalBus::default();
    assert_eq!(ask(&mut bus, 42, Message::GetData), None);
    assert!(matches!(bus.send_to_tab(42, Message::GetData), Err(BusError::NoReceiver(_))));

    // the failure is reported on the log channel
    let logs: Vec<Message> = std::iter::from_fn(|| bus.poll_notification()).collect();
    assert!(logs.iter().any(|m| matches!(m, Message::Log { line } if line.starts_with("✗ sendMessage error"))));
}

#[test]
fn messages_keep_their_wire_shape() {
    let v = serde_json::to_value(Message::CacheUpdated { tab_id: 3, count: 2 }).unwrap();
    assert_eq!(v, json!({"type": "CSG_CACHE_UPDATED", "tabId": 3, "count": 2}));

    let v = serde_json::to_value(Message::GetData).unwrap();
    assert_eq!(v, json!({"type": "CSG_GET_DATA"}));

    let m: Message = serde_json::from_value(json!({"type": "CSG_SAVE", "items": []})).unwrap();
    assert_eq!(m, Message::Save { tab_id: None, items: Vec::new() });

    let v = serde_json::to_value(Reply::fail("no-tab")).unwrap();
    assert_eq!(v, json!({"ok": false, "error": "no-tab"}));
}
