// tests/locate_decode.rs
//
// Fragment location and tagged-string decoding.

use csg_scrape::config::consts::MAX_WALK_NODES;
use csg_scrape::core::locate::locate_array;
use csg_scrape::extract::records::walk_with_limit;
use csg_scrape::extract::{decode_tagged, process_flight};
use serde_json::json;

const RAW: &str = r#"5:["$","div",null,{"results":[{"testName":"A","screenDoc":{"_id":"a1","certificationStatus":"certified","score":600}},{"testName":"B","screenDoc":{"_id":"b2","certificationStatus":"pending"}}]}]"#;

/// Same payload as `RAW`, as it looks inside a string literal.
fn escaped(raw: &str) -> String {
    raw.replace('"', "\\\"")
}

#[test]
fn locate_skips_brackets_inside_strings() {
    assert_eq!(locate_array(r#"xx:[1,"a]b",2]tail"#), Some(r#"[1,"a]b",2]"#));
}

#[test]
fn locate_handles_nesting_and_escapes() {
    assert_eq!(locate_array(r#"p [[1],["\"]"]] q"#), Some(r#"[[1],["\"]"]]"#));
    assert_eq!(locate_array("no array here"), None);
    assert_eq!(locate_array("[1,[2"), None);
}

#[test]
fn tagged_results_come_back_in_order() {
    let raw = decode_tagged(RAW);
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["testName"], json!("A"));
    assert_eq!(raw[1]["testName"], json!("B"));

    let recs = process_flight(RAW);
    assert_eq!(recs[0].id, "a1");
    assert_eq!(recs[0].status, "certified");
    assert_eq!(recs[0].score, Some(600.0));
    assert_eq!(recs[1].id, "b2");
}

#[test]
fn escaped_payload_decodes_to_the_same_records() {
    let esc = escaped(RAW);
    assert_ne!(esc, RAW);
    assert_eq!(process_flight(&esc), process_flight(RAW));
}

#[test]
fn children_results_are_collected() {
    let tag = r#"a:[null,{"children":[{"results":[{"name":"one","certificationStatus":"x"}]},{"results":[{"name":"two","certificationStatus":"y"}]}]}]"#;
    let recs = process_flight(tag);
    let names: Vec<_> = recs.iter().map(|r| r.test_name.as_str()).collect();
    assert_eq!(names, ["one", "two"]);
}

#[test]
fn structural_walk_finds_nested_discriminated_objects() {
    let tag = r#"7:["$",{"deep":{"list":[{"certificationStatus":"certified","name":"outer","inner":{"certificationStatus":"pending","name":"inner"}}]}}]"#;
    let recs = process_flight(tag);
    let names: Vec<_> = recs.iter().map(|r| r.test_name.as_str()).collect();
    assert_eq!(names, ["outer", "inner"]);
}

#[test]
fn text_before_the_array_is_skipped() {
    let tag = r#"3:I{"x":1} ["$",{"results":[{"testName":"Z","certificationStatus":"c"}]}] trailing"#;
    let recs = process_flight(tag);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].test_name, "Z");
}

#[test]
fn garbage_decodes_to_nothing() {
    assert!(decode_tagged("").is_empty());
    assert!(decode_tagged("1:").is_empty());
    assert!(decode_tagged("2:[1,2,3]").is_empty());
    assert!(decode_tagged("3:[\"unterminated").is_empty());
    assert!(decode_tagged(r#"4:{"certificationStatus":"x"}"#).is_empty());
}

#[test]
fn walk_stops_at_the_node_cap() {
    let roots = vec![json!({}), json!([{}]), json!({"certificationStatus": "late"})];
    assert!(walk_with_limit(&roots, 3).is_empty());
    assert_eq!(walk_with_limit(&roots, 4).len(), 1);

    // a discriminated object past the cap is never reached
    let tag = format!(r#"9:[{}{{"certificationStatus":"late"}}]"#, "{},".repeat(MAX_WALK_NODES));
    assert!(decode_tagged(&tag).is_empty());
    assert_eq!(decode_tagged(r#"9:[{},{"certificationStatus":"late"}]"#).len(), 1);
}
