// tests/scan.rs
//
// Direct scans of network bodies and documents.

use csg_scrape::core::html::inline_scripts;
use csg_scrape::extract::scan::brace_blocks;
use csg_scrape::extract::{scan_body, scan_document, scan_inline_script};

#[test]
fn json_body_is_walked() {
    let body = r#"{"data":{"items":[{"_id":"n1","name":"Net","certificationStatus":"certified","score":1}]}}"#;
    let recs = scan_body(body);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].id, "n1");
    assert_eq!(recs[0].test_name, "Net");
}

#[test]
fn non_json_body_falls_back_to_brace_blocks() {
    let body = r#"garbage {"_id":"b1","certificationStatus":"pending","score":5} more {"x":1} {"_id":"b2","certificationStatus":"failed"}"#;
    let recs = scan_body(body);
    let ids: Vec<_> = recs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["b1", "b2"]);
}

#[test]
fn brace_block_window_counts_chars() {
    let pad = "é".repeat(1000);
    let body = format!(r#"{{"note":"{pad}","certificationStatus":"x"}}"#);
    let found = brace_blocks(&body);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["note"].as_str().map(|s| s.chars().count()), Some(1000));

    let pad = "é".repeat(2001);
    let body = format!(r#"{{"note":"{pad}","certificationStatus":"x"}}"#);
    assert!(brace_blocks(&body).is_empty());
}

#[test]
fn brace_blocks_need_a_string_status_and_no_nesting() {
    assert!(brace_blocks(r#"{"certificationStatus":null}"#).is_empty());
    assert!(brace_blocks(r#"{"a":{"certificationStatus":"x"}}"#).len() == 1); // inner block only
    assert!(brace_blocks(r#"{"certificationStatus":"x", broken}"#).is_empty());
}

#[test]
fn inline_push_literal_is_decoded() {
    let script = r#"self.__next_f.push([1,"5:[\"$\",\"div\",null,{\"results\":[{\"testName\":\"GCA\",\"screenDoc\":{\"_id\":\"i1\",\"certificationStatus\":\"certified\"}}]}]"])"#;
    let recs = scan_inline_script(script);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].id, "i1");
    assert_eq!(recs[0].test_name, "GCA");
}

#[test]
fn document_scan_skips_external_scripts() {
    let html = r#"<html><head>
<script src="/app.js">{"_id":"ext","certificationStatus":"x"}</script>
<SCRIPT type="application/json">{"_id":"inl","certificationStatus":"certified"}</SCRIPT>
<script data-src="x">{"_id":"data","certificationStatus":"pending"}</script>
<script>   </script>
</head></html>"#;

    assert_eq!(inline_scripts(html).len(), 2);
    let ids: Vec<_> = scan_document(html).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["inl", "data"]);
}
