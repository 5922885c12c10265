// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use csg_scrape::extract::{process_flight, scan_body, scan_document};

/// Synthetic results list shaped like a real streamed fragment.
fn sample_results(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"testName":"Assessment {i}","frameworkName":"GCA","companies":[{{"_id":"c{i}","name":"Co {i}"}}],"screenDoc":{{"_id":"sd{i}","certificationStatus":"certified","score":{},"maxScore":850,"finishDate":1700000000000,"proctoringOptions":{{"isEnabled":true,"ruleIds":[1,2,3]}}}}}}"#,
                400 + i
            )
        })
        .collect();
    format!(r#"["$","div",null,{{"results":[{}]}}]"#, items.join(","))
}

fn bench_extract(c: &mut Criterion) {
    let payload = sample_results(200);
    let raw_tag = format!("5:{payload}");
    let escaped_tag = format!("5:{}", payload.replace('"', "\\\""));
    let body = format!(r#"{{"data":{}}}"#, payload);
    let doc = format!(
        r#"<html><body><script>self.__next_f.push([1,"{}"])</script></body></html>"#,
        escaped_tag
    );

    c.bench_function("flight_raw", |b| {
        b.iter(|| black_box(process_flight(black_box(&raw_tag))).len())
    });

    c.bench_function("flight_escaped", |b| {
        b.iter(|| black_box(process_flight(black_box(&escaped_tag))).len())
    });

    c.bench_function("net_body_walk", |b| {
        b.iter(|| black_box(scan_body(black_box(&body))).len())
    });

    c.bench_function("document_scan", |b| {
        b.iter(|| black_box(scan_document(black_box(&doc))).len())
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
