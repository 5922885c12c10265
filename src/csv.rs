// src/csv.rs
use std::io::{self, Write};

use crate::core::sanitize::{csv_text, fmt_number};
use crate::model::NormalizedRecord;

pub const HEADERS: [&str; 17] = [
    "TestName", "Framework", "Maturity", "Companies", "Status", "ScreenStatus",
    "Score", "MaxScore", "Start", "Finish", "NextRetake",
    "ProctoringEnabled", "Video", "Display", "Photo", "ID", "RulesCount",
];

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

pub fn rows_to_string(rows: &[Vec<String>], headers: &Option<Vec<String>>, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/* ---------------- Records ---------------- */

/// One flat export row; nested fields are joined or counted.
pub fn record_row(r: &NormalizedRecord) -> Vec<String> {
    let companies = r.companies.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join("|");
    let num = |v: Option<f64>| v.map(fmt_number).unwrap_or_default();
    let p = &r.proctoring_options;

    vec![
        csv_text(&r.test_name),
        csv_text(&r.framework_name),
        csv_text(&r.framework_maturity_level),
        csv_text(&companies),
        r.status.clone(),
        r.screen_status.clone(),
        num(r.score),
        num(r.max_score),
        r.start_date.clone(),
        r.finish_date.clone(),
        r.next_attempt_earliest.clone(),
        p.is_enabled.to_string(),
        p.is_video_required.to_string(),
        p.is_display_required.to_string(),
        p.is_photo_required.to_string(),
        p.is_id_photo_required.to_string(),
        p.rule_ids.len().to_string(),
    ]
}

/// Header line plus one row per record.
pub fn to_csv(records: &[NormalizedRecord]) -> String {
    let headers = Some(HEADERS.iter().map(|h| s!(*h)).collect());
    let rows: Vec<Vec<String>> = records.iter().map(record_row).collect();
    rows_to_string(&rows, &headers, ',')
}
