// src/extract/normalize.rs
//! Raw result shapes → [`NormalizedRecord`].
//!
//! Total over any JSON value. Field reads follow the producer's loose
//! conventions: "present" means truthy for text and flags, non-null for
//! scores, and dates accept either epoch milliseconds or preformatted text.

use chrono::{DateTime, Datelike, Utc};
use serde_json::{Map, Value};

use crate::config::consts::MAX_RULE_IDS;
use crate::core::sanitize::fmt_number;
use crate::model::{
    truthy, Company, NormalizedRecord, ProctoringOptions, RawResultRecord, RawShape,
};

type Obj = Map<String, Value>;

/// Map any raw record onto the canonical schema. Never fails.
pub fn normalize(raw: &RawResultRecord) -> NormalizedRecord {
    match RawShape::classify(raw) {
        RawShape::Primary { record, screen_doc } => primary(raw, record, screen_doc),
        RawShape::Fallback(record) => fallback(raw, Some(record)),
        RawShape::Unrecognized(_) => fallback(raw, None),
    }
}

/// Results list shape: top-level summary plus the nested `screenDoc`.
fn primary(raw: &Value, res: &Obj, sd: Option<&Obj>) -> NormalizedRecord {
    let sd_get = |k: &str| field(sd, k);
    let res_get = |k: &str| res.get(k);
    let pro = truthy_obj(sd_get("proctoringOptions"));

    let id = first_truthy(&[sd_get("_id"), res_get("_id")])
        .map(text)
        .unwrap_or_else(|| {
            let when = first_truthy(&[sd_get("finishDate"), sd_get("startDate")])
                .map(text)
                .unwrap_or_else(now_ms);
            format!("{}:{}", text_of(res_get("testName")), when)
        });

    NormalizedRecord {
        id,
        test_name: text_of(res_get("testName")),
        framework_name: text_of(res_get("frameworkName")),
        framework_maturity_level: text_of(res_get("frameworkMaturityLevel")),
        companies: companies(res_get("companies")),
        is_custom_pre_screen: flag(res_get("isCustomPreScreen")),
        should_lockdown: flag(res_get("shouldLockdown")),

        status: first_truthy(&[sd_get("certificationStatus"), res_get("certificationStatus")])
            .map(text)
            .unwrap_or_default(),
        screen_status: text_of(sd_get("status")),
        score: number(sd_get("score")).or_else(|| number(res_get("score"))),
        max_score: number(sd_get("maxScore")).or_else(|| number(res_get("maxScore"))),

        create_date: iso_date(sd_get("createDate")),
        start_date: iso_date(sd_get("startDate")),
        finish_date: iso_date(sd_get("finishDate")),
        next_attempt_earliest: text_of(res_get("nextAttemptDate")),

        proctoring_options: ProctoringOptions {
            is_enabled: flag(field(pro, "isEnabled")),
            is_video_required: flag(field(pro, "isVideoRequired")),
            is_display_required: flag(field(pro, "isDisplayRequired")),
            is_photo_required: flag(field(pro, "isPhotoRequired")),
            is_id_photo_required: flag(field(pro, "isIdPhotoRequired")),
            rule_ids: rule_ids(field(pro, "ruleIds")),
        },
        proctoring_session_id: text_of(sd_get("proctoringSessionId")),
        coding_score_2023: first_truthy(&[sd_get("codingScore2023"), res_get("codingScore2023")]).cloned(),

        raw: raw.clone(),
    }
}

/// Anything else: a broader set of alternate field names, all read from the top level.
fn fallback(raw: &Value, res: Option<&Obj>) -> NormalizedRecord {
    let get = |k: &str| field(res, k);
    let pro = truthy_obj(first_truthy(&[get("proctoringOptions"), get("proctoring")]));
    let pro_flag = |keys: &[&str]| keys.iter().any(|k| flag(field(pro, k)));

    let name = first_truthy(&[get("name"), get("title"), get("assessmentName"), get("testName")])
        .map(text)
        .unwrap_or_default();

    let id = first_truthy(&[get("_id")]).map(text).unwrap_or_else(|| {
        let when = first_truthy(&[get("finishDate"), get("endTime")])
            .map(text)
            .unwrap_or_else(now_ms);
        format!("{name}:{when}")
    });

    NormalizedRecord {
        id,
        test_name: name,
        framework_name: text_of(get("frameworkName")),
        framework_maturity_level: text_of(get("frameworkMaturityLevel")),
        companies: companies(get("companies")),
        is_custom_pre_screen: flag(get("isCustomPreScreen")),
        should_lockdown: flag(get("shouldLockdown")),

        status: text_of(get("certificationStatus")),
        screen_status: text_of(get("status")),
        score: first_present(&[get("score"), get("totalScore")]).and_then(Value::as_f64),
        max_score: first_present(&[get("maxScore"), get("max")]).and_then(Value::as_f64),

        create_date: iso_date(get("createDate")),
        start_date: iso_date(get("startDate")),
        finish_date: iso_date(first_truthy(&[get("finishDate"), get("finishedAt"), get("endTime")])),
        next_attempt_earliest: first_truthy(&[
            get("nextAttemptEarliest"),
            get("nextAttemptAt"),
            get("nextAttemptDate"),
        ])
        .map(text)
        .unwrap_or_default(),

        proctoring_options: ProctoringOptions {
            is_enabled: pro_flag(&["isEnabled"]),
            is_video_required: pro_flag(&["isVideoRequired", "video"]),
            is_display_required: pro_flag(&["isDisplayRequired", "display"]),
            is_photo_required: pro_flag(&["isPhotoRequired", "photo"]),
            is_id_photo_required: pro_flag(&["isIdPhotoRequired", "id"]),
            rule_ids: rule_ids(field(pro, "ruleIds")),
        },
        proctoring_session_id: text_of(get("proctoringSessionId")),
        coding_score_2023: first_truthy(&[get("codingScore2023")]).cloned(),

        raw: raw.clone(),
    }
}

/* ---------------- field helpers ---------------- */

fn field<'a>(obj: Option<&'a Obj>, key: &str) -> Option<&'a Value> {
    obj?.get(key)
}

/// `x || {}` for container fields.
fn truthy_obj(v: Option<&Value>) -> Option<&Obj> {
    v.filter(|v| truthy(v)).and_then(Value::as_object)
}

/// `a || b || …`
fn first_truthy<'a>(vals: &[Option<&'a Value>]) -> Option<&'a Value> {
    vals.iter().flatten().copied().find(|v| truthy(v))
}

/// `a ?? b ?? …`
fn first_present<'a>(vals: &[Option<&'a Value>]) -> Option<&'a Value> {
    vals.iter().flatten().copied().find(|v| !v.is_null())
}

fn flag(v: Option<&Value>) -> bool {
    v.is_some_and(truthy)
}

/// Numbers only; anything else reads as absent.
fn number(v: Option<&Value>) -> Option<f64> {
    v.and_then(Value::as_f64)
}

/// `x || ""`, printed the way the producer would print it.
fn text_of(v: Option<&Value>) -> String {
    v.filter(|v| truthy(v)).map(text).unwrap_or_default()
}

fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(fmt_number).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        _ => s!(),
    }
}

/// Epoch ms → ISO-8601; strings untouched; everything else empty.
pub fn iso_date(v: Option<&Value>) -> String {
    match v {
        Some(Value::Number(n)) => n.as_f64().map(epoch_ms_to_iso).unwrap_or_default(),
        Some(Value::String(s)) => s.clone(),
        _ => s!(),
    }
}

/// Browser `toISOString()` layout: four-digit years, six digits plus sign
/// outside 0..=9999. Instants beyond chrono's range (about ±262 000 years,
/// narrower than the browser's ±8.64e15 ms) produce an empty string.
pub fn epoch_ms_to_iso(ms: f64) -> String {
    if !ms.is_finite() || ms.abs() > 8.64e15 {
        return s!();
    }
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(ms.trunc() as i64) else {
        return s!();
    };
    let rest = dt.format("%m-%dT%H:%M:%S%.3fZ");
    match dt.year() {
        y @ 0..=9999 => format!("{y:04}-{rest}"),
        y => format!("{y:+07}-{rest}"),
    }
}

/// Last-resort identity component when a record carries no dates at all.
fn now_ms() -> String {
    Utc::now().timestamp_millis().to_string()
}

fn companies(v: Option<&Value>) -> Vec<Company> {
    let Some(list) = v.and_then(Value::as_array) else { return Vec::new() };
    list.iter()
        .map(|c| {
            let c = c.as_object();
            Company {
                id: first_truthy(&[field(c, "id"), field(c, "_id")]).map(text).unwrap_or_default(),
                name: text_of(field(c, "name")),
                logo: text_of(field(c, "logo")),
                lockdown_framework_enabled: flag(field(c, "lockdownFrameworkEnabled")),
            }
        })
        .collect()
}

/// Hard cap; overflow is dropped silently.
fn rule_ids(v: Option<&Value>) -> Vec<Value> {
    v.and_then(Value::as_array)
        .map(|ids| ids.iter().take(MAX_RULE_IDS).cloned().collect())
        .unwrap_or_default()
}
