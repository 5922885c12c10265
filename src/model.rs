// src/model.rs
//! Record types shared by the pipeline, the cache, the bus and the viewer.
//!
//! `NormalizedRecord` is the only persisted entity. Everything upstream of the
//! normalizer is untyped JSON (`serde_json::Value`) because the producer shapes
//! are not guaranteed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::sanitize::fmt_number;

/// An untyped structural object found during extraction.
pub type RawResultRecord = Value;

/// Which capture path a payload arrived through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    QueueFragment,
    NetworkBody,
    InlineScript,
}

/// Opaque captured text, alive for one extraction pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCapture {
    pub kind: CaptureKind,
    pub text: String,
}

impl RawCapture {
    pub fn queue(text: impl Into<String>) -> Self {
        Self { kind: CaptureKind::QueueFragment, text: text.into() }
    }
    pub fn network(text: impl Into<String>) -> Self {
        Self { kind: CaptureKind::NetworkBody, text: text.into() }
    }
    pub fn inline(text: impl Into<String>) -> Self {
        Self { kind: CaptureKind::InlineScript, text: text.into() }
    }
}

/// The two known producer layouts, plus everything else.
#[derive(Clone, Copy, Debug)]
pub enum RawShape<'a> {
    /// Has a truthy `testName` and a nested `screenDoc` container.
    Primary {
        record: &'a Map<String, Value>,
        screen_doc: Option<&'a Map<String, Value>>,
    },
    /// An object without the nested container.
    Fallback(&'a Map<String, Value>),
    /// Not an object at all; read as an empty fallback record.
    Unrecognized(&'a Value),
}

impl<'a> RawShape<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        let Some(record) = raw.as_object() else {
            return RawShape::Unrecognized(raw);
        };
        let named = record.get("testName").is_some_and(truthy);
        match record.get("screenDoc") {
            Some(sd) if named && truthy(sd) => RawShape::Primary { record, screen_doc: sd.as_object() },
            _ => RawShape::Fallback(record),
        }
    }
}

/// JavaScript truthiness over JSON values.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub lockdown_framework_enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProctoringOptions {
    pub is_enabled: bool,
    pub is_video_required: bool,
    pub is_display_required: bool,
    pub is_photo_required: bool,
    pub is_id_photo_required: bool,
    /// At most `MAX_RULE_IDS` entries.
    pub rule_ids: Vec<Value>,
}

/// The canonical record. Serialized with the camelCase field names consumers expect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedRecord {
    pub id: String,
    pub test_name: String,
    pub framework_name: String,
    pub framework_maturity_level: String,
    pub companies: Vec<Company>,
    pub is_custom_pre_screen: bool,
    pub should_lockdown: bool,

    pub status: String,
    pub screen_status: String,
    pub score: Option<f64>,
    pub max_score: Option<f64>,

    pub create_date: String,
    pub start_date: String,
    pub finish_date: String,
    pub next_attempt_earliest: String,

    pub proctoring_options: ProctoringOptions,
    pub proctoring_session_id: String,

    /// Skill-area breakdown, passed through untouched.
    #[serde(rename = "codingScore2023")]
    pub coding_score_2023: Option<Value>,

    pub raw: RawResultRecord,
}

impl NormalizedRecord {
    /// Cache identity: explicit id, else `testName|finishDate|score`.
    pub fn identity_key(&self) -> String {
        if !self.id.is_empty() {
            return self.id.clone();
        }
        let score = self.score.map(fmt_number).unwrap_or_default();
        format!("{}|{}|{}", self.test_name, self.finish_date, score)
    }

    /// `score/max`, or just `score`, or empty.
    pub fn score_label(&self) -> String {
        match (self.score, self.max_score) {
            (None, _) => s!(),
            (Some(s), Some(m)) if m != 0.0 => format!("{}/{}", fmt_number(s), fmt_number(m)),
            (Some(s), _) => fmt_number(s),
        }
    }

    pub fn badge(&self) -> StatusBadge {
        StatusBadge::classify(if self.status.is_empty() { &self.screen_status } else { &self.status })
    }
}

/// Coarse status bucket for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusBadge {
    Certified,
    Pending,
    Rejected,
    Other(String),
}

impl StatusBadge {
    pub fn classify(raw: &str) -> Self {
        let lc = raw.to_lowercase();
        if lc.contains("certified") || lc.contains("pass") {
            StatusBadge::Certified
        } else if lc.contains("pending") || lc.contains("processing") || in_review(&lc) {
            StatusBadge::Pending
        } else if lc.contains("reject") || lc.contains("fail") {
            StatusBadge::Rejected
        } else if lc.is_empty() {
            StatusBadge::Other(s!("unknown"))
        } else {
            StatusBadge::Other(lc)
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusBadge::Certified => "certified",
            StatusBadge::Pending => "pending",
            StatusBadge::Rejected => "rejected",
            StatusBadge::Other(l) => l,
        }
    }
}

/// "in review", "in-review", "inreview"
fn in_review(lc: &str) -> bool {
    lc.contains("inreview") || lc.contains("in review") || lc.contains("in-review")
}
