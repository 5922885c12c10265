// src/config/consts.rs

// Streaming queue convention
pub const QUEUE_GLOBAL: &str = "__next_f";
pub const DISCRIMINATOR: &str = "certificationStatus";

// Capture
pub const REWRAP_POLL_MS: u64 = 250;
pub const REWRAP_WINDOW_MS: u64 = 30_000; // should be wrapped by then
pub const NET_BODY_MAX_CHARS: usize = 200_000;

// Extraction
pub const MAX_RULE_IDS: usize = 64;
pub const MAX_WALK_NODES: usize = 200_000;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CONTEXTS_SUBDIR: &str = "contexts";
pub const LICENSE_FILE: &str = ".store/license.json";
pub const LOG_FILE: &str = ".store/debug.log";
pub const LOG_BUFFER_LINES: usize = 400;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "codesignal-assessments";

// Viewer paywall polling
pub const PAYWALL_POLL_SECS: u64 = 2;
pub const PAYWALL_POLL_TRIES: u32 = 60;
