// src/config/consts.rs

// Net config
pub const REMOTEOK_URL: &str = "https://remoteok.com/api";
pub const REMOTEOK_BASE: &str = "https://remoteok.com";
pub const REMOTIVE_URL: &str = "https://remotive.com/api/remote-jobs";
pub const REMOTIVE_CATEGORY: &str = "software-dev";
pub const REMOTIVE_SEARCH: &str = "data";

pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/120.0.0.0 Safari/537.36"
);
pub const ACCEPT: &str = "application/json";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const TIMEOUT_SECS: u64 = 30;

// One attempt unless asked otherwise
pub const ATTEMPTS: u32 = 1;
pub const RETRY_BACKOFF_MS: u64 = 1200;

// Collect
pub const SOURCE_LIMIT: usize = 150;

// Clean
pub const DEFAULT_LOCATION: &str = "Remote";

// Local log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const RAW_STEM: &str = "jobs_raw";
pub const CLEAN_STEM: &str = "jobs_clean";
pub const ENRICHED_STEM: &str = "jobs_enriched";
