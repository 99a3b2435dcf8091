#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use parking_permits::PermitStore;
use parking_permits::types::{Config, PermitDraft, SeriesId};
use serde_json::Value;
use tempfile::TempDir;

pub fn open_store() -> (PermitStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = PermitStore::open(Config {
        base_path: temp_dir.path().to_path_buf(),
    })
    .unwrap();
    (store, temp_dir)
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, day, hour, 0, 0).unwrap()
}

pub fn draft(series: SeriesId, subjects: Value, areas: Value) -> PermitDraft {
    PermitDraft::from_json(series, None, &subjects, &areas).unwrap()
}
