use crate::cache::{load_trace, TraceCache};
use crate::error::TraceError;
use crate::net::Tick;
use crate::trace::{encode_events, EventRecord};
use std::fs;
use std::sync::Arc;

use super::{single_flit_trace, unique_temp_dir};

#[test]
fn cache_reuses_timeline_until_log_changes() {
    let dir = unique_temp_dir("cache-reuse");
    let path = dir.join("garnet_event_log.bin");
    fs::write(&path, encode_events(&single_flit_trace())).unwrap();

    let mut cache = TraceCache::default();
    let first = cache.load(&path).unwrap();
    let second = cache.load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.loads(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(first.events, 5);
    assert_eq!(first.timeline.max_tick(), Some(Tick(30)));

    // 改写后长度不同，身份随之改变
    let mut longer = single_flit_trace();
    longer.push(EventRecord::inject(40, 2, 3, 0));
    longer.push(EventRecord::router_receive(40, 2, 3));
    fs::write(&path, encode_events(&longer)).unwrap();

    let third = cache.load(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(cache.loads(), 2);
    assert_eq!(third.timeline.max_tick(), Some(Tick(40)));

    cache.invalidate();
    assert!(cache.cached().is_none());
    let fourth = cache.load(&path).unwrap();
    assert!(!Arc::ptr_eq(&third, &fourth));
    assert_eq!(cache.loads(), 3);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_log_is_distinct_from_empty_log() {
    let dir = unique_temp_dir("cache-errors");
    let missing = dir.join("missing.bin");
    let empty = dir.join("empty.bin");
    fs::write(&empty, b"").unwrap();

    let mut cache = TraceCache::default();
    assert!(matches!(cache.load(&missing), Err(TraceError::MissingFile(_))));
    assert!(matches!(cache.load(&empty), Err(TraceError::EmptyInput)));
    assert!(matches!(load_trace(&dir), Err(TraceError::MissingFile(_))));

    // 只有坏记录的日志同样没有可用数据
    let garbage = dir.join("garbage.bin");
    fs::write(&garbage, [0x01, 0x00, 0x00, 0x00, 0xFF]).unwrap();
    assert!(matches!(cache.load(&garbage), Err(TraceError::EmptyInput)));
    assert!(cache.cached().is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_reload_drops_previous_entry() {
    let dir = unique_temp_dir("cache-drop");
    let path = dir.join("log.bin");
    fs::write(&path, encode_events(&single_flit_trace())).unwrap();

    let mut cache = TraceCache::default();
    cache.load(&path).unwrap();
    assert!(cache.cached().is_some());

    fs::remove_file(&path).unwrap();
    assert!(matches!(cache.load(&path), Err(TraceError::MissingFile(_))));
    assert!(cache.cached().is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn partial_log_loads_with_report() {
    let dir = unique_temp_dir("cache-partial");
    let path = dir.join("log.bin");
    let mut bytes = encode_events(&single_flit_trace());
    bytes.extend_from_slice(&[0x20, 0x00, 0x00, 0x00, 0x08]);
    fs::write(&path, bytes).unwrap();

    let loaded = load_trace(&path).unwrap();
    assert_eq!(loaded.events, 5);
    assert_eq!(loaded.report.framing_errors, 1);
    assert_eq!(loaded.timeline.len(), 4);

    let _ = fs::remove_dir_all(&dir);
}
