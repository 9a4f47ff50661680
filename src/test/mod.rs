mod cache;
mod decoder;
mod viz_export;

use crate::occupancy::{track, SnapshotTimeline};
use crate::trace::EventRecord;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "garnet-flit-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Inject(flow=1, 0→3) @0, R0 @0, L5 @10, R1 @20, eject @30
pub(crate) fn single_flit_trace() -> Vec<EventRecord> {
    vec![
        EventRecord::inject(0, 1, 0, 3),
        EventRecord::router_receive(0, 1, 0),
        EventRecord::link_start(10, 1, 5),
        EventRecord::router_receive(20, 1, 1),
        EventRecord::eject(30, 1),
    ]
}

/// 快照位于 tick 0 (R0)、100 (R1)、250 (L5)
pub(crate) fn three_snapshot_timeline() -> SnapshotTimeline {
    track(vec![
        EventRecord::inject(0, 1, 0, 3),
        EventRecord::enter_router(0, 1, 0),
        EventRecord::router_receive(100, 1, 1),
        EventRecord::link_start(250, 1, 5),
    ])
}
