//! flit 占用状态重建
//!
//! 按 tick 重放事件，维护每个 flit 的当前位置，并在每个有事件的 tick
//! 结束时保存一份完整快照（不是增量）。

mod snapshot;
mod state;
mod timeline;
mod tracker;

pub use snapshot::{FlitSummary, Snapshot};
pub use state::{FlitLocation, FlitState};
pub use timeline::{track, SnapshotTimeline};
pub use tracker::OccupancyTracker;
