//! 快照时间线
//!
//! 事件按 tick 稳定排序后逐 tick 回放，每个出现过事件的 tick 存一份快照；
//! 相邻且相同的快照共享同一个 `Arc`。

use crate::net::Tick;
use crate::trace::EventRecord;
use std::sync::Arc;
use tracing::{debug, info};

use super::snapshot::Snapshot;
use super::tracker::OccupancyTracker;

/// tick → 快照映射
///
/// tick 升序存放，查询"不晚于 t 的最近快照"是一次二分查找。内容相同的
/// 相邻快照共享同一个 `Arc`。
#[derive(Debug, Clone, Default)]
pub struct SnapshotTimeline {
    ticks: Vec<Tick>,
    snapshots: Vec<Arc<Snapshot>>,
    tracked_flits: usize,
    untracked_refs: u64,
}

impl SnapshotTimeline {
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn first_tick(&self) -> Option<Tick> {
        self.ticks.first().copied()
    }

    pub fn max_tick(&self) -> Option<Tick> {
        self.ticks.last().copied()
    }

    /// 被追踪过的 flit 总数（含已弹出的）
    pub fn tracked_flits(&self) -> usize {
        self.tracked_flits
    }

    pub fn untracked_refs(&self) -> u64 {
        self.untracked_refs
    }

    /// 恰好在 `tick` 记录的快照
    pub fn get(&self, tick: Tick) -> Option<&Arc<Snapshot>> {
        self.ticks
            .binary_search(&tick)
            .ok()
            .map(|idx| &self.snapshots[idx])
    }

    /// 不晚于 `tick` 的最近快照及其 tick
    pub fn at_or_before(&self, tick: Tick) -> Option<(Tick, &Arc<Snapshot>)> {
        let idx = self.ticks.partition_point(|&t| t <= tick);
        if idx == 0 {
            return None;
        }
        Some((self.ticks[idx - 1], &self.snapshots[idx - 1]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tick, &Snapshot)> + '_ {
        self.ticks
            .iter()
            .copied()
            .zip(self.snapshots.iter().map(Arc::as_ref))
    }
}

/// 重放事件，为每个有事件的 tick 生成一份快照。
///
/// 先按 tick 稳定排序：同一 tick 内的事件保持日志顺序。
#[tracing::instrument(skip_all, fields(events = events.len()))]
pub fn track(mut events: Vec<EventRecord>) -> SnapshotTimeline {
    events.sort_by_key(|ev| ev.tick);

    let mut tracker = OccupancyTracker::default();
    let mut ticks = Vec::new();
    let mut snapshots: Vec<Arc<Snapshot>> = Vec::new();
    let mut shared = 0_usize;

    for group in events.chunk_by(|a, b| a.tick == b.tick) {
        for ev in group {
            tracker.apply(ev);
        }
        let snap = tracker.snapshot();
        let snap = match snapshots.last() {
            Some(prev) if **prev == snap => {
                shared += 1;
                Arc::clone(prev)
            }
            _ => Arc::new(snap),
        };
        ticks.push(group[0].tick);
        snapshots.push(snap);
    }

    debug!(shared, "identical consecutive snapshots shared");
    if tracker.untracked_refs() > 0 {
        info!(
            untracked_refs = tracker.untracked_refs(),
            "ignored location events for flits with no prior inject"
        );
    }
    info!(
        snapshots = ticks.len(),
        flits = tracker.tracked_flits(),
        "🧮 occupancy snapshots built"
    );

    SnapshotTimeline {
        ticks,
        snapshots,
        tracked_flits: tracker.tracked_flits(),
        untracked_refs: tracker.untracked_refs(),
    }
}
