//! 帧采样
//!
//! 按固定间隔取时间线上最近的前序快照，并渲染成 router / link 图元。

use crate::error::{TraceError, TraceResult};
use crate::net::Tick;
use crate::occupancy::{Snapshot, SnapshotTimeline};
use crate::topo::MeshTopology;
use std::sync::Arc;
use tracing::{debug, info};

use super::glyph::{render_links, render_routers, LinkGlyph, RouterGlyph};
use super::interval::SampleInterval;

/// 预分配帧缓冲的上限，超出部分按需增长
const MAX_PREALLOC_FRAMES: usize = 1 << 16;

/// 一个采样时刻的画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 采样 tick
    pub tick: Tick,
    /// 生效快照的 tick；采样点早于第一个快照时为 `None`（空画面）
    pub source: Option<Tick>,
    pub snapshot: Arc<Snapshot>,
    pub routers: Vec<RouterGlyph>,
    pub links: Vec<LinkGlyph>,
}

impl Frame {
    fn render(tick: Tick, source: Option<Tick>, snapshot: Arc<Snapshot>, topo: &MeshTopology) -> Self {
        let routers = render_routers(&snapshot, topo);
        let links = render_links(&snapshot, topo);
        Self {
            tick,
            source,
            snapshot,
            routers,
            links,
        }
    }

    pub fn occupied_routers(&self) -> usize {
        self.routers.iter().filter(|g| g.occupied).count()
    }

    pub fn occupied_links(&self) -> usize {
        self.links.iter().filter(|g| g.occupied).count()
    }
}

/// 在 `0, interval, 2·interval, …, ≤ max_tick` 处采样。
///
/// 时间线为空时返回 `EmptyInput`。
#[tracing::instrument(skip_all, fields(snapshots = timeline.len(), interval = interval.get()))]
pub fn sample_frames(
    timeline: &SnapshotTimeline,
    topo: &MeshTopology,
    interval: SampleInterval,
) -> TraceResult<Vec<Frame>> {
    let max_tick = timeline.max_tick().ok_or(TraceError::EmptyInput)?;
    let step = interval.get();
    let empty = Arc::new(Snapshot::default());

    let hint = usize::try_from((max_tick.0 / step).saturating_add(1)).unwrap_or(0);
    let mut frames = Vec::with_capacity(hint.min(MAX_PREALLOC_FRAMES));
    let mut t = Tick::ZERO;
    loop {
        let frame = match timeline.at_or_before(t) {
            Some((source, snap)) => Frame::render(t, Some(source), Arc::clone(snap), topo),
            None => Frame::render(t, None, Arc::clone(&empty), topo),
        };
        debug!(tick = t.0, source = ?frame.source, resident = frame.snapshot.resident_flits(), "frame sampled");
        frames.push(frame);

        match t.0.checked_add(step) {
            Some(next) if next <= max_tick.0 => t = Tick(next),
            _ => break,
        }
    }

    info!(frames = frames.len(), max_tick = max_tick.0, "🎞️  frames sampled");
    Ok(frames)
}
