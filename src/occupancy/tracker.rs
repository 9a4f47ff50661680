//! 占用追踪器：按事件增量更新 flit 位置

use crate::net::FlowId;
use crate::trace::{EventKind, EventRecord};
use std::collections::HashMap;
use tracing::trace;

use super::snapshot::Snapshot;
use super::state::{FlitLocation, FlitState};

/// 当前位置表：flow id → flit 状态
#[derive(Debug, Default)]
pub struct OccupancyTracker {
    flits: HashMap<FlowId, FlitState>,
    untracked_refs: u64,
}

impl OccupancyTracker {
    pub fn flit(&self, flow: FlowId) -> Option<&FlitState> {
        self.flits.get(&flow)
    }

    pub fn tracked_flits(&self) -> usize {
        self.flits.len()
    }

    /// 在 `Inject` 之前出现的位置事件数量（这些事件被忽略）
    pub fn untracked_refs(&self) -> u64 {
        self.untracked_refs
    }

    pub fn apply(&mut self, ev: &EventRecord) {
        let location = match ev.kind {
            EventKind::Inject { src, dest } => {
                // 重复注入：整条记录重建，位置回到未放置
                self.flits.insert(
                    ev.flow,
                    FlitState {
                        flow: ev.flow,
                        packet: ev.packet,
                        flit_index: ev.flit_index,
                        src,
                        dest,
                        location: FlitLocation::Unplaced,
                    },
                );
                return;
            }
            EventKind::RouterReceive { router } => FlitLocation::AtRouter(router),
            EventKind::LinkStart { link } | EventKind::LinkTransit { link } => {
                FlitLocation::OnLink(link)
            }
            EventKind::Eject => FlitLocation::Ejected,
        };

        match self.flits.get_mut(&ev.flow) {
            Some(flit) => flit.location = location,
            None => {
                self.untracked_refs += 1;
                trace!(flow = ev.flow.0, tick = ev.tick.0, status = %ev.status, "event for flit never injected");
            }
        }
    }

    /// 当前状态的完整拷贝，按 router / link 分组
    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot::default();
        for flit in self.flits.values() {
            match flit.location {
                FlitLocation::AtRouter(router) => {
                    snap.routers.entry(router).or_default().push(flit.summary())
                }
                FlitLocation::OnLink(link) => snap.links.entry(link).or_default().push(flit.summary()),
                FlitLocation::Unplaced | FlitLocation::Ejected => {}
            }
        }
        for flits in snap.routers.values_mut().chain(snap.links.values_mut()) {
            flits.sort_unstable_by_key(|f| f.flow);
        }
        snap
    }
}
