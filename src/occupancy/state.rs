//! 单个 flit 的生命周期状态

use crate::net::{FlowId, LinkId, PacketId, RouterId};
use serde::{Deserialize, Serialize};

use super::snapshot::FlitSummary;

/// flit 当前所在位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "at", content = "id", rename_all = "snake_case")]
pub enum FlitLocation {
    /// 已注入但还没有落点事件
    #[default]
    Unplaced,
    AtRouter(RouterId),
    OnLink(LinkId),
    Ejected,
}

/// 单个 flit 的生命周期状态（`Inject` 时创建，之后不删除）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlitState {
    pub flow: FlowId,
    pub packet: PacketId,
    pub flit_index: u32,
    pub src: RouterId,
    pub dest: RouterId,
    pub location: FlitLocation,
}

impl FlitState {
    pub fn summary(&self) -> FlitSummary {
        FlitSummary {
            flow: self.flow,
            packet: self.packet,
            flit_index: self.flit_index,
            src: self.src,
            dest: self.dest,
        }
    }
}
