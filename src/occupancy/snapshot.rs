//! 占用快照
//!
//! 某一 tick 结束时各 router / link 上驻留的 flit，只记录非空位置。

use crate::net::{FlowId, LinkId, PacketId, RouterId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 快照里一个驻留 flit 的展示信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlitSummary {
    pub flow: FlowId,
    pub packet: PacketId,
    pub flit_index: u32,
    pub src: RouterId,
    pub dest: RouterId,
}

impl fmt::Display for FlitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}.F{}): {}→{}",
            self.flow, self.packet, self.flit_index, self.src, self.dest
        )
    }
}

/// 某个 tick 的完整网络占用
///
/// 只存有 flit 的位置；每个列表按 flow id 排序，方便直接比较两个快照。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub routers: BTreeMap<RouterId, Vec<FlitSummary>>,
    pub links: BTreeMap<LinkId, Vec<FlitSummary>>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.routers.is_empty() && self.links.is_empty()
    }

    pub fn router_flits(&self, router: RouterId) -> &[FlitSummary] {
        self.routers.get(&router).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn link_flits(&self, link: LinkId) -> &[FlitSummary] {
        self.links.get(&link).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 网络中驻留的 flit 总数
    pub fn resident_flits(&self) -> usize {
        self.routers.values().chain(self.links.values()).map(Vec::len).sum()
    }

    /// 所有驻留 flit 的 flow id（升序）
    pub fn resident_flows(&self) -> Vec<FlowId> {
        let mut flows = self
            .routers
            .values()
            .chain(self.links.values())
            .flatten()
            .map(|f| f.flow)
            .collect::<Vec<_>>();
        flows.sort_unstable();
        flows
    }
}
