//! 图元属性
//!
//! router 尺寸随驻留 flit 数增长，link 宽度同理；成对的双向 link 任一方向有 flit 即高亮。

use crate::net::{LinkId, RouterId};
use crate::occupancy::Snapshot;
use crate::topo::MeshTopology;
use serde::{Deserialize, Serialize};

pub const ROUTER_BASE_SIZE: u32 = 10;
pub const ROUTER_SIZE_PER_FLIT: u32 = 5;
pub const LINK_WIDTH_PER_FLIT: u32 = 2;
pub const LINK_MIN_WIDTH: u32 = 2;

/// 路由器的可视属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterGlyph {
    pub router: RouterId,
    pub flits: usize,
    /// 随 flit 数线性增长
    pub size: u32,
    pub occupied: bool,
}

/// 单向链路的可视属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkGlyph {
    pub link: LinkId,
    pub flits: usize,
    /// 随 flit 数线性增长，不小于 `LINK_MIN_WIDTH`
    pub width: u32,
    pub occupied: bool,
    /// 本链路或反方向链路上有 flit（两条线在画面上重合）
    pub pair_active: bool,
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

pub fn render_routers(snapshot: &Snapshot, topo: &MeshTopology) -> Vec<RouterGlyph> {
    topo.routers
        .iter()
        .map(|r| {
            let flits = snapshot.router_flits(r.id).len();
            RouterGlyph {
                router: r.id,
                flits,
                size: ROUTER_BASE_SIZE.saturating_add(ROUTER_SIZE_PER_FLIT.saturating_mul(count_u32(flits))),
                occupied: flits > 0,
            }
        })
        .collect()
}

pub fn render_links(snapshot: &Snapshot, topo: &MeshTopology) -> Vec<LinkGlyph> {
    topo.links
        .iter()
        .map(|l| {
            let flits = snapshot.link_flits(l.id).len();
            let twin_flits = topo
                .opposite(l.id)
                .map(|twin| snapshot.link_flits(twin).len())
                .unwrap_or(0);
            LinkGlyph {
                link: l.id,
                flits,
                width: LINK_WIDTH_PER_FLIT
                    .saturating_mul(count_u32(flits))
                    .max(LINK_MIN_WIDTH),
                occupied: flits > 0,
                pair_active: flits > 0 || twin_flits > 0,
            }
        })
        .collect()
}
