//! 强类型事件记录

use crate::net::{FlowId, LinkId, PacketId, RouterId, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::wire::GarnetEvent;

/// 线上 status 标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireStatus {
    /// flit 注入网络（携带 src/dest）
    #[serde(rename = "RI")]
    Ri,
    /// 注入后第一次落到路由器（`link_id` 是外部链路 id，等同于 router id）
    #[serde(rename = "SI")]
    Si,
    /// 路由器收到 flit
    #[serde(rename = "RR")]
    Rr,
    /// 开始在内部链路上传输
    #[serde(rename = "ST")]
    St,
    /// 链路传输中
    #[serde(rename = "DT")]
    Dt,
    /// flit 离开网络
    #[serde(rename = "SE")]
    Se,
}

impl WireStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WireStatus::Ri => "RI",
            WireStatus::Si => "SI",
            WireStatus::Rr => "RR",
            WireStatus::St => "ST",
            WireStatus::Dt => "DT",
            WireStatus::Se => "SE",
        }
    }

    pub fn parse(tag: &str) -> Option<WireStatus> {
        match tag {
            "RI" => Some(WireStatus::Ri),
            "SI" => Some(WireStatus::Si),
            "RR" => Some(WireStatus::Rr),
            "ST" => Some(WireStatus::St),
            "DT" => Some(WireStatus::Dt),
            "SE" => Some(WireStatus::Se),
            _ => None,
        }
    }
}

impl fmt::Display for WireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 事件语义（`link_id` 的三重含义在这里解开）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Inject { src: RouterId, dest: RouterId },
    RouterReceive { router: RouterId },
    LinkStart { link: LinkId },
    LinkTransit { link: LinkId },
    Eject,
}

/// 解码后的一条事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tick: Tick,
    pub flow: FlowId,
    pub packet: PacketId,
    pub flit_index: u32,
    pub status: WireStatus,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("protobuf decode failed: {0}")]
    Protobuf(String),
    #[error("unknown status tag {0:?}")]
    UnknownStatus(String),
}

impl EventRecord {
    pub fn inject(tick: u64, flow: u64, src: usize, dest: usize) -> Self {
        Self::with_kind(
            tick,
            flow,
            WireStatus::Ri,
            EventKind::Inject {
                src: RouterId(src),
                dest: RouterId(dest),
            },
        )
    }

    /// 注入侧落点（`SI`）
    pub fn enter_router(tick: u64, flow: u64, router: usize) -> Self {
        Self::with_kind(
            tick,
            flow,
            WireStatus::Si,
            EventKind::RouterReceive {
                router: RouterId(router),
            },
        )
    }

    pub fn router_receive(tick: u64, flow: u64, router: usize) -> Self {
        Self::with_kind(
            tick,
            flow,
            WireStatus::Rr,
            EventKind::RouterReceive {
                router: RouterId(router),
            },
        )
    }

    pub fn link_start(tick: u64, flow: u64, link: usize) -> Self {
        Self::with_kind(tick, flow, WireStatus::St, EventKind::LinkStart { link: LinkId(link) })
    }

    pub fn link_transit(tick: u64, flow: u64, link: usize) -> Self {
        Self::with_kind(tick, flow, WireStatus::Dt, EventKind::LinkTransit { link: LinkId(link) })
    }

    pub fn eject(tick: u64, flow: u64) -> Self {
        Self::with_kind(tick, flow, WireStatus::Se, EventKind::Eject)
    }

    /// 设置 packet 信息（默认 packet = flow，flit 序号 0）
    pub fn in_packet(mut self, packet: u64, flit_index: u32) -> Self {
        self.packet = PacketId(packet);
        self.flit_index = flit_index;
        self
    }

    fn with_kind(tick: u64, flow: u64, status: WireStatus, kind: EventKind) -> Self {
        Self {
            tick: Tick(tick),
            flow: FlowId(flow),
            packet: PacketId(flow),
            flit_index: 0,
            status,
            kind,
        }
    }

    pub fn from_wire(ev: GarnetEvent) -> Result<Self, PayloadError> {
        let status =
            WireStatus::parse(&ev.status).ok_or_else(|| PayloadError::UnknownStatus(ev.status.clone()))?;
        let location = ev.link_id as usize;
        let kind = match status {
            WireStatus::Ri => EventKind::Inject {
                src: RouterId(ev.src as usize),
                dest: RouterId(ev.dest as usize),
            },
            WireStatus::Si | WireStatus::Rr => EventKind::RouterReceive {
                router: RouterId(location),
            },
            WireStatus::St => EventKind::LinkStart {
                link: LinkId(location),
            },
            WireStatus::Dt => EventKind::LinkTransit {
                link: LinkId(location),
            },
            WireStatus::Se => EventKind::Eject,
        };
        Ok(Self {
            tick: Tick(ev.tick),
            flow: FlowId(ev.global_id),
            packet: PacketId(ev.packet_id),
            flit_index: ev.id,
            status,
            kind,
        })
    }

    pub fn to_wire(&self) -> GarnetEvent {
        let mut ev = GarnetEvent {
            tick: self.tick.0,
            status: self.status.as_str().to_string(),
            global_id: self.flow.0,
            packet_id: self.packet.0,
            id: self.flit_index,
            ..Default::default()
        };
        match self.kind {
            EventKind::Inject { src, dest } => {
                ev.src = src.0 as u32;
                ev.dest = dest.0 as u32;
            }
            EventKind::RouterReceive { router } => ev.link_id = router.0 as u32,
            EventKind::LinkStart { link } | EventKind::LinkTransit { link } => {
                ev.link_id = link.0 as u32
            }
            EventKind::Eject => {}
        }
        ev
    }
}
