use crate::error::TraceResult;
use crate::frame::{Frame, SampleInterval};
use crate::net::{LinkId, RouterId};
use crate::occupancy::FlitSummary;
use crate::topo::{Direction, MeshLink, MeshTopology};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizRouterInfo {
    pub id: usize,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizLinkInfo {
    pub id: usize,
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    /// 反方向链路 id
    pub opposite: Option<usize>,
}

/// 拓扑与采样元信息（文件头）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizMeta {
    pub mesh_dim: usize,
    pub interval: u64,
    /// 最后一个采样点
    pub last_sample: u64,
    pub routers: Vec<VizRouterInfo>,
    pub links: Vec<VizLinkInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizRouterState {
    pub id: usize,
    pub flits: usize,
    pub size: u32,
    pub occupied: bool,
    pub hover: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizLinkState {
    pub id: usize,
    pub flits: usize,
    pub width: u32,
    pub occupied: bool,
    pub pair_active: bool,
    pub hover: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizFrame {
    pub t: u64,
    /// 生效快照的 tick
    pub source_tick: Option<u64>,
    pub routers: Vec<VizRouterState>,
    pub links: Vec<VizLinkState>,
}

/// 整个回放文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizDocument {
    pub meta: VizMeta,
    pub frames: Vec<VizFrame>,
}

fn flit_lines(flits: &[FlitSummary]) -> String {
    flits
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn router_hover(router: RouterId, flits: &[FlitSummary]) -> String {
    if flits.is_empty() {
        format!("Router {}\nNo flits", router.0)
    } else {
        format!("Router {}\nFlits: {}\n{}", router.0, flits.len(), flit_lines(flits))
    }
}

pub fn link_hover(link: &MeshLink, flits: &[FlitSummary]) -> String {
    let head = format!("Link {} ({}→{})", link.id.0, link.src, link.dst);
    if flits.is_empty() {
        format!("{head}\nNo flits")
    } else {
        format!("{head}\nFlits: {}\n{}", flits.len(), flit_lines(flits))
    }
}

impl VizDocument {
    pub fn build(topo: &MeshTopology, interval: SampleInterval, frames: &[Frame]) -> Self {
        let routers = topo
            .routers
            .iter()
            .map(|r| VizRouterInfo {
                id: r.id.0,
                row: r.row,
                col: r.col,
            })
            .collect::<Vec<_>>();
        let links = topo
            .links
            .iter()
            .map(|l| VizLinkInfo {
                id: l.id.0,
                from: l.src.0,
                to: l.dst.0,
                direction: l.direction,
                opposite: topo.opposite(l.id).map(|o| o.0),
            })
            .collect::<Vec<_>>();
        let meta = VizMeta {
            mesh_dim: topo.n,
            interval: interval.get(),
            last_sample: frames.last().map(|f| f.tick.0).unwrap_or(0),
            routers,
            links,
        };

        let frames = frames.iter().map(|f| Self::frame(topo, f)).collect();
        Self { meta, frames }
    }

    fn frame(topo: &MeshTopology, frame: &Frame) -> VizFrame {
        let routers = frame
            .routers
            .iter()
            .map(|g| VizRouterState {
                id: g.router.0,
                flits: g.flits,
                size: g.size,
                occupied: g.occupied,
                hover: router_hover(g.router, frame.snapshot.router_flits(g.router)),
            })
            .collect();
        let links = frame
            .links
            .iter()
            .map(|g| VizLinkState {
                id: g.link.0,
                flits: g.flits,
                width: g.width,
                occupied: g.occupied,
                pair_active: g.pair_active,
                hover: Self::link_hover_for(topo, g.link, frame),
            })
            .collect();
        VizFrame {
            t: frame.tick.0,
            source_tick: frame.source.map(|t| t.0),
            routers,
            links,
        }
    }

    fn link_hover_for(topo: &MeshTopology, link: LinkId, frame: &Frame) -> String {
        match topo.link(link) {
            Some(l) => link_hover(l, frame.snapshot.link_flits(link)),
            None => format!("Link {}", link.0),
        }
    }

    pub fn write_json(&self, path: &Path) -> TraceResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}
