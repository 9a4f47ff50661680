//! n×n mesh 拓扑构建
//!
//! router `r` 位于 `(row = r / n, col = r % n)`。链路 id 分四段分配，每段
//! `n·(n−1)` 条，顺序与 Garnet 生成拓扑时一致：East、West、North、South。
//! 反方向链路的对应关系在构建时按端点对记录，不依赖 id 偏移。

use crate::error::{TraceError, TraceResult};
use crate::net::{LinkId, RouterId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 链路方向类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// col 递增
    East,
    /// col 递减
    West,
    /// row 递增（沿用 Garnet 的端口命名）
    North,
    /// row 递减
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRouter {
    pub id: RouterId,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshLink {
    pub id: LinkId,
    pub src: RouterId,
    pub dst: RouterId,
    pub direction: Direction,
}

#[derive(Debug, Clone)]
pub struct MeshTopology {
    pub n: usize,
    pub routers: Vec<MeshRouter>,
    pub links: Vec<MeshLink>,
    opposite: HashMap<LinkId, LinkId>,
    by_endpoints: HashMap<(RouterId, RouterId), LinkId>,
}

impl MeshTopology {
    pub fn router(&self, id: RouterId) -> Option<&MeshRouter> {
        self.routers.get(id.0)
    }

    pub fn link(&self, id: LinkId) -> Option<&MeshLink> {
        self.links.get(id.0)
    }

    /// 同一对路由器之间反方向的那条链路
    pub fn opposite(&self, id: LinkId) -> Option<LinkId> {
        self.opposite.get(&id).copied()
    }

    pub fn link_between(&self, src: RouterId, dst: RouterId) -> Option<LinkId> {
        self.by_endpoints.get(&(src, dst)).copied()
    }

    pub fn links_in(&self, direction: Direction) -> impl Iterator<Item = &MeshLink> + '_ {
        self.links.iter().filter(move |l| l.direction == direction)
    }

    pub fn router_at(&self, row: usize, col: usize) -> Option<RouterId> {
        (row < self.n && col < self.n).then(|| RouterId(row * self.n + col))
    }

    /// 维序（先 col 后 row）路由经过的链路
    pub fn xy_route(&self, src: RouterId, dest: RouterId) -> Option<Vec<LinkId>> {
        let from = *self.router(src)?;
        let to = *self.router(dest)?;
        let mut route = Vec::new();
        let (mut row, mut col) = (from.row, from.col);
        while col != to.col {
            let next = if col < to.col { col + 1 } else { col - 1 };
            route.push(self.link_between(self.router_at(row, col)?, self.router_at(row, next)?)?);
            col = next;
        }
        while row != to.row {
            let next = if row < to.row { row + 1 } else { row - 1 };
            route.push(self.link_between(self.router_at(row, col)?, self.router_at(next, col)?)?);
            row = next;
        }
        Some(route)
    }
}

pub fn build_mesh_xy(n: usize) -> TraceResult<MeshTopology> {
    if n == 0 {
        return Err(TraceError::InvalidMesh(n));
    }

    let routers = (0..n * n)
        .map(|r| MeshRouter {
            id: RouterId(r),
            row: r / n,
            col: r % n,
        })
        .collect::<Vec<_>>();

    let per_class = n * (n - 1);
    let mut east = Vec::with_capacity(per_class);
    let mut west = Vec::with_capacity(per_class);
    let mut north = Vec::with_capacity(per_class);
    let mut south = Vec::with_capacity(per_class);

    for row in 0..n {
        for col in 0..n - 1 {
            let a = RouterId(row * n + col);
            let b = RouterId(row * n + col + 1);
            east.push((a, b));
            west.push((b, a));
        }
    }
    for col in 0..n {
        for row in 0..n - 1 {
            let a = RouterId(row * n + col);
            let b = RouterId((row + 1) * n + col);
            north.push((a, b));
            south.push((b, a));
        }
    }

    let mut links = Vec::with_capacity(4 * per_class);
    for (direction, pairs) in [
        (Direction::East, east),
        (Direction::West, west),
        (Direction::North, north),
        (Direction::South, south),
    ] {
        for (src, dst) in pairs {
            links.push(MeshLink {
                id: LinkId(links.len()),
                src,
                dst,
                direction,
            });
        }
    }

    let by_endpoints = links
        .iter()
        .map(|l| ((l.src, l.dst), l.id))
        .collect::<HashMap<_, _>>();
    let opposite = links
        .iter()
        .filter_map(|l| by_endpoints.get(&(l.dst, l.src)).map(|&twin| (l.id, twin)))
        .collect::<HashMap<_, _>>();

    Ok(MeshTopology {
        n,
        routers,
        links,
        opposite,
        by_endpoints,
    })
}
