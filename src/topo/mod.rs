//! 拓扑构建
//!
//! 目前只有 Garnet 的 2-D mesh（XY）拓扑。

pub mod mesh;

pub use mesh::{build_mesh_xy, Direction, MeshLink, MeshRouter, MeshTopology};
