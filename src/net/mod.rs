//! 网络基础类型
//!
//! 此模块包含 mesh 网络中的标识符与仿真时间。

mod id;
mod tick;

pub use id::{FlowId, LinkId, PacketId, RouterId};
pub use tick::Tick;
