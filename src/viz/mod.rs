//! 可视化导出（用于离线 HTML 回放）
//!
//! 设计目标：
//! - **结构化**：帧序列直接写成 JSON，不需要重新解析日志
//! - **自包含**：拓扑元信息 + 每帧的路由器/链路属性与悬停文本
//! - **可回放**：播放器只按帧下标或 tick 拖动

mod types;

pub use types::{
    link_hover, router_hover, VizDocument, VizFrame, VizLinkInfo, VizLinkState, VizMeta,
    VizRouterInfo, VizRouterState,
};
