//! 帧采样与渲染属性
//!
//! 以固定 tick 间隔采样快照时间线：每个采样点取"不晚于它的最近快照"，
//! 再结合静态 mesh 拓扑算出每个路由器/链路的可视属性。帧序列加拓扑足以
//! 确定性地重放同一段动画。

mod glyph;
mod interval;
mod playback;
mod sampler;

pub use glyph::{
    render_links, render_routers, LinkGlyph, RouterGlyph, LINK_MIN_WIDTH, LINK_WIDTH_PER_FLIT,
    ROUTER_BASE_SIZE, ROUTER_SIZE_PER_FLIT,
};
pub use interval::{SampleInterval, DEFAULT_INTERVAL};
pub use playback::Playback;
pub use sampler::{sample_frames, Frame};
