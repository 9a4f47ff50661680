//! 仿真时间类型
//!
//! Garnet 日志里的时间单位是 tick，没有物理单位换算。

use serde::{Deserialize, Serialize};

/// 仿真时间（tick）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}
