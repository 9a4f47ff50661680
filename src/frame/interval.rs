//! 采样间隔

use crate::error::{TraceError, TraceResult};
use std::num::NonZeroU64;

/// 与原工具一致的默认采样间隔
pub const DEFAULT_INTERVAL: u64 = 250;

/// 采样间隔（tick，正整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleInterval(NonZeroU64);

impl SampleInterval {
    pub fn new(ticks: u64) -> TraceResult<Self> {
        NonZeroU64::new(ticks)
            .map(SampleInterval)
            .ok_or(TraceError::InvalidInterval)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for SampleInterval {
    fn default() -> Self {
        Self(NonZeroU64::new(DEFAULT_INTERVAL).unwrap_or(NonZeroU64::MIN))
    }
}
