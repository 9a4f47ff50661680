//! 帧回放控制：定位、前进、后退、回到开头

use crate::error::{TraceError, TraceResult};
use crate::net::Tick;

use super::sampler::Frame;

/// 帧序列上的播放/拖动游标
///
/// 只持有不可变的帧序列和一个下标，重放不依赖其他可变状态。
#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<Frame>,
    cursor: usize,
}

impl Playback {
    pub fn new(frames: Vec<Frame>) -> TraceResult<Self> {
        if frames.is_empty() {
            return Err(TraceError::EmptyInput);
        }
        Ok(Self { frames, cursor: 0 })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Frame {
        &self.frames[self.cursor]
    }

    /// 跳到不晚于 `tick` 的最近一帧；早于第一帧时停在第一帧
    pub fn seek(&mut self, tick: Tick) -> &Frame {
        let idx = self.frames.partition_point(|f| f.tick <= tick);
        self.cursor = idx.saturating_sub(1);
        self.current()
    }

    pub fn step_forward(&mut self) -> Option<&Frame> {
        if self.cursor + 1 >= self.frames.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn step_back(&mut self) -> Option<&Frame> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(self.current())
    }

    pub fn rewind(&mut self) -> &Frame {
        self.cursor = 0;
        self.current()
    }
}
