//! 解码诊断汇总
//!
//! 大日志里可能有成千上万条坏记录，所以只保留计数和前几个样例。

use thiserror::Error;
use tracing::warn;

pub const MAX_REPORTED_EXAMPLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingIssue {
    #[error("length prefix cut short ({got} of 4 bytes)")]
    PartialLengthPrefix { got: usize },
    #[error("record declares {declared} bytes but only {got} remain")]
    TruncatedRecord { declared: u32, got: usize },
    #[error("record declares {declared} bytes, above the per-record limit")]
    OversizedRecord { declared: u32 },
    #[error("read failed: {0}")]
    Io(String),
}

/// 单条诊断
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// 帧错误：解析到此为止
    #[error("malformed framing at byte {offset}: {issue}")]
    MalformedFraming { offset: u64, issue: FramingIssue },
    /// 负载错误：跳过这一条
    #[error("malformed payload in record #{record} at byte {offset}: {reason}")]
    MalformedPayload {
        offset: u64,
        record: u64,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// 成功解出的事件数
    pub records: u64,
    /// 已消费的完整帧字节数
    pub bytes: u64,
    pub framing_errors: u64,
    pub payload_errors: u64,
    /// 是否因为帧错误提前停止
    pub stopped_early: bool,
    pub examples: Vec<Diagnostic>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.framing_errors == 0 && self.payload_errors == 0
    }

    pub fn problems(&self) -> u64 {
        self.framing_errors + self.payload_errors
    }

    pub(crate) fn record(&mut self, diag: Diagnostic) {
        match &diag {
            Diagnostic::MalformedFraming { .. } => {
                self.framing_errors += 1;
                self.stopped_early = true;
            }
            Diagnostic::MalformedPayload { .. } => self.payload_errors += 1,
        }
        if self.examples.len() < MAX_REPORTED_EXAMPLES {
            self.examples.push(diag);
        }
    }

    /// 把汇总写进日志（干净的解码不输出任何东西）
    pub fn log_summary(&self) {
        if self.is_clean() {
            return;
        }
        warn!(
            records = self.records,
            framing_errors = self.framing_errors,
            payload_errors = self.payload_errors,
            stopped_early = self.stopped_early,
            "⚠️  trace log decoded with problems"
        );
        for diag in &self.examples {
            warn!("{diag}");
        }
        let hidden = self.problems().saturating_sub(self.examples.len() as u64);
        if hidden > 0 {
            warn!(hidden, "more decode problems not shown");
        }
    }
}
