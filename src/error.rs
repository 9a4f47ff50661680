//! 错误类型
//!
//! 只有会中断整条流水线的问题才是 `TraceError`；单条记录的解码问题
//! 记在 [`crate::trace::DecodeReport`] 里，解析继续进行。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    /// 输入日志不存在（在任何解码之前报告）
    #[error("trace log not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// 没有解出任何事件，或 snapshot 映射为空
    #[error("no events decoded from trace log; nothing to sample")]
    EmptyInput,

    #[error("mesh dimension must be at least 1, got {0}")]
    InvalidMesh(usize),

    #[error("sampling interval must be a positive tick count")]
    InvalidInterval,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

pub type TraceResult<T> = Result<T, TraceError>;
