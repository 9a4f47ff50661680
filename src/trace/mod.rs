//! Garnet 事件日志解码
//!
//! 日志格式：`[u32 LE 长度][protobuf GarnetEvent]` 重复到文件末尾。
//!
//! - **帧错误**（长度前缀读不全、记录被截断）：停止解析，保留已解出的事件
//! - **负载错误**（protobuf 解不开、未知 status）：跳过该条，继续解析
//!
//! 两类问题都只进 [`DecodeReport`]，不会让整个解析失败。

mod event;
mod reader;
mod report;
mod wire;
mod writer;

pub use event::{EventKind, EventRecord, PayloadError, WireStatus};
pub use reader::{decode, decode_file, Decoded, TraceReader, MAX_RECORD_BYTES};
pub use report::{DecodeReport, Diagnostic, FramingIssue, MAX_REPORTED_EXAMPLES};
pub use wire::GarnetEvent;
pub use writer::{encode_events, TraceWriter};
