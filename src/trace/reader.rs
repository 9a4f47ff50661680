//! 长度前缀帧读取

use crate::error::{TraceError, TraceResult};
use prost::Message;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, info, trace};

use super::event::{EventRecord, PayloadError};
use super::report::{DecodeReport, Diagnostic, FramingIssue};
use super::wire::GarnetEvent;

/// 单条记录的长度上限；超过即视为长度前缀损坏。
///
/// 即使后面确实跟着这么多字节的合法负载，也按 [`FramingIssue::OversizedRecord`]
/// 记为 `MalformedFraming` 并停止解码。
pub const MAX_RECORD_BYTES: u32 = 16 * 1024 * 1024;

/// 惰性解码器：按流中顺序逐条产出事件，问题记入 [`DecodeReport`]。
#[derive(Debug)]
pub struct TraceReader<R> {
    inner: R,
    offset: u64,
    index: u64,
    done: bool,
    buf: Vec<u8>,
    report: DecodeReport,
}

impl<R: Read> TraceReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            index: 0,
            done: false,
            buf: Vec::new(),
            report: DecodeReport::default(),
        }
    }

    pub fn report(&self) -> &DecodeReport {
        &self.report
    }

    pub fn into_report(self) -> DecodeReport {
        self.report
    }

    fn stop(&mut self, issue: FramingIssue) {
        debug!(offset = self.offset, "framing error, stopping: {issue}");
        self.report.record(Diagnostic::MalformedFraming {
            offset: self.offset,
            issue,
        });
        self.done = true;
    }

    /// 读下一帧的负载到 `self.buf`；返回该帧的起始偏移
    fn next_frame(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        let start = self.offset;

        let mut len_buf = [0u8; 4];
        let got = match read_full(&mut self.inner, &mut len_buf) {
            Ok(n) => n,
            Err(e) => {
                self.stop(FramingIssue::Io(e.to_string()));
                return None;
            }
        };
        if got == 0 {
            // 恰好停在帧边界：正常结束
            self.done = true;
            return None;
        }
        if got < len_buf.len() {
            self.stop(FramingIssue::PartialLengthPrefix { got });
            return None;
        }

        let declared = u32::from_le_bytes(len_buf);
        if declared > MAX_RECORD_BYTES {
            self.stop(FramingIssue::OversizedRecord { declared });
            return None;
        }

        self.buf.clear();
        self.buf.resize(declared as usize, 0);
        let got = match read_full(&mut self.inner, &mut self.buf) {
            Ok(n) => n,
            Err(e) => {
                self.stop(FramingIssue::Io(e.to_string()));
                return None;
            }
        };
        if got < declared as usize {
            self.stop(FramingIssue::TruncatedRecord { declared, got });
            return None;
        }

        self.offset += 4 + u64::from(declared);
        self.report.bytes = self.offset;
        Some(start)
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = EventRecord;

    fn next(&mut self) -> Option<EventRecord> {
        loop {
            let offset = self.next_frame()?;
            let record = self.index;
            self.index += 1;

            let parsed = GarnetEvent::decode(self.buf.as_slice())
                .map_err(|e| PayloadError::Protobuf(e.to_string()))
                .and_then(EventRecord::from_wire);
            match parsed {
                Ok(ev) => {
                    trace!(record, tick = ev.tick.0, status = %ev.status, flow = ev.flow.0, "decoded event");
                    self.report.records += 1;
                    return Some(ev);
                }
                Err(reason) => {
                    debug!(record, offset, "skipping malformed payload: {reason}");
                    self.report.record(Diagnostic::MalformedPayload {
                        offset,
                        record,
                        reason: reason.to_string(),
                    });
                }
            }
        }
    }
}

/// 解码结果：事件（按流中顺序）+ 诊断汇总
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub events: Vec<EventRecord>,
    pub report: DecodeReport,
}

/// 解码内存中的整段日志
pub fn decode(bytes: &[u8]) -> Decoded {
    let mut reader = TraceReader::new(bytes);
    let events = reader.by_ref().collect::<Vec<_>>();
    Decoded {
        events,
        report: reader.into_report(),
    }
}

/// 解码日志文件；文件不存在时在读取之前返回 `MissingFile`
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn decode_file(path: &Path) -> TraceResult<Decoded> {
    if !path.is_file() {
        return Err(TraceError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let mut reader = TraceReader::new(BufReader::new(file));
    let events = reader.by_ref().collect::<Vec<_>>();
    let report = reader.into_report();

    info!(
        events = events.len(),
        bytes = report.bytes,
        problems = report.problems(),
        "📖 trace log decoded"
    );
    report.log_summary();
    Ok(Decoded { events, report })
}

/// 尽量读满 `buf`，返回实际读到的字节数（EOF 时可能小于 `buf.len()`）
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
