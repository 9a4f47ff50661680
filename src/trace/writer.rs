//! 长度前缀帧写入（合成日志与测试使用）

use prost::Message;
use std::io::{self, Write};

use super::event::EventRecord;

#[derive(Debug)]
pub struct TraceWriter<W> {
    inner: W,
    records: u64,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn write_event(&mut self, ev: &EventRecord) -> io::Result<()> {
        let payload = ev.to_wire().encode_to_vec();
        self.write_raw(&payload)
    }

    /// 写一帧任意负载（不校验内容）
    pub fn write_raw(&mut self, payload: &[u8]) -> io::Result<()> {
        let len = u32::try_from(payload.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "record larger than u32::MAX"))?;
        self.inner.write_all(&len.to_le_bytes())?;
        self.inner.write_all(payload)?;
        self.records += 1;
        Ok(())
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

pub fn encode_events<'a>(events: impl IntoIterator<Item = &'a EventRecord>) -> Vec<u8> {
    let mut out = Vec::new();
    for ev in events {
        let payload = ev.to_wire().encode_to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&payload);
    }
    out
}
