//! 已加载日志的缓存
//!
//! 以 (路径, 修改时间, 长度) 作为日志身份。身份不变就复用已经建好的快照
//! 时间线；换了日志或文件被改写时重新解码。由宿主程序持有，显式失效。

use crate::error::{TraceError, TraceResult};
use crate::occupancy::{track, SnapshotTimeline};
use crate::trace::{decode_file, DecodeReport};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// 日志文件身份
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl LogKey {
    pub fn for_path(path: &Path) -> TraceResult<Self> {
        let meta = match fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return Err(TraceError::MissingFile(path.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TraceError::MissingFile(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// 一次加载的结果：快照时间线 + 解码汇总
#[derive(Debug)]
pub struct LoadedTrace {
    pub key: LogKey,
    pub events: usize,
    pub timeline: SnapshotTimeline,
    pub report: DecodeReport,
}

/// 解码并重建快照；文件不存在报 `MissingFile`，没有事件报 `EmptyInput`
pub fn load_trace(path: &Path) -> TraceResult<LoadedTrace> {
    let key = LogKey::for_path(path)?;
    load_keyed(key)
}

fn load_keyed(key: LogKey) -> TraceResult<LoadedTrace> {
    let decoded = decode_file(&key.path)?;
    if decoded.events.is_empty() {
        return Err(TraceError::EmptyInput);
    }
    let events = decoded.events.len();
    let timeline = track(decoded.events);
    if timeline.is_empty() {
        return Err(TraceError::EmptyInput);
    }
    Ok(LoadedTrace {
        key,
        events,
        timeline,
        report: decoded.report,
    })
}

#[derive(Debug, Default)]
pub struct TraceCache {
    entry: Option<Arc<LoadedTrace>>,
    hits: u64,
    loads: u64,
}

impl TraceCache {
    pub fn load(&mut self, path: &Path) -> TraceResult<Arc<LoadedTrace>> {
        let key = match LogKey::for_path(path) {
            Ok(key) => key,
            Err(e) => {
                self.entry = None;
                return Err(e);
            }
        };
        if let Some(entry) = &self.entry {
            if entry.key == key {
                self.hits += 1;
                debug!(path = %key.path.display(), "trace cache hit");
                return Ok(Arc::clone(entry));
            }
        }

        info!(path = %key.path.display(), "🔄 loading trace log");
        self.entry = None;
        let loaded = Arc::new(load_keyed(key)?);
        self.loads += 1;
        self.entry = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn cached(&self) -> Option<&Arc<LoadedTrace>> {
        self.entry.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn loads(&self) -> u64 {
        self.loads
    }
}
