//! 可视化配置
//!
//! 可以从 JSON 文件加载，缺省字段取默认值；命令行参数再覆盖。

use crate::error::{TraceError, TraceResult};
use crate::frame::{SampleInterval, DEFAULT_INTERVAL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_PATH: &str = "traces/garnet_event_log.bin";
pub const DEFAULT_MESH_DIM: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Garnet 事件日志路径
    pub log_path: PathBuf,
    /// mesh 边长 n
    pub mesh_dim: usize,
    /// 采样间隔（tick）
    pub interval: u64,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            mesh_dim: DEFAULT_MESH_DIM,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl VizConfig {
    pub fn from_json_file(path: &Path) -> TraceResult<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: VizConfig = serde_json::from_str(&raw).map_err(|e| TraceError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        cfg.validate().map_err(|e| TraceError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(cfg)
    }

    pub fn validate(&self) -> TraceResult<()> {
        if self.mesh_dim == 0 {
            return Err(TraceError::InvalidMesh(self.mesh_dim));
        }
        self.sample_interval().map(|_| ())
    }

    pub fn sample_interval(&self) -> TraceResult<SampleInterval> {
        SampleInterval::new(self.interval)
    }
}
