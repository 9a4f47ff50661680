pub mod cache;
pub mod config;
pub mod error;
pub mod frame;
pub mod net;
pub mod occupancy;
pub mod topo;
pub mod trace;
pub mod viz;

pub use error::{TraceError, TraceResult};

#[cfg(test)]
mod test;
