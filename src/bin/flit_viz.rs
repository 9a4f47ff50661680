//! Garnet flit 占用回放
//!
//! 解码事件日志 → 重建每个 tick 的占用快照 → 按固定间隔采样成帧，
//! 可选导出离线回放用的 JSON。

use clap::Parser;
use garnet_flit_rs::cache::TraceCache;
use garnet_flit_rs::config::VizConfig;
use garnet_flit_rs::frame::{sample_frames, Frame, Playback};
use garnet_flit_rs::net::Tick;
use garnet_flit_rs::topo::build_mesh_xy;
use garnet_flit_rs::viz::VizDocument;
use garnet_flit_rs::{TraceError, TraceResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "flit-viz",
    about = "Replay flit occupancy of a Garnet mesh from garnet_event_log.bin"
)]
struct Args {
    /// JSON config file (log_path / mesh_dim / interval)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the binary event log (overrides config)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Mesh side length n (overrides config)
    #[arg(long)]
    mesh: Option<usize>,

    /// Sampling interval in ticks (overrides config)
    #[arg(long)]
    interval: Option<u64>,

    /// Output viz JSON file for offline playback
    #[arg(long)]
    viz_json: Option<PathBuf>,

    /// Print the frame in effect at this tick
    #[arg(long)]
    seek: Option<u64>,
}

fn resolve_config(args: &Args) -> TraceResult<VizConfig> {
    let mut cfg = match &args.config {
        Some(path) => VizConfig::from_json_file(path)?,
        None => VizConfig::default(),
    };
    if let Some(log) = &args.log {
        cfg.log_path = log.clone();
    }
    if let Some(mesh) = args.mesh {
        cfg.mesh_dim = mesh;
    }
    if let Some(interval) = args.interval {
        cfg.interval = interval;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_frame(frame: &Frame) {
    let source = frame
        .source
        .map(|t| t.0.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!(
        "frame t={} source={} resident={} routers={} links={}",
        frame.tick.0,
        source,
        frame.snapshot.resident_flits(),
        frame.occupied_routers(),
        frame.occupied_links()
    );
    for (router, flits) in &frame.snapshot.routers {
        for f in flits {
            println!("  {router}: {f}");
        }
    }
    for (link, flits) in &frame.snapshot.links {
        for f in flits {
            println!("  {link}: {f}");
        }
    }
}

fn run(args: Args) -> TraceResult<()> {
    let cfg = resolve_config(&args)?;
    let interval = cfg.sample_interval()?;
    debug!(config = ?cfg, "resolved config");

    let mut cache = TraceCache::default();
    let loaded = cache.load(&cfg.log_path)?;
    let topo = build_mesh_xy(cfg.mesh_dim)?;
    info!(
        routers = topo.routers.len(),
        links = topo.links.len(),
        "构建 {}x{} mesh 拓扑",
        cfg.mesh_dim,
        cfg.mesh_dim
    );

    let frames = sample_frames(&loaded.timeline, &topo, interval)?;
    let report = &loaded.report;
    println!(
        "events={} snapshots={} flits={} untracked={} decode_problems={}",
        loaded.events,
        loaded.timeline.len(),
        loaded.timeline.tracked_flits(),
        loaded.timeline.untracked_refs(),
        report.problems()
    );
    for diag in &report.examples {
        eprintln!("warning: {diag}");
    }

    if let Some(path) = &args.viz_json {
        VizDocument::build(&topo, interval, &frames).write_json(path)?;
        eprintln!("wrote viz frames to {}", path.display());
    }

    let mut playback = Playback::new(frames)?;
    println!(
        "frames={} interval={} last_sample={}",
        playback.len(),
        interval.get(),
        playback.frames().last().map(|f| f.tick.0).unwrap_or(0)
    );
    if let Some(t) = args.seek {
        print_frame(playback.seek(Tick(t)));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(TraceError::EmptyInput) => {
            eprintln!("log file was found but no data could be parsed; is the log file empty?");
            ExitCode::from(2)
        }
        Err(TraceError::MissingFile(path)) => {
            eprintln!(
                "log file not found at {}; has the simulation produced it?",
                path.display()
            );
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
