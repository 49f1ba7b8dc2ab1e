//! 丢包监视器
//!
//! 按固定周期驱动突发丢包模拟，结束时输出累计统计。

use clap::Parser;
use serde::Serialize;
use spacerise::loss::{ConfigError, LossConfig, LossSnapshot, PacketEventSimulator, RngSource};
use spacerise::monitor::{DEFAULT_HISTORY_LEN, DEFAULT_INTERVAL_MS, LossMonitor, MonitorConfig};
use spacerise::packet::SimulatedPacket;
use spacerise::sim::{SimTime, Simulator};
use spacerise::stats::{ProtocolStat, protocol_stats};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "loss-monitor", about = "突发丢包模拟：周期生成合成数据包并统计丢包/重传")]
struct Args {
    /// 随机种子；不给则使用系统熵
    #[arg(long)]
    seed: Option<u64>,
    /// tick 间隔（毫秒）
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,
    /// 仿真运行到多少毫秒
    #[arg(long, default_value_t = 3_000)]
    until_ms: u64,
    /// 保留最近多少条 tick 记录
    #[arg(long, default_value_t = DEFAULT_HISTORY_LEN)]
    history: usize,
    /// 从 JSON 文件读取丢包概率
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    normal_loss_prob: Option<f64>,
    #[arg(long)]
    burst_loss_prob: Option<f64>,
    #[arg(long)]
    burst_enter_prob: Option<f64>,
    #[arg(long)]
    burst_exit_prob: Option<f64>,
    #[arg(long)]
    retransmit_prob: Option<f64>,
    /// 以 JSON 输出最终报告
    #[arg(long)]
    json: bool,
    /// 把 tick 历史写入 JSON 文件
    #[arg(long)]
    records_json: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    source: &'static str,
    now_ms: u64,
    ticks: u64,
    stats: LossSnapshot,
    recovery_rate: f64,
    in_burst: bool,
    protocols: Vec<ProtocolStat>,
}

fn load_config(args: &Args) -> Result<LossConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| CliError::Parse {
                path: path.clone(),
                source,
            })?
        }
        None => LossConfig::default(),
    };
    let overrides = [
        (args.normal_loss_prob, &mut cfg.normal_loss),
        (args.burst_loss_prob, &mut cfg.burst_loss),
        (args.burst_enter_prob, &mut cfg.burst_enter),
        (args.burst_exit_prob, &mut cfg.burst_exit),
        (args.retransmit_prob, &mut cfg.retransmit),
    ];
    for (value, slot) in overrides {
        if let Some(v) = value {
            *slot = v;
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run(args: Args) -> Result<(), CliError> {
    let loss_cfg = load_config(&args)?;
    let rng = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let monitor_cfg = MonitorConfig {
        interval: SimTime::from_millis(args.interval_ms),
        history_len: args.history,
    };

    let mut sim = Simulator::default();
    let mut monitor = LossMonitor::new(PacketEventSimulator::new(loss_cfg, rng), monitor_cfg)?;

    monitor.start(&mut sim, SimTime::ZERO);
    sim.run_until(SimTime::from_millis(args.until_ms), &mut monitor);
    monitor.stop(&mut sim);
    // 停止后队列中不应再有 tick
    sim.run(&mut monitor);

    if let Some(path) = &args.records_json {
        let records: Vec<_> = monitor.history().iter().collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(path, json).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
    }

    let stats = monitor.latest();
    let recent: Vec<SimulatedPacket> = monitor.history().iter().map(|r| r.packet.clone()).collect();
    let report = Report {
        source: monitor.simulator().current_source_label(),
        now_ms: sim.now().as_millis(),
        ticks: monitor.ticks(),
        stats,
        recovery_rate: stats.recovery_rate(),
        in_burst: monitor.simulator().in_burst(),
        protocols: protocol_stats(&recent),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "done @ {}, source={:?}, ticks={}, total={}, lost={}, retransmitted={}, loss_rate={:.2}%, recovery_rate={:.2}%, burst_events={}, in_burst={}",
            sim.now(),
            report.source,
            report.ticks,
            stats.total,
            stats.lost,
            stats.retransmitted,
            stats.loss_rate,
            report.recovery_rate,
            stats.burst_events,
            report.in_burst,
        );
        for p in &report.protocols {
            println!("protocol {} count={} pct={:.2}%", p.protocol, p.count, p.percentage);
        }
    }
    Ok(())
}

fn main() {
    // 初始化 tracing（输出到 stderr，stdout 留给结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}
