// ==========================================
// 房源目标达成分析系统 - 命令行入口
// ==========================================
// 用法:
//   meta-performance [--config PATH] [--raw-dir DIR] [--processed-dir DIR]
//                    [--reference-date YYYY-MM-DD] [--policy days_and_potential|potential_only]
//                    [--no-summary] [--json-log] [--list]
// 优先级: 默认值 < 配置文件 < META_* 环境变量 < 命令行参数
// ==========================================

use anyhow::{bail, Context};
use meta_performance::api::{PrepareApi, SnapshotApi};
use meta_performance::config::{config_keys, PipelineConfig};
use meta_performance::{logging, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    overrides: Vec<(&'static str, String)>,
    json_log: bool,
    list_only: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let key = match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config 需要文件路径")?;
                cli.config_path = Some(PathBuf::from(path));
                continue;
            }
            "--no-summary" => {
                cli.overrides
                    .push((config_keys::WRITE_SUMMARY, "false".to_string()));
                continue;
            }
            "--json-log" => {
                cli.json_log = true;
                continue;
            }
            "--list" => {
                cli.list_only = true;
                continue;
            }
            "--raw-dir" => config_keys::RAW_DIR,
            "--processed-dir" => config_keys::PROCESSED_DIR,
            "--reference-date" => config_keys::REFERENCE_DATE,
            "--policy" => config_keys::STATUS_POLICY,
            other => bail!("未知参数: {}", other),
        };
        let value = args
            .next()
            .with_context(|| format!("{} 需要取值", arg))?;
        cli.overrides.push((key, value));
    }

    Ok(cli)
}

fn main() -> anyhow::Result<()> {
    let cli = parse_args()?;

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("==================================================");
    tracing::info!("{}", meta_performance::APP_NAME);
    tracing::info!("系统版本: {}", meta_performance::VERSION);
    tracing::info!("==================================================");

    let mut config = PipelineConfig::load(cli.config_path.as_deref())?;
    for (key, value) in &cli.overrides {
        config.set_value(key, value)?;
    }

    if cli.list_only {
        let api = SnapshotApi::new(config.processed_dir.clone());
        for entry in api.list_snapshots()? {
            println!(
                "{}\t{}\t{}",
                entry.label(),
                entry.enriched_path.display(),
                entry
                    .watchlist_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
        return Ok(());
    }

    let api = PrepareApi::new(Arc::new(config));
    match api.run() {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report.overview())?);
            Ok(())
        }
        Err(err @ PipelineError::Import(_)) if err.is_missing_input() => {
            tracing::error!(error = %err, "缺少必需的抽取表, 本次未生成快照");
            if let Some(remediation) = err.remediation() {
                tracing::error!("{}", remediation);
            }
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
