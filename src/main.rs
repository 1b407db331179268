// ==========================================
// 设备 OEE 分析系统 - 命令行入口
// ==========================================
// 职责: 解析参数 → 加载配置 → 分析 → 输出报表
// 输出: 报表写 stdout，日志写 stderr
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use equipment_oee::config::{config_keys, ConfigManager};
use equipment_oee::{logging, OeeApi};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "equipment-oee")]
#[command(author, version, about = "Equipment status reconciliation, downtime attribution and OEE reports")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (JSON object of key/value pairs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Automated status records (.json, .csv, .xlsx)
    #[arg(long, global = true)]
    status: Option<PathBuf>,

    /// Manual status corrections (.json, .csv, .xlsx)
    #[arg(long, global = true)]
    manual: Option<PathBuf>,

    /// Production orders (.json, .csv, .xlsx)
    #[arg(long, global = true)]
    production: Option<PathBuf>,

    /// Downtime report unit (minute | second)
    #[arg(long, global = true)]
    unit: Option<String>,

    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Downtime per equipment, date and reason
    Downtime {
        /// Only this equipment
        #[arg(short, long)]
        equipment: Option<i64>,
    },

    /// Daily OEE table (days with a computable OEE)
    Oee,

    /// Daily metrics including nullable A/P/Q/OEE
    Daily {
        /// Only this equipment
        #[arg(short, long)]
        equipment: Option<i64>,
    },

    /// Per-equipment averages
    Equipment,

    /// Overall average across equipment
    Overall,

    /// Run summary (record counts, reconciliation, overall)
    Summary,
}

fn build_config(args: &Args) -> Result<ConfigManager> {
    let mut manager = ConfigManager::load(args.config.as_deref()).context("加载配置失败")?;

    let overrides = [
        (config_keys::STATUS_FILE, args.status.as_ref()),
        (config_keys::MANUAL_STATUS_FILE, args.manual.as_ref()),
        (config_keys::PRODUCTION_FILE, args.production.as_ref()),
    ];
    for (key, path) in overrides {
        if let Some(path) = path {
            manager.set(key, &path.to_string_lossy());
        }
    }
    if let Some(unit) = &args.unit {
        manager.set(config_keys::DOWNTIME_REPORT_UNIT, unit);
    }

    Ok(manager)
}

fn render(api: &OeeApi, command: &Command, json: bool) -> Result<String> {
    let output = match command {
        Command::Downtime { equipment } if json => api.export_downtime_json(*equipment)?,
        Command::Downtime { equipment } => api.downtime_report(*equipment)?,
        Command::Oee if json => api.export_daily_json(None)?,
        Command::Oee => api.oee_report(),
        Command::Daily { equipment } => api.export_daily_json(*equipment)?,
        Command::Equipment => api.export_equipment_json()?,
        Command::Overall => api.export_overall_json()?,
        Command::Summary if json => api.export_summary_json()?,
        Command::Summary => api.summary_report(),
    };
    Ok(output)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = equipment_oee::VERSION, "{}", equipment_oee::APP_NAME);

    let manager = build_config(&args)?;
    let api = OeeApi::from_config_manager(&manager).context("分析失败")?;

    println!("{}", render(&api, &args.command, args.json)?);
    Ok(())
}
