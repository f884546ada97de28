// ==========================================
// 钢构件清单合并系统 - 命令行入口
// ==========================================
// 子命令:
//   merge        合并清单并输出报表
//   config show  输出当前生效的配置（JSON）
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use steel_merge::config::{ConfigManager, CONFIG_ENV_VAR};
use steel_merge::{logging, MergeApi, MergeRequest, MergeSummary};

/// 目录扫描时收集的 Excel 扩展名
const SCAN_EXTENSIONS: &[&str] = &["xlsx", "xls"];

#[derive(Parser)]
#[command(name = "steel-merge", version, about = "钢构件清单合并系统")]
struct Cli {
    /// 以 JSON 格式输出日志（stderr）
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 合并清单文件并输出多工作表报表
    Merge(MergeArgs),

    /// 配置相关命令
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
struct MergeArgs {
    /// 源文件（Excel / CSV），按给定顺序拼接
    files: Vec<PathBuf>,

    /// 扫描目录下全部 .xlsx / .xls 文件（按文件名排序）
    #[arg(long, value_name = "DIR")]
    scan_dir: Option<PathBuf>,

    /// 输出目录
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// 输出文件名（不含扩展名）
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    output_name: Option<String>,

    /// 配置文件路径
    #[arg(long, value_name = "FILE", env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// 以 JSON 输出合并结果
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// 输出当前生效的配置
    Show {
        /// 配置文件路径
        #[arg(long, value_name = "FILE", env = CONFIG_ENV_VAR)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::debug!("{} v{}", steel_merge::APP_NAME, steel_merge::VERSION);

    match cli.command {
        Commands::Merge(args) => run_merge(args),
        Commands::Config(ConfigCommands::Show { config }) => run_config_show(config.as_deref()),
    }
}

fn run_merge(args: MergeArgs) -> Result<()> {
    let manager = ConfigManager::resolve(args.config.as_deref()).context("加载配置失败")?;

    let mut sources = args.files;
    if let Some(dir) = &args.scan_dir {
        sources.extend(scan_directory(dir)?);
    }

    let request = MergeRequest {
        sources,
        output_dir: args.output_dir,
        output_name: args.output_name,
    };

    let api = MergeApi::new(manager.into_config());
    let summary = api.merge(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn run_config_show(config: Option<&Path>) -> Result<()> {
    let manager = ConfigManager::resolve(config).context("加载配置失败")?;
    match manager.source() {
        Some(path) => eprintln!("配置来源: {}", path.display()),
        None => eprintln!("配置来源: 内置默认"),
    }
    println!("{}", manager.to_json_pretty()?);
    Ok(())
}

/// 收集目录下的 Excel 文件（不递归，按文件名排序）
fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("扫描目录不存在: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("无法读取目录 {}", dir.display()))? {
        let path = entry?.path();
        let matched = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SCAN_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && matched {
            files.push(path);
        }
    }
    files.sort();

    tracing::info!(dir = %dir.display(), files = files.len(), "目录扫描完成");
    Ok(files)
}

fn print_summary(summary: &MergeSummary) {
    println!(
        "合并完成: {} ({} 个源文件, 总表 {} 行, 耗时 {} ms)",
        summary.output_path.display(),
        summary.source_count,
        summary.unified_rows,
        summary.elapsed_ms
    );
    for sheet in &summary.sheets {
        println!("  {:<12} {} 行", sheet.name, sheet.rows);
    }
}
