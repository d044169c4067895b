//! everest-meta 命令行入口
//!
//! 用于检查模组元数据的诊断工具。
//!
//! # 命令概览
//!
//! - `check` - 解析模组目录或元数据文件，打印规范化后的结果
//! - `check-config` - 验证配置文件
//! - `version` - 显示版本信息
//!
//! # 使用示例
//!
//! ```bash
//! # 检查解压后的模组目录
//! everest-meta check ~/Celeste/Mods/MyMod
//!
//! # 以 JSON 输出
//! everest-meta check ~/Celeste/Mods/MyMod/everest.yaml --json
//!
//! # 检查配置文件
//! everest-meta check-config -c everest-core.yaml
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use everest_core::{CoreConfig, Logger, LoggerConfig, MetadataParser, ModuleMetadata, LOG_TARGET};

/// everest-meta - 模组元数据检查工具
#[derive(Parser)]
#[command(name = "everest-meta")]
#[command(version, about = "解析并检查 Everest 模组元数据", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "everest-core.yaml", global = true)]
    config: PathBuf,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// 子命令
    #[command(subcommand)]
    command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
enum Commands {
    /// 检查模组元数据
    ///
    /// PATH 为目录时按配置的文件名查找元数据文件；
    /// 为文件时把它所在的目录视为模组目录。
    Check {
        /// 模组目录或元数据文件
        path: PathBuf,

        /// 以 JSON 格式输出
        #[arg(long)]
        json: bool,
    },

    /// 验证配置文件
    CheckConfig,

    /// 查看版本信息
    Version,
}

/// 加载配置文件，不存在时使用默认配置
async fn load_config(config_path: &Path) -> Result<CoreConfig, Box<dyn std::error::Error>> {
    if config_path.exists() {
        Ok(CoreConfig::from_file(config_path).await?)
    } else {
        Ok(CoreConfig::default())
    }
}

/// 检查模组元数据
async fn run_check(
    config: &CoreConfig,
    path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = MetadataParser::with_config(config.parser.clone());

    let entries = if path.is_dir() {
        parser.parse_directory_async(path).await?
    } else {
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let content = tokio::fs::read(path).await?;
        parser.parse_all("", &directory.to_string_lossy(), content.as_slice())?
    };

    info!(target: LOG_TARGET, count = entries.len(), "元数据检查完成");

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for metadata in &entries {
            print_metadata(metadata);
        }
    }
    Ok(())
}

/// 打印单个模组的元数据
fn print_metadata(metadata: &ModuleMetadata) {
    println!();
    println!("{}", metadata);
    println!("────────────────────────────────────────");
    if metadata.is_archive() {
        println!("  压缩包:   {}", metadata.path_archive);
    }
    if metadata.is_directory() {
        println!("  目录:     {}", metadata.path_directory);
    }
    if !metadata.dll.is_empty() {
        println!("  DLL:      {}", metadata.dll);
    }
    println!("  图标:     {}", metadata.icon_path().display());
    println!("  预链接:   {}", if metadata.prelinked { "是" } else { "否" });
    println!("  依赖:");
    for dep in &metadata.dependencies {
        println!("    - {}", dep);
    }
    if !metadata.optional_dependencies.is_empty() {
        println!("  可选依赖:");
        for dep in &metadata.optional_dependencies {
            println!("    - {}", dep);
        }
    }
    println!("────────────────────────────────────────");
}

/// 检查配置文件
async fn check_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("检查配置文件: {}", path.display());

    if !path.exists() {
        println!("⚠️  配置文件不存在，将使用默认配置");
        print_config(&CoreConfig::default());
        return Ok(());
    }

    match CoreConfig::from_file(path).await {
        Ok(config) => {
            println!("✅ 配置文件有效！");
            print_config(&config);
            Ok(())
        }
        Err(e) => {
            println!("❌ 配置文件无效: {}", e);
            Err(Box::new(e))
        }
    }
}

fn print_config(config: &CoreConfig) {
    println!("────────────────────────────────────────");
    println!("  [解析器配置]");
    println!("    平台名称:       {}", config.parser.platform_name);
    println!("    平台旧别名:     {}", config.parser.legacy_alias);
    println!("    最低平台版本:   {}", config.parser.min_platform_version);
    println!("    元数据文件:     {}", config.parser.metadata_files.join(", "));
    println!();
    println!("  [日志配置]");
    println!("    日志级别:       {}", config.logging.level);
    println!("    文件输出:       {}", if config.logging.file_output { "是" } else { "否" });
    println!("    JSON 格式:      {}", if config.logging.json_format { "是" } else { "否" });
    println!("────────────────────────────────────────");
}

/// 打印版本信息
fn print_version() {
    println!("everest-meta {}", everest_core::VERSION);
    println!("  平台名称: {}", everest_core::PLATFORM_NAME);
    println!("  目标平台: {}", std::env::consts::ARCH);
    println!("  操作系统: {}", std::env::consts::OS);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => print_version(),

        Commands::CheckConfig => check_config(&cli.config).await?,

        Commands::Check { path, json } => {
            let config = load_config(&cli.config).await?;

            let mut logger_config = LoggerConfig::from_log_config(&config.logging);
            if let Some(level) = cli.log_level {
                logger_config.level = level;
            }
            let _guard = Logger::try_init(logger_config);

            run_check(&config, &path, json).await?;
        }
    }

    Ok(())
}
