//! 文档库批量导入工具
//!
//! 扫描文档目录中的 PDF 并登记为文档，已登记的文件会被跳过。
//!
//! 用法：
//!   umc-ingest                      # 扫描配置中的 repository.library_dir
//!   umc-ingest --dir ./biblioteca   # 指定目录
//!   umc-ingest --dry-run --json     # 只分析不写入（不建库、不迁移），输出 JSON 报告

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, warn};

use umc_portal::config::AppConfig;
use umc_portal::ingestion::{IngestOptions, run_ingestion};

#[derive(Parser)]
#[command(name = "umc-ingest")]
#[command(about = "Register the PDF files of the library directory as repository documents")]
#[command(version)]
struct Args {
    /// 要扫描的目录，默认使用配置中的 repository.library_dir
    #[arg(long, env = "REPOSITORY_DIR")]
    dir: Option<PathBuf>,

    /// 只读取元数据、分类和匹配作者，不写数据库；数据库必须已存在，不会建库或迁移
    #[arg(long)]
    dry_run: bool,

    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,
}

fn init_logging(config: &AppConfig) {
    // 日志写到 stderr，stdout 只输出报告
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to load configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();
    init_logging(config);

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider already installed");
    }

    let opened = if args.dry_run {
        umc_portal::storage::open_existing_storage().await
    } else {
        umc_portal::storage::create_storage().await
    };
    let storage = match opened {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to create storage backend: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = IngestOptions {
        library_dir: args
            .dir
            .unwrap_or_else(|| PathBuf::from(&config.repository.library_dir)),
        dry_run: args.dry_run,
    };

    let report = match run_ingestion(storage.as_ref(), &config.repository, &options).await {
        Ok(report) => report,
        Err(e) => {
            error!("Ingestion aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{report}");
    }

    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
