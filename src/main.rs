//! Restake Health 主程序入口
//!
//! 从命令行向监控服务发送健康状态ping

use anyhow::{Context, Result};
use clap::Parser;
use restake_health::cli::{command_for, Args};
use restake_health::logging::{LogConfig, LoggingSystem};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        console: true,
        json_format: args.json_logs,
        ..Default::default()
    };

    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    debug!("{} v{} 启动", restake_health::APP_NAME, restake_health::VERSION);

    if let Err(e) = command_for(&args.command).execute(&args).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
