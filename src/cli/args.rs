//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Restake Health - healthchecks 兼容的健康状态上报工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "restake-health",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "RESTAKE_HEALTH_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "RESTAKE_HEALTH_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 是否使用JSON格式日志
    #[arg(long, help = "使用JSON格式输出日志")]
    pub json_logs: bool,

    /// 演练模式，覆盖配置文件中的设置
    #[arg(long, help = "演练模式，只记录不发送")]
    pub dry_run: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 上报任务开始
    Start {
        /// 消息内容
        #[arg(value_name = "MESSAGE")]
        message: Vec<String>,
    },

    /// 上报任务成功
    Success {
        /// 消息内容
        #[arg(value_name = "MESSAGE")]
        message: Vec<String>,
    },

    /// 上报任务失败
    Fail {
        /// 消息内容
        #[arg(value_name = "MESSAGE")]
        message: Vec<String>,
    },

    /// 上报一行日志
    Log {
        /// 日志内容
        #[arg(value_name = "MESSAGE")]
        message: Vec<String>,
    },

    /// 注册健康检查并输出uuid
    Register,

    /// 验证配置文件
    Validate,
}
