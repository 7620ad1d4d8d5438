//! Restake Health - 健康状态上报客户端
//!
//! 向 healthchecks.io 兼容的监控服务（或聊天工具 webhook）上报定时任务的运行状态：
//! - 通过API Key自动注册健康检查
//! - 开始 / 成功 / 失败 / 日志 四类ping
//! - 累积日志随成功、失败ping一起上报
//! - 演练模式下只记录不发送
//!
//! 上报失败只会记录日志，永远不会影响被监控的任务。

pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod notification;

// 重新导出主要类型
pub use config::{HealthConfig, ReporterOptions, TargetKind};
pub use error::HealthError;
pub use health::{HealthReporter, PingAction, PingOutcome};
pub use notification::{HttpTransport, PingTransport};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
