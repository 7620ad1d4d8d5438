//! 健康上报模块
//!
//! 提供健康检查自动注册、生命周期ping和日志上报功能

pub mod action;
pub mod registration;
pub mod reporter;

// 重新导出主要类型
pub use action::{PingAction, PingOutcome};
pub use registration::{register_check, uuid_from_ping_url};
pub use reporter::HealthReporter;
