//! 配置管理模块
//!
//! 提供健康检查配置的解析、缺省值填充和地址规范化功能

pub mod loader;
pub mod types;

// 重新导出主要类型
pub use loader::{get_default_config_path, ConfigLoader, TomlConfigLoader};
pub use types::{
    normalize_address, validate_config, FileConfig, HealthConfig, ReporterOptions,
    ResolvedConfig, TargetKind,
};
