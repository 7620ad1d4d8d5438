//! 配置数据结构定义
//!
//! 定义健康上报的配置结构体、默认值和地址规范化逻辑

use serde::{Deserialize, Serialize};

/// 默认的托管ping服务地址
pub const DEFAULT_ADDRESS: &str = "https://hc-ping.com";

/// 默认超时时间（秒），24小时
pub const DEFAULT_TIMEOUT_SECS: u64 = 86400;

/// 默认宽限期（秒），24小时
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 86400;

/// 健康检查配置
///
/// 所有字段均可省略，缺省值在 [`ResolvedConfig::resolve`] 中统一填充
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthConfig {
    /// 被监控实体的标识（例如验证人名称），仅用于消息文本
    pub tenant: Option<String>,
    /// 监控服务地址
    pub address: Option<String>,
    /// 健康检查uuid
    pub uuid: Option<String>,
    /// 健康检查显示名称
    pub name: Option<String>,
    /// 用于自动注册健康检查的API Key
    #[serde(alias = "apiKey")]
    pub api_key: Option<String>,
    /// 期望的ping周期（秒）
    pub timeout: Option<u64>,
    /// 宽限期（秒）
    #[serde(alias = "gracePeriod")]
    pub grace_period: Option<u64>,
}

/// 上报器运行选项
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReporterOptions {
    /// 是否为演练模式（只记录不发送）
    #[serde(default)]
    pub dry_run: bool,
    /// 网络名称，name 缺省时作为显示名称
    pub network_name: Option<String>,
}

/// 上报目标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// healthchecks.io 风格的ping接口
    Hosted,
    /// 聊天工具的 incoming webhook
    Webhook,
}

impl TargetKind {
    /// 根据（已规范化的）地址判断目标类型
    pub fn from_address(address: &str) -> Self {
        if address.contains("hc-ping") || address.ends_with("/ping") {
            TargetKind::Hosted
        } else {
            TargetKind::Webhook
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Hosted => write!(f, "hosted"),
            TargetKind::Webhook => write!(f, "webhook"),
        }
    }
}

/// 规范化用户提供的监控地址
///
/// 自建的 healthchecks 实例需要 `/ping` 前缀（`https://hc.example.com/ping/{uuid}`），
/// 而 slack 一类的 webhook 地址保持原样。已经以 `/ping` 结尾的地址不会重复追加。
pub fn normalize_address(address: &str) -> String {
    if address.contains("slack") {
        return address.to_string();
    }

    let trimmed = address.trim_end_matches('/');
    if trimmed.ends_with("/ping") {
        trimmed.to_string()
    } else {
        format!("{}/ping", trimmed)
    }
}

/// 解析后的完整配置，构造时一次性确定所有缺省值
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// 被监控实体标识
    pub tenant: Option<String>,
    /// 显示名称
    pub name: Option<String>,
    /// 规范化后的ping地址
    pub address: String,
    /// 注册接口使用的基础地址（不带 `/ping`）
    pub registration_base: String,
    /// 目标类型
    pub target: TargetKind,
    /// 健康检查uuid
    pub uuid: Option<String>,
    /// API Key
    pub api_key: Option<String>,
    /// 超时时间（秒）
    pub timeout: u64,
    /// 宽限期（秒）
    pub grace_period: u64,
    /// 是否为演练模式
    pub dry_run: bool,
}

impl ResolvedConfig {
    /// 合并配置与选项，填充缺省值
    pub fn resolve(config: HealthConfig, options: ReporterOptions) -> Self {
        let supplied = non_empty(config.address);

        let (address, registration_base) = match supplied {
            Some(address) => {
                let normalized = normalize_address(&address);
                let base = address
                    .trim_end_matches('/')
                    .trim_end_matches("/ping")
                    .to_string();
                (normalized, base)
            }
            None => (DEFAULT_ADDRESS.to_string(), DEFAULT_ADDRESS.to_string()),
        };

        Self {
            tenant: config.tenant,
            name: non_empty(config.name).or(non_empty(options.network_name)),
            target: TargetKind::from_address(&address),
            address,
            registration_base,
            uuid: non_empty(config.uuid),
            api_key: non_empty(config.api_key),
            timeout: config
                .timeout
                .filter(|t| *t > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            grace_period: config
                .grace_period
                .filter(|g| *g > 0)
                .unwrap_or(DEFAULT_GRACE_PERIOD_SECS),
            dry_run: options.dry_run,
        }
    }

    /// 注册接口完整地址
    pub fn registration_url(&self) -> String {
        format!("{}/api/v2/checks/", self.registration_base)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 配置文件结构（命令行工具使用）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// 网络名称
    pub network_name: Option<String>,
    /// 是否为演练模式
    #[serde(default)]
    pub dry_run: bool,
    /// HTTP请求超时时间（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// 健康检查配置
    #[serde(default)]
    pub health: HealthConfig,
}

fn default_request_timeout() -> u64 {
    30
}

impl FileConfig {
    /// 拆分为上报器所需的配置和选项
    pub fn into_parts(self) -> (HealthConfig, ReporterOptions) {
        (
            self.health,
            ReporterOptions {
                dry_run: self.dry_run,
                network_name: self.network_name,
            },
        )
    }
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &FileConfig) -> Result<(), String> {
    if config.request_timeout_seconds == 0 {
        return Err("请求超时时间不能为0".to_string());
    }

    if let Some(address) = &config.health.address {
        if !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(format!("监控地址格式无效: {}", address));
        }
    }

    if let Some(uuid) = &config.health.uuid {
        if uuid.trim().is_empty() {
            return Err("uuid 不能为空字符串".to_string());
        }
    }

    if let Some(api_key) = &config.health.api_key {
        if api_key.trim().is_empty() {
            return Err("api_key 不能为空字符串".to_string());
        }
    }

    Ok(())
}
