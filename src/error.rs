//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Restake Health 的主要错误类型
#[derive(Error, Debug)]
pub enum HealthError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// HTTP传输错误
    #[error("传输错误: {0}")]
    Transport(#[from] TransportError),

    /// 健康检查注册错误
    #[error("注册错误: {0}")]
    Registration(#[from] RegistrationError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// HTTP传输错误类型
#[derive(Error, Debug)]
pub enum TransportError {
    /// 请求发送失败（网络错误、超时等）
    #[error("HTTP请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 非2xx响应
    #[error("请求 {url} 返回状态码 {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// 无效的请求头
    #[error("无效的请求头: {0}")]
    InvalidHeader(String),
}

/// 健康检查注册错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    /// 未配置API Key
    #[error("未配置API Key，无法注册健康检查")]
    MissingApiKey,

    /// 响应中缺少 ping_url
    #[error("注册响应中缺少 ping_url")]
    MissingPingUrl,

    /// ping_url 无法解析出uuid
    #[error("无法从 ping_url 中解析uuid: {0}")]
    MalformedPingUrl(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, HealthError>;
