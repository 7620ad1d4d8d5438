//! 健康检查自动注册
//!
//! 通过 healthchecks 管理API (`POST {base}/api/v2/checks/`) 创建或获取同名检查

use crate::config::ResolvedConfig;
use crate::error::{RegistrationError, Result};
use crate::notification::{PingRequest, PingTransport};
use serde::{Deserialize, Serialize};

/// API Key 请求头
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// 注册请求体
#[derive(Debug, Serialize)]
struct CheckPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    channels: &'a str,
    timeout: u64,
    grace: u64,
    unique: [&'a str; 1],
}

/// 注册响应
#[derive(Debug, Deserialize)]
struct CheckResponse {
    ping_url: Option<String>,
}

/// 从 ping_url 中提取uuid
///
/// uuid 位于按 `/` 切分后的第5段（下标4），例如
/// `https://hc.example.com/ping/{uuid}`
pub fn uuid_from_ping_url(ping_url: &str) -> std::result::Result<String, RegistrationError> {
    ping_url
        .split('/')
        .nth(4)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RegistrationError::MalformedPingUrl(ping_url.to_string()))
}

/// 注册健康检查并返回uuid
///
/// # 参数
/// * `transport` - HTTP传输
/// * `config` - 解析后的配置
///
/// # 返回
/// * `Result<String>` - 健康检查uuid
pub async fn register_check(transport: &dyn PingTransport, config: &ResolvedConfig) -> Result<String> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(RegistrationError::MissingApiKey)?;

    let payload = CheckPayload {
        name: config.name.as_deref(),
        channels: "*",
        timeout: config.timeout,
        grace: config.grace_period,
        unique: ["name"],
    };

    let request = PingRequest::json(config.registration_url(), serde_json::to_value(&payload)?)
        .with_header(API_KEY_HEADER, api_key);

    let response = transport.post(request).await?;
    let check: CheckResponse = serde_json::from_str(&response.body)?;
    let ping_url = check.ping_url.ok_or(RegistrationError::MissingPingUrl)?;

    Ok(uuid_from_ping_url(&ping_url)?)
}
