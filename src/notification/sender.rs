//! 传输层定义
//!
//! 定义发送ping请求的trait及请求/响应结构

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// 请求体
#[derive(Debug, Clone, PartialEq)]
pub enum PingBody {
    /// 空请求体
    Empty,
    /// 纯文本请求体
    Text(String),
    /// JSON请求体
    Json(Value),
}

/// 一次POST请求
#[derive(Debug, Clone, PartialEq)]
pub struct PingRequest {
    /// 目标URL
    pub url: String,
    /// 额外的请求头
    pub headers: Vec<(String, String)>,
    /// 请求体
    pub body: PingBody,
}

impl PingRequest {
    /// 创建纯文本请求
    pub fn text(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: PingBody::Text(body.into()),
        }
    }

    /// 创建JSON请求
    pub fn json(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: PingBody::Json(body),
        }
    }

    /// 添加请求头
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 按名称查找请求头（不区分大小写）
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// 成功（2xx）响应
#[derive(Debug, Clone, PartialEq)]
pub struct PingResponse {
    /// HTTP状态码
    pub status: u16,
    /// 响应体文本
    pub body: String,
}

/// ping传输trait
///
/// 实现方需要对非2xx响应返回 [`TransportError::Status`]
#[async_trait]
pub trait PingTransport: Send + Sync {
    /// 发送POST请求
    ///
    /// # 参数
    /// * `request` - 请求内容
    ///
    /// # 返回
    /// * `Result<PingResponse, TransportError>` - 响应或错误
    async fn post(&self, request: PingRequest) -> Result<PingResponse, TransportError>;
}
