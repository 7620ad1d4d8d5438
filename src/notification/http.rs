//! 基于reqwest的HTTP传输实现

use crate::error::TransportError;
use crate::notification::sender::{PingBody, PingRequest, PingResponse, PingTransport};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP传输
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP客户端
    client: Client,
}

impl HttpTransport {
    /// 创建新的HTTP传输
    ///
    /// # 参数
    /// * `timeout` - 单次请求超时时间
    ///
    /// # 返回
    /// * `Result<Self, TransportError>` - 传输实例
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()?;

        Ok(Self { client })
    }

    /// 使用已有的客户端创建传输
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PingTransport for HttpTransport {
    async fn post(&self, request: PingRequest) -> Result<PingResponse, TransportError> {
        debug!("发送POST请求: {}", request.url);

        let mut builder = self.client.post(&request.url);

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            builder = builder.header(name, value);
        }

        builder = match request.body {
            PingBody::Empty => builder,
            PingBody::Text(text) => builder
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(text),
            PingBody::Json(value) => builder.json(&value),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            Ok(PingResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(TransportError::Status {
                url: request.url,
                status: status.as_u16(),
                body,
            })
        }
    }
}
