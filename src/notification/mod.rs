//! 通知模块
//!
//! 提供ping请求的传输抽象、HTTP实现和消息体构建

pub mod http;
pub mod message;
pub mod sender;

// 重新导出主要类型
pub use http::HttpTransport;
pub use sender::{PingBody, PingRequest, PingResponse, PingTransport};
