//! 消息体构建
//!
//! 托管ping使用换行拼接的纯文本，webhook使用 `{"text": ...}` 格式的JSON

use serde_json::{json, Value};

/// 消息前缀
pub const MESSAGE_PREFIX: &str = "restake";

/// 用单个空格拼接消息片段
pub fn join_parts<I>(parts: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 托管ping的纯文本请求体
pub fn hosted_body(lines: &[String]) -> String {
    lines.join("\n")
}

/// webhook消息文本
///
/// 格式为 `restake: {name} {tenant}\n{status}\n{logs}`，缺失的名称按空字符串处理
pub fn webhook_text(name: Option<&str>, tenant: Option<&str>, status: &str, lines: &[String]) -> String {
    format!(
        "{}: {} {}\n{}\n{}",
        MESSAGE_PREFIX,
        name.unwrap_or_default(),
        tenant.unwrap_or_default(),
        status,
        lines.join("\n")
    )
}

/// webhook的JSON请求体
pub fn webhook_body(name: Option<&str>, tenant: Option<&str>, status: &str, lines: &[String]) -> Value {
    json!({ "text": webhook_text(name, tenant, status, lines) })
}
