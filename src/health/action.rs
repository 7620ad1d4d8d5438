//! ping动作与结果定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// ping动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PingAction {
    /// 任务开始
    Start,
    /// 任务成功（URL中不带动作段）
    Success,
    /// 任务失败
    Fail,
    /// 仅上报日志
    Log,
}

impl PingAction {
    /// 托管ping URL中的动作段，成功时为空
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            PingAction::Start => Some("start"),
            PingAction::Success => None,
            PingAction::Fail => Some("fail"),
            PingAction::Log => Some("log"),
        }
    }

    /// webhook消息中的状态文本
    pub fn status_label(&self) -> &'static str {
        self.path_segment().unwrap_or("OK")
    }
}

impl fmt::Display for PingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_label())
    }
}

/// 一次ping的结果
///
/// 发送失败只会被记录到日志，不会向调用方返回错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingOutcome {
    /// 未配置uuid，上报被禁用
    Disabled,
    /// 演练模式，未发送
    DryRun,
    /// 主请求已发送，附带HTTP状态码
    Sent(u16),
    /// 主请求发送失败
    Failed,
}

impl PingOutcome {
    /// 主请求是否发送成功
    pub fn is_sent(&self) -> bool {
        matches!(self, PingOutcome::Sent(_))
    }
}
