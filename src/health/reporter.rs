//! 健康状态上报器
//!
//! 向 healthchecks 兼容服务或聊天 webhook 上报任务的开始、成功、失败和日志

use crate::config::{HealthConfig, ReporterOptions, ResolvedConfig, TargetKind};
use crate::error::Result;
use crate::health::action::{PingAction, PingOutcome};
use crate::health::registration;
use crate::notification::message::{hosted_body, join_parts, webhook_body};
use crate::notification::{PingRequest, PingTransport};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 自动注册任务的状态
#[derive(Debug)]
enum Registration {
    /// 尚未开始（无API Key，或构造时不在tokio运行时中）
    Idle,
    /// 后台注册进行中
    Pending(JoinHandle<()>),
    /// 已结束
    Done,
}

/// 健康状态上报器
///
/// 每次任务运行构造一个实例。未配置uuid且注册未成功时，所有上报均为空操作。
pub struct HealthReporter {
    /// 解析后的配置（uuid 单独存放）
    config: ResolvedConfig,
    /// 健康检查uuid，后台注册成功后写入
    uuid: Arc<RwLock<Option<String>>>,
    /// 累积的日志行
    logs: Vec<String>,
    /// HTTP传输
    transport: Arc<dyn PingTransport>,
    /// 自动注册状态
    registration: Registration,
}

impl HealthReporter {
    /// 创建上报器
    ///
    /// 配置了API Key时会在后台启动自动注册，构造本身不会等待网络请求，
    /// 需要等待注册结果时调用 [`HealthReporter::initialize`]。
    ///
    /// # 参数
    /// * `config` - 健康检查配置
    /// * `options` - 运行选项
    /// * `transport` - HTTP传输
    pub fn new(
        config: HealthConfig,
        options: ReporterOptions,
        transport: Arc<dyn PingTransport>,
    ) -> Self {
        let mut config = ResolvedConfig::resolve(config, options);
        let uuid = Arc::new(RwLock::new(config.uuid.take()));

        let mut reporter = Self {
            config,
            uuid,
            logs: Vec::new(),
            transport,
            registration: Registration::Idle,
        };

        if reporter.config.api_key.is_some() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let transport = Arc::clone(&reporter.transport);
                let config = reporter.config.clone();
                let uuid = Arc::clone(&reporter.uuid);
                reporter.registration = Registration::Pending(handle.spawn(async move {
                    Self::run_registration(transport.as_ref(), &config, &uuid).await;
                }));
            }
        }

        reporter
    }

    /// 等待自动注册完成
    ///
    /// 构造时不在tokio运行时中的，注册在这里执行。多次调用是安全的。
    pub async fn initialize(&mut self) {
        match std::mem::replace(&mut self.registration, Registration::Done) {
            Registration::Pending(handle) => {
                if let Err(e) = handle.await {
                    warn!("Health check creation failed: {}", e);
                }
            }
            Registration::Idle if self.config.api_key.is_some() => {
                Self::run_registration(self.transport.as_ref(), &self.config, &self.uuid).await;
            }
            Registration::Idle | Registration::Done => {}
        }
    }

    /// 执行注册，失败时保留原有uuid
    async fn run_registration(
        transport: &dyn PingTransport,
        config: &ResolvedConfig,
        uuid: &RwLock<Option<String>>,
    ) {
        match registration::register_check(transport, config).await {
            Ok(id) => {
                info!("Health check registered: {}", id);
                *uuid.write().await = Some(id);
            }
            Err(e) => warn!("Health check creation failed: {}", e),
        }
    }

    /// 显式注册健康检查，返回错误而不是只记录日志
    pub async fn register_check(&self) -> Result<String> {
        let id = registration::register_check(self.transport.as_ref(), &self.config).await?;
        *self.uuid.write().await = Some(id.clone());
        Ok(id)
    }

    /// 上报任务开始
    pub async fn started<I>(&self, parts: I) -> PingOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let message = join_parts(parts);
        info!("{}", message);
        if let Some(uuid) = self.uuid().await {
            info!("Starting health {}/{}", self.config.address, uuid);
        }
        self.ping(PingAction::Start, vec![message]).await
    }

    /// 上报任务成功，携带累积日志，不清空日志
    pub async fn success<I>(&self, parts: I) -> PingOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let message = join_parts(parts);
        info!("{}", message);
        self.ping(PingAction::Success, self.logs_with(message)).await
    }

    /// 上报任务失败，携带累积日志，不清空日志
    pub async fn failed<I>(&self, parts: I) -> PingOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let message = join_parts(parts);
        info!("{}", message);
        self.ping(PingAction::Fail, self.logs_with(message)).await
    }

    /// 追加一行日志
    pub fn log<I>(&mut self, parts: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let message = join_parts(parts);
        info!("{}", message);
        self.logs.push(message);
    }

    /// 按顺序追加外部日志
    pub fn add_logs<I>(&mut self, logs: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.logs.extend(logs.into_iter().map(Into::into));
    }

    /// 以 `log` 动作发送累积日志，然后无条件清空
    pub async fn send_log(&mut self) -> PingOutcome {
        let lines = std::mem::take(&mut self.logs);
        self.ping(PingAction::Log, lines).await
    }

    /// 发送ping
    ///
    /// 发送失败只记录日志，不会返回错误。
    ///
    /// # 参数
    /// * `action` - ping动作
    /// * `lines` - 请求体日志行
    ///
    /// # 返回
    /// * `PingOutcome` - 主请求的结果
    pub async fn ping(&self, action: PingAction, lines: Vec<String>) -> PingOutcome {
        let Some(uuid) = self.uuid().await else {
            return PingOutcome::Disabled;
        };

        if self.config.dry_run {
            info!("DRYRUN: Skipping health check ping");
            return PingOutcome::DryRun;
        }

        match self.config.target {
            TargetKind::Hosted => {
                let url = match action.path_segment() {
                    Some(segment) => format!("{}/{}/{}", self.config.address, uuid, segment),
                    None => format!("{}/{}", self.config.address, uuid),
                };
                let request = PingRequest::text(url, hosted_body(&lines));
                self.send(request, "Health ping failed").await
            }
            TargetKind::Webhook => {
                let body = webhook_body(
                    self.config.name.as_deref(),
                    self.config.tenant.as_deref(),
                    action.status_label(),
                    &lines,
                );
                let primary = PingRequest::json(self.config.address.clone(), body.clone());

                if action == PingAction::Fail {
                    // 失败告警额外发送到uuid字段中配置的地址
                    let extra = PingRequest::json(uuid, body);
                    let (outcome, _) = tokio::join!(
                        self.send(primary, "Health ping failed"),
                        self.send(extra, "Health extra ping failed")
                    );
                    outcome
                } else {
                    self.send(primary, "Health ping failed").await
                }
            }
        }
    }

    async fn send(&self, request: PingRequest, context: &str) -> PingOutcome {
        match self.transport.post(request).await {
            Ok(response) => PingOutcome::Sent(response.status),
            Err(e) => {
                warn!("{}: {}", context, e);
                PingOutcome::Failed
            }
        }
    }

    fn logs_with(&self, message: String) -> Vec<String> {
        let mut lines = self.logs.clone();
        lines.push(message);
        lines
    }

    /// 当前的健康检查uuid
    pub async fn uuid(&self) -> Option<String> {
        self.uuid.read().await.clone()
    }

    /// 累积的日志行
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// 规范化后的上报地址
    pub fn address(&self) -> &str {
        &self.config.address
    }

    /// 上报目标类型
    pub fn target_kind(&self) -> TargetKind {
        self.config.target
    }

    /// 健康检查名称
    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    /// 是否为演练模式
    pub fn is_dry_run(&self) -> bool {
        self.config.dry_run
    }
}

impl std::fmt::Debug for HealthReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthReporter")
            .field("address", &self.config.address)
            .field("target", &self.config.target)
            .field("name", &self.config.name)
            .field("tenant", &self.config.tenant)
            .field("dry_run", &self.config.dry_run)
            .field("logs", &self.logs.len())
            .finish()
    }
}
