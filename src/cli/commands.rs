//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{Args, Commands};
use crate::config::{get_default_config_path, ConfigLoader, FileConfig, ResolvedConfig, TomlConfigLoader};
use crate::error::Result;
use crate::health::{register_check, HealthReporter, PingOutcome};
use crate::notification::HttpTransport;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 加载配置文件，命令行的 `--dry-run` 优先
async fn load_config(args: &Args) -> Result<FileConfig> {
    let path = args.config.clone().unwrap_or_else(get_default_config_path);
    let loader = TomlConfigLoader::new(true);
    let mut config = loader.load_from_file(&path).await?;
    config.dry_run |= args.dry_run;
    Ok(config)
}

/// 根据配置创建上报器，并等待自动注册结束
async fn build_reporter(config: FileConfig) -> Result<HealthReporter> {
    let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_seconds))?;
    let (health, options) = config.into_parts();
    let mut reporter = HealthReporter::new(health, options, Arc::new(transport));
    reporter.initialize().await;
    Ok(reporter)
}

fn report_outcome(outcome: PingOutcome) {
    match outcome {
        PingOutcome::Sent(status) => info!("ping已发送，状态码 {}", status),
        PingOutcome::DryRun => info!("演练模式，未发送ping"),
        PingOutcome::Disabled => warn!("未配置uuid，跳过ping"),
        PingOutcome::Failed => warn!("ping发送失败"),
    }
}

/// 生命周期ping命令（start / success / fail / log）
pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let config = load_config(args).await?;
        let mut reporter = build_reporter(config).await?;

        let outcome = match &args.command {
            Commands::Start { message } => reporter.started(message).await,
            Commands::Success { message } => reporter.success(message).await,
            Commands::Fail { message } => reporter.failed(message).await,
            Commands::Log { message } => {
                reporter.log(message);
                reporter.send_log().await
            }
            _ => return Ok(()),
        };

        report_outcome(outcome);
        Ok(())
    }
}

/// 注册命令
pub struct RegisterCommand;

#[async_trait]
impl Command for RegisterCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let config = load_config(args).await?;
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_seconds))?;
        let (health, options) = config.into_parts();
        let resolved = ResolvedConfig::resolve(health, options);

        let uuid = register_check(&transport, &resolved).await?;
        println!("{}", uuid);
        Ok(())
    }
}

/// 配置验证命令
pub struct ValidateCommand;

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let config = load_config(args).await?;
        let (health, options) = config.into_parts();
        let resolved = ResolvedConfig::resolve(health, options);

        println!("配置验证通过");
        println!("  地址: {}", resolved.address);
        println!("  类型: {}", resolved.target);
        println!("  名称: {}", resolved.name.as_deref().unwrap_or("-"));
        println!(
            "  uuid: {}",
            if resolved.uuid.is_some() {
                "已配置"
            } else if resolved.api_key.is_some() {
                "自动注册"
            } else {
                "未配置（上报已禁用）"
            }
        );
        println!("  演练模式: {}", resolved.dry_run);

        Ok(())
    }
}

/// 根据子命令选择处理器
pub fn command_for(command: &Commands) -> Box<dyn Command> {
    match command {
        Commands::Start { .. }
        | Commands::Success { .. }
        | Commands::Fail { .. }
        | Commands::Log { .. } => Box::new(PingCommand),
        Commands::Register => Box::new(RegisterCommand),
        Commands::Validate => Box::new(ValidateCommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_cli_dry_run_overrides_config() {
        let file = write_config("[health]\nuuid = \"abc\"\n");
        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from(["restake-health", "--config", &path, "--dry-run", "validate"])
            .unwrap();

        let config = load_config(&args).await.unwrap();
        assert!(config.dry_run);
        assert_eq!(config.health.uuid.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_validate_command() {
        let file = write_config("network_name = \"juno\"\n");
        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from(["restake-health", "--config", &path, "validate"]).unwrap();

        assert!(command_for(&args.command).execute(&args).await.is_ok());
    }

    #[tokio::test]
    async fn test_ping_without_uuid_succeeds() {
        let file = write_config("network_name = \"juno\"\n");
        let path = file.path().to_string_lossy().to_string();
        let args =
            Args::try_parse_from(["restake-health", "--config", &path, "fail", "broken"]).unwrap();

        assert!(command_for(&args.command).execute(&args).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_without_api_key_fails() {
        let file = write_config("[health]\nname = \"juno\"\n");
        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from(["restake-health", "--config", &path, "register"]).unwrap();

        assert!(command_for(&args.command).execute(&args).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_config_file_fails() {
        let args = Args::try_parse_from([
            "restake-health",
            "--config",
            "/nonexistent/restake/health.toml",
            "validate",
        ])
        .unwrap();

        assert!(command_for(&args.command).execute(&args).await.is_err());
    }
}
