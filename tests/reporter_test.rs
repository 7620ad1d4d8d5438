//! 健康上报集成测试
//!
//! 使用mockito验证注册、托管ping和webhook的请求格式

use mockito::{Matcher, Server};
use restake_health::{
    HealthConfig, HealthReporter, HttpTransport, PingAction, PingOutcome, ReporterOptions,
    TargetKind,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn transport() -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new(Duration::from_secs(5)).expect("创建HTTP传输失败"))
}

fn hosted_reporter(address: String, uuid: &str) -> HealthReporter {
    let config = HealthConfig {
        address: Some(address),
        uuid: Some(uuid.to_string()),
        name: Some("osmosis".to_string()),
        tenant: Some("validator-1".to_string()),
        ..Default::default()
    };
    HealthReporter::new(config, ReporterOptions::default(), transport())
}

fn webhook_reporter(server_url: &str) -> HealthReporter {
    let config = HealthConfig {
        address: Some(format!("{}/services/slack-hook", server_url)),
        uuid: Some(format!("{}/alerts", server_url)),
        name: Some("osmosis".to_string()),
        tenant: Some("validator-1".to_string()),
        ..Default::default()
    };
    HealthReporter::new(config, ReporterOptions::default(), transport())
}

#[tokio::test]
async fn test_registration_then_start_ping() {
    let mut server = Server::new_async().await;
    let ping_url = format!("{}/ping/XYZ123", server.url());

    let register = server
        .mock("POST", "/api/v2/checks/")
        .match_header("x-api-key", "secret")
        .match_body(Matcher::Json(json!({
            "name": "juno",
            "channels": "*",
            "timeout": 3600,
            "grace": 86400,
            "unique": ["name"]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "ping_url": ping_url }).to_string())
        .expect(1)
        .create_async()
        .await;

    let start = server
        .mock("POST", "/ping/XYZ123/start")
        .match_body("restaking now")
        .with_status(200)
        .with_body("OK")
        .expect(1)
        .create_async()
        .await;

    let config = HealthConfig {
        address: Some(server.url()),
        api_key: Some("secret".to_string()),
        timeout: Some(3600),
        ..Default::default()
    };
    let options = ReporterOptions {
        dry_run: false,
        network_name: Some("juno".to_string()),
    };

    let mut reporter = HealthReporter::new(config, options, transport());
    reporter.initialize().await;

    assert_eq!(reporter.uuid().await.as_deref(), Some("XYZ123"));
    assert_eq!(reporter.target_kind(), TargetKind::Hosted);

    let outcome = reporter.started(["restaking", "now"]).await;
    assert_eq!(outcome, PingOutcome::Sent(200));

    register.assert_async().await;
    start.assert_async().await;
}

#[tokio::test]
async fn test_registration_failure_disables_pings() {
    let mut server = Server::new_async().await;

    let register = server
        .mock("POST", "/api/v2/checks/")
        .with_status(401)
        .with_body("unauthorized")
        .expect(1)
        .create_async()
        .await;

    let any_ping = server
        .mock("POST", Matcher::Regex("^/ping".to_string()))
        .expect(0)
        .create_async()
        .await;

    let config = HealthConfig {
        address: Some(server.url()),
        api_key: Some("wrong".to_string()),
        ..Default::default()
    };
    let mut reporter = HealthReporter::new(config, ReporterOptions::default(), transport());
    reporter.initialize().await;

    assert!(reporter.uuid().await.is_none());
    assert_eq!(reporter.started(["x"]).await, PingOutcome::Disabled);
    assert_eq!(reporter.success(["x"]).await, PingOutcome::Disabled);
    assert_eq!(reporter.failed(["x"]).await, PingOutcome::Disabled);
    assert_eq!(reporter.send_log().await, PingOutcome::Disabled);

    register.assert_async().await;
    any_ping.assert_async().await;
}

#[tokio::test]
async fn test_success_sends_accumulated_logs() {
    let mut server = Server::new_async().await;

    let success = server
        .mock("POST", "/ping/abc")
        .match_header("content-type", Matcher::Regex("text/plain".to_string()))
        .match_body("a\nb\nall done")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut reporter = hosted_reporter(server.url(), "abc");
    reporter.log(["a"]);
    reporter.log(["b"]);

    assert!(reporter.success(["all", "done"]).await.is_sent());
    assert_eq!(reporter.logs(), ["a", "b"]);

    success.assert_async().await;
}

#[tokio::test]
async fn test_send_log_flushes_even_on_server_error() {
    let mut server = Server::new_async().await;

    let log = server
        .mock("POST", "/ping/abc/log")
        .match_body("line 1\nline 2")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut reporter = hosted_reporter(server.url(), "abc");
    reporter.add_logs(["line 1", "line 2"]);

    assert_eq!(reporter.send_log().await, PingOutcome::Failed);
    assert!(reporter.logs().is_empty());

    log.assert_async().await;
}

#[tokio::test]
async fn test_fail_ping_on_hosted_target() {
    let mut server = Server::new_async().await;

    let fail = server
        .mock("POST", "/ping/abc/fail")
        .match_body("claim failed: out of gas")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let reporter = hosted_reporter(server.url(), "abc");
    assert!(reporter.failed(["claim", "failed:", "out", "of", "gas"]).await.is_sent());

    fail.assert_async().await;
}

#[tokio::test]
async fn test_webhook_fail_posts_to_both_targets() {
    let mut server = Server::new_async().await;
    let expected = json!({ "text": "restake: osmosis validator-1\nfail\nboom" });

    let webhook = server
        .mock("POST", "/services/slack-hook")
        .match_body(Matcher::Json(expected.clone()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let alerts = server
        .mock("POST", "/alerts")
        .match_body(Matcher::Json(expected))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let reporter = webhook_reporter(&server.url());
    assert_eq!(reporter.target_kind(), TargetKind::Webhook);
    assert!(reporter.failed(["boom"]).await.is_sent());

    webhook.assert_async().await;
    alerts.assert_async().await;
}

#[tokio::test]
async fn test_webhook_success_posts_once() {
    let mut server = Server::new_async().await;

    let webhook = server
        .mock("POST", "/services/slack-hook")
        .match_body(Matcher::Json(json!({
            "text": "restake: osmosis validator-1\nOK\nprior\nfinished"
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let alerts = server
        .mock("POST", "/alerts")
        .expect(0)
        .create_async()
        .await;

    let mut reporter = webhook_reporter(&server.url());
    reporter.log(["prior"]);
    assert!(reporter.success(["finished"]).await.is_sent());

    webhook.assert_async().await;
    alerts.assert_async().await;
}

#[tokio::test]
async fn test_secondary_alert_failure_is_ignored() {
    let mut server = Server::new_async().await;

    let webhook = server
        .mock("POST", "/services/slack-hook")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let alerts = server
        .mock("POST", "/alerts")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let reporter = webhook_reporter(&server.url());
    assert_eq!(reporter.failed(["boom"]).await, PingOutcome::Sent(200));

    webhook.assert_async().await;
    alerts.assert_async().await;
}

#[tokio::test]
async fn test_dry_run_makes_no_requests() {
    let mut server = Server::new_async().await;

    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = HealthConfig {
        address: Some(server.url()),
        uuid: Some("abc".to_string()),
        ..Default::default()
    };
    let options = ReporterOptions {
        dry_run: true,
        network_name: None,
    };
    let reporter = HealthReporter::new(config, options, transport());

    for action in [
        PingAction::Start,
        PingAction::Success,
        PingAction::Fail,
        PingAction::Log,
    ] {
        assert_eq!(reporter.ping(action, vec!["x".to_string()]).await, PingOutcome::DryRun);
    }

    any.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_endpoint_never_errors() {
    // 端口1上没有监听者
    let mut reporter = hosted_reporter("http://127.0.0.1:1".to_string(), "abc");

    assert_eq!(reporter.started(["x"]).await, PingOutcome::Failed);
    assert_eq!(reporter.success(["x"]).await, PingOutcome::Failed);
    assert_eq!(reporter.failed(["x"]).await, PingOutcome::Failed);
    assert_eq!(reporter.send_log().await, PingOutcome::Failed);
}
