use httpmock::prelude::*;
use k8s_readycheck::{HttpApiClient, ProbeConfig, ProbeMode, Readiness, ReadinessChecker};
use std::time::{Duration, Instant};

fn config_for(server: &MockServer, mode: ProbeMode) -> ProbeConfig {
    ProbeConfig {
        host: server.host(),
        port: server.port(),
        timeout_secs: 2,
        mode,
        ..ProbeConfig::default()
    }
}

async fn check(config: &ProbeConfig) -> Readiness {
    let client = HttpApiClient::new(config).unwrap();
    ReadinessChecker::new(client, config.mode).check().await
}

#[tokio::test]
async fn test_ping_partitions_success_is_ready() {
    let server = MockServer::start_async().await;
    let ping_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@PingPartitions")
                .query_param("Parameters", "[0]");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"status": 1, "statusstring": "SUCCESS", "results": {}}));
        })
        .await;

    let readiness = check(&config_for(&server, ProbeMode::Partitions)).await;

    assert_eq!(readiness, Readiness::Ready);
    ping_mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_not_ready() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.0/");
            then.status(200).json_body(serde_json::json!({
                "status": -1,
                "statusstring": "Server is paused and is available in read-only mode"
            }));
        })
        .await;

    let readiness = check(&config_for(&server, ProbeMode::Partitions)).await;

    assert_eq!(
        readiness,
        Readiness::not_ready("-1 Server is paused and is available in read-only mode")
    );
}

#[tokio::test]
async fn test_malformed_body_is_not_ready() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.0/");
            then.status(200).body("<html>Service Unavailable</html>");
        })
        .await;

    let readiness = check(&config_for(&server, ProbeMode::Partitions)).await;

    assert_eq!(readiness.exit_code(), 1);
    match readiness {
        Readiness::NotReady { diagnostic } => {
            assert!(diagnostic.contains("unexpected procedure response"))
        }
        Readiness::Ready => panic!("malformed body reported ready"),
    }
}

#[tokio::test]
async fn test_http_error_is_not_ready() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.0/");
            then.status(401).body("Unauthorized");
        })
        .await;

    let readiness = check(&config_for(&server, ProbeMode::Partitions)).await;

    assert_eq!(readiness, Readiness::not_ready("API returned HTTP 401: Unauthorized"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_not_ready() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ProbeConfig {
        host: "127.0.0.1".to_string(),
        port,
        timeout_secs: 2,
        ..ProbeConfig::default()
    };

    assert!(!check(&config).await.is_ready());
}

#[tokio::test]
async fn test_stalled_endpoint_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.0/");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(serde_json::json!({"status": 1}));
        })
        .await;

    let config = ProbeConfig {
        timeout_secs: 1,
        ..config_for(&server, ProbeMode::Partitions)
    };
    let started = Instant::now();
    let readiness = check(&config).await;

    assert!(!readiness.is_ready());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_credentials_are_sent_as_query_parameters() {
    let server = MockServer::start_async().await;
    let ping_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("User", "operator")
                .query_param("Password", "secret");
            then.status(200).json_body(serde_json::json!({"status": 1}));
        })
        .await;

    let config = ProbeConfig {
        user: Some("operator".to_string()),
        password: Some("secret".to_string()),
        ..config_for(&server, ProbeMode::Partitions)
    };

    assert!(check(&config).await.is_ready());
    ping_mock.assert_async().await;
}

#[tokio::test]
async fn test_repeated_invocations_give_same_result() {
    let server = MockServer::start_async().await;
    let ping_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.0/");
            then.status(200).json_body(serde_json::json!({"status": -2, "statusstring": "busy"}));
        })
        .await;

    let config = config_for(&server, ProbeMode::Partitions);
    for _ in 0..3 {
        assert_eq!(check(&config).await, Readiness::not_ready("-2 busy"));
    }
    ping_mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_replication_mode_checks_drrole() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@PingPartitions");
            then.status(200).json_body(serde_json::json!({"status": 1}));
        })
        .await;
    let drrole_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@Statistics")
                .query_param("Parameters", r#"["DRROLE",0]"#);
            then.status(200).json_body(serde_json::json!({
                "status": 1,
                "results": {"0": [
                    {"ROLE": "MASTER", "STATE": "ACTIVE", "REMOTE_CLUSTER_ID": 1},
                    {"ROLE": "MASTER", "STATE": "STOPPED", "REMOTE_CLUSTER_ID": 4}
                ]}
            }));
        })
        .await;

    let readiness = check(&config_for(&server, ProbeMode::Replication)).await;

    drrole_mock.assert_async().await;
    assert_eq!(
        readiness,
        Readiness::not_ready(
            "role=MASTER state=STOPPED remote_cluster_id=4\nDatabase replication is NOT syncing"
        )
    );
}

#[tokio::test]
async fn test_replication_mode_without_dr_is_ready() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@PingPartitions");
            then.status(200).json_body(serde_json::json!({"status": 1}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@Statistics");
            then.status(200).json_body(serde_json::json!({
                "status": 1,
                "results": {"0": [{"ROLE": "NONE", "STATE": "DISABLED", "REMOTE_CLUSTER_ID": -1}]}
            }));
        })
        .await;

    assert!(check(&config_for(&server, ProbeMode::Replication)).await.is_ready());
}

#[tokio::test]
async fn test_replication_mode_reads_positional_tables() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/1.0/")
                .query_param("Procedure", "@PingPartitions");
            then.status(200).json_body(serde_json::json!({"status": 1, "results": []}));
        })
        .await;
    let drrole_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/1.0/")
                .query_param("Procedure", "@Statistics");
            then.status(200).json_body(serde_json::json!({
                "status": 1,
                "results": [{
                    "status": -128,
                    "schema": [{"name": "ROLE", "type": 9}, {"name": "STATE", "type": 9}],
                    "data": [["XDCR", "ACTIVE"], ["NONE", "DISABLED"]]
                }]
            }));
        })
        .await;

    let config = ProbeConfig {
        api_version: "1.0".to_string(),
        ..config_for(&server, ProbeMode::Replication)
    };

    assert_eq!(check(&config).await, Readiness::Ready);
    drrole_mock.assert_async().await;
}

#[tokio::test]
async fn test_replication_procedure_failure_reports_statistics_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@PingPartitions");
            then.status(200).json_body(serde_json::json!({"status": 1}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/2.0/")
                .query_param("Procedure", "@Statistics");
            then.status(200)
                .json_body(serde_json::json!({"status": -2, "statusstring": "Invalid selector"}));
        })
        .await;

    let readiness = check(&config_for(&server, ProbeMode::Replication)).await;

    assert_eq!(readiness, Readiness::not_ready("@Statistics failed: -2 Invalid selector"));
}
