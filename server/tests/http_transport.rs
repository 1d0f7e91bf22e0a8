use std::time::Duration;

use serde_json::json;
use tokio::{net::TcpListener, task::JoinHandle, time::timeout};
use tokio_util::sync::CancellationToken;
use unity_material_mcp::{config::ServerConfig, mcp::service::McpService};

struct RunningHttp {
    base: String,
    shutdown: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningHttp {
    async fn stop(self) -> anyhow::Result<()> {
        self.shutdown.cancel();
        timeout(Duration::from_secs(5), self.handle).await???;
        Ok(())
    }
}

async fn start_on_listener(path: &str) -> anyhow::Result<RunningHttp> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let base = format!("http://{}", listener.local_addr()?);
    let shutdown = CancellationToken::new();

    let path = path.to_string();
    let token = shutdown.clone();
    let handle = tokio::spawn(async move {
        McpService::new()
            .serve_http_on(listener, &path, token)
            .await
    });

    Ok(RunningHttp {
        base,
        shutdown,
        handle,
    })
}

/// Posts a JSON-RPC `initialize` and reads the body until the result arrives.
/// The body may be plain JSON or an SSE stream that stays open.
async fn initialize(url: &str) -> anyhow::Result<(reqwest::StatusCode, String)> {
    let client = reqwest::Client::new();
    let mut resp = client
        .post(url)
        .header("Accept", "application/json, text/event-stream")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "http-transport-test", "version": "0.0.0" }
            }
        }))
        .send()
        .await?;

    let status = resp.status();
    let mut body = String::new();
    while !body.contains("\"capabilities\"") {
        match timeout(Duration::from_secs(5), resp.chunk()).await?? {
            Some(chunk) => body.push_str(&String::from_utf8_lossy(&chunk)),
            None => break,
        }
    }
    Ok((status, body))
}

fn assert_initialize_result(status: reqwest::StatusCode, body: &str) {
    assert_eq!(status, reqwest::StatusCode::OK, "body: {body}");
    assert!(body.contains("\"tools\""), "tools capability missing: {body}");
    assert!(body.contains("unity-material-mcp"), "server name missing: {body}");
}

#[tokio::test(flavor = "multi_thread")]
async fn nested_mount_answers_initialize() -> anyhow::Result<()> {
    let server = start_on_listener("/mcp").await?;

    let (status, body) = initialize(&format!("{}/mcp", server.base)).await?;
    assert_initialize_result(status, &body);

    server.stop().await
}

#[tokio::test(flavor = "multi_thread")]
async fn root_mount_answers_initialize() -> anyhow::Result<()> {
    let server = start_on_listener("/").await?;

    let (status, body) = initialize(&format!("{}/", server.base)).await?;
    assert_initialize_result(status, &body);

    server.stop().await
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_path_is_honored() -> anyhow::Result<()> {
    // Reserve a free port, then hand it to the config.
    let port = TcpListener::bind(("127.0.0.1", 0)).await?.local_addr()?.port();
    let config = ServerConfig::from_map([
        (ServerConfig::ENV_TRANSPORT.to_string(), "http".to_string()),
        (ServerConfig::ENV_BIND.to_string(), format!("127.0.0.1:{port}")),
        (ServerConfig::ENV_HTTP_PATH.to_string(), "unity/mcp".to_string()),
    ]);
    assert_eq!(config.http_path, "/unity/mcp");

    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    let cfg = config.clone();
    let handle = tokio::spawn(async move { McpService::new().serve_http(&cfg, token).await });
    let server = RunningHttp {
        base: format!("http://{}", config.bind),
        shutdown,
        handle,
    };

    // The listener is bound inside the spawned task.
    let url = format!("{}/unity/mcp", server.base);
    let mut attempt = 0;
    let (status, body) = loop {
        match initialize(&url).await {
            Ok(out) => break out,
            Err(_) if attempt < 20 => {
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Err(e) => return Err(e),
        }
    };
    assert_initialize_result(status, &body);

    let (status, _) = initialize(&format!("{}/mcp", server.base)).await?;
    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);

    server.stop().await
}
